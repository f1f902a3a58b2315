//! Payload accepted by the fulfilment API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shipsync_core::OrderId;

/// One order, flattened for the fulfilment API. Field names are the wire
/// contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub id: OrderId,
    pub variable_symbol: String,
    pub name: String,
    pub email: String,
    pub street: String,
    /// Lower-cased country code.
    pub country: String,
    pub city: String,
    #[serde(rename = "psc")]
    pub postal_code: String,
    pub phone: Option<String>,
    pub invoice_link: String,
    /// Amount to collect on delivery; integer `0` unless paid by a COD method.
    #[serde(with = "cod_amount")]
    pub cod: Decimal,
    pub parcel_service: Option<String>,
    #[serde(
        rename = "_embedded",
        default,
        skip_serializing_if = "EmbeddedItems::is_empty"
    )]
    pub embedded: EmbeddedItems,
}

/// Non-zero amounts go out as JSON floats, zero as the integer `0`.
mod cod_amount {
    use rust_decimal::Decimal;
    use rust_decimal::prelude::ToPrimitive;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_zero() {
            return serializer.serialize_u8(0);
        }
        match value.to_f64() {
            Some(amount) => serializer.serialize_f64(amount),
            None => Err(<S::Error as serde::ser::Error>::custom(format!(
                "cod amount out of range: {value}"
            ))),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedItems {
    pub items: Vec<PayloadItem>,
}

impl EmbeddedItems {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadItem {
    /// Product SKU; `null` when the product could not be resolved.
    pub id: Option<String>,
    pub qty: i64,
}
