use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de};

use shipsync_core::{DomainError, OrderId, ValueObject};

use crate::meta::OrderMeta;

/// Order status lifecycle as recorded by the shop.
///
/// Deserializes through [`FromStr`], so stored `wc-` prefixed values load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Processing,
    OnHold,
    Completed,
    Cancelled,
    Refunded,
    Failed,
    CheckoutDraft,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::OnHold => "on-hold",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
            OrderStatus::Failed => "failed",
            OrderStatus::CheckoutDraft => "checkout-draft",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Stores sometimes keep the status with a `wc-` prefix.
        let s = s.strip_prefix("wc-").unwrap_or(s);
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "on-hold" => Ok(OrderStatus::OnHold),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "refunded" => Ok(OrderStatus::Refunded),
            "failed" => Ok(OrderStatus::Failed),
            "checkout-draft" => Ok(OrderStatus::CheckoutDraft),
            other => Err(DomainError::validation(format!("unknown order status: {other}"))),
        }
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Where the parcel goes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub address_1: String,
    pub address_2: String,
    pub city: String,
    /// Region / state / county.
    pub state: String,
    pub postcode: String,
    /// ISO country code as entered by the shop (usually upper case).
    pub country: String,
}

impl ValueObject for ShippingAddress {}

/// Contact and payment details of the buyer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingDetails {
    pub email: String,
    pub phone: String,
    /// Payment gateway code, e.g. `cod` or `bacs`.
    pub payment_method: String,
}

impl ValueObject for BillingDetails {}

/// Order line: what was bought and how many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub name: String,
    /// SKU of the catalog product; `None` when the product was deleted or
    /// never resolved.
    #[serde(default)]
    pub sku: Option<String>,
    pub quantity: i64,
}

impl LineItem {
    pub fn new(name: impl Into<String>, sku: Option<&str>, quantity: i64) -> Self {
        Self {
            name: name.into(),
            sku: sku.map(str::to_string),
            quantity,
        }
    }

    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }
}

/// Shipping charge line; its label names the delivery method the buyer chose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingLine {
    pub method_title: String,
}

impl ShippingLine {
    pub fn new(method_title: impl Into<String>) -> Self {
        Self {
            method_title: method_title.into(),
        }
    }
}

/// A hydrated order record.
///
/// Read-only from the export pipeline's point of view; the builder methods
/// exist for stores and fixtures that assemble records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    #[serde(default)]
    number: Option<String>,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    #[serde(default)]
    shipping: ShippingAddress,
    #[serde(default)]
    billing: BillingDetails,
    #[serde(default, with = "rust_decimal::serde::float")]
    total: Decimal,
    #[serde(default)]
    items: Vec<LineItem>,
    #[serde(default)]
    shipping_lines: Vec<ShippingLine>,
    #[serde(default)]
    meta: OrderMeta,
}

impl Order {
    pub fn new(id: OrderId, status: OrderStatus, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            number: None,
            status,
            created_at,
            shipping: ShippingAddress::default(),
            billing: BillingDetails::default(),
            total: Decimal::ZERO,
            items: Vec::new(),
            shipping_lines: Vec::new(),
            meta: OrderMeta::default(),
        }
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn with_shipping(mut self, shipping: ShippingAddress) -> Self {
        self.shipping = shipping;
        self
    }

    pub fn with_billing(mut self, billing: BillingDetails) -> Self {
        self.billing = billing;
        self
    }

    pub fn with_total(mut self, total: Decimal) -> Self {
        self.total = total;
        self
    }

    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_shipping_line(mut self, line: ShippingLine) -> Self {
        self.shipping_lines.push(line);
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key, value);
        self
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Display order number, when the shop assigns one separate from the id.
    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn shipping(&self) -> &ShippingAddress {
        &self.shipping
    }

    pub fn billing(&self) -> &BillingDetails {
        &self.billing
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn shipping_lines(&self) -> &[ShippingLine] {
        &self.shipping_lines
    }

    /// Label of the first shipping line, or `""` when the order has none.
    pub fn shipping_method_title(&self) -> &str {
        self.shipping_lines
            .first()
            .map(|l| l.method_title.as_str())
            .unwrap_or("")
    }

    pub fn meta(&self) -> &OrderMeta {
        &self.meta
    }

    /// Mutable attribute access for stores recording caller writebacks.
    pub fn meta_mut(&mut self) -> &mut OrderMeta {
        &mut self.meta
    }
}
