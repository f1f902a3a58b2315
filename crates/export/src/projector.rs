//! Order → payload mapping.
//!
//! Projection is a pure read of the order plus two read-only lookups
//! (configuration and the delivery-service map). Missing optional data
//! degrades to empty strings, `null` or zero; it never fails.

use std::sync::Arc;

use rust_decimal::Decimal;

use shipsync_orders::Order;

use crate::catalog::DeliveryServiceMap;
use crate::config::{ConfigProvider, keys};
use crate::invoice::InvoiceLinkProvider;
use crate::payload::{EmbeddedItems, ExportPayload, PayloadItem};

pub struct OrderProjector {
    services: DeliveryServiceMap,
    config: Arc<dyn ConfigProvider>,
    invoices: InvoiceLinkProvider,
}

impl OrderProjector {
    pub fn new(
        services: DeliveryServiceMap,
        config: Arc<dyn ConfigProvider>,
        invoices: InvoiceLinkProvider,
    ) -> Self {
        Self {
            services,
            config,
            invoices,
        }
    }

    pub fn services(&self) -> &DeliveryServiceMap {
        &self.services
    }

    pub fn project(&self, order: &Order) -> ExportPayload {
        let shipping = order.shipping();
        let billing = order.billing();

        ExportPayload {
            id: order.id(),
            variable_symbol: variable_symbol(order),
            name: recipient_name(order),
            email: billing.email.clone(),
            street: compose_street(&shipping.address_1, &shipping.address_2, &shipping.state),
            country: shipping.country.to_lowercase(),
            city: shipping.city.clone(),
            postal_code: shipping.postcode.clone(),
            phone: non_empty(&billing.phone),
            invoice_link: self.invoices.link_for(order),
            cod: self.cod_amount(order),
            parcel_service: self.parcel_service(order),
            embedded: EmbeddedItems {
                items: order
                    .items()
                    .iter()
                    .map(|item| PayloadItem {
                        id: item.sku().map(str::to_string),
                        qty: item.quantity,
                    })
                    .collect(),
            },
        }
    }

    fn cod_amount(&self, order: &Order) -> Decimal {
        let key = keys::cod_method(&order.billing().payment_method);
        match self.config.get(&key) {
            Some(flag) if flag.is_truthy() => order.total(),
            _ => Decimal::ZERO,
        }
    }

    fn parcel_service(&self, order: &Order) -> Option<String> {
        let label = order.shipping_method_title();
        if let Some(code) = self.services.resolve(label) {
            return Some(code.to_string());
        }
        let fallback = self
            .config
            .get(keys::DEFAULT_SERVICE)
            .and_then(|v| v.as_text().map(str::to_string));
        if fallback.is_none() {
            tracing::warn!(
                order_id = %order.id(),
                label,
                "no delivery service mapped and no default configured"
            );
        }
        fallback
    }
}

fn variable_symbol(order: &Order) -> String {
    match order.number() {
        Some(number) if !number.is_empty() => number.to_string(),
        _ => order.id().to_string(),
    }
}

fn recipient_name(order: &Order) -> String {
    let shipping = order.shipping();
    if !shipping.company.is_empty() {
        return shipping.company.clone();
    }
    format!("{} {}", shipping.first_name, shipping.last_name)
}

/// `line1[, line2][, region]`, skipping empty parts after the first.
fn compose_street(line1: &str, line2: &str, region: &str) -> String {
    let mut street = line1.to_string();
    for part in [line2, region] {
        if !part.is_empty() {
            street.push_str(", ");
            street.push_str(part);
        }
    }
    street
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DeliveryService;
    use crate::invoice::InvoiceLinkLookup;
    use crate::test_support::{MapConfig, processing_order};
    use shipsync_core::OrderId;
    use shipsync_orders::{BillingDetails, LineItem, ShippingAddress, ShippingLine};

    fn projector(config: MapConfig, invoices: InvoiceLinkProvider) -> OrderProjector {
        let services = DeliveryServiceMap::from_services([
            DeliveryService::new("Courier", "DPD"),
            DeliveryService::new("Pickup point", "ZASILKOVNA"),
        ]);
        OrderProjector::new(services, Arc::new(config), invoices)
    }

    fn address(line1: &str, line2: &str, state: &str) -> ShippingAddress {
        ShippingAddress {
            first_name: "Jana".to_string(),
            last_name: "Novak".to_string(),
            address_1: line1.to_string(),
            address_2: line2.to_string(),
            state: state.to_string(),
            city: "Brno".to_string(),
            postcode: "60200".to_string(),
            country: "CZ".to_string(),
            ..Default::default()
        }
    }

    struct FixedLinks;

    impl InvoiceLinkLookup for FixedLinks {
        fn invoice_link(&self, order: &Order) -> Option<String> {
            if order.id() == OrderId::new(1) {
                Some("https://invoices.example/1".to_string())
            } else {
                None
            }
        }
    }

    #[test]
    fn street_skips_empty_second_line() {
        assert_eq!(compose_street("A", "", "B"), "A, B");
        assert_eq!(compose_street("A", "C", ""), "A, C");
        assert_eq!(compose_street("A", "C", "B"), "A, C, B");
        assert_eq!(compose_street("", "", ""), "");
    }

    #[test]
    fn name_prefers_company() {
        let p = projector(MapConfig::default(), InvoiceLinkProvider::Absent);
        let mut shipping = address("Main 1", "", "");
        let person = processing_order(1).with_shipping(shipping.clone());
        assert_eq!(p.project(&person).name, "Jana Novak");

        shipping.company = "Acme s.r.o.".to_string();
        let company = processing_order(1).with_shipping(shipping);
        assert_eq!(p.project(&company).name, "Acme s.r.o.");

        let nameless = processing_order(2);
        assert_eq!(p.project(&nameless).name, " ");
    }

    #[test]
    fn country_lowercases_unicode() {
        let p = projector(MapConfig::default(), InvoiceLinkProvider::Absent);
        let mut shipping = address("Main 1", "", "");
        shipping.country = "DE".to_string();
        assert_eq!(p.project(&processing_order(1).with_shipping(shipping.clone())).country, "de");

        shipping.country = "DÉ".to_string();
        assert_eq!(p.project(&processing_order(1).with_shipping(shipping)).country, "dé");
    }

    #[test]
    fn missing_phone_is_null() {
        let p = projector(MapConfig::default(), InvoiceLinkProvider::Absent);
        let payload = p.project(&processing_order(1));
        assert_eq!(payload.phone, None);

        let with_phone = processing_order(1).with_billing(BillingDetails {
            phone: "+420 600 000 000".to_string(),
            ..Default::default()
        });
        assert_eq!(p.project(&with_phone).phone.as_deref(), Some("+420 600 000 000"));
    }

    #[test]
    fn cod_only_for_configured_methods() {
        let config = MapConfig::default()
            .with("method_cod", "yes")
            .with("method_bacs", "no");
        let p = projector(config, InvoiceLinkProvider::Absent);

        let order = |method: &str| {
            processing_order(1)
                .with_total(Decimal::new(49990, 2))
                .with_billing(BillingDetails {
                    payment_method: method.to_string(),
                    ..Default::default()
                })
        };
        assert_eq!(p.project(&order("cod")).cod, Decimal::new(49990, 2));
        assert_eq!(p.project(&order("bacs")).cod, Decimal::ZERO);
        assert_eq!(p.project(&order("paypal")).cod, Decimal::ZERO);
    }

    #[test]
    fn parcel_service_falls_back_to_default_then_null() {
        let with_default = projector(
            MapConfig::default().with("default_service", "PPL"),
            InvoiceLinkProvider::Absent,
        );
        let without_default = projector(MapConfig::default(), InvoiceLinkProvider::Absent);

        let mapped = processing_order(1).with_shipping_line(ShippingLine::new("Pickup point"));
        let unmapped = processing_order(2).with_shipping_line(ShippingLine::new("Drone"));

        assert_eq!(with_default.project(&mapped).parcel_service.as_deref(), Some("ZASILKOVNA"));
        assert_eq!(with_default.project(&unmapped).parcel_service.as_deref(), Some("PPL"));
        assert_eq!(without_default.project(&unmapped).parcel_service, None);
    }

    #[test]
    fn invoice_link_only_when_integration_active() {
        let absent = projector(MapConfig::default(), InvoiceLinkProvider::Absent);
        let active = projector(MapConfig::default(), InvoiceLinkProvider::active(FixedLinks));

        assert_eq!(absent.project(&processing_order(1)).invoice_link, "");
        assert_eq!(
            active.project(&processing_order(1)).invoice_link,
            "https://invoices.example/1"
        );
        assert_eq!(active.project(&processing_order(2)).invoice_link, "");
    }

    #[test]
    fn unresolved_products_keep_their_slot() {
        let p = projector(MapConfig::default(), InvoiceLinkProvider::Absent);
        let order = processing_order(1)
            .with_item(LineItem::new("Mug", Some("MUG"), 2))
            .with_item(LineItem::new("Gone", None, 3))
            .with_item(LineItem::new("Cap", Some("CAP"), 1));

        let items = p.project(&order).embedded.items;
        assert_eq!(
            items,
            vec![
                PayloadItem {
                    id: Some("MUG".to_string()),
                    qty: 2
                },
                PayloadItem { id: None, qty: 3 },
                PayloadItem {
                    id: Some("CAP".to_string()),
                    qty: 1
                },
            ]
        );
    }

    #[test]
    fn variable_symbol_prefers_order_number() {
        let p = projector(MapConfig::default(), InvoiceLinkProvider::Absent);
        assert_eq!(p.project(&processing_order(77)).variable_symbol, "77");
        assert_eq!(
            p.project(&processing_order(77).with_number("2024-0077")).variable_symbol,
            "2024-0077"
        );
    }

    #[test]
    fn projection_is_pure() {
        let p = projector(
            MapConfig::default().with("method_cod", "1"),
            InvoiceLinkProvider::active(FixedLinks),
        );
        let order = processing_order(1)
            .with_shipping(address("Main 1", "Flat 2", "South Moravia"))
            .with_shipping_line(ShippingLine::new("Courier"))
            .with_total(Decimal::new(100, 0))
            .with_billing(BillingDetails {
                email: "jana@example.com".to_string(),
                phone: "123".to_string(),
                payment_method: "cod".to_string(),
            });
        let before = order.clone();

        let first = p.project(&order);
        let second = p.project(&order);
        assert_eq!(first, second);
        assert_eq!(order, before);
        assert_eq!(first.street, "Main 1, Flat 2, South Moravia");
        assert_eq!(first.parcel_service.as_deref(), Some("DPD"));
        assert_eq!(first.cod, Decimal::new(100, 0));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_order() -> impl Strategy<Value = Order> {
            (
                1u64..10_000,
                "[A-Za-z ]{0,12}",
                "[A-Za-z0-9 ]{0,12}",
                prop_oneof![Just("cod"), Just("bacs"), Just("")],
                prop_oneof![Just("Courier"), Just("Drone"), Just("")],
                0i64..1_000_000,
                prop::collection::vec((prop::option::of("[A-Z]{3}-[0-9]{2}"), 1i64..5), 0..4),
            )
                .prop_map(|(id, company, line2, method, label, cents, items)| {
                    let mut order = processing_order(id)
                        .with_shipping(ShippingAddress {
                            company,
                            address_2: line2,
                            ..address("Main 1", "", "")
                        })
                        .with_billing(BillingDetails {
                            payment_method: method.to_string(),
                            ..Default::default()
                        })
                        .with_total(Decimal::new(cents, 2))
                        .with_shipping_line(ShippingLine::new(label));
                    for (sku, qty) in items {
                        order = order.with_item(LineItem::new("item", sku.as_deref(), qty));
                    }
                    order
                })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 128,
                ..ProptestConfig::default()
            })]

            /// Property: projection is deterministic, leaves the order untouched
            /// and keeps one payload item per line item.
            #[test]
            fn projection_is_deterministic(order in arb_order()) {
                let p = projector(
                    MapConfig::default().with("method_cod", true),
                    InvoiceLinkProvider::active(FixedLinks),
                );
                let before = order.clone();

                let first = p.project(&order);
                prop_assert_eq!(&first, &p.project(&order));
                prop_assert_eq!(&order, &before);
                prop_assert_eq!(first.id, order.id());
                prop_assert_eq!(first.embedded.items.len(), order.items().len());

                let expected_cod = if order.billing().payment_method == "cod" {
                    order.total()
                } else {
                    Decimal::ZERO
                };
                prop_assert_eq!(first.cod, expected_cod);
            }
        }
    }
}
