//! Configuration lookup collaborator.

use std::sync::Arc;

/// Keys the projector reads.
pub mod keys {
    /// Delivery service used when the order's shipping label is unmapped.
    pub const DEFAULT_SERVICE: &str = "default_service";
    /// Prefix of the per-payment-method cash-on-delivery flag.
    pub const COD_METHOD_PREFIX: &str = "method_";

    pub fn cod_method(payment_method: &str) -> String {
        format!("{COD_METHOD_PREFIX}{payment_method}")
    }
}

/// A configuration value as stored by the settings backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Bool(bool),
    Text(String),
}

impl ConfigValue {
    /// Settings backends store checkboxes as text; "", "0", "false", "no"
    /// and "off" read as unset.
    pub fn is_truthy(&self) -> bool {
        match self {
            ConfigValue::Bool(b) => *b,
            ConfigValue::Text(s) => {
                let s = s.trim();
                !(s.is_empty()
                    || s == "0"
                    || s.eq_ignore_ascii_case("false")
                    || s.eq_ignore_ascii_case("no")
                    || s.eq_ignore_ascii_case("off"))
            }
        }
    }

    /// Non-empty text content.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(s) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Text(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Text(value)
    }
}

/// Key/value settings lookup.
pub trait ConfigProvider: Send + Sync {
    fn get(&self, key: &str) -> Option<ConfigValue>;
}

impl<C> ConfigProvider for Arc<C>
where
    C: ConfigProvider + ?Sized,
{
    fn get(&self, key: &str) -> Option<ConfigValue> {
        (**self).get(key)
    }
}
