//! Configuration providers and export settings.
//!
//! Keys are lower-case snake case (`method_cod`, `default_service`). The
//! environment provider maps them to prefixed upper-case variables:
//! `method_cod` ↔ `SHIPSYNC_METHOD_COD`.

use std::collections::HashMap;

use shipsync_export::{ConfigProvider, ConfigValue, DEFAULT_EXPORT_LIMIT, ExportPolicy};

/// Prefix of environment variables read by [`EnvConfig::from_env`].
pub const ENV_PREFIX: &str = "SHIPSYNC_";

/// Settings keys read by [`ExportSettings`].
pub mod keys {
    pub const BATCH_LIMIT: &str = "batch_limit";
    pub const INVOICE_LINKS: &str = "invoice_links";
    pub const RECENCY: &str = "recency";
}

fn normalize_key(key: &str) -> String {
    key.to_ascii_lowercase().replace('-', "_")
}

/// Snapshot of prefixed environment variables, taken once at construction.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    values: HashMap<String, String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self::from_vars(ENV_PREFIX, std::env::vars())
    }

    pub fn from_vars(prefix: &str, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let values = vars
            .into_iter()
            .filter_map(|(name, value)| {
                name.strip_prefix(prefix)
                    .map(|key| (normalize_key(key), value))
            })
            .collect();
        Self { values }
    }
}

impl ConfigProvider for EnvConfig {
    fn get(&self, key: &str) -> Option<ConfigValue> {
        self.values
            .get(&normalize_key(key))
            .map(|v| ConfigValue::Text(v.clone()))
    }
}

/// In-memory settings, for tests and embedding hosts that own their config.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    values: HashMap<String, ConfigValue>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<ConfigValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<ConfigValue>) {
        self.values.insert(normalize_key(key), value.into());
    }
}

impl ConfigProvider for StaticConfig {
    fn get(&self, key: &str) -> Option<ConfigValue> {
        self.values.get(&normalize_key(key)).cloned()
    }
}

/// Knobs of an export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSettings {
    pub batch_limit: usize,
    /// Whether the invoicing integration is installed.
    pub invoice_links: bool,
    /// Restrict selection to the recency window.
    pub recency: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            batch_limit: DEFAULT_EXPORT_LIMIT,
            invoice_links: false,
            recency: true,
        }
    }
}

impl ExportSettings {
    pub fn from_env() -> Self {
        Self::from_config(&EnvConfig::from_env())
    }

    /// Read settings; unparsable values fall back to the defaults.
    pub fn from_config(config: &dyn ConfigProvider) -> Self {
        let defaults = Self::default();

        let batch_limit = match config.get(keys::BATCH_LIMIT) {
            None => defaults.batch_limit,
            Some(ConfigValue::Text(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid batch limit; using default");
                defaults.batch_limit
            }),
            Some(ConfigValue::Bool(_)) => {
                tracing::warn!("batch limit must be a number; using default");
                defaults.batch_limit
            }
        };

        Self {
            batch_limit,
            invoice_links: config
                .get(keys::INVOICE_LINKS)
                .map_or(defaults.invoice_links, |v| v.is_truthy()),
            recency: config
                .get(keys::RECENCY)
                .map_or(defaults.recency, |v| v.is_truthy()),
        }
    }

    pub fn policy(&self) -> ExportPolicy {
        if self.recency {
            ExportPolicy::default()
        } else {
            ExportPolicy::default().with_recency(None)
        }
    }
}
