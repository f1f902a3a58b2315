//! Storage-independent order filters.
//!
//! A small predicate language over order status, creation time and order
//! attributes. Stores may translate an [`OrderQuery`] into their native query
//! language or evaluate it directly with [`OrderQuery::matches`]; both must
//! agree with the semantics defined here.

use chrono::{DateTime, Utc};

use shipsync_orders::{Order, OrderMeta, OrderStatus};

/// Comparison applied to a single attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCompare {
    Exists,
    NotExists,
    Equals(String),
    /// Matches only when the attribute is present with a different value.
    /// Pair with [`MetaCompare::NotExists`] under [`MetaFilter::Any`] to also
    /// accept records that never had the attribute.
    NotEquals(String),
}

/// Composable attribute predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaFilter {
    Condition { key: String, compare: MetaCompare },
    /// Every child matches. Empty is `true`.
    All(Vec<MetaFilter>),
    /// At least one child matches. Empty is `false`.
    Any(Vec<MetaFilter>),
}

impl MetaFilter {
    pub fn exists(key: impl Into<String>) -> Self {
        Self::Condition {
            key: key.into(),
            compare: MetaCompare::Exists,
        }
    }

    pub fn not_exists(key: impl Into<String>) -> Self {
        Self::Condition {
            key: key.into(),
            compare: MetaCompare::NotExists,
        }
    }

    pub fn equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Condition {
            key: key.into(),
            compare: MetaCompare::Equals(value.into()),
        }
    }

    pub fn not_equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Condition {
            key: key.into(),
            compare: MetaCompare::NotEquals(value.into()),
        }
    }

    /// Attribute absent, or present with any value other than `value`.
    pub fn absent_or_not_equal(key: &str, value: impl Into<String>) -> Self {
        Self::Any(vec![Self::not_exists(key), Self::not_equals(key, value)])
    }

    pub fn matches(&self, meta: &OrderMeta) -> bool {
        match self {
            MetaFilter::Condition { key, compare } => {
                let value = meta.get(key);
                match compare {
                    MetaCompare::Exists => value.is_some(),
                    MetaCompare::NotExists => value.is_none(),
                    MetaCompare::Equals(expected) => value == Some(expected.as_str()),
                    MetaCompare::NotEquals(expected) => {
                        value.is_some_and(|v| v != expected.as_str())
                    }
                }
            }
            MetaFilter::All(children) => children.iter().all(|c| c.matches(meta)),
            MetaFilter::Any(children) => children.iter().any(|c| c.matches(meta)),
        }
    }
}

/// Creation-time range; both bounds exclusive, both optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreationWindow {
    pub after: Option<DateTime<Utc>>,
    pub before: Option<DateTime<Utc>>,
}

impl CreationWindow {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.after.is_none_or(|after| at > after) && self.before.is_none_or(|before| at < before)
    }
}

/// Filter criteria for order queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQuery {
    /// Accepted statuses. Empty accepts every status.
    pub statuses: Vec<OrderStatus>,
    /// Attribute predicate (optional).
    pub meta: Option<MetaFilter>,
    /// Creation-time range (optional).
    pub created: Option<CreationWindow>,
    /// Maximum number of records to return. `None` is unbounded.
    pub limit: Option<usize>,
}

impl OrderQuery {
    pub fn with_statuses(statuses: impl IntoIterator<Item = OrderStatus>) -> Self {
        Self {
            statuses: statuses.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn meta(mut self, filter: MetaFilter) -> Self {
        self.meta = Some(filter);
        self
    }

    pub fn created(mut self, window: CreationWindow) -> Self {
        self.created = Some(window);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether `order` satisfies every criterion (the limit is not a criterion).
    pub fn matches(&self, order: &Order) -> bool {
        if !self.statuses.is_empty() && !self.statuses.contains(&order.status()) {
            return false;
        }
        if let Some(window) = &self.created {
            if !window.contains(order.created_at()) {
                return false;
            }
        }
        self.meta.as_ref().is_none_or(|m| m.matches(order.meta()))
    }
}
