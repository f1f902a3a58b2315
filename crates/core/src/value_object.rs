//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity: two addresses with the same fields are the
/// same address. They are immutable once built; to "change" one, build a new
/// value.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct ShippingAddress {
///     city: String,
///     postcode: String,
/// }
///
/// impl ValueObject for ShippingAddress {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
