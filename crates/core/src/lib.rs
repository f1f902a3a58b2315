//! `shipsync-core` — shared building blocks for the export workspace.
//!
//! Identifiers, the domain error model and the value-object marker.
//! No IO lives here.

pub mod error;
pub mod id;
pub mod value_object;

pub use error::DomainError;
pub use id::{BatchId, OrderId};
pub use value_object::ValueObject;
