//! `kitchen-core` — shared building blocks for the kitchen module.
//!
//! Pure primitives only: identifiers, the domain error model and the aggregate
//! traits stock items are written against.

pub mod aggregate;
pub mod error;
pub mod id;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use id::StockId;
