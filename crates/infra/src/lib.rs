//! Infrastructure layer: stock storage, data-source adapters, alert service, config.

pub mod config;
pub mod service;
pub mod source;
pub mod store;

pub use config::{AlertConfig, ConfigError};
pub use service::{AlertService, AlertServiceError};
pub use source::{SourceError, StockSource};
pub use store::{InMemoryStockStore, StoreError};
