//! Kitchen inventory domain module.
//!
//! Business rules for stock records, implemented as deterministic domain logic
//! (no IO, no clock access, no storage):
//! - [`record`]: the stock record model and row validation
//! - [`stock`]: the stock item lifecycle (intake, quantity adjustment, soft delete)
//! - [`alerts`]: low-stock / expiring / expired classification

pub mod alerts;
pub mod record;
pub mod stock;

pub use alerts::{
    evaluate_alerts, AlertPolicy, AlertSummary, ExpiredAlert, ExpiringAlert, InventoryAlerts,
    LowStockAlert, Severity,
};
pub use record::{StockRecord, StockRow};
pub use stock::{
    AdjustQuantity, DeactivateStock, QuantityAdjusted, RecordStock, StockCommand, StockDeactivated,
    StockEvent, StockItem, StockRecorded,
};
