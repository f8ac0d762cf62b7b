use std::sync::Arc;

use kitchen_inventory::StockRecord;

/// Upstream data source for stock records.
///
/// Contract: return the current snapshot of *active* records. No ordering
/// guarantee.
pub trait StockSource: Send + Sync {
    fn active_records(&self) -> Result<Vec<StockRecord>, SourceError>;
}

impl<S> StockSource for Arc<S>
where
    S: StockSource + ?Sized,
{
    fn active_records(&self) -> Result<Vec<StockRecord>, SourceError> {
        (**self).active_records()
    }
}

/// The data source could not produce a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("stock source unavailable: {0}")]
    Unavailable(String),
}

impl SourceError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}
