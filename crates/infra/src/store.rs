//! In-memory stock store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use kitchen_core::{Aggregate, DomainError, StockId};
use kitchen_inventory::{
    AdjustQuantity, DeactivateStock, RecordStock, StockCommand, StockItem, StockRecord,
};

use crate::source::{SourceError, StockSource};

/// Stock store error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("stock store unavailable: {0}")]
    Unavailable(String),
}

/// In-memory stock store for tests/dev.
///
/// Every mutation runs the aggregate's handle+apply under a single write lock,
/// so concurrent adjustments of the same record serialize and a rejected
/// adjustment leaves the record untouched.
#[derive(Debug, Default)]
pub struct InMemoryStockStore {
    items: RwLock<HashMap<StockId, StockItem>>,
}

impl InMemoryStockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Intake a new stock record.
    pub fn record(&self, cmd: RecordStock) -> Result<StockRecord, StoreError> {
        let stock_id = cmd.stock_id;
        let mut items = self.write()?;

        let mut item = items
            .get(&stock_id)
            .cloned()
            .unwrap_or_else(|| StockItem::empty(stock_id));
        item.execute(&StockCommand::RecordStock(cmd))?;

        let record = snapshot(&item)?;
        items.insert(stock_id, item);
        Ok(record)
    }

    /// Atomically add `delta` to the on-hand quantity.
    ///
    /// Rejected with an invariant violation if the result would be negative,
    /// and with a validation error if it would not be finite.
    pub fn adjust_quantity(
        &self,
        stock_id: StockId,
        delta: f64,
        occurred_at: DateTime<Utc>,
    ) -> Result<StockRecord, StoreError> {
        let mut items = self.write()?;
        let item = items.get_mut(&stock_id).ok_or(DomainError::NotFound)?;

        item.execute(&StockCommand::AdjustQuantity(AdjustQuantity {
            stock_id,
            delta,
            occurred_at,
        }))?;

        tracing::debug!(%stock_id, delta, quantity = item.quantity(), "stock quantity adjusted");
        snapshot(item)
    }

    /// Soft-delete a stock record.
    pub fn deactivate(&self, stock_id: StockId, occurred_at: DateTime<Utc>) -> Result<StockRecord, StoreError> {
        let mut items = self.write()?;
        let item = items.get_mut(&stock_id).ok_or(DomainError::NotFound)?;

        item.execute(&StockCommand::DeactivateStock(DeactivateStock {
            stock_id,
            occurred_at,
        }))?;

        snapshot(item)
    }

    /// Current state of one record, active or not.
    pub fn get(&self, stock_id: StockId) -> Result<Option<StockRecord>, StoreError> {
        let items = self.read()?;
        Ok(items.get(&stock_id).and_then(StockItem::to_record))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<StockId, StockItem>>, StoreError> {
        self.items
            .read()
            .map_err(|_| StoreError::Unavailable("stock store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<StockId, StockItem>>, StoreError> {
        self.items
            .write()
            .map_err(|_| StoreError::Unavailable("stock store lock poisoned".to_string()))
    }
}

fn snapshot(item: &StockItem) -> Result<StockRecord, StoreError> {
    item.to_record().ok_or(StoreError::Domain(DomainError::NotFound))
}

impl StockSource for InMemoryStockStore {
    fn active_records(&self) -> Result<Vec<StockRecord>, SourceError> {
        let items = self
            .read()
            .map_err(|e| SourceError::unavailable(e.to_string()))?;

        let mut records: Vec<StockRecord> = items
            .values()
            .filter(|item| item.is_active())
            .filter_map(StockItem::to_record)
            .collect();
        // UUIDv7 ids sort in intake order.
        records.sort_by_key(|r| r.id);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn intake(store: &InMemoryStockStore, name: &str, quantity: f64) -> StockId {
        let stock_id = StockId::new();
        store
            .record(RecordStock {
                stock_id,
                item_name: name.to_string(),
                category: "produce".to_string(),
                quantity,
                unit: "kg".to_string(),
                min_stock: Some(1.0),
                expiry_date: None,
                occurred_at: test_time(),
            })
            .unwrap();
        stock_id
    }

    #[test]
    fn record_then_get() {
        let store = InMemoryStockStore::new();
        let stock_id = intake(&store, "Tomatoes", 12.0);

        let record = store.get(stock_id).unwrap().unwrap();
        assert_eq!(record.item_name, "Tomatoes");
        assert_eq!(record.quantity, 12.0);
        assert!(store.get(StockId::new()).unwrap().is_none());
    }

    #[test]
    fn failed_intake_leaves_no_trace() {
        let store = InMemoryStockStore::new();
        let stock_id = StockId::new();
        let err = store
            .record(RecordStock {
                stock_id,
                item_name: String::new(),
                category: String::new(),
                quantity: 1.0,
                unit: String::new(),
                min_stock: None,
                expiry_date: None,
                occurred_at: test_time(),
            })
            .unwrap_err();

        assert!(matches!(err, StoreError::Domain(DomainError::Validation(_))));
        assert!(store.get(stock_id).unwrap().is_none());
    }

    #[test]
    fn adjust_rejects_negative_result_and_keeps_quantity() {
        let store = InMemoryStockStore::new();
        let stock_id = intake(&store, "Onions", 3.0);

        let err = store.adjust_quantity(stock_id, -4.0, test_time()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(DomainError::InvariantViolation(_))
        ));
        assert_eq!(store.get(stock_id).unwrap().unwrap().quantity, 3.0);

        let record = store.adjust_quantity(stock_id, -3.0, test_time()).unwrap();
        assert_eq!(record.quantity, 0.0);
    }

    #[test]
    fn adjust_rejects_infinite_result_and_keeps_record_alertable() {
        let store = InMemoryStockStore::new();
        let stock_id = StockId::new();
        store
            .record(RecordStock {
                stock_id,
                item_name: "Rice".to_string(),
                category: "dry goods".to_string(),
                quantity: 1e308,
                unit: "kg".to_string(),
                min_stock: Some(f64::MAX),
                expiry_date: None,
                occurred_at: test_time(),
            })
            .unwrap();

        let err = store.adjust_quantity(stock_id, 1e308, test_time()).unwrap_err();
        assert!(matches!(err, StoreError::Domain(DomainError::Validation(_))));

        let active = store.active_records().unwrap();
        assert_eq!(active[0].quantity, 1e308);
        let alerts = kitchen_inventory::evaluate_alerts(&active, test_time());
        assert_eq!(alerts.low_stock.len(), 1);
    }

    #[test]
    fn adjust_unknown_record_is_not_found() {
        let store = InMemoryStockStore::new();
        assert_eq!(
            store.adjust_quantity(StockId::new(), 1.0, test_time()),
            Err(StoreError::Domain(DomainError::NotFound))
        );
    }

    #[test]
    fn concurrent_adjustments_do_not_lose_updates() {
        let store = InMemoryStockStore::new();
        let stock_id = intake(&store, "Potatoes", 100.0);

        let accepted: usize = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        (0..25)
                            .filter(|_| store.adjust_quantity(stock_id, -1.0, test_time()).is_ok())
                            .count()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        assert_eq!(accepted, 100);
        assert_eq!(store.get(stock_id).unwrap().unwrap().quantity, 0.0);
    }

    #[test]
    fn active_records_excludes_deactivated() {
        let store = InMemoryStockStore::new();
        let kept = intake(&store, "Garlic", 2.0);
        let dropped = intake(&store, "Leeks", 2.0);

        store.deactivate(dropped, test_time()).unwrap();

        let active = store.active_records().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, kept);

        // Still readable directly, just inactive.
        assert!(!store.get(dropped).unwrap().unwrap().is_active);
    }
}
