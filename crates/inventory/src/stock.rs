use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kitchen_core::{Aggregate, AggregateRoot, DomainError, StockId};

use crate::record::{validate_quantity, StockRecord};

/// Aggregate root: StockItem.
///
/// Owns the lifecycle of one stock record: intake, quantity adjustments and
/// soft deletion. Quantity never drops below zero.
#[derive(Debug, Clone, PartialEq)]
pub struct StockItem {
    id: StockId,
    item_name: String,
    category: String,
    unit: String,
    quantity: f64,
    min_stock: Option<f64>,
    expiry_date: Option<DateTime<Utc>>,
    is_active: bool,
    version: u64,
    recorded: bool,
}

impl StockItem {
    /// Create an empty, not-yet-recorded aggregate instance for rehydration.
    pub fn empty(id: StockId) -> Self {
        Self {
            id,
            item_name: String::new(),
            category: String::new(),
            unit: String::new(),
            quantity: 0.0,
            min_stock: None,
            expiry_date: None,
            is_active: false,
            version: 0,
            recorded: false,
        }
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Current state as a stock record, or `None` before intake.
    pub fn to_record(&self) -> Option<StockRecord> {
        if !self.recorded {
            return None;
        }
        Some(StockRecord {
            id: self.id,
            item_name: self.item_name.clone(),
            category: self.category.clone(),
            quantity: self.quantity,
            unit: self.unit.clone(),
            min_stock: self.min_stock,
            expiry_date: self.expiry_date,
            is_active: self.is_active,
        })
    }
}

impl AggregateRoot for StockItem {
    type Id = StockId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: RecordStock (inventory intake).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordStock {
    pub stock_id: StockId,
    pub item_name: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    pub min_stock: Option<f64>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AdjustQuantity. Positive deltas restock, negative deltas consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustQuantity {
    pub stock_id: StockId,
    pub delta: f64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DeactivateStock (soft delete).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeactivateStock {
    pub stock_id: StockId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StockCommand {
    RecordStock(RecordStock),
    AdjustQuantity(AdjustQuantity),
    DeactivateStock(DeactivateStock),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecorded {
    pub stock_id: StockId,
    pub item_name: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    pub min_stock: Option<f64>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityAdjusted {
    pub stock_id: StockId,
    pub delta: f64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDeactivated {
    pub stock_id: StockId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StockEvent {
    StockRecorded(StockRecorded),
    QuantityAdjusted(QuantityAdjusted),
    StockDeactivated(StockDeactivated),
}

impl StockEvent {
    /// Stable event name (e.g. "kitchen.stock.recorded").
    pub fn event_type(&self) -> &'static str {
        match self {
            StockEvent::StockRecorded(_) => "kitchen.stock.recorded",
            StockEvent::QuantityAdjusted(_) => "kitchen.stock.quantity_adjusted",
            StockEvent::StockDeactivated(_) => "kitchen.stock.deactivated",
        }
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            StockEvent::StockRecorded(e) => e.occurred_at,
            StockEvent::QuantityAdjusted(e) => e.occurred_at,
            StockEvent::StockDeactivated(e) => e.occurred_at,
        }
    }
}

impl Aggregate for StockItem {
    type Command = StockCommand;
    type Event = StockEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            StockEvent::StockRecorded(e) => {
                self.id = e.stock_id;
                self.item_name = e.item_name.clone();
                self.category = e.category.clone();
                self.unit = e.unit.clone();
                self.quantity = e.quantity;
                self.min_stock = e.min_stock;
                self.expiry_date = e.expiry_date;
                self.is_active = true;
                self.recorded = true;
            }
            StockEvent::QuantityAdjusted(e) => {
                self.quantity += e.delta;
            }
            StockEvent::StockDeactivated(_) => {
                self.is_active = false;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            StockCommand::RecordStock(cmd) => self.handle_record(cmd),
            StockCommand::AdjustQuantity(cmd) => self.handle_adjust(cmd),
            StockCommand::DeactivateStock(cmd) => self.handle_deactivate(cmd),
        }
    }
}

impl StockItem {
    fn ensure_stock_id(&self, stock_id: StockId) -> Result<(), DomainError> {
        if self.id != stock_id {
            return Err(DomainError::invariant("stock_id mismatch"));
        }
        Ok(())
    }

    fn handle_record(&self, cmd: &RecordStock) -> Result<Vec<StockEvent>, DomainError> {
        if self.recorded {
            return Err(DomainError::conflict("stock item already recorded"));
        }
        self.ensure_stock_id(cmd.stock_id)?;
        if cmd.item_name.trim().is_empty() {
            return Err(DomainError::validation("item_name cannot be empty"));
        }
        validate_quantity("quantity", cmd.quantity)?;
        if let Some(min) = cmd.min_stock {
            validate_quantity("min_stock", min)?;
        }

        Ok(vec![StockEvent::StockRecorded(StockRecorded {
            stock_id: cmd.stock_id,
            item_name: cmd.item_name.trim().to_string(),
            category: cmd.category.clone(),
            quantity: cmd.quantity,
            unit: cmd.unit.clone(),
            min_stock: cmd.min_stock,
            expiry_date: cmd.expiry_date,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_adjust(&self, cmd: &AdjustQuantity) -> Result<Vec<StockEvent>, DomainError> {
        if !self.recorded {
            return Err(DomainError::not_found());
        }
        self.ensure_stock_id(cmd.stock_id)?;

        if !cmd.delta.is_finite() {
            return Err(DomainError::validation("delta must be a finite number"));
        }
        if cmd.delta == 0.0 {
            return Err(DomainError::validation("delta cannot be zero"));
        }
        if !self.is_active {
            return Err(DomainError::invariant("cannot adjust an inactive stock item"));
        }

        let new_quantity = self.quantity + cmd.delta;
        if !new_quantity.is_finite() {
            return Err(DomainError::validation("quantity must be a finite number"));
        }
        if new_quantity < 0.0 {
            return Err(DomainError::invariant("quantity cannot go negative"));
        }

        Ok(vec![StockEvent::QuantityAdjusted(QuantityAdjusted {
            stock_id: cmd.stock_id,
            delta: cmd.delta,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_deactivate(&self, cmd: &DeactivateStock) -> Result<Vec<StockEvent>, DomainError> {
        if !self.recorded {
            return Err(DomainError::not_found());
        }
        self.ensure_stock_id(cmd.stock_id)?;
        if !self.is_active {
            return Err(DomainError::conflict("stock item already inactive"));
        }

        Ok(vec![StockEvent::StockDeactivated(StockDeactivated {
            stock_id: cmd.stock_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}
