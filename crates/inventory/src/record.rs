use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use kitchen_core::{DomainError, DomainResult, StockId};

/// One inventory line item tracked by the kitchen.
///
/// `unit` is informational only; quantities are never converted between units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: StockId,
    pub item_name: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    /// Reorder threshold. `None` means no low-stock rule applies.
    pub min_stock: Option<f64>,
    /// `None` means the item does not expire.
    pub expiry_date: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl StockRecord {
    pub fn new(id: StockId, item_name: impl Into<String>, quantity: f64) -> Self {
        Self {
            id,
            item_name: item_name.into(),
            category: String::new(),
            quantity,
            unit: String::new(),
            min_stock: None,
            expiry_date: None,
            is_active: true,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_min_stock(mut self, min_stock: f64) -> Self {
        self.min_stock = Some(min_stock);
        self
    }

    pub fn with_expiry(mut self, expiry_date: DateTime<Utc>) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }

    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Check the required fields (`item_name`, `quantity`).
    ///
    /// A bad `min_stock` is not a malformed record; see [`Self::low_stock_threshold`].
    pub fn validate(&self) -> DomainResult<()> {
        if self.item_name.trim().is_empty() {
            return Err(DomainError::validation("item_name cannot be empty"));
        }
        validate_quantity("quantity", self.quantity)
    }

    /// The reorder threshold, if one is set and usable.
    ///
    /// A negative or non-finite `min_stock` means no low-stock rule applies.
    pub fn low_stock_threshold(&self) -> Option<f64> {
        let min = self.min_stock?;
        match validate_quantity("min_stock", min) {
            Ok(()) => Some(min),
            Err(e) => {
                tracing::debug!(stock_id = %self.id, error = %e, "ignoring unusable reorder threshold");
                None
            }
        }
    }
}

pub(crate) fn validate_quantity(field: &str, value: f64) -> DomainResult<()> {
    if !value.is_finite() {
        return Err(DomainError::validation(format!("{field} must be a finite number")));
    }
    if value < 0.0 {
        return Err(DomainError::validation(format!("{field} cannot be negative")));
    }
    Ok(())
}

/// A stock row as delivered by the upstream data source.
///
/// Every field is optional so a single broken row deserializes and can be
/// skipped instead of failing the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockRow {
    pub id: Option<String>,
    pub item_name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub min_stock: Option<f64>,
    /// RFC 3339 timestamp, naive timestamp (read as UTC) or plain `YYYY-MM-DD`.
    pub expiry_date: Option<String>,
    pub is_active: Option<bool>,
}

impl TryFrom<StockRow> for StockRecord {
    type Error = DomainError;

    fn try_from(row: StockRow) -> Result<Self, Self::Error> {
        let id: StockId = row
            .id
            .as_deref()
            .ok_or_else(|| DomainError::validation("id is required"))?
            .parse()?;

        let item_name = row
            .item_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| DomainError::validation("item_name is required"))?;

        let quantity = row
            .quantity
            .ok_or_else(|| DomainError::validation("quantity is required"))?;

        let expiry_date = row.expiry_date.as_deref().map(parse_expiry).transpose()?;

        let mut record = StockRecord {
            id,
            item_name,
            category: row.category.unwrap_or_default(),
            quantity,
            unit: row.unit.unwrap_or_default(),
            min_stock: row.min_stock,
            expiry_date,
            is_active: row.is_active.unwrap_or(true),
        };
        record.validate()?;
        record.min_stock = record.low_stock_threshold();
        Ok(record)
    }
}

fn parse_expiry(raw: &str) -> DomainResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(DomainError::validation(format!("unrecognized expiry_date: {raw}")))
}
