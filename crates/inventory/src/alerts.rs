//! Stock alert classification.
//!
//! Classifies a snapshot of stock records into three independent buckets:
//! - **low stock**: `min_stock` defined and `quantity <= min_stock`
//! - **expiring**: `now < expiry_date <= now + lookahead`
//! - **expired**: `expiry_date < now`
//!
//! A record may land in low stock and in one of the expiry buckets at the same
//! time. A record expiring exactly at `now` is in neither expiry bucket.
//!
//! Evaluation is a pure function of the records and the injected `now`.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use kitchen_core::{DomainError, DomainResult};

use crate::record::{StockRecord, StockRow};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Alert urgency.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockAlert {
    #[serde(flatten)]
    pub record: StockRecord,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiringAlert {
    #[serde(flatten)]
    pub record: StockRecord,
    pub days_until_expiry: i64,
    pub severity: Severity,
}

/// Expired entries are always [`Severity::Critical`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiredAlert {
    #[serde(flatten)]
    pub record: StockRecord,
    pub days_expired: i64,
    pub severity: Severity,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub total_alerts: usize,
    pub low_stock_count: usize,
    pub expiring_count: usize,
    pub expired_count: usize,
    pub critical_count: usize,
}

/// The four-part alert view consumed by dashboards and reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryAlerts {
    pub low_stock: Vec<LowStockAlert>,
    pub expiring: Vec<ExpiringAlert>,
    pub expired: Vec<ExpiredAlert>,
    pub summary: AlertSummary,
}

impl InventoryAlerts {
    pub fn is_empty(&self) -> bool {
        self.summary.total_alerts == 0
    }
}

/// Day windows for the expiry rules.
///
/// Invariant: `0 < critical_days <= warning_days <= lookahead_days`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct AlertPolicy {
    lookahead_days: u32,
    warning_days: u32,
    critical_days: u32,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            lookahead_days: 30,
            warning_days: 14,
            critical_days: 7,
        }
    }
}

impl AlertPolicy {
    pub fn new(lookahead_days: u32, warning_days: u32, critical_days: u32) -> DomainResult<Self> {
        if critical_days == 0 {
            return Err(DomainError::validation("critical_days must be positive"));
        }
        if critical_days > warning_days {
            return Err(DomainError::validation(
                "critical_days cannot exceed warning_days",
            ));
        }
        if warning_days > lookahead_days {
            return Err(DomainError::validation(
                "warning_days cannot exceed lookahead_days",
            ));
        }
        Ok(Self {
            lookahead_days,
            warning_days,
            critical_days,
        })
    }

    pub fn lookahead_days(&self) -> u32 {
        self.lookahead_days
    }

    pub fn warning_days(&self) -> u32 {
        self.warning_days
    }

    pub fn critical_days(&self) -> u32 {
        self.critical_days
    }

    /// Classify `records` as of `now`.
    ///
    /// Inactive records are ignored. Records that fail [`StockRecord::validate`]
    /// are skipped instead of failing the whole evaluation. An unusable
    /// `min_stock` only disables the low-stock rule for that record.
    pub fn evaluate(&self, records: &[StockRecord], now: DateTime<Utc>) -> InventoryAlerts {
        self.classify(records.iter(), now)
    }

    /// Validate raw rows and classify the ones that convert cleanly.
    pub fn evaluate_rows<I>(&self, rows: I, now: DateTime<Utc>) -> InventoryAlerts
    where
        I: IntoIterator<Item = StockRow>,
    {
        let records: Vec<StockRecord> = rows
            .into_iter()
            .filter_map(|row| match StockRecord::try_from(row) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping malformed stock row");
                    None
                }
            })
            .collect();
        self.classify(records.iter(), now)
    }

    fn classify<'a, I>(&self, records: I, now: DateTime<Utc>) -> InventoryAlerts
    where
        I: Iterator<Item = &'a StockRecord>,
    {
        let mut alerts = InventoryAlerts::default();
        let horizon = now + TimeDelta::days(i64::from(self.lookahead_days));

        for record in records {
            if !record.is_active {
                continue;
            }
            if let Err(e) = record.validate() {
                tracing::debug!(stock_id = %record.id, error = %e, "skipping malformed stock record");
                continue;
            }

            if let Some(min_stock) = record.low_stock_threshold() {
                if record.quantity <= min_stock {
                    let severity = if record.quantity == 0.0 {
                        Severity::Critical
                    } else {
                        Severity::Warning
                    };
                    alerts.low_stock.push(LowStockAlert {
                        record: record.clone(),
                        severity,
                    });
                }
            }

            let Some(expiry) = record.expiry_date else {
                continue;
            };
            let diff_ms = (expiry - now).num_milliseconds();

            if expiry > now && expiry <= horizon {
                // Sub-millisecond differences still count as one day.
                let days_until_expiry = ceil_days(diff_ms).max(1);
                alerts.expiring.push(ExpiringAlert {
                    record: record.clone(),
                    days_until_expiry,
                    severity: self.expiry_severity(days_until_expiry),
                });
            } else if expiry < now {
                alerts.expired.push(ExpiredAlert {
                    record: record.clone(),
                    days_expired: ceil_days(-diff_ms).max(1),
                    severity: Severity::Critical,
                });
            }
        }

        alerts.summary = summarize(&alerts);
        alerts
    }

    fn expiry_severity(&self, days_until_expiry: i64) -> Severity {
        if days_until_expiry <= i64::from(self.critical_days) {
            Severity::Critical
        } else if days_until_expiry <= i64::from(self.warning_days) {
            Severity::Warning
        } else {
            Severity::Info
        }
    }
}

/// Classify `records` as of `now` with the default 30 / 14 / 7 day policy.
pub fn evaluate_alerts(records: &[StockRecord], now: DateTime<Utc>) -> InventoryAlerts {
    AlertPolicy::default().evaluate(records, now)
}

/// Ceiling division of a non-negative millisecond span into whole days.
fn ceil_days(millis: i64) -> i64 {
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

fn summarize(alerts: &InventoryAlerts) -> AlertSummary {
    let critical_low = alerts
        .low_stock
        .iter()
        .filter(|a| a.severity == Severity::Critical)
        .count();
    let critical_expiring = alerts
        .expiring
        .iter()
        .filter(|a| a.severity == Severity::Critical)
        .count();

    AlertSummary {
        total_alerts: alerts.low_stock.len() + alerts.expiring.len() + alerts.expired.len(),
        low_stock_count: alerts.low_stock.len(),
        expiring_count: alerts.expiring.len(),
        expired_count: alerts.expired.len(),
        critical_count: critical_low + critical_expiring + alerts.expired.len(),
    }
}
