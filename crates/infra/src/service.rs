use chrono::{DateTime, Utc};
use tracing::{info, warn};

use kitchen_inventory::{AlertPolicy, InventoryAlerts};

use crate::source::{SourceError, StockSource};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlertServiceError {
    #[error("stock data unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),
}

/// Pulls the active stock snapshot from a [`StockSource`] and classifies it.
///
/// A failed fetch is returned as a single error: no retry, no partial result.
#[derive(Debug, Clone)]
pub struct AlertService<S> {
    source: S,
    policy: AlertPolicy,
}

impl<S> AlertService<S>
where
    S: StockSource,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            policy: AlertPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: AlertPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> AlertPolicy {
        self.policy
    }

    /// Evaluate alerts as of `now`.
    pub fn evaluate_at(&self, now: DateTime<Utc>) -> Result<InventoryAlerts, AlertServiceError> {
        let records = self.source.active_records().map_err(|e| {
            warn!(error = %e, "failed to load stock snapshot");
            e
        })?;

        let alerts = self.policy.evaluate(&records, now);
        let summary = alerts.summary;

        info!(
            records = records.len(),
            total_alerts = summary.total_alerts,
            low_stock = summary.low_stock_count,
            expiring = summary.expiring_count,
            expired = summary.expired_count,
            "stock alerts evaluated"
        );
        if summary.critical_count > 0 {
            warn!(critical = summary.critical_count, "critical stock alerts present");
        }

        Ok(alerts)
    }

    /// Evaluate alerts as of the current wall-clock time.
    pub fn evaluate_now(&self) -> Result<InventoryAlerts, AlertServiceError> {
        self.evaluate_at(Utc::now())
    }
}
