//! `kitchen-alerts`: stock alert report over a JSON export of stock rows.

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use kitchen_inventory::{AlertPolicy, InventoryAlerts, StockRow};

/// Path of the JSON export when no argument is given.
pub const STOCK_FILE_VAR: &str = "KITCHEN_STOCK_FILE";
/// RFC 3339 instant to evaluate at instead of the current time.
pub const ALERT_NOW_VAR: &str = "KITCHEN_ALERT_NOW";

/// Parse a JSON array of stock rows.
///
/// Elements that are not row-shaped (e.g. a string where a number belongs) are
/// skipped with a warning; only a non-array document fails.
pub fn parse_rows(input: &str) -> anyhow::Result<Vec<StockRow>> {
    let document: JsonValue = serde_json::from_str(input).context("stock export is not valid JSON")?;
    let JsonValue::Array(elements) = document else {
        bail!("stock export must be a JSON array of rows");
    };

    let rows = elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| match serde_json::from_value::<StockRow>(element) {
            Ok(row) => Some(row),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping unreadable stock row");
                None
            }
        })
        .collect();
    Ok(rows)
}

/// Resolve the evaluation instant: `raw` when given, `fallback` otherwise.
pub fn parse_now(raw: Option<&str>, fallback: DateTime<Utc>) -> anyhow::Result<DateTime<Utc>> {
    match raw {
        None => Ok(fallback),
        Some(raw) => {
            let parsed = DateTime::parse_from_rfc3339(raw.trim())
                .with_context(|| format!("{ALERT_NOW_VAR} is not an RFC 3339 timestamp: {raw}"))?;
            Ok(parsed.with_timezone(&Utc))
        }
    }
}

/// Build the alert report for a JSON export.
pub fn report(input: &str, policy: AlertPolicy, now: DateTime<Utc>) -> anyhow::Result<InventoryAlerts> {
    let rows = parse_rows(input)?;
    Ok(policy.evaluate_rows(rows, now))
}
