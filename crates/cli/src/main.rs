use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;

use kitchen_cli::{parse_now, report, ALERT_NOW_VAR, STOCK_FILE_VAR};
use kitchen_infra::AlertConfig;

fn main() -> anyhow::Result<()> {
    kitchen_observability::init();

    let path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(STOCK_FILE_VAR).map(PathBuf::from))
        .with_context(|| format!("usage: kitchen-alerts <stock.json> (or set {STOCK_FILE_VAR})"))?;

    let config = AlertConfig::from_env()?;
    let now = parse_now(std::env::var(ALERT_NOW_VAR).ok().as_deref(), Utc::now())?;

    let input = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let alerts = report(&input, config.policy, now)?;

    tracing::info!(
        path = %path.display(),
        total_alerts = alerts.summary.total_alerts,
        critical = alerts.summary.critical_count,
        "stock alert report generated"
    );

    println!("{}", serde_json::to_string_pretty(&alerts)?);
    Ok(())
}
