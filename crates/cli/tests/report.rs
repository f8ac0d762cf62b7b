use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use kitchen_cli::{parse_now, parse_rows, report};
use kitchen_core::StockId;
use kitchen_inventory::{AlertPolicy, Severity};

fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap()
}

fn export() -> String {
    json!([
        {
            "id": StockId::new().to_string(),
            "item_name": "Paneer",
            "category": "dairy",
            "quantity": 0,
            "unit": "kg",
            "min_stock": 2,
            "expiry_date": "2026-10-24T00:00:00Z",
            "is_active": true
        },
        {
            "id": StockId::new().to_string(),
            "item_name": "Ghee",
            "quantity": 8,
            "unit": "l",
            "min_stock": 3,
            "expiry_date": "2026-10-01"
        },
        {
            "id": StockId::new().to_string(),
            "item_name": "Cardamom",
            "quantity": 1,
            "min_stock": 5,
            "is_active": false
        },
        { "id": StockId::new().to_string(), "quantity": 3, "min_stock": 5 },
        { "id": StockId::new().to_string(), "item_name": "Saffron", "quantity": "lots" },
        "not even an object"
    ])
    .to_string()
}

#[test]
fn report_classifies_export_and_skips_broken_rows() {
    let alerts = report(&export(), AlertPolicy::default(), test_now()).unwrap();

    assert_eq!(alerts.low_stock.len(), 1);
    assert_eq!(alerts.low_stock[0].record.item_name, "Paneer");
    assert_eq!(alerts.low_stock[0].severity, Severity::Critical);

    assert_eq!(alerts.expiring.len(), 1);
    assert_eq!(alerts.expiring[0].days_until_expiry, 5);
    assert_eq!(alerts.expiring[0].severity, Severity::Critical);

    assert_eq!(alerts.expired.len(), 1);
    assert_eq!(alerts.expired[0].record.item_name, "Ghee");
    assert_eq!(alerts.expired[0].days_expired, 18);

    assert_eq!(alerts.summary.total_alerts, 3);
    assert_eq!(alerts.summary.critical_count, 3);
}

#[test]
fn unreadable_elements_are_dropped_before_validation() {
    let rows = parse_rows(&export()).unwrap();
    // "lots" and the bare string never become rows.
    assert_eq!(rows.len(), 4);
}

#[test]
fn non_array_export_is_an_error() {
    assert!(parse_rows(r#"{"item_name": "Salt"}"#).is_err());
    assert!(parse_rows("not json").is_err());
}

#[test]
fn empty_export_has_no_alerts() {
    let alerts = report("[]", AlertPolicy::default(), test_now()).unwrap();
    assert!(alerts.is_empty());
    assert_eq!(alerts.summary.critical_count, 0);
}

#[test]
fn now_override_is_parsed() {
    assert_eq!(parse_now(None, test_now()).unwrap(), test_now());
    assert_eq!(
        parse_now(Some("2026-10-19T02:00:00+02:00"), Utc::now()).unwrap(),
        test_now()
    );
    assert!(parse_now(Some("yesterday"), test_now()).is_err());
}
