//! Dataset bootstrap integration tests.

use super::{open_gateway, Fixture, CUSTOMER_COUNT};
use querygate::dataset::{ensure_store, StoreStatus};
use querygate::error::QueryGateError;

#[tokio::test]
async fn test_ensure_store_creates_table() {
    let fixture = Fixture::new();

    let status = ensure_store(&fixture.source, &fixture.store, "customers")
        .await
        .unwrap();

    assert_eq!(
        status,
        StoreStatus::Created {
            rows: CUSTOMER_COUNT
        }
    );
    assert!(fixture.store.exists());
}

#[tokio::test]
async fn test_ensure_store_is_idempotent() {
    let fixture = Fixture::new();

    ensure_store(&fixture.source, &fixture.store, "customers")
        .await
        .unwrap();
    let first = std::fs::read(&fixture.store).unwrap();

    let status = ensure_store(&fixture.source, &fixture.store, "customers")
        .await
        .unwrap();
    let second = std::fs::read(&fixture.store).unwrap();

    assert_eq!(status, StoreStatus::Existing);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_existing_store_ignores_changed_source() {
    let fixture = Fixture::new();
    ensure_store(&fixture.source, &fixture.store, "customers")
        .await
        .unwrap();

    std::fs::write(&fixture.source, "id\n1\n").unwrap();
    ensure_store(&fixture.source, &fixture.store, "customers")
        .await
        .unwrap();

    let gateway = open_gateway(&fixture.store);
    let output = gateway.execute("SELECT COUNT(*) AS n FROM customers").await;
    assert_eq!(output, format!("n\n{CUSTOMER_COUNT}"));
}

#[tokio::test]
async fn test_count_matches_source_records() {
    let fixture = Fixture::new();
    let gateway = fixture.gateway().await;

    let output = gateway.execute("SELECT COUNT(*) FROM customers").await;

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "COUNT(*)");
    assert_eq!(lines[1].trim(), CUSTOMER_COUNT.to_string());
}

#[tokio::test]
async fn test_columns_match_source_header() {
    let fixture = Fixture::new();
    let gateway = fixture.gateway().await;

    let schema = gateway.describe().await.unwrap();

    for column in [
        "id: INTEGER",
        "name: TEXT",
        "surname: TEXT",
        "gender: TEXT",
        "age: INTEGER",
        "region: TEXT",
        "job_classification: TEXT",
        "date_joined: TEXT",
        "balance: REAL",
    ] {
        assert!(schema.contains(column), "missing {column} in:\n{schema}");
    }
}

#[tokio::test]
async fn test_missing_source_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("bank_data.db");

    let err = ensure_store(&dir.path().join("customers.csv"), &store, "customers")
        .await
        .unwrap_err();

    assert!(matches!(err, QueryGateError::DataSource(_)));
    assert!(!store.exists());
}
