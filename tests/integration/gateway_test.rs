//! Gateway integration tests against a real store.

use super::{Fixture, CUSTOMER_COUNT};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_empty_sql() {
    let fixture = Fixture::new();
    let gateway = fixture.gateway().await;

    assert_eq!(gateway.execute("").await, "No valid SQL to execute.");
    assert_eq!(gateway.execute("   \n ").await, "No valid SQL to execute.");
}

#[tokio::test]
async fn test_drop_table_refused_and_table_intact() {
    let fixture = Fixture::new();
    let gateway = fixture.gateway().await;

    assert_eq!(
        gateway.execute("DROP TABLE customers").await,
        "Only SELECT queries are allowed."
    );
    assert_eq!(
        gateway.execute("DELETE FROM customers").await,
        "Only SELECT queries are allowed."
    );

    let output = gateway.execute("SELECT COUNT(*) AS n FROM customers").await;
    assert_eq!(output, format!("n\n{CUSTOMER_COUNT}"));
}

#[tokio::test]
async fn test_piggybacked_statement_refused() {
    let fixture = Fixture::new();
    let gateway = fixture.gateway().await;

    let output = gateway
        .execute("SELECT * FROM customers; DROP TABLE customers")
        .await;
    assert!(output.starts_with("SQL Execution Error: "), "{output}");

    let output = gateway.execute("SELECT COUNT(*) AS n FROM customers").await;
    assert_eq!(output, format!("n\n{CUSTOMER_COUNT}"));
}

#[tokio::test]
async fn test_second_statement_never_runs_with_sqlite_only_syntax() {
    let fixture = Fixture::new();
    let gateway = fixture.gateway().await;

    for sql in [
        "SELECT 1 AS a WHERE 1 NOTNULL; SELECT 2 AS a",
        "SELECT 1 AS a; SELECT 2 AS a WHERE 'x' GLOB 'x'",
        "SELECT 1 AS a WHERE 1 ISNULL; SELECT 2 AS a",
    ] {
        assert_eq!(
            gateway.execute(sql).await,
            "SQL Execution Error: multiple statements are not allowed (found 2)"
        );
    }
}

#[tokio::test]
async fn test_sqlite_only_syntax_single_statement() {
    let fixture = Fixture::new();
    let gateway = fixture.gateway().await;

    let output = gateway
        .execute("SELECT surname FROM customers WHERE balance NOTNULL AND id = 1")
        .await;
    assert_eq!(output, "surname\nWalsh");
}

#[tokio::test]
async fn test_no_results() {
    let fixture = Fixture::new();
    let gateway = fixture.gateway().await;

    assert_eq!(
        gateway
            .execute("SELECT * FROM customers WHERE id = -1")
            .await,
        "No results found."
    );
}

#[tokio::test]
async fn test_unknown_column_reports_engine_error() {
    let fixture = Fixture::new();
    let gateway = fixture.gateway().await;

    let output = gateway
        .execute("SELECT nonexistent_col FROM customers")
        .await;

    assert!(output.starts_with("SQL Execution Error: "), "{output}");
    assert!(output.contains("nonexistent_col"), "{output}");
}

#[tokio::test]
async fn test_show_reports_engine_error() {
    let fixture = Fixture::new();
    let gateway = fixture.gateway().await;

    // Allowed by the prefix check, but SQLite has no SHOW statement.
    let output = gateway.execute("SHOW TABLES").await;
    assert!(output.starts_with("SQL Execution Error: "), "{output}");
}

#[tokio::test]
async fn test_case_insensitive_filter() {
    let fixture = Fixture::new();
    let gateway = fixture.gateway().await;

    let output = gateway
        .execute("SELECT name, surname, region, date_joined FROM customers WHERE LOWER(name) = 'lisa' ORDER BY id")
        .await;

    let expected = "\
name  surname   region    date_joined
Lisa  Morrison  Scotland  12.Feb.16
Lisa  Grant     England   01.Dec.18";
    assert_eq!(output, expected);
}

#[tokio::test]
async fn test_full_result_one_line_per_row() {
    let fixture = Fixture::new();
    let gateway = fixture.gateway().await;

    let output = gateway.execute("SELECT * FROM customers").await;
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), CUSTOMER_COUNT + 1);
    for column in [
        "id",
        "name",
        "surname",
        "gender",
        "age",
        "region",
        "job_classification",
        "date_joined",
        "balance",
    ] {
        assert!(lines[0].split_whitespace().any(|h| h == column));
    }
    assert!(lines[1].contains("Simon") && lines[1].contains("113810.15"));
    assert!(lines[5].contains("Grant"));
}

#[tokio::test]
async fn test_aggregate_with_cte() {
    let fixture = Fixture::new();
    let gateway = fixture.gateway().await;

    let output = gateway
        .execute(
            "WITH by_region AS (SELECT region, COUNT(*) AS num_customers FROM customers GROUP BY region) \
             SELECT region, num_customers FROM by_region ORDER BY num_customers DESC, region",
        )
        .await;

    let expected = "\
region    num_customers
England               2
India                 1
Scotland              1
Wales                 1";
    assert_eq!(output, expected);
}

#[tokio::test]
async fn test_concurrent_reads() {
    let fixture = Fixture::new();
    let gateway = fixture.gateway().await;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let gateway = gateway.clone();
            tokio::spawn(async move {
                gateway
                    .execute("SELECT COUNT(*) AS n FROM customers")
                    .await
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), format!("n\n{CUSTOMER_COUNT}"));
    }
}
