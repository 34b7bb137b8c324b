//! Tool dispatch integration tests.

use super::Fixture;
use querygate::tools::{dispatch, ToolCall};

#[tokio::test]
async fn test_execute_sql_tool_call() {
    let fixture = Fixture::new();
    let gateway = fixture.gateway().await;
    let call = ToolCall {
        id: "call_42".to_string(),
        name: "execute_sql".to_string(),
        arguments: r#"{"sql": "SELECT surname FROM customers WHERE id = 4"}"#.to_string(),
    };

    let result = dispatch(&gateway, &call).await;

    assert_eq!(result.tool_call_id, "call_42");
    assert_eq!(result.content, "surname\nCampbell");
}

#[tokio::test]
async fn test_tool_result_serializes_as_json_line() {
    let fixture = Fixture::new();
    let gateway = fixture.gateway().await;
    let call: ToolCall = serde_json::from_str(
        r#"{"id":"c1","name":"execute_sql","arguments":"{\"sql\":\"INSERT INTO customers (id) VALUES (9)\"}"}"#,
    )
    .unwrap();

    let result = dispatch(&gateway, &call).await;
    let encoded = serde_json::to_string(&result).unwrap();

    assert_eq!(
        encoded,
        r#"{"tool_call_id":"c1","content":"Only SELECT queries are allowed."}"#
    );
}
