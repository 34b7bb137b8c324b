//! Tool definitions for the SQL-writing collaborator.
//!
//! Exposes the gateway as a single `execute_sql` function-calling tool and
//! dispatches tool calls to it.

use serde::{Deserialize, Serialize};

use crate::query::QueryGateway;

/// Name of the only tool this crate provides.
pub const EXECUTE_SQL: &str = "execute_sql";

/// Tool definition for LLM function calling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// A tool call requested by the collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique ID for this tool call (used to match results).
    pub id: String,
    /// Name of the tool to call.
    pub name: String,
    /// JSON-encoded arguments for the tool.
    pub arguments: String,
}

/// Result of a tool execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// ID of the tool call this result is for.
    pub tool_call_id: String,
    /// The tool's text output.
    pub content: String,
}

/// Input parameters for the execute_sql tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteSqlInput {
    pub sql: String,
}

/// Returns the tool definitions available to the collaborator.
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![ToolDefinition {
        name: EXECUTE_SQL.to_string(),
        description: "Executes a read-only query against the single known table and returns \
                      the result as a table string; only read-style statements are accepted."
            .to_string(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "sql": {
                    "type": "string",
                    "description": "A single SELECT (or WITH ... SELECT) statement"
                }
            },
            "required": ["sql"]
        }),
    }]
}

/// Runs a tool call. Never fails: problems are reported in the result content.
pub async fn dispatch(gateway: &QueryGateway, call: &ToolCall) -> ToolResult {
    let content = if call.name == EXECUTE_SQL {
        match serde_json::from_str::<ExecuteSqlInput>(&call.arguments) {
            Ok(input) => gateway.execute(&input.sql).await,
            Err(e) => format!("Invalid arguments for {EXECUTE_SQL}: {e}"),
        }
    } else {
        format!("Unknown tool: {}", call.name)
    };

    ToolResult {
        tool_call_id: call.id.clone(),
        content,
    }
}
