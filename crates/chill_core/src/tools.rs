//! Tool abstraction: how callers see break actions.
//!
//! Every action (and the help screen) is registered as a `ToolHandler` and
//! dispatched by name, so the CLI and the gateway share one entry point.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Tool definition advertised to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: ToolInputSchema,
}

/// JSON Schema for tool input parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    pub properties: Value,
    pub required: Vec<String>,
}

impl ToolInputSchema {
    /// Schema for a tool that takes no arguments.
    pub fn empty() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: serde_json::json!({}),
            required: vec![],
        }
    }
}

/// Classification of tool execution errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorKind {
    /// Transient: worth retrying.
    Transient,
    /// Permanent: unknown tool, bad input. Retrying won't help.
    Permanent,
}

/// Structured result from a tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutcome {
    pub content: String,
    pub is_error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ToolErrorKind>,
}

impl ToolOutcome {
    pub fn ok(content: String) -> Self {
        Self { content, is_error: false, error_kind: None }
    }

    pub fn transient_error(msg: String) -> Self {
        Self { content: msg, is_error: true, error_kind: Some(ToolErrorKind::Transient) }
    }

    pub fn permanent_error(msg: String) -> Self {
        Self { content: msg, is_error: true, error_kind: Some(ToolErrorKind::Permanent) }
    }
}

#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Unique name used for dispatch (must match the tool name in schema).
    fn name(&self) -> &str;
    /// Human-readable description for logging.
    fn description(&self) -> &str;
    fn schema(&self) -> Tool;
    async fn execute(&self, input: &Value) -> ToolOutcome;
}

// ============================================================================
// ToolRegistry
// ============================================================================

/// Name-keyed set of handlers. Listing order is alphabetical.
#[derive(Default)]
pub struct ToolRegistry {
    handlers: BTreeMap<String, Box<dyn ToolHandler>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool handler. Overwrites any existing handler with the same name.
    pub fn register(&mut self, handler: Box<dyn ToolHandler>) {
        let name = handler.name().to_string();
        tracing::debug!("Registered tool: {}", name);
        self.handlers.insert(name, handler);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    pub fn available_tools(&self) -> Vec<Tool> {
        self.handlers.values().map(|h| h.schema()).collect()
    }

    pub async fn dispatch(&self, name: &str, input: &Value) -> ToolOutcome {
        match self.handlers.get(name) {
            Some(handler) => {
                tracing::debug!("Dispatching tool: {}", name);
                handler.execute(input).await
            }
            None => {
                tracing::warn!("Unknown tool requested: {}", name);
                ToolOutcome::permanent_error(format!("Unknown tool: {}", name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait::async_trait]
    impl ToolHandler for Echo {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "echoes"
        }
        fn schema(&self) -> Tool {
            Tool {
                name: "echo".to_string(),
                description: "echoes".to_string(),
                input_schema: ToolInputSchema::empty(),
            }
        }
        async fn execute(&self, input: &Value) -> ToolOutcome {
            ToolOutcome::ok(input.to_string())
        }
    }

    #[tokio::test]
    async fn test_dispatch_known_and_unknown() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(Echo));
        assert!(registry.contains("echo"));
        assert_eq!(registry.available_tools().len(), 1);

        let out = registry.dispatch("echo", &serde_json::json!({"a": 1})).await;
        assert!(!out.is_error);
        assert_eq!(out.content, r#"{"a":1}"#);

        let out = registry.dispatch("nope", &Value::Null).await;
        assert!(out.is_error);
        assert_eq!(out.error_kind, Some(ToolErrorKind::Permanent));
    }

    #[test]
    fn test_outcome_serialization_skips_empty_kind() {
        let json = serde_json::to_value(ToolOutcome::ok("hi".into())).unwrap();
        assert!(json.get("error_kind").is_none());
        let json = serde_json::to_value(ToolOutcome::transient_error("x".into())).unwrap();
        assert_eq!(json["error_kind"], "transient");
    }
}
