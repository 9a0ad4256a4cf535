use chill_core::{ToolErrorKind, ToolOutcome};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Inbound WebSocket frame: which tool to run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolRequest {
    pub tool: String,
    /// Tool input; break tools ignore it.
    #[serde(default)]
    pub arguments: Value,
}

/// Outbound result for both HTTP and WebSocket callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    pub request_id: Uuid,
    pub tool: String,
    pub content: String,
    pub is_error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ToolErrorKind>,
}

impl ToolResponse {
    pub fn from_outcome(tool: &str, outcome: ToolOutcome) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            tool: tool.to_string(),
            content: outcome.content,
            is_error: outcome.is_error,
            error_kind: outcome.error_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_arguments_default_to_null() {
        let req: ToolRequest = serde_json::from_str(r#"{"tool":"show_meme"}"#).unwrap();
        assert_eq!(req.tool, "show_meme");
        assert!(req.arguments.is_null());
    }

    #[test]
    fn test_response_from_error_outcome() {
        let resp = ToolResponse::from_outcome(
            "nap",
            ToolOutcome::permanent_error("Unknown tool: nap".into()),
        );
        assert!(resp.is_error);
        assert_eq!(resp.error_kind, Some(ToolErrorKind::Permanent));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["tool"], "nap");
        assert_eq!(json["error_kind"], "permanent");
    }
}
