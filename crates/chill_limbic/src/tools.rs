//! Break actions exposed as tools.

use crate::executor::ActionExecutor;
use chill_core::{ActionId, Tool, ToolHandler, ToolInputSchema, ToolOutcome, ToolRegistry};
use std::sync::Arc;

pub const HELP_TOOL: &str = "show_help";

/// One catalogue action. Takes no input.
pub struct BreakToolHandler {
    action: ActionId,
    executor: Arc<ActionExecutor>,
}

impl BreakToolHandler {
    pub fn new(action: ActionId, executor: Arc<ActionExecutor>) -> Self {
        Self { action, executor }
    }
}

#[async_trait::async_trait]
impl ToolHandler for BreakToolHandler {
    fn name(&self) -> &str {
        self.action.as_str()
    }

    fn description(&self) -> &str {
        self.action.description()
    }

    fn schema(&self) -> Tool {
        Tool {
            name: self.action.as_str().to_string(),
            description: self.action.description().to_string(),
            input_schema: ToolInputSchema::empty(),
        }
    }

    async fn execute(&self, _input: &serde_json::Value) -> ToolOutcome {
        let report = self.executor.execute(self.action).await;
        ToolOutcome::ok(report.text)
    }
}

/// Intro screen, catalogue and live indicators.
pub struct HelpToolHandler {
    executor: Arc<ActionExecutor>,
}

impl HelpToolHandler {
    pub fn new(executor: Arc<ActionExecutor>) -> Self {
        Self { executor }
    }
}

#[async_trait::async_trait]
impl ToolHandler for HelpToolHandler {
    fn name(&self) -> &str {
        HELP_TOOL
    }

    fn description(&self) -> &str {
        "Show the server intro and every available break tool"
    }

    fn schema(&self) -> Tool {
        Tool {
            name: HELP_TOOL.to_string(),
            description: self.description().to_string(),
            input_schema: ToolInputSchema::empty(),
        }
    }

    async fn execute(&self, _input: &serde_json::Value) -> ToolOutcome {
        ToolOutcome::ok(self.executor.help_text().await)
    }
}

/// Register all eight break tools plus `show_help`.
pub fn register_all(registry: &mut ToolRegistry, executor: &Arc<ActionExecutor>) {
    for action in ActionId::ALL {
        registry.register(Box::new(BreakToolHandler::new(action, Arc::clone(executor))));
    }
    registry.register(Box::new(HelpToolHandler::new(Arc::clone(executor))));
    tracing::info!("Registered {} break tools", registry.names().len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chill_core::{ActionCatalog, BonusKind, BossAlertness, MoodState, ResponseComposer};
    use serde_json::Value;

    struct Echo;

    impl ResponseComposer for Echo {
        fn render_composed_message(&self, action: ActionId, _: u32) -> String {
            format!("did {}", action)
        }
        fn render_stress_indicator(&self, s: u32) -> String {
            format!("Stress Level: {}", s)
        }
        fn render_alert_indicator(&self, a: u32, _: u32) -> String {
            a.to_string()
        }
        fn render_bonus(&self, k: BonusKind) -> String {
            format!("{:?}", k)
        }
    }

    fn registry() -> (ToolRegistry, Arc<ActionExecutor>) {
        let exec = Arc::new(ActionExecutor::new(
            MoodState::default(),
            ActionCatalog::standard(),
            Arc::new(BossAlertness::new(0).unwrap()),
            Arc::new(Echo),
        ));
        let mut reg = ToolRegistry::new();
        register_all(&mut reg, &exec);
        (reg, exec)
    }

    #[tokio::test]
    async fn test_all_tools_registered() {
        let (reg, _) = registry();
        assert_eq!(reg.available_tools().len(), 9);
        for id in ActionId::ALL {
            assert!(reg.contains(id.as_str()));
        }
        assert!(reg.contains(HELP_TOOL));
    }

    #[tokio::test]
    async fn test_dispatch_runs_the_action() {
        let (reg, exec) = registry();
        let out = reg.dispatch("coffee_mission", &Value::Null).await;
        assert!(!out.is_error);
        assert!(out.content.starts_with("did coffee_mission"));
        assert_eq!(exec.streak(ActionId::CoffeeMission).await, 1);
    }

    #[tokio::test]
    async fn test_help_leaves_history_alone() {
        let (reg, exec) = registry();
        let out = reg.dispatch(HELP_TOOL, &Value::Null).await;
        assert!(!out.is_error);
        assert!(exec.snapshot().await.history.is_empty());
    }
}
