//! Tool catalogue: every document generator available to the CLI.

use crate::error::ApiError;
use crate::wizard::ToolDefinition;
use std::sync::Arc;

pub mod board_meeting;
pub mod capital_raising;
pub mod forms;
pub mod general_meeting;
pub mod research;
pub mod resolution;

pub use board_meeting::BoardMeetingAssistant;
pub use capital_raising::CapitalRaisingAdvisoryAgreement;
pub use forms::StatutoryForms;
pub use general_meeting::GeneralMeetingAssistant;
pub use research::ResearchAssistant;
pub use resolution::ResolutionAssistant;

/// Tools by id, in registration order.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn ToolDefinition>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Registry with every built-in tool.
    pub fn builtin() -> Result<Self, ApiError> {
        let mut registry = Self::new();
        registry.register(Arc::new(StatutoryForms::new()))?;
        registry.register(Arc::new(ResearchAssistant::new()))?;
        registry.register(Arc::new(CapitalRaisingAdvisoryAgreement::new()))?;
        registry.register(Arc::new(BoardMeetingAssistant::new()))?;
        registry.register(Arc::new(GeneralMeetingAssistant::new()))?;
        registry.register(Arc::new(ResolutionAssistant::new()))?;
        Ok(registry)
    }

    /// Add a tool after checking its schema. Ids must be unique.
    pub fn register(&mut self, tool: Arc<dyn ToolDefinition>) -> Result<(), ApiError> {
        if self.get(tool.id()).is_some() {
            return Err(ApiError::ConfigError(format!(
                "Tool '{}' is already registered",
                tool.id()
            )));
        }
        tool.schema().validate().map_err(|e| {
            ApiError::ConfigError(format!("Tool '{}' has an invalid schema: {}", tool.id(), e))
        })?;
        self.tools.push(tool);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn ToolDefinition>> {
        self.tools.iter().find(|t| t.id() == id).cloned()
    }

    pub fn get_or_error(&self, id: &str) -> Result<Arc<dyn ToolDefinition>, ApiError> {
        self.get(id)
            .ok_or_else(|| ApiError::UnknownTool(id.to_string()))
    }

    pub fn list(&self) -> &[Arc<dyn ToolDefinition>] {
        &self.tools
    }

    pub fn list_by_category(&self, category: &str) -> Vec<Arc<dyn ToolDefinition>> {
        self.tools
            .iter()
            .filter(|t| t.category().eq_ignore_ascii_case(category))
            .cloned()
            .collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
