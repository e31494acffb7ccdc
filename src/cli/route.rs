//! CLI route: single route table and run context. Dispatches to the tool
//! catalogue, generation sessions and presentation.

use crate::cli::interactive;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_plan, format_tool_json, format_tool_text, format_tools_json, format_tools_text,
};
use crate::config::DraftDeskConfig;
use crate::error::ApiError;
use crate::export::{Exporter, MarkdownFileExporter};
use crate::generation::GenerationExecutor;
use crate::provider::RequestClient;
use crate::tools::ToolRegistry;
use crate::types::GenerationResult;
use crate::wizard::{GenerationSession, SessionState};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: loaded configuration and the tool
/// catalogue. The generation client is built on demand so that read-only
/// commands never touch the endpoint settings.
pub struct RunContext {
    config: DraftDeskConfig,
    registry: ToolRegistry,
    workspace_root: PathBuf,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = DraftDeskConfig::load_validated(&workspace_root, config_path.as_deref())?;
        Ok(Self::with_config(workspace_root, config, ToolRegistry::builtin()?))
    }

    pub fn with_config(
        workspace_root: PathBuf,
        config: DraftDeskConfig,
        registry: ToolRegistry,
    ) -> Self {
        Self {
            config,
            registry,
            workspace_root,
        }
    }

    pub fn config(&self) -> &DraftDeskConfig {
        &self.config
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        debug!(command = command.name(), workspace = %self.workspace_root.display(), "Executing command");
        match command {
            Commands::Tools { category, format } => self.handle_tools(category.as_deref(), format),
            Commands::Show { tool, format } => self.handle_show(tool, format),
            Commands::Run {
                tool,
                set,
                yes,
                output,
            } => {
                let client = RequestClient::from_config(&self.config.generation)?;
                self.handle_run(
                    tool,
                    set,
                    *yes,
                    output.as_deref(),
                    &GenerationExecutor::new(client),
                )
            }
            Commands::Prompt { tool, set } => self.handle_prompt(tool, set),
        }
    }

    fn handle_tools(&self, category: Option<&str>, format: &str) -> Result<String, ApiError> {
        let tools = match category {
            Some(c) => self.registry.list_by_category(c),
            None => self.registry.list().to_vec(),
        };
        match format {
            "json" => format_tools_json(&tools),
            _ => Ok(format_tools_text(&tools)),
        }
    }

    fn handle_show(&self, tool_id: &str, format: &str) -> Result<String, ApiError> {
        let tool = self.registry.get_or_error(tool_id)?;
        match format {
            "json" => format_tool_json(tool.as_ref()),
            _ => Ok(format_tool_text(tool.as_ref())),
        }
    }

    fn handle_prompt(&self, tool_id: &str, assignments: &[String]) -> Result<String, ApiError> {
        let session = self.session_with_presets(tool_id, assignments)?;
        Ok(format_plan(&session.tool().assemble(session.fields())))
    }

    /// Collect, submit and optionally export. Non-interactive when `yes`.
    pub fn handle_run(
        &self,
        tool_id: &str,
        assignments: &[String],
        yes: bool,
        output: Option<&Path>,
        executor: &GenerationExecutor,
    ) -> Result<String, ApiError> {
        let mut session = self.session_with_presets(tool_id, assignments)?;

        if yes {
            while matches!(session.state(), SessionState::Collecting { .. }) {
                session.advance()?;
            }
        } else {
            interactive::collect(&mut session)?;
        }

        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| ApiError::ConfigError(format!("Failed to create runtime: {}", e)))?;

        let text = loop {
            let result = runtime.block_on(session.submit(executor))?;
            match result {
                GenerationResult::Ok { text } => break text,
                GenerationResult::Failed { message } => {
                    if yes || !interactive::confirm_retry(&message)? {
                        return Err(ApiError::GenerationFailed(message));
                    }
                }
            }
        };

        let mut out = text.clone();
        if let Some(dir) = output {
            let request = session.tool().export_request(session.fields(), &text);
            let path = MarkdownFileExporter::new(dir).export(&request)?;
            info!(tool = tool_id, path = %path.display(), "Document exported");
            out.push_str(&format!("\n\nSaved to {}", path.display()));
        }
        Ok(out)
    }

    fn session_with_presets(
        &self,
        tool_id: &str,
        assignments: &[String],
    ) -> Result<GenerationSession, ApiError> {
        let tool = self.registry.get_or_error(tool_id)?;
        let mut session = GenerationSession::new(tool);
        for assignment in assignments {
            let (name, value) = parse_assignment(assignment)?;
            session.set_input(name, value)?;
        }
        Ok(session)
    }
}

/// Split `name=value`; the value may itself contain `=`.
pub fn parse_assignment(raw: &str) -> Result<(&str, &str), ApiError> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => Err(ApiError::InvalidInput(format!(
            "Expected NAME=VALUE, got '{}'",
            raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SessionError, TransportError};
    use crate::provider::envelope::wrap_text;
    use crate::provider::mock::{ManualClock, ScriptedTransport};
    use crate::provider::RetryPolicy;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn context() -> RunContext {
        RunContext::with_config(
            PathBuf::from("."),
            DraftDeskConfig::default(),
            ToolRegistry::builtin().unwrap(),
        )
    }

    fn executor(replies: Vec<Result<String, TransportError>>) -> (Arc<ScriptedTransport>, GenerationExecutor) {
        let transport = Arc::new(ScriptedTransport::new(replies));
        let client = RequestClient::new(transport.clone(), RetryPolicy::default())
            .with_sleeper(Arc::new(ManualClock::new()));
        (transport, GenerationExecutor::new(client))
    }

    fn board_presets() -> Vec<String> {
        [
            "company_name=Acme Ltd",
            "date_time=01-04-2026, 11:00 AM",
            "agenda_items=Noting of registers",
            "directors_present=A, B",
            "chairperson=A",
            "company_secretary=C",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("a=b=c").unwrap(), ("a", "b=c"));
        assert_eq!(parse_assignment("name=").unwrap(), ("name", ""));
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn test_run_non_interactive_exports_document() {
        let temp = TempDir::new().unwrap();
        let (transport, executor) = executor(vec![Ok(wrap_text("# Notice\nBody"))]);

        let output = context()
            .handle_run(
                "board-meeting-assistant",
                &board_presets(),
                true,
                Some(temp.path()),
                &executor,
            )
            .unwrap();

        assert!(output.starts_with("# Notice\nBody"));
        assert_eq!(transport.call_count(), 1);
        assert!(transport.instructions()[0].contains("1. Company Name: Acme Ltd"));
        let exported = temp.path().join("Acme_Ltd_board-meeting-documents.md");
        assert!(exported.exists());
    }

    #[test]
    fn test_run_non_interactive_reports_missing_fields() {
        let (transport, executor) = executor(Vec::new());
        let err = context()
            .handle_run(
                "board-meeting-assistant",
                &["company_name=Acme".to_string()],
                true,
                None,
                &executor,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Session(SessionError::Validation(_))
        ));
        assert_eq!(transport.call_count(), 0);
    }

    #[test]
    fn test_run_failure_surfaces_tool_message() {
        let (_, executor) = executor(vec![Ok("{}".to_string())]);
        let err = context()
            .handle_run("board-meeting-assistant", &board_presets(), true, None, &executor)
            .unwrap_err();
        match err {
            ApiError::GenerationFailed(message) => assert_eq!(
                message,
                "Sorry, we couldn't generate the documents. Please try again."
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_prompt_preview_needs_no_endpoint() {
        let out = context()
            .execute(&Commands::Prompt {
                tool: "board-meeting-assistant".to_string(),
                set: vec!["company_name=Acme Ltd".to_string()],
            })
            .unwrap();
        assert!(out.contains("general board meeting of *Acme Ltd*"));
    }

    #[test]
    fn test_unknown_tool() {
        let err = context()
            .execute(&Commands::Show {
                tool: "nope".to_string(),
                format: "text".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::UnknownTool(_)));
    }
}
