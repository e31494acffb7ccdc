//! RunContext construction and read-only commands

use draftdesk::cli::{map_error, Commands, RunContext};
use draftdesk::error::ApiError;
use tempfile::TempDir;

fn write_config(temp: &TempDir, body: &str) -> std::path::PathBuf {
    let path = temp.path().join("draftdesk.toml");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_invalid_endpoint_is_rejected_at_startup() {
    let temp = TempDir::new().unwrap();
    let path = write_config(
        &temp,
        r#"
[generation]
endpoint = "ftp://example.com/generate"
timeout_ms = 0
"#,
    );

    let err = match RunContext::new(temp.path().to_path_buf(), Some(path)) {
        Ok(_) => panic!("expected configuration error"),
        Err(e) => e,
    };
    let message = map_error(&err);
    assert!(matches!(err, ApiError::ConfigError(_)));
    assert!(message.contains("endpoint must use http or https"));
    assert!(message.contains("timeout_ms must be greater than zero"));
}

#[test]
fn test_tools_json_lists_catalogue() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "[generation]\nendpoint = \"http://localhost:9/generate\"\n");
    let context = RunContext::new(temp.path().to_path_buf(), Some(path)).unwrap();
    assert_eq!(context.config().generation.endpoint, "http://localhost:9/generate");

    let output = context
        .execute(&Commands::Tools {
            category: Some("Agreement".to_string()),
            format: "json".to_string(),
        })
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let tools = value.as_array().unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["id"], "capital-raising-advisory-agreement");
    assert_eq!(tools[0]["steps"], 6);
}

#[test]
fn test_prompt_rejects_malformed_preset() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "");
    let context = RunContext::new(temp.path().to_path_buf(), Some(path)).unwrap();

    let err = context
        .execute(&Commands::Prompt {
            tool: "forms".to_string(),
            set: vec!["company_name".to_string()],
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));

    let err = context
        .execute(&Commands::Prompt {
            tool: "forms".to_string(),
            set: vec!["no_such_field=1".to_string()],
        })
        .unwrap_err();
    assert_eq!(map_error(&err), "Session error: Unknown field: no_such_field");
}
