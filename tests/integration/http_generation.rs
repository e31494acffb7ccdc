//! Wizard submission over the real HTTP transport against a mock endpoint

use draftdesk::config::GenerationConfig;
use draftdesk::generation::GenerationExecutor;
use draftdesk::provider::envelope::wrap_text;
use draftdesk::provider::RequestClient;
use draftdesk::tools::board_meeting::BOARD_MEETING_FAILURE_MESSAGE;
use draftdesk::tools::ToolRegistry;
use draftdesk::types::GenerationResult;
use draftdesk::wizard::GenerationSession;
use mockito::Matcher;

fn board_session() -> GenerationSession {
    let registry = ToolRegistry::builtin().unwrap();
    let mut session = GenerationSession::new(registry.get("board-meeting-assistant").unwrap());
    for (name, value) in [
        ("company_name", "Acme Ltd"),
        ("date_time", "01-04-2026, 11:00 AM"),
        ("venue_mode", "VC"),
        ("agenda_items", "Appointment of auditor"),
        ("directors_present", "A. Rao, B. Shah"),
        ("chairperson", "A. Rao"),
        ("company_secretary", "C. Iyer"),
    ] {
        session.set_input(name, value).unwrap();
    }
    session.advance().unwrap();
    session
}

fn executor_for(url: String) -> GenerationExecutor {
    let config = GenerationConfig {
        endpoint: url,
        timeout_ms: 5_000,
        max_retries: 2,
        backoff_ms: 1,
    };
    GenerationExecutor::new(RequestClient::from_config(&config).unwrap())
}

#[tokio::test]
async fn test_board_meeting_round_trip() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate")
        .match_body(Matcher::Regex("general board meeting of \\*Acme Ltd\\*".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(wrap_text("NOTICE OF BOARD MEETING"))
        .expect(1)
        .create_async()
        .await;

    let mut session = board_session();
    let executor = executor_for(format!("{}/generate", server.url()));
    let result = session.submit(&executor).await.unwrap();

    assert_eq!(result, GenerationResult::ok("NOTICE OF BOARD MEETING"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unusable_body_shows_tool_message() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/generate")
        .with_status(200)
        .with_body("{\"candidates\": [{\"content\": {\"parts\": [{\"text\": \"  \"}]}}]}")
        .expect(1)
        .create_async()
        .await;

    let mut session = board_session();
    let executor = executor_for(format!("{}/generate", server.url()));
    let result = session.submit(&executor).await.unwrap();

    assert_eq!(result, GenerationResult::failed(BOARD_MEETING_FAILURE_MESSAGE));
    mock.assert_async().await;
}
