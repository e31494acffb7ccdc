//! Chained generation through a full wizard session

use super::test_utils::{scripted_executor, timeout};
use draftdesk::error::TransportError;
use draftdesk::generation::{ChainPlan, GenerationPlan, PlanExecutor};
use draftdesk::provider::envelope::wrap_text;
use draftdesk::tools::forms::{
    FORMS_FAILURE_MESSAGE, FORMS_PART_TWO_ERROR_NOTICE, FORMS_PART_TWO_NOTICE,
};
use draftdesk::tools::ToolRegistry;
use draftdesk::types::{GenerationRequest, GenerationResult, SERVER_ERROR_MESSAGE};
use draftdesk::wizard::{GenerationSession, SessionState};

fn forms_session() -> GenerationSession {
    let registry = ToolRegistry::builtin().unwrap();
    let mut session = GenerationSession::new(registry.get("forms").unwrap());
    session.advance().unwrap();
    session
}

#[tokio::test]
async fn test_both_parts_are_joined_in_order() {
    let (transport, _, executor) =
        scripted_executor(vec![Ok(wrap_text("Part A")), Ok(wrap_text("Part B"))]);
    let mut session = forms_session();

    let result = session.submit(&executor).await.unwrap();

    assert_eq!(result.text(), Some("Part A\n\nPart B"));
    let instructions = transport.instructions();
    assert_eq!(instructions.len(), 2);
    assert!(instructions[0].contains("Incorporation & Registration"));
    assert!(instructions[1].contains("Winding Up & Strike Off"));
}

#[tokio::test]
async fn test_second_part_timeouts_keep_first_part_with_error_notice() {
    let (transport, _, executor) = scripted_executor(vec![
        Ok(wrap_text("Part A")),
        timeout(),
        timeout(),
        timeout(),
    ]);
    let mut session = forms_session();

    let result = session.submit(&executor).await.unwrap();

    assert_eq!(
        result.text(),
        Some(format!("Part A\n\n{}", FORMS_PART_TWO_ERROR_NOTICE).as_str())
    );
    assert!(matches!(session.state(), SessionState::Completed(_)));
    assert_eq!(transport.call_count(), 4);
}

#[tokio::test]
async fn test_second_part_unusable_reply_keeps_first_part_with_apology() {
    let (transport, _, executor) =
        scripted_executor(vec![Ok(wrap_text("Part A")), Ok("{}".to_string())]);
    let mut session = forms_session();

    let result = session.submit(&executor).await.unwrap();

    assert_eq!(
        result.text(),
        Some(format!("Part A\n\n{}", FORMS_PART_TWO_NOTICE).as_str())
    );
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test]
async fn test_first_part_failure_fails_chain_without_second_call() {
    let (transport, _, executor) = scripted_executor(vec![Ok("{\"candidates\": []}".to_string())]);
    let mut session = forms_session();

    let result = session.submit(&executor).await.unwrap();

    assert_eq!(result, GenerationResult::failed(FORMS_FAILURE_MESSAGE));
    assert!(matches!(session.state(), SessionState::Failed(_)));
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_default_notice_numbers_the_failed_part() {
    let (transport, _, executor) = scripted_executor(vec![
        Ok(wrap_text("one")),
        Ok(wrap_text("two")),
        Err(TransportError::Connect("refused".to_string())),
    ]);
    let plan = GenerationPlan::Chained(
        ChainPlan::new(GenerationRequest::new("first"))
            .then(GenerationRequest::new("second"))
            .then(GenerationRequest::new("third"))
            .then(GenerationRequest::new("fourth")),
    );

    let result = executor.execute(&plan).await;

    assert_eq!(
        result.text(),
        Some(
            "one\n\ntwo\n\nAn error occurred while generating part 3 of this document. \
             Please try again later."
        )
    );
    assert_eq!(transport.call_count(), 3);
    assert_ne!(result.display_text(), SERVER_ERROR_MESSAGE);
}
