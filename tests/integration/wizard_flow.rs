//! End-to-end wizard sessions against a scripted endpoint

use super::test_utils::{scripted_executor, timeout};
use draftdesk::error::SessionError;
use draftdesk::fields::FieldSet;
use draftdesk::generation::GenerationPlan;
use draftdesk::prompt::render_schema;
use draftdesk::provider::envelope::wrap_text;
use draftdesk::tools::ToolRegistry;
use draftdesk::types::{GenerationRequest, GenerationResult, SERVER_ERROR_MESSAGE};
use draftdesk::wizard::{
    Completion, FieldSpec, GenerationSession, SessionState, StepSpec, ToolDefinition,
    WizardSchema,
};
use std::sync::Arc;
use std::time::Duration;

/// Two-step note tool: a required name, then optional notes.
struct NoteTool {
    schema: WizardSchema,
}

impl NoteTool {
    fn new() -> Self {
        Self {
            schema: WizardSchema::new(vec![
                StepSpec::new("Who").field(FieldSpec::text("name", "Name").required()),
                StepSpec::new("Notes").field(FieldSpec::text_area("notes", "Notes")),
            ]),
        }
    }
}

impl ToolDefinition for NoteTool {
    fn id(&self) -> &'static str {
        "note"
    }

    fn title(&self) -> &'static str {
        "Note"
    }

    fn category(&self) -> &'static str {
        "Test"
    }

    fn schema(&self) -> &WizardSchema {
        &self.schema
    }

    fn assemble(&self, fields: &FieldSet) -> GenerationPlan {
        GenerationPlan::Single(GenerationRequest::new(render_schema(
            "Write a short note.",
            &self.schema,
            fields,
        )))
    }
}

fn note_session() -> GenerationSession {
    GenerationSession::new(Arc::new(NoteTool::new()))
}

fn fill_and_confirm(session: &mut GenerationSession, name: &str) {
    session.set_input("name", name).unwrap();
    session.advance().unwrap();
    session.advance().unwrap();
    assert_eq!(session.state(), &SessionState::Confirming);
}

#[tokio::test]
async fn test_required_field_blocks_then_generates() {
    let (transport, _, executor) = scripted_executor(vec![Ok(wrap_text("Dear Asha"))]);
    let mut session = note_session();

    let err = session.advance().unwrap_err();
    match err {
        SessionError::Validation(notice) => {
            assert_eq!(notice.step_index, 0);
            assert_eq!(notice.missing, vec!["Name".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(session.current_step(), Some(0));

    fill_and_confirm(&mut session, "Asha");
    let result = session.submit(&executor).await.unwrap();

    assert_eq!(result, GenerationResult::ok("Dear Asha"));
    assert!(matches!(session.state(), SessionState::Completed(_)));
    assert_eq!(transport.call_count(), 1);
    assert!(transport.instructions()[0].contains("Name: Asha"));
}

#[tokio::test]
async fn test_edit_from_review_keeps_values() {
    let (transport, _, executor) = scripted_executor(vec![Ok(wrap_text("ok"))]);
    let mut session = note_session();
    fill_and_confirm(&mut session, "Asha");

    session.edit_step(1).unwrap();
    session.set_input("notes", "Bring the minute book").unwrap();
    session.advance().unwrap();
    assert_eq!(session.state(), &SessionState::Confirming);
    assert_eq!(session.fields().value("name"), "Asha");

    session.submit(&executor).await.unwrap();
    let instruction = &transport.instructions()[0];
    assert!(instruction.contains("Name: Asha"));
    assert!(instruction.contains("Notes: Bring the minute book"));
}

#[tokio::test]
async fn test_timeouts_exhaust_budget_then_retry_succeeds() {
    let (transport, clock, executor) = scripted_executor(vec![
        timeout(),
        timeout(),
        timeout(),
        Ok(wrap_text("second time lucky")),
    ]);
    let mut session = note_session();
    fill_and_confirm(&mut session, "Asha");

    let failed = session.submit(&executor).await.unwrap();
    assert_eq!(failed, GenerationResult::failed(SERVER_ERROR_MESSAGE));
    assert!(matches!(session.state(), SessionState::Failed(_)));
    assert_eq!(transport.call_count(), 3);
    assert_eq!(
        clock.sleeps(),
        vec![Duration::from_secs(2), Duration::from_secs(2)]
    );

    // Retrying from the failed state resubmits the same fields.
    let ok = session.submit(&executor).await.unwrap();
    assert_eq!(ok.text(), Some("second time lucky"));
    let instructions = transport.instructions();
    assert_eq!(instructions[0], instructions[3]);
}

#[tokio::test]
async fn test_reset_makes_outstanding_ticket_stale() {
    let mut session = note_session();
    fill_and_confirm(&mut session, "Asha");

    let ticket = session.confirm().unwrap();
    assert_eq!(session.state(), &SessionState::Submitting);
    session.reset();

    let outcome = session
        .complete(ticket, GenerationResult::ok("late answer"))
        .unwrap();
    assert_eq!(outcome, Completion::Stale);
    assert_eq!(session.state(), &SessionState::Collecting { step: 0 });
    assert_eq!(session.fields().value("name"), "");
    assert!(session.result().is_none());
}

#[test]
fn test_capital_raising_currency_follows_country() {
    let registry = ToolRegistry::builtin().unwrap();
    let mut session =
        GenerationSession::new(registry.get("capital-raising-advisory-agreement").unwrap());

    session.set_input("company_country", "Japan").unwrap();
    assert_eq!(session.fields().value("currency"), "JPY");
    session.set_input("min_inr_value", "5,00,000").unwrap();

    session.set_input("company_country", "India").unwrap();
    assert_eq!(session.fields().value("currency"), "INR");
    assert_eq!(session.fields().value("min_inr_value"), "");

    let schema = session.tool().schema();
    let spec = schema.field("min_inr_value").unwrap();
    assert!(!schema.is_visible(spec, session.fields()));
    assert!(!schema.is_required(spec, session.fields()));
}

#[tokio::test]
async fn test_resolution_details_step_follows_resolution_type() {
    let registry = ToolRegistry::builtin().unwrap();
    let (transport, _, executor) = scripted_executor(vec![
        Ok(wrap_text("BOARD RESOLUTION")),
        Ok(wrap_text("SPECIAL RESOLUTION")),
    ]);
    let mut session = GenerationSession::new(registry.get("resolution-assistant").unwrap());

    session.set_input("requirement", "Appointment of Director").unwrap();
    session.advance().unwrap();
    session.advance().unwrap();
    assert_eq!(session.state(), &SessionState::Confirming);
    assert!(session.review().iter().all(|s| s.title != "Additional Details"));

    let board = session.submit(&executor).await.unwrap();
    assert_eq!(board.text(), Some("BOARD RESOLUTION"));
    assert!(!transport.instructions()[0].contains("Additional Details:"));

    session.reset();
    session.set_input("requirement", "Issue of Shares").unwrap();
    session.advance().unwrap();
    session.advance().unwrap();
    assert_eq!(session.current_step(), Some(2));
    session.set_input("effective_date", "2026-04-01").unwrap();
    session.advance().unwrap();

    let special = session.submit(&executor).await.unwrap();
    assert_eq!(special.text(), Some("SPECIAL RESOLUTION"));
    let instruction = &transport.instructions()[1];
    assert!(instruction.contains("- Applicable Section: Section 62"));
    assert!(instruction.contains("- Effective Date: 2026-04-01"));
}
