//! Interactive wizard driver: prompts for each step with dialoguer and walks
//! the session to `Confirming`.

use crate::cli::presentation::format_review;
use crate::error::{ApiError, SessionError};
use crate::fields::FieldValue;
use crate::wizard::{FieldKind, FieldSpec, GenerationSession, SessionState};
use dialoguer::{Confirm, Input, Select};
use owo_colors::OwoColorize;

fn input_error(e: dialoguer::Error) -> ApiError {
    ApiError::InvalidInput(format!("Failed to get user input: {}", e))
}

fn warn_user(message: &str) {
    eprintln!("{}", message.yellow());
}

/// Drive the session until the user confirms the review.
pub fn collect(session: &mut GenerationSession) -> Result<(), ApiError> {
    loop {
        match session.state().clone() {
            SessionState::Collecting { step } => {
                prompt_step(session, step)?;
                if step > 0 {
                    let next = Select::new()
                        .with_prompt("Continue?")
                        .items(&["Next", "Back"])
                        .default(0)
                        .interact()
                        .map_err(input_error)?;
                    if next == 1 {
                        session.retreat()?;
                        continue;
                    }
                }
                match session.advance() {
                    Ok(()) => {}
                    Err(SessionError::Validation(notice)) => warn_user(&notice.to_string()),
                    Err(other) => return Err(other.into()),
                }
            }
            SessionState::Confirming => {
                eprintln!("{}", format_review(&session.review()));
                let choice = Select::new()
                    .with_prompt("Generate this document?")
                    .items(&["Generate", "Edit a step", "Cancel"])
                    .default(0)
                    .interact()
                    .map_err(input_error)?;
                match choice {
                    0 => return Ok(()),
                    1 => {
                        // Hidden steps are not listed, so map back to the step index.
                        let steps = session.review();
                        let titles: Vec<String> = steps
                            .iter()
                            .map(|s| format!("{}. {}", s.index + 1, s.title))
                            .collect();
                        let picked = Select::new()
                            .with_prompt("Which step?")
                            .items(&titles)
                            .default(0)
                            .interact()
                            .map_err(input_error)?;
                        session.edit_step(steps[picked].index)?;
                    }
                    _ => return Err(ApiError::Cancelled),
                }
            }
            _ => return Ok(()),
        }
    }
}

/// Ask whether to resubmit after a failed generation.
pub fn confirm_retry(message: &str) -> Result<bool, ApiError> {
    warn_user(message);
    Confirm::new()
        .with_prompt("Try again?")
        .default(true)
        .interact()
        .map_err(input_error)
}

fn prompt_step(session: &mut GenerationSession, step: usize) -> Result<(), ApiError> {
    let tool = session.tool().clone();
    let schema = tool.schema();
    let Some(spec) = schema.step(step) else {
        return Ok(());
    };
    eprintln!(
        "\n{}",
        format!("Step {} of {}: {}", step + 1, schema.step_count(), spec.title)
            .bold()
            .underline()
    );

    for field in &spec.fields {
        // Visibility depends on answers given earlier in this step.
        if !schema.is_visible(field, session.fields()) {
            continue;
        }
        loop {
            let required = schema.is_required(field, session.fields());
            let outcome = match &field.kind {
                FieldKind::Choice(options) => {
                    let current = session.fields().value(&field.name);
                    let default = options.iter().position(|o| *o == current).unwrap_or(0);
                    let picked = Select::new()
                        .with_prompt(&field.label)
                        .items(options)
                        .default(default)
                        .interact()
                        .map_err(input_error)?;
                    session.set_field(&field.name, FieldValue::choice(options[picked].clone()))
                }
                _ => {
                    let raw = prompt_text(field, required, &session.fields().input(&field.name))?;
                    session.set_input(&field.name, &raw)
                }
            };
            match outcome {
                Ok(()) => break,
                Err(e @ (SessionError::WrongValueKind { .. } | SessionError::InvalidChoice { .. })) => {
                    warn_user(&e.to_string())
                }
                Err(other) => return Err(other.into()),
            }
        }
    }
    Ok(())
}

fn prompt_text(field: &FieldSpec, required: bool, current: &str) -> Result<String, ApiError> {
    let mut label = field.label.clone();
    if required {
        label.push_str(" *");
    }
    if let Some(help) = &field.help {
        label.push_str(&format!(" ({})", help));
    } else if let FieldKind::Group(parts) = &field.kind {
        label.push_str(&format!(" ({}=...; separated by ';')", parts.join("=...; ")));
    } else if field.kind == FieldKind::Date {
        label.push_str(" (YYYY-MM-DD)");
    }
    Input::<String>::new()
        .with_prompt(label)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()
        .map_err(input_error)
}
