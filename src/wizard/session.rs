//! Generation session lifecycle.
//!
//! `Collecting { step } -> Confirming -> Submitting -> Completed | Failed`,
//! with `Confirming -> Collecting { i }` for edits and `Failed -> Submitting`
//! for retries. Every operation either applies fully or returns an error and
//! leaves the session untouched.

use super::ToolDefinition;
use crate::error::SessionError;
use crate::fields::{FieldSet, FieldValue};
use crate::generation::{GenerationPlan, PlanExecutor};
use crate::types::GenerationResult;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Collecting { step: usize },
    Confirming,
    Submitting,
    Completed(GenerationResult),
    Failed(GenerationResult),
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Collecting { .. } => "collecting",
            SessionState::Confirming => "confirming",
            SessionState::Submitting => "submitting",
            SessionState::Completed(_) => "completed",
            SessionState::Failed(_) => "failed",
        }
    }
}

/// Handed out by [`GenerationSession::confirm`]; carries the plan to execute
/// and the epoch it belongs to. Each confirm opens a new epoch, so a ticket
/// is good for one completion at most.
#[derive(Debug, PartialEq, Eq)]
pub struct SubmissionTicket {
    epoch: u64,
    plan: GenerationPlan,
}

impl SubmissionTicket {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn plan(&self) -> &GenerationPlan {
        &self.plan
    }
}

/// What [`GenerationSession::complete`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The session was reset after the ticket was issued.
    Stale,
}

/// One step of the confirmation review: visible fields with their values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReview {
    pub index: usize,
    pub title: String,
    pub entries: Vec<(String, String)>,
}

pub struct GenerationSession {
    tool: Arc<dyn ToolDefinition>,
    fields: FieldSet,
    state: SessionState,
    epoch: u64,
}

impl GenerationSession {
    pub fn new(tool: Arc<dyn ToolDefinition>) -> Self {
        let fields = tool.schema().default_fields();
        Self {
            tool,
            fields,
            state: SessionState::Collecting { step: 0 },
            epoch: 0,
        }
    }

    pub fn tool(&self) -> &Arc<dyn ToolDefinition> {
        &self.tool
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn current_step(&self) -> Option<usize> {
        match self.state {
            SessionState::Collecting { step } => Some(step),
            _ => None,
        }
    }

    pub fn step_count(&self) -> usize {
        self.tool.schema().step_count()
    }

    /// Result of the last applied submission.
    pub fn result(&self) -> Option<&GenerationResult> {
        match &self.state {
            SessionState::Completed(result) | SessionState::Failed(result) => Some(result),
            _ => None,
        }
    }

    fn invalid(&self, operation: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            operation,
            state: self.state.as_str(),
        }
    }

    fn transition(&mut self, next: SessionState) {
        debug!(
            tool = self.tool.id(),
            from = self.state.as_str(),
            to = next.as_str(),
            epoch = self.epoch,
            "Session transition"
        );
        self.state = next;
    }

    /// Write one field. Only while collecting; the tool's change hook runs
    /// after the write.
    pub fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), SessionError> {
        if !matches!(self.state, SessionState::Collecting { .. }) {
            return Err(self.invalid("set a field"));
        }
        let spec = self
            .tool
            .schema()
            .field(name)
            .ok_or_else(|| SessionError::UnknownField(name.to_string()))?;
        if let (Some(options), FieldValue::Choice(choice)) = (spec.options(), &value) {
            if !choice.is_empty() && !options.iter().any(|o| o == choice) {
                return Err(SessionError::InvalidChoice {
                    field: name.to_string(),
                    value: choice.clone(),
                });
            }
        }
        self.fields.set(name, value)?;
        self.tool.on_field_changed(name, &mut self.fields);
        Ok(())
    }

    /// Parse raw text according to the field's kind, then [`set_field`](Self::set_field).
    pub fn set_input(&mut self, name: &str, raw: &str) -> Result<(), SessionError> {
        let value = self
            .fields
            .get(name)
            .ok_or_else(|| SessionError::UnknownField(name.to_string()))?
            .parse_like(name, raw)?;
        self.set_field(name, value)
    }

    /// Labels of required-but-empty fields on the current step.
    pub fn missing_fields(&self) -> Vec<String> {
        match self.state {
            SessionState::Collecting { step } => self
                .tool
                .schema()
                .missing_in_step(step, &self.fields)
                .into_iter()
                .map(|spec| spec.label.clone())
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn advance(&mut self) -> Result<(), SessionError> {
        let step = match self.state {
            SessionState::Collecting { step } => step,
            _ => return Err(self.invalid("advance")),
        };
        let schema = self.tool.schema();
        schema
            .validate_step(step, &self.fields)
            .map_err(SessionError::Validation)?;
        match schema.next_visible_step(step, &self.fields) {
            Some(next) => self.transition(SessionState::Collecting { step: next }),
            None => self.transition(SessionState::Confirming),
        }
        Ok(())
    }

    /// Back to the previous step that applies to the current answers.
    pub fn retreat(&mut self) -> Result<(), SessionError> {
        let step = match self.state {
            SessionState::Collecting { step } => step,
            _ => return Err(self.invalid("go back")),
        };
        match self.tool.schema().previous_visible_step(step, &self.fields) {
            Some(previous) => {
                self.transition(SessionState::Collecting { step: previous });
                Ok(())
            }
            None => Err(SessionError::InvalidTransition {
                operation: "go back",
                state: "on the first step",
            }),
        }
    }

    /// Jump from the review back to a step. Values are kept.
    pub fn edit_step(&mut self, index: usize) -> Result<(), SessionError> {
        if self.state != SessionState::Confirming {
            return Err(self.invalid("edit a step"));
        }
        let count = self.step_count();
        if index >= count {
            return Err(SessionError::StepOutOfRange { index, count });
        }
        if !self.tool.schema().is_step_visible(index, &self.fields) {
            return Err(SessionError::StepHidden { index });
        }
        self.transition(SessionState::Collecting { step: index });
        Ok(())
    }

    /// Re-validate every step, assemble the plan and enter `Submitting`.
    pub fn confirm(&mut self) -> Result<SubmissionTicket, SessionError> {
        if !matches!(
            self.state,
            SessionState::Confirming | SessionState::Failed(_)
        ) {
            return Err(self.invalid("confirm"));
        }
        self.tool
            .schema()
            .validate_all(&self.fields)
            .map_err(SessionError::Validation)?;
        let plan = self.tool.assemble(&self.fields);
        self.epoch += 1;
        self.transition(SessionState::Submitting);
        Ok(SubmissionTicket {
            epoch: self.epoch,
            plan,
        })
    }

    /// Apply a result produced for `ticket`. Results from an older epoch are
    /// dropped.
    pub fn complete(
        &mut self,
        ticket: SubmissionTicket,
        result: GenerationResult,
    ) -> Result<Completion, SessionError> {
        if ticket.epoch != self.epoch {
            warn!(
                tool = self.tool.id(),
                ticket_epoch = ticket.epoch,
                session_epoch = self.epoch,
                "Discarding stale generation result"
            );
            return Ok(Completion::Stale);
        }
        if self.state != SessionState::Submitting {
            return Err(self.invalid("complete a submission"));
        }
        let next = if result.is_ok() {
            SessionState::Completed(result)
        } else {
            SessionState::Failed(result)
        };
        self.transition(next);
        Ok(Completion::Applied)
    }

    /// Confirm, execute the plan and apply the result.
    pub async fn submit<E: PlanExecutor + ?Sized>(
        &mut self,
        executor: &E,
    ) -> Result<GenerationResult, SessionError> {
        let ticket = self.confirm()?;
        let result = executor.execute(ticket.plan()).await;
        self.complete(ticket, result.clone())?;
        Ok(result)
    }

    /// Back to defaults on step 0; outstanding tickets become stale.
    pub fn reset(&mut self) {
        self.fields = self.tool.schema().default_fields();
        self.epoch += 1;
        self.transition(SessionState::Collecting { step: 0 });
    }

    /// Visible fields of every visible step, for the confirmation screen.
    pub fn review(&self) -> Vec<StepReview> {
        let schema = self.tool.schema();
        schema
            .steps()
            .iter()
            .enumerate()
            .filter(|(index, _)| schema.is_step_visible(*index, &self.fields))
            .map(|(index, step)| StepReview {
                index,
                title: step.title.clone(),
                entries: step
                    .fields
                    .iter()
                    .filter(|spec| schema.is_visible(spec, &self.fields))
                    .map(|spec| (spec.label.clone(), self.fields.value(&spec.name)))
                    .collect(),
            })
            .collect()
    }
}
