//! Multi-step generation wizard.
//!
//! A tool is described once as a [`ToolDefinition`]: its step schema, the
//! assembler that turns collected fields into a generation plan, and an
//! optional change hook for derived defaults. [`GenerationSession`] drives
//! any tool through collection, review, submission and retry.

use crate::export::ExportRequest;
use crate::fields::FieldSet;
use crate::generation::GenerationPlan;

pub mod schema;
pub mod session;

pub use schema::{Condition, FieldKind, FieldSpec, Requirement, StepSpec, WizardSchema};
pub use session::{
    Completion, GenerationSession, SessionState, StepReview, SubmissionTicket,
};

pub trait ToolDefinition: Send + Sync {
    /// Stable catalogue id, e.g. `board-meeting-assistant`.
    fn id(&self) -> &'static str;

    fn title(&self) -> &'static str;

    fn category(&self) -> &'static str;

    fn schema(&self) -> &WizardSchema;

    /// Render the collected fields into a plan. Must be pure.
    fn assemble(&self, fields: &FieldSet) -> GenerationPlan;

    /// Runs after every accepted write to `changed`.
    fn on_field_changed(&self, _changed: &str, _fields: &mut FieldSet) {}

    /// Export metadata for a generated document.
    fn export_request(&self, _fields: &FieldSet, content: &str) -> ExportRequest {
        ExportRequest::new(content, self.title(), &[self.title()])
    }
}
