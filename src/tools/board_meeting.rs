//! Board meeting notice, agenda, draft minutes and resolutions.

use crate::export::ExportRequest;
use crate::fields::FieldSet;
use crate::generation::GenerationPlan;
use crate::prompt::PromptDocument;
use crate::types::GenerationRequest;
use crate::wizard::{Condition, FieldSpec, StepSpec, ToolDefinition, WizardSchema};

pub const BOARD_MEETING_FAILURE_MESSAGE: &str =
    "Sorry, we couldn't generate the documents. Please try again.";

pub struct BoardMeetingAssistant {
    schema: WizardSchema,
}

impl BoardMeetingAssistant {
    pub fn new() -> Self {
        Self {
            schema: WizardSchema::new(vec![StepSpec::new("Meeting Details")
                .field(FieldSpec::text("company_name", "Company Name").required())
                .field(
                    FieldSpec::text("date_time", "Date & Time")
                        .required()
                        .with_help("DD-MM-YYYY, HH:MM AM/PM"),
                )
                .field(FieldSpec::choice(
                    "venue_mode",
                    "Venue / Mode",
                    &["Registered Office", "VC"],
                ))
                .field(
                    FieldSpec::text_area("agenda_items", "Agenda Items")
                        .required()
                        .with_help("e.g. 1) Appointment of Director 2) Noting of Registers"),
                )
                .field(FieldSpec::text_area("directors_present", "Directors Present").required())
                .field(FieldSpec::text("chairperson", "Chairperson").required())
                .field(FieldSpec::text("company_secretary", "Company Secretary").required())
                .field(FieldSpec::yes_no("special_resolutions", "Special Resolutions"))
                .field(
                    FieldSpec::text_area(
                        "special_resolutions_desc",
                        "Special Resolutions Description",
                    )
                    .visible_when(Condition::equals("special_resolutions", "Yes")),
                )]),
        }
    }
}

impl Default for BoardMeetingAssistant {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolDefinition for BoardMeetingAssistant {
    fn id(&self) -> &'static str {
        "board-meeting-assistant"
    }

    fn title(&self) -> &'static str {
        "Board Meeting Assistant"
    }

    fn category(&self) -> &'static str {
        "Meetings"
    }

    fn schema(&self) -> &WizardSchema {
        &self.schema
    }

    fn assemble(&self, fields: &FieldSet) -> GenerationPlan {
        let v = |name: &str| fields.value(name);
        let prompt = PromptDocument::new(format!(
            "Create board meeting documents for a general board meeting of *{}*.",
            v("company_name")
        ))
        .inputs_heading("*Inputs:*")
        .input("Company Name", v("company_name"))
        .input("Date & Time", v("date_time"))
        .input("Venue / Mode", v("venue_mode"))
        .input("Agenda Items", v("agenda_items"))
        .input("Directors Present", v("directors_present"))
        .input("Chairperson", v("chairperson"))
        .input("Company Secretary", v("company_secretary"))
        .input_with_detail(
            "Special Resolutions",
            v("special_resolutions"),
            fields.is("special_resolutions", "Yes"),
            &v("special_resolutions_desc"),
        )
        .directives(
            "*Outputs:*",
            [
                "Board Meeting Notice",
                "Agenda",
                "Draft Minutes",
                "Resolutions (if any)",
            ],
        )
        .closing("Exclude any introductory paragraph, notes and disclaimers.")
        .render();

        GenerationPlan::Single(
            GenerationRequest::new(prompt).with_failure_message(BOARD_MEETING_FAILURE_MESSAGE),
        )
    }

    fn export_request(&self, fields: &FieldSet, content: &str) -> ExportRequest {
        let company = fields.value("company_name");
        ExportRequest::new(
            content,
            "Board Meeting Documents",
            &[company.as_str(), "board-meeting-documents"],
        )
    }
}
