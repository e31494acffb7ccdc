//! AGM/EGM notice or minutes.

use crate::export::ExportRequest;
use crate::fields::FieldSet;
use crate::generation::GenerationPlan;
use crate::prompt::PromptDocument;
use crate::types::GenerationRequest;
use crate::wizard::{Condition, FieldSpec, StepSpec, ToolDefinition, WizardSchema};

pub const GENERAL_MEETING_FAILURE_MESSAGE: &str =
    "Sorry, we couldn't generate the document. Please try again.";

const NOT_APPLICABLE: &str = "N/A";

pub struct GeneralMeetingAssistant {
    schema: WizardSchema,
}

impl GeneralMeetingAssistant {
    pub fn new() -> Self {
        let is_agm = Condition::equals("meeting_type", "AGM");
        let is_minutes = Condition::equals("document_type", "Minutes");
        let record_date = Condition::equals("record_date_or_book_closure", "Yes");
        let explanatory = Condition::equals("explanatory_statement_required", "Yes");

        Self {
            schema: WizardSchema::new(vec![
                StepSpec::new("Meeting Details")
                    .field(FieldSpec::choice("document_type", "Document Type", &["Notice", "Minutes"]))
                    .field(FieldSpec::choice("meeting_type", "Meeting Type", &["AGM", "EGM"]))
                    .field(FieldSpec::text("company_name", "Company Name").required())
                    .field(
                        FieldSpec::text("financial_year", "Financial Year")
                            .required_when(is_agm.clone())
                            .visible_when(is_agm),
                    )
                    .field(FieldSpec::date("meeting_date", "Meeting Date").required())
                    .field(
                        FieldSpec::text("meeting_time", "Meeting Time")
                            .required()
                            .with_help("HH:MM AM/PM"),
                    )
                    .field(
                        FieldSpec::text("meeting_mode_or_venue", "Meeting Mode or Venue")
                            .required()
                            .with_help("Physical at [Address] / VC / Hybrid"),
                    )
                    .field(FieldSpec::text("chairperson", "Chairperson").required())
                    .field(FieldSpec::text("company_secretary", "Company Secretary")),
                StepSpec::new("Agenda & Resolutions")
                    .field(
                        FieldSpec::text_area(
                            "agenda_items_and_resolutions",
                            "Agenda Items and Resolutions",
                        )
                        .required()
                        .with_help("One item per line with its resolution type"),
                    )
                    .field(FieldSpec::yes_no(
                        "record_date_or_book_closure",
                        "Record Date or Book Closure",
                    ))
                    .field(
                        FieldSpec::group(
                            "record_date_details",
                            "Record Date / Book Closure Details",
                            &["record_date", "closure_from", "closure_to"],
                        )
                        .required_when(record_date.clone())
                        .visible_when(record_date),
                    )
                    .field(FieldSpec::yes_no(
                        "explanatory_statement_required",
                        "Explanatory Statement Required",
                    ))
                    .field(
                        FieldSpec::text_area("explanatory_statement", "Explanatory Statement")
                            .required_when(explanatory.clone())
                            .visible_when(explanatory),
                    )
                    .field(
                        FieldSpec::text_area("attendees_list", "Attendees List")
                            .required_when(is_minutes.clone())
                            .visible_when(is_minutes.clone()),
                    )
                    .field(
                        FieldSpec::choice(
                            "voting_mode",
                            "Voting Mode",
                            &["Show of Hands", "E-voting", "Postal Ballot"],
                        )
                        .visible_when(is_minutes),
                    ),
            ]),
        }
    }
}

impl Default for GeneralMeetingAssistant {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolDefinition for GeneralMeetingAssistant {
    fn id(&self) -> &'static str {
        "general-meeting-assistant"
    }

    fn title(&self) -> &'static str {
        "General Meeting Assistant"
    }

    fn category(&self) -> &'static str {
        "Meetings"
    }

    fn schema(&self) -> &WizardSchema {
        &self.schema
    }

    fn assemble(&self, fields: &FieldSet) -> GenerationPlan {
        let v = |name: &str| fields.value(name);
        let agm = fields.is("meeting_type", "AGM");
        let minutes = fields.is("document_type", "Minutes");
        let only_if = |applies: bool, name: &str| {
            if applies {
                v(name)
            } else {
                NOT_APPLICABLE.to_string()
            }
        };

        let prompt = PromptDocument::new(
            "You are a qualified Company Secretary. Based on the user inputs, generate either a \
             **Notice** or **Minutes** of an **AGM/EGM** in accordance with the Companies Act, 2013 \
             and Secretarial Standard-2 (SS-2).",
        )
        .framing(
            "Ensure:\n\
             - Proper legal formatting\n\
             - Inclusion of relevant Sections (Sec 101, 102, 118, etc.)\n\
             - Clear listing of agenda items and resolution types (Ordinary/Special)",
        )
        .framing(
            "If `Document_Type = Minutes`, also include:\n\
             - Attendance\n\
             - Quorum\n\
             - Summary of proceedings\n\
             - Voting mode\n\
             - Outcome of each resolution",
        )
        .framing(
            "Final output must be professionally drafted and ready for compliance or record-keeping.",
        )
        .inputs_heading("Inputs Provided:")
        .input("Document_Type", v("document_type"))
        .input("Meeting_Type", v("meeting_type"))
        .input("Company_Name", v("company_name"))
        .input("Financial_Year", only_if(agm, "financial_year"))
        .input("Meeting_Date", v("meeting_date"))
        .input("Meeting_Time", v("meeting_time"))
        .input("Meeting_Mode_or_Venue", v("meeting_mode_or_venue"))
        .input("Chairperson", v("chairperson"))
        .input("Company_Secretary", v("company_secretary"))
        .input("Agenda_Items_and_Resolutions", v("agenda_items_and_resolutions"))
        .input_with_detail(
            "Record_Date_or_Book_Closure",
            v("record_date_or_book_closure"),
            fields.is("record_date_or_book_closure", "Yes"),
            &v("record_date_details"),
        )
        .input_with_detail(
            "Explanatory_Statement_Required",
            v("explanatory_statement_required"),
            fields.is("explanatory_statement_required", "Yes"),
            &v("explanatory_statement"),
        )
        .input("Attendees_List", only_if(minutes, "attendees_list"))
        .input("Voting_Mode", only_if(minutes, "voting_mode"))
        .directives(
            "Expected Output:",
            [
                "A clean, compliant Notice or Minutes document",
                "Legally formatted and ready to use",
                "Includes correct referencing, quorum confirmation, and resolution summaries",
            ],
        )
        .render();

        GenerationPlan::Single(
            GenerationRequest::new(prompt).with_failure_message(GENERAL_MEETING_FAILURE_MESSAGE),
        )
    }

    fn export_request(&self, fields: &FieldSet, content: &str) -> ExportRequest {
        let company = fields.value("company_name");
        let document = fields.value("document_type");
        let meeting = fields.value("meeting_type");
        let (document_slug, meeting_slug) = (document.to_lowercase(), meeting.to_lowercase());
        ExportRequest::new(
            content,
            format!("{} - {}", document, meeting),
            &[company.as_str(), document_slug.as_str(), meeting_slug.as_str()],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldValue;

    #[test]
    fn test_not_applicable_fields_for_egm_notice() {
        let tool = GeneralMeetingAssistant::new();
        let mut fields = tool.schema().default_fields();
        fields.set("meeting_type", FieldValue::choice("EGM")).unwrap();
        fields.set("financial_year", FieldValue::text("2025-26")).unwrap();

        let plan = tool.assemble(&fields);
        let instruction = plan.instructions()[0];
        assert!(instruction.contains("4. Financial_Year: N/A"));
        assert!(instruction.contains("13. Attendees_List: N/A"));
        assert!(instruction.contains("14. Voting_Mode: N/A"));
    }

    #[test]
    fn test_record_date_details_only_when_enabled() {
        let tool = GeneralMeetingAssistant::new();
        let mut fields = tool.schema().default_fields();
        let details = fields
            .get("record_date_details")
            .unwrap()
            .parse_like("record_date_details", "record_date=2026-08-01")
            .unwrap();
        fields.set("record_date_details", details).unwrap();

        let plan = tool.assemble(&fields);
        assert!(plan.instructions()[0].contains("11. Record_Date_or_Book_Closure: No\n"));

        fields
            .set("record_date_or_book_closure", FieldValue::choice("Yes"))
            .unwrap();
        let plan = tool.assemble(&fields);
        assert!(plan.instructions()[0]
            .contains("11. Record_Date_or_Book_Closure: Yes - record_date: 2026-08-01"));
    }

    #[test]
    fn test_minutes_require_attendees() {
        let tool = GeneralMeetingAssistant::new();
        let mut fields = tool.schema().default_fields();
        fields
            .set("agenda_items_and_resolutions", FieldValue::text("Adoption of accounts (Ordinary)"))
            .unwrap();
        assert!(tool.schema().validate_step(1, &fields).is_ok());

        fields.set("document_type", FieldValue::choice("Minutes")).unwrap();
        let notice = tool.schema().validate_step(1, &fields).unwrap_err();
        assert_eq!(notice.missing, vec!["Attendees List"]);
    }

    #[test]
    fn test_export_name_and_title() {
        let tool = GeneralMeetingAssistant::new();
        let mut fields = tool.schema().default_fields();
        fields.set("company_name", FieldValue::text("Acme")).unwrap();
        let request = tool.export_request(&fields, "doc");
        assert_eq!(request.file_name, "Acme_notice_agm");
        assert_eq!(request.title, "Notice - AGM");
    }
}
