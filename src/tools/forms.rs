//! Statutory forms list, generated in two chained parts.

use crate::export::ExportRequest;
use crate::fields::FieldSet;
use crate::generation::{ChainPlan, GenerationPlan};
use crate::prompt::PromptDocument;
use crate::types::GenerationRequest;
use crate::wizard::{FieldSpec, StepSpec, ToolDefinition, WizardSchema};

pub const FORMS_FAILURE_MESSAGE: &str =
    "Sorry, we couldn't generate the forms list. Please try again.";
pub const FORMS_PART_TWO_NOTICE: &str =
    "Sorry, we couldn't generate the second part of the forms list. Please try again.";
pub const FORMS_PART_TWO_ERROR_NOTICE: &str =
    "An error occurred while generating the second part of the forms list. Please try again later.";

const FRAMING: &str = "Generate a brief list of statutory forms under India's Companies Act, 2013, \
referencing official MCA data. If any detail is unverified, state \"(Verify on MCA)\".";

const FORMATTING_RULES: [&str; 4] = [
    "Use a dot point format only; **no tables**.",
    "Bold all headings and sub-headings.",
    "Use strict indentation: 1. for main categories, - for forms, and • for form details.",
    "For each form, provide in this order: Form, Section/Rule, Purpose, Due Date, \
     Non-Compliance, Notes (if any).",
];

pub struct StatutoryForms {
    schema: WizardSchema,
}

impl StatutoryForms {
    pub fn new() -> Self {
        Self {
            schema: WizardSchema::new(vec![StepSpec::new("Company").field(
                FieldSpec::text("company_name", "Company Name")
                    .with_help("Used only to name the exported file"),
            )]),
        }
    }

    fn part_one() -> String {
        PromptDocument::new(FRAMING)
            .framing(
                "Title \"Exhaustive Event-wise List of Statutory Forms under the Companies Act, 2013\"",
            )
            .directives("Formatting Rules:", FORMATTING_RULES)
            .directives(
                "Content Structure (organize all forms under these exact categories, in order):",
                [
                    "Incorporation & Registration",
                    "Annual Filings",
                    "Director & KMP-related",
                    "Charge-related",
                    "Share Capital & Debenture-related",
                ],
            )
            .closing("Provide brief details for each form in these 5 categories only.")
            .render()
    }

    fn part_two() -> String {
        PromptDocument::new(FRAMING)
            .directives("Formatting Rules:", FORMATTING_RULES)
            .directives(
                "Content Structure (continue with these exact categories, in order):",
                [
                    "Deposits",
                    "Compromises, Arrangements & Amalgamations",
                    "Winding Up & Strike Off",
                    "Other Event-based Filings",
                ],
            )
            .closing(
                "Provide details for each form in these categories plus the concluding sections.",
            )
            .render()
    }
}

impl Default for StatutoryForms {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolDefinition for StatutoryForms {
    fn id(&self) -> &'static str {
        "forms"
    }

    fn title(&self) -> &'static str {
        "Forms"
    }

    fn category(&self) -> &'static str {
        "Compliance"
    }

    fn schema(&self) -> &WizardSchema {
        &self.schema
    }

    fn assemble(&self, _fields: &FieldSet) -> GenerationPlan {
        GenerationPlan::Chained(
            ChainPlan::new(
                GenerationRequest::new(Self::part_one()).with_failure_message(FORMS_FAILURE_MESSAGE),
            )
            .then_with_notices(
                GenerationRequest::new(Self::part_two()).with_failure_message(FORMS_FAILURE_MESSAGE),
                FORMS_PART_TWO_NOTICE,
                FORMS_PART_TWO_ERROR_NOTICE,
            ),
        )
    }

    fn export_request(&self, fields: &FieldSet, content: &str) -> ExportRequest {
        let company = fields.value("company_name");
        ExportRequest::new(
            content,
            "Statutory Forms List",
            &[company.as_str(), "Statutory Forms List"],
        )
    }
}
