//! Resolution Assistant: identifies the governing provision for a compliance
//! requirement and drafts a board, ordinary or special resolution. The
//! additional-details step applies to special resolutions only.

use crate::export::ExportRequest;
use crate::fields::{FieldSet, FieldValue};
use crate::generation::GenerationPlan;
use crate::prompt::PromptDocument;
use crate::types::GenerationRequest;
use crate::wizard::{Condition, FieldSpec, StepSpec, ToolDefinition, WizardSchema};

pub const RESOLUTION_FAILURE_MESSAGE: &str =
    "Sorry, we couldn't generate the resolution. Please try again.";

const DISCLAIMER: &str = "End with disclaimer: \"Please review carefully and adapt to your company's specific facts before use.\"";

const UNDETERMINED: &str = "To be determined based on specific requirements";
const CUSTOM_DESCRIPTION: &str =
    "Custom compliance requirement - legal provisions will be identified during drafting";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionKind {
    Board,
    Ordinary,
    Special,
}

impl ResolutionKind {
    pub const ALL: [ResolutionKind; 3] = [
        ResolutionKind::Board,
        ResolutionKind::Ordinary,
        ResolutionKind::Special,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionKind::Board => "Board Resolution",
            ResolutionKind::Ordinary => "Ordinary Resolution",
            ResolutionKind::Special => "Special Resolution",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == label)
    }
}

/// A common compliance scenario and the provision that governs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    pub name: &'static str,
    pub section: &'static str,
    pub rule: &'static str,
    pub kind: ResolutionKind,
    pub description: &'static str,
}

pub static SCENARIOS: [Scenario; 8] = [
    Scenario {
        name: "Appointment of Director",
        section: "Section 161",
        rule: "Rule 8",
        kind: ResolutionKind::Board,
        description: "Appointment of Additional Director or Director to fill casual vacancy",
    },
    Scenario {
        name: "Increase in Borrowing Powers",
        section: "Section 180(1)(c)",
        rule: "Rule 13",
        kind: ResolutionKind::Special,
        description: "Increase in borrowing powers beyond paid-up capital and free reserves",
    },
    Scenario {
        name: "Change of Registered Office",
        section: "Section 13",
        rule: "Rule 30",
        kind: ResolutionKind::Special,
        description: "Change of registered office from one state to another",
    },
    Scenario {
        name: "Related Party Transaction",
        section: "Section 188",
        rule: "Rule 15",
        kind: ResolutionKind::Ordinary,
        description: "Approval of Related Party Transactions",
    },
    Scenario {
        name: "Issue of Shares",
        section: "Section 62",
        rule: "Rule 13",
        kind: ResolutionKind::Special,
        description: "Issue of shares on preferential basis",
    },
    Scenario {
        name: "Alteration of Articles",
        section: "Section 14",
        rule: "Rule 28",
        kind: ResolutionKind::Special,
        description: "Alteration of Articles of Association",
    },
    Scenario {
        name: "Approval of Annual Accounts",
        section: "Section 129",
        rule: "Rule 7",
        kind: ResolutionKind::Ordinary,
        description: "Adoption of Annual Financial Statements",
    },
    Scenario {
        name: "Appointment of Auditor",
        section: "Section 139",
        rule: "Rule 7",
        kind: ResolutionKind::Ordinary,
        description: "Appointment of Statutory Auditor",
    },
];

/// First scenario whose name contains the requirement or is contained in
/// it, ignoring case. Blank input matches nothing.
pub fn match_scenario(requirement: &str) -> Option<&'static Scenario> {
    let needle = requirement.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    SCENARIOS.iter().find(|s| {
        let name = s.name.to_lowercase();
        needle.contains(&name) || name.contains(&needle)
    })
}

pub struct ResolutionAssistant {
    schema: WizardSchema,
}

impl ResolutionAssistant {
    pub fn new() -> Self {
        let kinds: Vec<&str> = ResolutionKind::ALL.iter().map(|k| k.as_str()).collect();
        Self {
            schema: WizardSchema::new(vec![
                StepSpec::new("Compliance Requirement").field(
                    FieldSpec::text_area(
                        "requirement",
                        "Compliance requirement or transaction details",
                    )
                    .required()
                    .with_help("e.g. Appointment of Director, Issue of Shares"),
                ),
                StepSpec::new("Identified Law")
                    .field(
                        FieldSpec::choice("resolution_type", "Resolution Type", &kinds)
                            .unselected()
                            .required(),
                    )
                    .field(FieldSpec::text("section", "Applicable Section").required())
                    .field(FieldSpec::text("rule", "Applicable Rule").required())
                    .field(FieldSpec::text("description", "Description")),
                StepSpec::new("Additional Details")
                    .field(FieldSpec::text_area("background", "Background"))
                    .field(FieldSpec::text_area("reasons", "Reasons"))
                    .field(FieldSpec::text_area("financial_impact", "Financial Impact"))
                    .field(FieldSpec::date("effective_date", "Effective Date"))
                    .visible_when(Condition::equals(
                        "resolution_type",
                        ResolutionKind::Special.as_str(),
                    )),
            ]),
        }
    }
}

impl Default for ResolutionAssistant {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolDefinition for ResolutionAssistant {
    fn id(&self) -> &'static str {
        "resolution-assistant"
    }

    fn title(&self) -> &'static str {
        "Resolution Assistant"
    }

    fn category(&self) -> &'static str {
        "Utility"
    }

    fn schema(&self) -> &WizardSchema {
        &self.schema
    }

    fn on_field_changed(&self, changed: &str, fields: &mut FieldSet) {
        if changed != "requirement" || fields.is_empty_field("requirement") {
            return;
        }
        // Every key below is declared in the schema.
        match match_scenario(&fields.value("requirement")) {
            Some(scenario) => {
                let _ = fields.set("resolution_type", FieldValue::choice(scenario.kind.as_str()));
                let _ = fields.set("section", FieldValue::text(scenario.section));
                let _ = fields.set("rule", FieldValue::text(scenario.rule));
                let _ = fields.set("description", FieldValue::text(scenario.description));
            }
            None => {
                let _ = fields.clear("resolution_type");
                let _ = fields.set("section", FieldValue::text(UNDETERMINED));
                let _ = fields.set("rule", FieldValue::text(UNDETERMINED));
                let _ = fields.set("description", FieldValue::text(CUSTOM_DESCRIPTION));
            }
        }
    }

    fn assemble(&self, fields: &FieldSet) -> GenerationPlan {
        let v = |name: &str| fields.value(name);
        let kind = ResolutionKind::from_label(&v("resolution_type")).unwrap_or(ResolutionKind::Board);

        let request = match kind {
            ResolutionKind::Board => "Draft a Board Resolution for the following requirement:",
            ResolutionKind::Ordinary => "Draft an Ordinary Resolution for the following requirement:",
            ResolutionKind::Special => {
                "Draft a Special Resolution with Explanatory Statement for the following requirement:"
            }
        };

        let prompt = PromptDocument::new("You are Resolution Assistant under the Companies Act, 2013.")
            .framing(request)
            .line(format!("- Compliance Requirement: {}", v("requirement")))
            .line(format!("- Applicable Section: {}", v("section")))
            .line(format!("- Applicable Rule: {}", v("rule")));

        let prompt = match kind {
            ResolutionKind::Board => prompt
                .directives(
                    "Please provide a clean, professional Board Resolution draft following the standard format:",
                    [
                        "Board Resolution heading",
                        "Date and venue",
                        "Present directors",
                        "Resolution text with proper legal language",
                        "Signature blocks",
                    ],
                )
                .closing(
                    "Ensure the resolution is compliant with Companies Act, 2013 and includes all necessary legal formalities.",
                ),
            ResolutionKind::Ordinary => prompt
                .directives(
                    "Please provide a clean, professional Ordinary Resolution draft following the standard format:",
                    [
                        "Resolution heading",
                        "\"RESOLVED THAT\" clause with proper legal language",
                        "Authority delegation (if applicable)",
                        "Effective date",
                        "Any conditions or limitations",
                    ],
                )
                .closing("Ensure the resolution is compliant with Companies Act, 2013."),
            ResolutionKind::Special => prompt
                .line("")
                .line("Additional Details:")
                .line(format!("- Background: {}", v("background")))
                .line(format!("- Reasons: {}", v("reasons")))
                .line(format!("- Financial Impact: {}", v("financial_impact")))
                .line(format!("- Effective Date: {}", v("effective_date")))
                .directives(
                    "Please provide:\n\n## SPECIAL RESOLUTION\nA clean, professional Special Resolution draft with:",
                    [
                        "Resolution heading",
                        "\"RESOLVED THAT\" clause with detailed terms",
                        "Authority delegation",
                        "Conditions and limitations",
                        "Effective date",
                    ],
                )
                .directives(
                    "## EXPLANATORY STATEMENT (Under Section 102)\nA comprehensive explanatory statement including:",
                    [
                        "Background and rationale",
                        "Financial implications",
                        "Benefits to the company",
                        "Risk factors (if any)",
                        "Recommendation of the Board",
                        "Material facts and considerations",
                        "Interest of directors/promoters (if applicable)",
                    ],
                )
                .closing(
                    "Ensure both documents are compliant with Companies Act, 2013 and SEBI regulations (if applicable).",
                )
                .closing("Remove all introductory paragraph, end notes and any other non-relevant content."),
        };

        GenerationPlan::Single(
            GenerationRequest::new(prompt.closing(DISCLAIMER).render())
                .with_failure_message(RESOLUTION_FAILURE_MESSAGE),
        )
    }

    fn export_request(&self, fields: &FieldSet, content: &str) -> ExportRequest {
        let requirement = fields.value("requirement");
        ExportRequest::new(
            content,
            format!("Resolution: {}", requirement.trim()),
            &[requirement.as_str(), "resolution"],
        )
    }
}
