//! Research Assistant: five single-field steps, one of them optional, and a
//! structured research brief.

use crate::export::ExportRequest;
use crate::fields::FieldSet;
use crate::generation::GenerationPlan;
use crate::prompt::PromptDocument;
use crate::types::GenerationRequest;
use crate::wizard::{FieldSpec, StepSpec, ToolDefinition, WizardSchema};

pub const RESEARCH_FAILURE_MESSAGE: &str =
    "Sorry, we couldn't generate the research output. Please try again.";

const DEFAULT_SOURCES: &str = "Standard legal and compliance sources";

pub struct ResearchAssistant {
    schema: WizardSchema,
}

impl ResearchAssistant {
    pub fn new() -> Self {
        Self {
            schema: WizardSchema::new(vec![
                StepSpec::new("Topic / Subject").field(
                    FieldSpec::text("topic", "Topic / Subject")
                        .required()
                        .with_help("e.g. Loans to Directors, Insider Trading"),
                ),
                StepSpec::new("Type of Research").field(
                    FieldSpec::choice(
                        "research_type",
                        "Type of Research",
                        &["Legal", "Compliance", "Finance", "Business", "General"],
                    )
                    .unselected()
                    .required(),
                ),
                StepSpec::new("Scope / Depth").field(
                    FieldSpec::choice(
                        "scope",
                        "Scope / Depth",
                        &[
                            "Short summary",
                            "Detailed analysis",
                            "Case laws",
                            "Global comparison",
                        ],
                    )
                    .unselected()
                    .required(),
                ),
                StepSpec::new("Output Style").field(
                    FieldSpec::choice(
                        "output_style",
                        "Output Style",
                        &[
                            "Bullet points",
                            "Structured report",
                            "Table",
                            "Infographic draft",
                        ],
                    )
                    .unselected()
                    .required(),
                ),
                StepSpec::new("Preferred Sources (Optional)").field(
                    FieldSpec::text("preferred_sources", "Preferred Sources")
                        .with_help("e.g. Companies Act, SEBI, RBI, IBC"),
                ),
            ]),
        }
    }
}

impl Default for ResearchAssistant {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolDefinition for ResearchAssistant {
    fn id(&self) -> &'static str {
        "research-assistant"
    }

    fn title(&self) -> &'static str {
        "Research Assistant"
    }

    fn category(&self) -> &'static str {
        "Legal"
    }

    fn schema(&self) -> &WizardSchema {
        &self.schema
    }

    fn assemble(&self, fields: &FieldSet) -> GenerationPlan {
        let v = |name: &str| fields.value(name);
        let sources = match v("preferred_sources") {
            s if s.trim().is_empty() => DEFAULT_SOURCES.to_string(),
            s => s,
        };
        let global = v("scope").contains("Global");
        let (trend_heading, trend_body) = if global {
            (
                "(Global Practices)",
                "Compare with global practices and international standards.",
            )
        } else {
            (
                "(Industry Practices)",
                "Analyze current industry trends and best practices.",
            )
        };

        let prompt = PromptDocument::new(
            "You are an AI Research Assistant specializing in Legal & Compliance Insights for Company Secretaries.",
        )
        .inputs_heading("Research Request:")
        .line(format!("- Topic/Subject: {}", v("topic")))
        .line(format!("- Type of Research: {}", v("research_type")))
        .line(format!("- Scope/Depth: {}", v("scope")))
        .line(format!("- Output Style: {}", v("output_style")))
        .line(format!("- Preferred Sources: {}", sources))
        .closing("Please provide a comprehensive research output structured with the following blocks:")
        .closing(
            "## Overview / Introduction\n\
             Context of the topic and its relevance in corporate law and compliance.",
        )
        .closing(
            "## Statutory Provisions\n\
             Relevant Sections, Rules, Notifications, and Circulars from applicable laws including:\n\
             - Companies Act 2013 and Rules\n\
             - SEBI Regulations\n\
             - RBI Guidelines\n\
             - IBC provisions (if applicable)\n\
             - Other relevant statutes",
        )
        .closing(
            "## Judicial Precedents (Case Laws)\n\
             Provide at least 2-3 key cases from NCLT/NCLAT, High Court, Supreme Court if available.\n\
             For each case, show:\n\
             - Case Name\n\
             - Citation\n\
             - Court\n\
             - Year\n\
             - Ratio/Principle\n\
             **Most Recent Case:** Highlight the most recent relevant case separately.",
        )
        .closing(format!(
            "## Comparisons / Trends {}\n{}",
            trend_heading, trend_body
        ))
        .closing(
            "## Practical Implications\n\
             - Compliance requirements\n\
             - Duties and responsibilities\n\
             - Penalties for non-compliance\n\
             - Available exemptions (if any)\n\
             - Best practices for implementation",
        )
        .closing(
            "## References / Sources\n\
             List all Acts, Rules, Notifications, Circulars, and Journals referenced.",
        )
        .closing(format!("Format the output as: {}", v("output_style")))
        .closing(
            "Keep answers concise but authoritative. Focus on practical applicability for Company Secretaries.",
        )
        .closing("Remove all introductory paragraph, end notes and any other non-relevant content.")
        .render();

        GenerationPlan::Single(
            GenerationRequest::new(prompt).with_failure_message(RESEARCH_FAILURE_MESSAGE),
        )
    }

    fn export_request(&self, fields: &FieldSet, content: &str) -> ExportRequest {
        let topic = fields.value("topic");
        ExportRequest::new(
            content,
            format!("Research Report: {}", topic),
            &[topic.as_str(), "research-report"],
        )
    }
}
