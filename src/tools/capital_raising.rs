//! Capital Raising Advisory Agreement: six-step wizard with derived currency
//! and arbitration terms.

use crate::export::ExportRequest;
use crate::fields::{FieldSet, FieldValue};
use crate::generation::GenerationPlan;
use crate::prompt::PromptDocument;
use crate::types::GenerationRequest;
use crate::wizard::{Condition, FieldSpec, StepSpec, ToolDefinition, WizardSchema};

const TITLE: &str = "Capital Raising Advisory Agreement";

pub const INDIAN_ARBITRATION: &str = "Indian Arbitration & Jurisdiction clause";
pub const INTERNATIONAL_ARBITRATION: &str =
    "International Arbitration clause (UNCITRAL Rules, seat = Singapore)";

/// Default currency for a company country; anything unlisted gets USD.
pub fn default_currency(country: &str) -> &'static str {
    match country.trim() {
        "India" => "INR",
        "United States" => "USD",
        "United Kingdom" => "GBP",
        "Eurozone" => "EUR",
        "Japan" => "JPY",
        _ => "USD",
    }
}

pub fn arbitration_clause(fields: &FieldSet) -> &'static str {
    if fields.is("company_country", "India") && fields.is("consultant_country", "India") {
        INDIAN_ARBITRATION
    } else {
        INTERNATIONAL_ARBITRATION
    }
}

pub struct CapitalRaisingAdvisoryAgreement {
    schema: WizardSchema,
}

impl CapitalRaisingAdvisoryAgreement {
    pub fn new() -> Self {
        let foreign_currency = Condition::not_equals("currency", "INR");
        Self {
            schema: WizardSchema::new(vec![
                StepSpec::new("Company Details")
                    .field(FieldSpec::text("company_name", "Company Name").required())
                    .field(
                        FieldSpec::text_area("company_address", "Company Registered Office Address")
                            .required(),
                    )
                    .field(
                        FieldSpec::text("company_country", "Company Country")
                            .required()
                            .with_help("Sets the default currency"),
                    ),
                StepSpec::new("Consultant Details")
                    .field(FieldSpec::text("consultant_name", "Consultant Name").required())
                    .field(FieldSpec::text_area("consultant_address", "Consultant Address").required())
                    .field(FieldSpec::text("consultant_country", "Consultant Country").required()),
                StepSpec::new("Agreement Details")
                    .field(FieldSpec::date("effective_date", "Effective Date of Agreement").required())
                    .field(FieldSpec::text("duration", "Duration / Term of Engagement").required())
                    .field(
                        FieldSpec::text_area(
                            "scope_of_services",
                            "Scope of Services (Nature of Advisory Work)",
                        )
                        .required(),
                    ),
                StepSpec::new("Financial Details")
                    .field(FieldSpec::text("currency", "Currency").required())
                    .field(
                        FieldSpec::text("min_inr_value", "Minimum Guaranteed INR Value")
                            .required_when(foreign_currency.clone())
                            .visible_when(foreign_currency),
                    )
                    .field(
                        FieldSpec::text_area("fee_structure", "Fee / Remuneration Structure")
                            .required(),
                    ),
                StepSpec::new("Clauses")
                    .field(FieldSpec::text_area("termination_clause", "Termination Clause").required())
                    .field(
                        FieldSpec::choice(
                            "confidentiality_clause",
                            "Confidentiality Clause",
                            &["standard", "specific"],
                        )
                        .required(),
                    ),
                StepSpec::new("Board Resolution Details")
                    .field(FieldSpec::date("board_meeting_date", "Board Meeting Date").required())
                    .field(FieldSpec::text("resolution_number", "Resolution Number (if any)"))
                    .field(FieldSpec::text_area(
                        "resolution_extract",
                        "Extract of Resolution (if provided)",
                    )),
            ]),
        }
    }
}

impl Default for CapitalRaisingAdvisoryAgreement {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolDefinition for CapitalRaisingAdvisoryAgreement {
    fn id(&self) -> &'static str {
        "capital-raising-advisory-agreement"
    }

    fn title(&self) -> &'static str {
        TITLE
    }

    fn category(&self) -> &'static str {
        "Agreement"
    }

    fn schema(&self) -> &WizardSchema {
        &self.schema
    }

    fn on_field_changed(&self, changed: &str, fields: &mut FieldSet) {
        // Both keys exist in the schema, so these writes cannot fail.
        if changed == "company_country" {
            let currency = default_currency(&fields.value("company_country"));
            let _ = fields.set("currency", FieldValue::text(currency));
        }
        if matches!(changed, "company_country" | "currency") && fields.is("currency", "INR") {
            let _ = fields.clear("min_inr_value");
        }
    }

    fn assemble(&self, fields: &FieldSet) -> GenerationPlan {
        let v = |name: &str| fields.value(name);
        let extract = match v("resolution_extract") {
            e if e.trim().is_empty() => "Generic approval text".to_string(),
            e => e,
        };
        let currency = v("currency");

        let prompt = PromptDocument::new(
            "I want to draft a Capital Raising Advisory Agreement between a Company and a Consultant.",
        )
        .framing("Follow this exact process:")
        .inputs_heading("Variables:")
        .input("Company Name", v("company_name"))
        .input("Company Registered Office Address", v("company_address"))
        .input("Company Country", v("company_country"))
        .input("Consultant Name", v("consultant_name"))
        .input("Consultant Address", v("consultant_address"))
        .input("Consultant Country", v("consultant_country"))
        .input("Effective Date of Agreement", v("effective_date"))
        .input("Duration / Term of Engagement", v("duration"))
        .input("Scope of Services", v("scope_of_services"))
        .input("Fee / Remuneration Structure", v("fee_structure"))
        .input("Termination Clause", v("termination_clause"))
        .input("Confidentiality Clause", v("confidentiality_clause"))
        .input("Board Resolution Details", "")
        .line(format!("   - Date of Board Meeting: {}", v("board_meeting_date")))
        .line(format!("   - Resolution Number: {}", v("resolution_number")))
        .line(format!("   - Extract of Resolution: {}", extract))
        .line(format!("Currency: {}", currency))
        .line_if(
            currency != "INR",
            format!("Minimum Guaranteed INR Value: {}", v("min_inr_value")),
        )
        .line(format!("Arbitration & Jurisdiction: {}", arbitration_clause(fields)))
        .directives(
            "Agreement Drafting Rules:",
            [
                "Preamble / Recitals must include reference to Board Resolution approving Consultant's appointment.",
                "Fee & Payment Terms must explicitly state Currency in full + code (e.g., \"U.S. Dollars (USD)\", \"Indian Rupees (INR)\").",
                "If foreign currency, include: \"Consultant shall be paid in [Currency], ensuring receipt of not less than INR [●] equivalent, computed at prevailing exchange rate on the date of remittance.\"",
                "Arbitration & Governing Law must switch automatically based on the rule.",
                "Style must be professional, legally sound, internationally acceptable.",
            ],
        )
        .render();

        GenerationPlan::Single(GenerationRequest::new(prompt))
    }

    fn export_request(&self, fields: &FieldSet, content: &str) -> ExportRequest {
        let company = fields.value("company_name");
        ExportRequest::new(content, TITLE, &[company.as_str(), TITLE])
    }
}
