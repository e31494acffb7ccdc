//! CLI presentation: text and json formatters for the catalogue, tool
//! schemas, the confirmation review and prompt previews.

use crate::error::ApiError;
use crate::generation::GenerationPlan;
use crate::wizard::{
    Condition, FieldKind, FieldSpec, Requirement, StepReview, ToolDefinition,
};
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;
use std::sync::Arc;

/// Bold/underlined section heading.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn format_tools_text(tools: &[Arc<dyn ToolDefinition>]) -> String {
    if tools.is_empty() {
        return "No tools found.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["ID", "Title", "Category", "Steps"]);
    for tool in tools {
        table.add_row(vec![
            tool.id().to_string(),
            tool.title().to_string(),
            tool.category().to_string(),
            tool.schema().step_count().to_string(),
        ]);
    }
    format!("{}\n\n{}", format_section_heading("Tools"), table)
}

pub fn format_tools_json(tools: &[Arc<dyn ToolDefinition>]) -> Result<String, ApiError> {
    let arr: Vec<serde_json::Value> = tools
        .iter()
        .map(|t| {
            json!({
                "id": t.id(),
                "title": t.title(),
                "category": t.category(),
                "steps": t.schema().step_count(),
            })
        })
        .collect();
    serde_json::to_string_pretty(&arr)
        .map_err(|e| ApiError::InvalidInput(format!("Failed to serialize tools: {}", e)))
}

pub fn describe_condition(condition: &Condition) -> String {
    match condition {
        Condition::Equals { field, value } => format!("{} = {}", field, value),
        Condition::NotEquals { field, value } => format!("{} != {}", field, value),
        Condition::All(conditions) => conditions
            .iter()
            .map(describe_condition)
            .collect::<Vec<_>>()
            .join(" and "),
    }
}

fn describe_kind(kind: &FieldKind) -> String {
    match kind {
        FieldKind::Text => "text".to_string(),
        FieldKind::TextArea => "long text".to_string(),
        FieldKind::Date => "date (YYYY-MM-DD)".to_string(),
        FieldKind::Choice(options) => format!("one of: {}", options.join(" | ")),
        FieldKind::Group(parts) => format!("group: {}", parts.join("; ")),
    }
}

fn describe_requirement(spec: &FieldSpec) -> String {
    match &spec.requirement {
        Requirement::Required => "yes".to_string(),
        Requirement::Optional => "no".to_string(),
        Requirement::RequiredWhen(c) => format!("when {}", describe_condition(c)),
    }
}

pub fn format_tool_text(tool: &dyn ToolDefinition) -> String {
    let mut out = format!(
        "{}\n{} ({})\n",
        format_section_heading(tool.title()),
        tool.id(),
        tool.category()
    );
    let count = tool.schema().step_count();
    for (index, step) in tool.schema().steps().iter().enumerate() {
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.set_header(vec!["Field", "Label", "Kind", "Required", "Shown"]);
        for spec in &step.fields {
            table.add_row(vec![
                spec.name.clone(),
                spec.label.clone(),
                describe_kind(&spec.kind),
                describe_requirement(spec),
                spec.visible_when
                    .as_ref()
                    .map(|c| format!("when {}", describe_condition(c)))
                    .unwrap_or_else(|| "always".to_string()),
            ]);
        }
        let applies = step
            .visible_when
            .as_ref()
            .map(|c| format!(" (only when {})", describe_condition(c)))
            .unwrap_or_default();
        out.push_str(&format!(
            "\nStep {} of {}: {}{}\n{}\n",
            index + 1,
            count,
            step.title.bold(),
            applies,
            table
        ));
    }
    out
}

pub fn format_tool_json(tool: &dyn ToolDefinition) -> Result<String, ApiError> {
    let steps: Vec<serde_json::Value> = tool
        .schema()
        .steps()
        .iter()
        .map(|step| {
            json!({
                "title": step.title,
                "visible_when": step.visible_when.as_ref().map(describe_condition),
                "fields": step.fields.iter().map(|spec| json!({
                    "name": spec.name,
                    "label": spec.label,
                    "kind": describe_kind(&spec.kind),
                    "required": describe_requirement(spec),
                    "visible_when": spec.visible_when.as_ref().map(describe_condition),
                    "default": spec.default,
                    "help": spec.help,
                })).collect::<Vec<_>>(),
            })
        })
        .collect();
    let value = json!({
        "id": tool.id(),
        "title": tool.title(),
        "category": tool.category(),
        "steps": steps,
    });
    serde_json::to_string_pretty(&value)
        .map_err(|e| ApiError::InvalidInput(format!("Failed to serialize tool: {}", e)))
}

/// Confirmation screen: every step with its visible values.
pub fn format_review(review: &[StepReview]) -> String {
    let mut out = format!("{}\n", format_section_heading("Review"));
    for step in review {
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        for (label, value) in &step.entries {
            let shown = if value.trim().is_empty() {
                "-".to_string()
            } else {
                value.clone()
            };
            table.add_row(vec![label.clone(), shown]);
        }
        out.push_str(&format!("\n{}. {}\n{}\n", step.index + 1, step.title.bold(), table));
    }
    out
}

/// Prompt preview: instructions in issue order.
pub fn format_plan(plan: &GenerationPlan) -> String {
    let instructions = plan.instructions();
    if instructions.len() == 1 {
        return instructions[0].to_string();
    }
    instructions
        .iter()
        .enumerate()
        .map(|(i, text)| format!("--- Part {} of {} ---\n{}", i + 1, instructions.len(), text))
        .collect::<Vec<_>>()
        .join("\n")
}
