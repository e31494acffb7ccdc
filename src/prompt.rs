//! Prompt assembly.
//!
//! [`PromptDocument`] renders a deterministic instruction string: framing
//! paragraphs, a numbered list of labelled inputs, output directives and
//! closing rules. Assembly never performs I/O, so identical inputs always
//! render byte-identical instructions.

use crate::fields::FieldSet;
use crate::wizard::WizardSchema;

#[derive(Debug, Clone, PartialEq, Eq)]
enum InputLine {
    Numbered { label: String, value: String },
    Plain(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DirectiveBlock {
    heading: String,
    items: Vec<String>,
}

/// Builder for one instruction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptDocument {
    framing: Vec<String>,
    inputs_heading: Option<String>,
    inputs: Vec<InputLine>,
    directives: Vec<DirectiveBlock>,
    closing: Vec<String>,
}

impl PromptDocument {
    pub fn new(framing: impl Into<String>) -> Self {
        Self {
            framing: vec![framing.into()],
            ..Self::default()
        }
    }

    /// Additional framing paragraph, rendered before the inputs.
    pub fn framing(mut self, paragraph: impl Into<String>) -> Self {
        self.framing.push(paragraph.into());
        self
    }

    /// Heading printed above the numbered inputs.
    pub fn inputs_heading(mut self, heading: impl Into<String>) -> Self {
        self.inputs_heading = Some(heading.into());
        self
    }

    /// Numbered `N. Label: value` line. Empty values render as empty.
    pub fn input(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.push(InputLine::Numbered {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    /// Numbered input whose value gets ` - detail` appended only when
    /// `include_detail` holds and the detail is not blank.
    pub fn input_with_detail(
        self,
        label: impl Into<String>,
        value: impl Into<String>,
        include_detail: bool,
        detail: &str,
    ) -> Self {
        let mut value = value.into();
        if include_detail && !detail.trim().is_empty() {
            value.push_str(" - ");
            value.push_str(detail);
        }
        self.input(label, value)
    }

    /// Unnumbered line inside the inputs block.
    pub fn line(mut self, text: impl Into<String>) -> Self {
        self.inputs.push(InputLine::Plain(text.into()));
        self
    }

    /// Unnumbered line added only when `condition` holds.
    pub fn line_if(self, condition: bool, text: impl Into<String>) -> Self {
        if condition {
            self.line(text)
        } else {
            self
        }
    }

    /// Numbered list of rules or expected outputs under a heading.
    pub fn directives<I, S>(mut self, heading: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directives.push(DirectiveBlock {
            heading: heading.into(),
            items: items.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Closing paragraph, rendered last.
    pub fn closing(mut self, paragraph: impl Into<String>) -> Self {
        self.closing.push(paragraph.into());
        self
    }

    pub fn render(&self) -> String {
        let mut blocks: Vec<String> = self
            .framing
            .iter()
            .filter(|p| !p.is_empty())
            .cloned()
            .collect();

        if !self.inputs.is_empty() {
            let mut block = String::new();
            if let Some(heading) = &self.inputs_heading {
                block.push_str(heading);
                block.push('\n');
            }
            let mut number = 0usize;
            let lines: Vec<String> = self
                .inputs
                .iter()
                .map(|line| match line {
                    InputLine::Numbered { label, value } => {
                        number += 1;
                        format!("{}. {}: {}", number, label, value)
                    }
                    InputLine::Plain(text) => text.clone(),
                })
                .collect();
            block.push_str(&lines.join("\n"));
            blocks.push(block);
        }

        for directive in &self.directives {
            let mut block = directive.heading.clone();
            for (i, item) in directive.items.iter().enumerate() {
                block.push_str(&format!("\n{}. {}", i + 1, item));
            }
            blocks.push(block);
        }

        blocks.extend(self.closing.iter().filter(|p| !p.is_empty()).cloned());
        let mut rendered = blocks.join("\n\n");
        rendered.push('\n');
        rendered
    }
}

/// Generic assembler: every visible field of the schema, in step order, as a
/// numbered input under `framing`.
pub fn render_schema(framing: &str, schema: &WizardSchema, fields: &FieldSet) -> String {
    schema
        .steps()
        .iter()
        .flat_map(|step| step.fields.iter())
        .filter(|spec| schema.is_visible(spec, fields))
        .fold(
            PromptDocument::new(framing).inputs_heading("Inputs:"),
            |doc, spec| doc.input(spec.label.clone(), fields.value(&spec.name)),
        )
        .render()
}
