//! Declarative step schema: fields, requirements and visibility conditions.

use crate::error::{ApiError, ValidationNotice};
use crate::fields::{FieldSet, FieldValue};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Date,
    Choice(Vec<String>),
    /// Named text sub-values.
    Group(Vec<String>),
}

/// Predicate over the current field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Equals { field: String, value: String },
    NotEquals { field: String, value: String },
    All(Vec<Condition>),
}

impl Condition {
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Condition::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn not_equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Condition::NotEquals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn holds(&self, fields: &FieldSet) -> bool {
        match self {
            Condition::Equals { field, value } => fields.is(field, value),
            Condition::NotEquals { field, value } => !fields.is(field, value),
            Condition::All(conditions) => conditions.iter().all(|c| c.holds(fields)),
        }
    }

    fn referenced_fields(&self) -> Vec<&str> {
        match self {
            Condition::Equals { field, .. } | Condition::NotEquals { field, .. } => {
                vec![field.as_str()]
            }
            Condition::All(conditions) => conditions
                .iter()
                .flat_map(Condition::referenced_fields)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional,
    /// Required only while the condition holds.
    RequiredWhen(Condition),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub requirement: Requirement,
    /// Hidden fields are never required and are left out of the review.
    pub visible_when: Option<Condition>,
    pub default: Option<String>,
    pub help: Option<String>,
}

impl FieldSpec {
    fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            requirement: Requirement::Optional,
            visible_when: None,
            default: None,
            help: None,
        }
    }

    pub fn text(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn text_area(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::TextArea)
    }

    pub fn date(name: &str, label: &str) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    /// Enumerated field defaulting to its first option.
    pub fn choice(name: &str, label: &str, options: &[&str]) -> Self {
        let mut spec = Self::new(
            name,
            label,
            FieldKind::Choice(options.iter().map(|o| o.to_string()).collect()),
        );
        spec.default = options.first().map(|o| o.to_string());
        spec
    }

    /// `No`/`Yes` toggle defaulting to `No`.
    pub fn yes_no(name: &str, label: &str) -> Self {
        Self::choice(name, label, &["No", "Yes"])
    }

    pub fn group(name: &str, label: &str, parts: &[&str]) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Group(parts.iter().map(|p| p.to_string()).collect()),
        )
    }

    pub fn required(mut self) -> Self {
        self.requirement = Requirement::Required;
        self
    }

    pub fn required_when(mut self, condition: Condition) -> Self {
        self.requirement = Requirement::RequiredWhen(condition);
        self
    }

    pub fn visible_when(mut self, condition: Condition) -> Self {
        self.visible_when = Some(condition);
        self
    }

    /// Start a choice with no option selected.
    pub fn unselected(mut self) -> Self {
        self.default = None;
        self
    }

    pub fn with_default(mut self, value: &str) -> Self {
        self.default = Some(value.to_string());
        self
    }

    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    pub fn options(&self) -> Option<&[String]> {
        match &self.kind {
            FieldKind::Choice(options) => Some(options),
            _ => None,
        }
    }

    /// Value a fresh or reset session starts with.
    pub fn initial_value(&self) -> FieldValue {
        let default = self.default.clone().unwrap_or_default();
        match &self.kind {
            FieldKind::Text | FieldKind::TextArea => FieldValue::Text(default),
            FieldKind::Choice(_) => FieldValue::Choice(default),
            FieldKind::Date => FieldValue::Date(
                chrono::NaiveDate::parse_from_str(&default, crate::fields::DATE_FORMAT).ok(),
            ),
            FieldKind::Group(parts) => {
                FieldValue::Group(parts.iter().map(|p| (p.clone(), String::new())).collect())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSpec {
    pub title: String,
    pub fields: Vec<FieldSpec>,
    /// Skipped by navigation, validation and the review while false.
    pub visible_when: Option<Condition>,
}

impl StepSpec {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            fields: Vec::new(),
            visible_when: None,
        }
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn visible_when(mut self, condition: Condition) -> Self {
        self.visible_when = Some(condition);
        self
    }
}

/// Ordered steps of one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSchema {
    steps: Vec<StepSpec>,
}

impl WizardSchema {
    pub fn new(steps: Vec<StepSpec>) -> Self {
        Self { steps }
    }

    /// Structural checks: at least one step, unique field names, conditions
    /// naming known fields, choice defaults among the options.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.steps.is_empty() {
            return Err(ApiError::ConfigError(
                "Wizard schema must contain at least one step".to_string(),
            ));
        }
        let mut names = HashSet::new();
        for spec in self.all_fields() {
            if !names.insert(spec.name.as_str()) {
                return Err(ApiError::ConfigError(format!(
                    "Duplicate field name in wizard schema: {}",
                    spec.name
                )));
            }
        }
        for spec in self.all_fields() {
            let conditions = spec
                .visible_when
                .iter()
                .chain(match &spec.requirement {
                    Requirement::RequiredWhen(c) => Some(c),
                    _ => None,
                });
            for condition in conditions {
                if let Some(unknown) = condition
                    .referenced_fields()
                    .into_iter()
                    .find(|f| !names.contains(f))
                {
                    return Err(ApiError::ConfigError(format!(
                        "Field '{}' has a condition on unknown field '{}'",
                        spec.name, unknown
                    )));
                }
            }
            if let (Some(options), Some(default)) = (spec.options(), &spec.default) {
                if !options.contains(default) {
                    return Err(ApiError::ConfigError(format!(
                        "Default '{}' is not an option of field '{}'",
                        default, spec.name
                    )));
                }
            }
        }
        for (index, step) in self.steps.iter().enumerate() {
            let Some(condition) = &step.visible_when else {
                continue;
            };
            if index == 0 {
                return Err(ApiError::ConfigError(format!(
                    "First step '{}' cannot be conditional",
                    step.title
                )));
            }
            let own: Vec<&str> = step.fields.iter().map(|f| f.name.as_str()).collect();
            if let Some(unknown) = condition
                .referenced_fields()
                .into_iter()
                .find(|f| !names.contains(f) || own.contains(f))
            {
                return Err(ApiError::ConfigError(format!(
                    "Step '{}' has a condition on unknown or own field '{}'",
                    step.title, unknown
                )));
            }
        }
        Ok(())
    }

    pub fn steps(&self) -> &[StepSpec] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&StepSpec> {
        self.steps.get(index)
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn all_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.steps.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.all_fields().find(|f| f.name == name)
    }

    pub fn default_fields(&self) -> FieldSet {
        FieldSet::new(
            self.all_fields()
                .map(|spec| (spec.name.clone(), spec.initial_value())),
        )
    }

    pub fn is_step_visible(&self, index: usize, fields: &FieldSet) -> bool {
        match self.steps.get(index) {
            Some(step) => step
                .visible_when
                .as_ref()
                .map(|c| c.holds(fields))
                .unwrap_or(true),
            None => false,
        }
    }

    /// First visible step after `index`.
    pub fn next_visible_step(&self, index: usize, fields: &FieldSet) -> Option<usize> {
        (index + 1..self.steps.len()).find(|&i| self.is_step_visible(i, fields))
    }

    /// Last visible step before `index`.
    pub fn previous_visible_step(&self, index: usize, fields: &FieldSet) -> Option<usize> {
        (0..index.min(self.steps.len()))
            .rev()
            .find(|&i| self.is_step_visible(i, fields))
    }

    /// A field is shown when its own condition and its step's condition hold.
    pub fn is_visible(&self, spec: &FieldSpec, fields: &FieldSet) -> bool {
        let step_visible = self
            .steps
            .iter()
            .position(|step| step.fields.iter().any(|f| f.name == spec.name))
            .map(|index| self.is_step_visible(index, fields))
            .unwrap_or(true);
        step_visible
            && spec
                .visible_when
                .as_ref()
                .map(|c| c.holds(fields))
                .unwrap_or(true)
    }

    pub fn is_required(&self, spec: &FieldSpec, fields: &FieldSet) -> bool {
        if !self.is_visible(spec, fields) {
            return false;
        }
        match &spec.requirement {
            Requirement::Required => true,
            Requirement::Optional => false,
            Requirement::RequiredWhen(condition) => condition.holds(fields),
        }
    }

    /// Required-but-empty fields of one step, evaluated against `fields` now.
    pub fn missing_in_step(&self, index: usize, fields: &FieldSet) -> Vec<&FieldSpec> {
        self.step(index)
            .map(|step| {
                step.fields
                    .iter()
                    .filter(|spec| self.is_required(spec, fields) && fields.is_empty_field(&spec.name))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn validate_step(&self, index: usize, fields: &FieldSet) -> Result<(), ValidationNotice> {
        let missing = self.missing_in_step(index, fields);
        if missing.is_empty() {
            return Ok(());
        }
        Err(ValidationNotice {
            step_index: index,
            step_title: self
                .step(index)
                .map(|s| s.title.clone())
                .unwrap_or_default(),
            missing: missing.iter().map(|spec| spec.label.clone()).collect(),
        })
    }

    /// First incomplete visible step, if any.
    pub fn validate_all(&self, fields: &FieldSet) -> Result<(), ValidationNotice> {
        (0..self.steps.len())
            .filter(|&index| self.is_step_visible(index, fields))
            .try_for_each(|index| self.validate_step(index, fields))
    }
}
