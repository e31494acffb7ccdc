//! Field values collected by a wizard session.
//!
//! A [`FieldSet`] is an ordered, fixed-key mapping. Keys come from the tool's
//! schema when the set is built; writes to unknown keys are rejected instead
//! of inserting new entries.

use crate::error::SessionError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    /// Selected option of an enumerated field (including Yes/No toggles).
    Choice(String),
    Date(Option<NaiveDate>),
    /// Named sub-values in declaration order.
    Group(Vec<(String, String)>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn choice(value: impl Into<String>) -> Self {
        FieldValue::Choice(value.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) | FieldValue::Choice(s) => s.trim().is_empty(),
            FieldValue::Date(d) => d.is_none(),
            FieldValue::Group(parts) => parts.iter().all(|(_, v)| v.trim().is_empty()),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Choice(_) => "a choice",
            FieldValue::Date(_) => "a date",
            FieldValue::Group(_) => "a group",
        }
    }

    fn same_kind(&self, other: &FieldValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// The same kind of value with every part cleared.
    pub fn cleared(&self) -> FieldValue {
        match self {
            FieldValue::Text(_) => FieldValue::Text(String::new()),
            FieldValue::Choice(_) => FieldValue::Choice(String::new()),
            FieldValue::Date(_) => FieldValue::Date(None),
            FieldValue::Group(parts) => FieldValue::Group(
                parts.iter().map(|(k, _)| (k.clone(), String::new())).collect(),
            ),
        }
    }

    /// Render in the form [`FieldValue::parse_like`] accepts. Group parts are
    /// all listed so an unchanged edit keeps every key.
    pub fn to_input(&self) -> String {
        match self {
            FieldValue::Group(parts) => parts
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(";"),
            other => other.to_string(),
        }
    }

    /// Parse raw user input into a value of the same kind as `self`.
    ///
    /// Dates use `YYYY-MM-DD` (empty clears the date); groups use
    /// `key=value;key=value` with keys restricted to the existing ones.
    pub fn parse_like(&self, field: &str, input: &str) -> Result<FieldValue, SessionError> {
        match self {
            FieldValue::Text(_) => Ok(FieldValue::Text(input.to_string())),
            FieldValue::Choice(_) => Ok(FieldValue::Choice(input.trim().to_string())),
            FieldValue::Date(_) => {
                let trimmed = input.trim();
                if trimmed.is_empty() {
                    return Ok(FieldValue::Date(None));
                }
                NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                    .map(|d| FieldValue::Date(Some(d)))
                    .map_err(|_| SessionError::WrongValueKind {
                        field: field.to_string(),
                        expected: "a date (YYYY-MM-DD)",
                    })
            }
            FieldValue::Group(parts) => {
                let mut updated = parts.clone();
                for pair in input.split(';').filter(|p| !p.trim().is_empty()) {
                    let (key, value) =
                        pair.split_once('=').ok_or_else(|| SessionError::WrongValueKind {
                            field: field.to_string(),
                            expected: "key=value pairs separated by ';'",
                        })?;
                    let key = key.trim();
                    let slot = updated
                        .iter_mut()
                        .find(|(k, _)| k == key)
                        .ok_or_else(|| SessionError::UnknownField(format!("{}.{}", field, key)))?;
                    slot.1 = value.trim().to_string();
                }
                Ok(FieldValue::Group(updated))
            }
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) | FieldValue::Choice(s) => f.write_str(s),
            FieldValue::Date(Some(d)) => write!(f, "{}", d.format(DATE_FORMAT)),
            FieldValue::Date(None) => Ok(()),
            FieldValue::Group(parts) => {
                let rendered: Vec<String> = parts
                    .iter()
                    .filter(|(_, v)| !v.trim().is_empty())
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect();
                f.write_str(&rendered.join("; "))
            }
        }
    }
}

/// Ordered mapping from field name to value with stable keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSet {
    entries: Vec<(String, FieldValue)>,
}

impl FieldSet {
    /// Build from `(name, default)` pairs. Later duplicates are ignored.
    pub fn new<I, S>(defaults: I) -> Self
    where
        I: IntoIterator<Item = (S, FieldValue)>,
        S: Into<String>,
    {
        let mut entries: Vec<(String, FieldValue)> = Vec::new();
        for (name, value) in defaults {
            let name = name.into();
            if !entries.iter().any(|(n, _)| *n == name) {
                entries.push((name, value));
            }
        }
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Rendered value, empty when the field is unset or unknown.
    pub fn value(&self, name: &str) -> String {
        self.get(name).map(|v| v.to_string()).unwrap_or_default()
    }

    /// Editable form of the value, empty when the field is unknown.
    pub fn input(&self, name: &str) -> String {
        self.get(name).map(FieldValue::to_input).unwrap_or_default()
    }

    /// True when the field's rendered value equals `expected` exactly.
    pub fn is(&self, name: &str, expected: &str) -> bool {
        self.value(name) == expected
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn is_empty_field(&self, name: &str) -> bool {
        self.get(name).map(FieldValue::is_empty).unwrap_or(true)
    }

    /// Replace a value. The key must exist and the kind must match.
    pub fn set(&mut self, name: &str, value: FieldValue) -> Result<(), SessionError> {
        let slot = self
            .entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .ok_or_else(|| SessionError::UnknownField(name.to_string()))?;
        if !slot.1.same_kind(&value) {
            return Err(SessionError::WrongValueKind {
                field: name.to_string(),
                expected: slot.1.kind_name(),
            });
        }
        slot.1 = value;
        Ok(())
    }

    /// Clear a value in place, keeping its kind.
    pub fn clear(&mut self, name: &str) -> Result<(), SessionError> {
        let cleared = self
            .get(name)
            .map(FieldValue::cleared)
            .ok_or_else(|| SessionError::UnknownField(name.to_string()))?;
        self.set(name, cleared)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
