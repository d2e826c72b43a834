//! Location form with declarative validation rules

use indexmap::IndexMap;
use thiserror::Error;

use crate::i18n::{self, Localization};
use crate::types::FieldId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: FieldId,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    NonEmpty,
}

impl Rule {
    fn check(&self, value: &str) -> bool {
        match self {
            Rule::NonEmpty => !value.trim().is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub field: FieldId,
    pub rule: Rule,
    pub message: String,
}

/// Name/path inputs plus the inline error shown under each of them
#[derive(Debug, Clone)]
pub struct LocationForm {
    pub name: String,
    pub path: String,
    rules: Vec<FieldRule>,
    errors: IndexMap<FieldId, String>,
}

impl LocationForm {
    pub fn new(lm: &Localization) -> Self {
        Self {
            name: String::new(),
            path: String::new(),
            rules: vec![
                FieldRule {
                    field: FieldId::Name,
                    rule: Rule::NonEmpty,
                    message: lm.get(i18n::NAME_EMPTY).to_string(),
                },
                FieldRule {
                    field: FieldId::Path,
                    rule: Rule::NonEmpty,
                    message: lm.get(i18n::PATH_EMPTY).to_string(),
                },
            ],
            errors: IndexMap::new(),
        }
    }

    pub fn value(&self, field: FieldId) -> &str {
        match field {
            FieldId::Name => &self.name,
            FieldId::Path => &self.path,
        }
    }

    pub fn value_mut(&mut self, field: FieldId) -> &mut String {
        match field {
            FieldId::Name => &mut self.name,
            FieldId::Path => &mut self.path,
        }
    }

    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        *self.value_mut(field) = value.into();
    }

    pub fn error(&self, field: FieldId) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Re-checks a single field, as done when it loses focus
    pub fn validate_field(&mut self, field: FieldId) -> Result<(), ValidationError> {
        self.errors.shift_remove(&field);
        let value = self.value(field).to_string();
        let failed = self
            .rules
            .iter()
            .filter(|r| r.field == field)
            .find(|r| !r.rule.check(&value))
            .cloned();

        match failed {
            Some(rule) => {
                self.errors.insert(field, rule.message.clone());
                Err(ValidationError {
                    field,
                    message: rule.message,
                })
            }
            None => Ok(()),
        }
    }

    /// Validates every field, recording an inline error for each failure
    pub fn validate(&mut self) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = [FieldId::Name, FieldId::Path]
            .into_iter()
            .filter_map(|field| self.validate_field(field).err())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
