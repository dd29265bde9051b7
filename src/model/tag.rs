use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// A `name: value` label attached to a photo.
///
/// Equality is exact on both fields: case-sensitive and untrimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    name: String,
    value: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parse the authoring form `name:value`, splitting on the first colon.
    pub fn parse_authored(input: &str) -> Result<Self, ValidationError> {
        let (name, value) = input.split_once(':').ok_or(ValidationError::MalformedTag)?;
        if name.is_empty() || value.is_empty() {
            return Err(ValidationError::MalformedTag);
        }
        Ok(Self::new(name, value))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn matches(&self, name: &str, value: &str) -> bool {
        self.name == name && self.value == value
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}
