//! Checks that decide whether a document is in the element schema.
//!
//! Two levels are provided:
//!
//! - [`is_json_processable`] is a cheap structural check on raw text, run
//!   before any parsing. It accepts text that opens an array of objects (or
//!   an empty array) and nothing else.
//! - [`SchemaValidator`] validates a parsed document against the full
//!   JSON Schema embedded in this crate and reports every violation.

use once_cell::sync::Lazy;
use regex::Regex;

static ELEMENT_SCHEMA_STR: &str = include_str!("../schema/element-schema.json");

static LIST_OF_OBJECTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A\s*\[\s*[{\]]").expect("list-of-objects pattern compiles"));

/// True when `text` plausibly encodes a serialized element array.
///
/// This looks only at the opening of the text: a truncated or otherwise
/// malformed document can pass and still fail to parse.
pub fn is_json_processable(text: &str) -> bool {
    LIST_OF_OBJECTS.is_match(text)
}

/// Errors building the schema validator.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("embedded element schema is not valid JSON: {0}")]
    Embedded(#[from] serde_json::Error),
    #[error("failed to compile element schema: {0}")]
    Compile(String),
}

/// Validator for the element JSON Schema.
pub struct SchemaValidator {
    validator: jsonschema::Validator,
}

impl SchemaValidator {
    /// Compile the embedded element schema.
    pub fn new() -> Result<Self, SchemaError> {
        let schema: serde_json::Value = serde_json::from_str(ELEMENT_SCHEMA_STR)?;
        let validator =
            jsonschema::validator_for(&schema).map_err(|e| SchemaError::Compile(e.to_string()))?;
        Ok(SchemaValidator { validator })
    }

    pub fn is_valid(&self, document: &serde_json::Value) -> bool {
        self.validator.is_valid(document)
    }

    /// All schema violations in `document`, one message per violation.
    pub fn violations(&self, document: &serde_json::Value) -> Vec<String> {
        self.validator
            .iter_errors(document)
            .map(|e| format!("{}", e))
            .collect()
    }
}

/// The raw text of the embedded element schema.
pub fn element_schema() -> &'static str {
    ELEMENT_SCHEMA_STR
}
