//! Decoding generic JSON values into typed elements.
//!
//! The main entry point is [`elements_from_value`], which takes a
//! `&serde_json::Value` holding an array of element records and produces
//! the typed element sequence in array order.

use serde_json::Value;

use crate::ids::derive_element_id;
use crate::types::*;

/// Errors while decoding element records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ElementError {
    /// The top-level value is not an array.
    #[error("expected a JSON array of element records")]
    NotAnArray,
    /// A record in the array is not an object.
    #[error("element {index}: record is not a JSON object")]
    NotAnObject { index: usize },
    /// A record is missing a required field.
    #[error("element {index}: missing '{field}' field")]
    MissingField { index: usize, field: String },
    /// A field is present but has the wrong shape.
    #[error("element {index}: invalid '{field}' field: {message}")]
    InvalidField {
        index: usize,
        field: String,
        message: String,
    },
    /// The `type` discriminant names no known element kind.
    #[error("element {index}: unknown element type '{kind}'")]
    UnknownKind { index: usize, kind: String },
}

/// Decode an array of element records into typed elements.
///
/// Dispatches on each record's `type` field. Unknown discriminants are an
/// error rather than being skipped; records are never reordered.
pub fn elements_from_value(value: &Value) -> Result<Vec<Element>, ElementError> {
    let records = value.as_array().ok_or(ElementError::NotAnArray)?;

    let mut elements = Vec::with_capacity(records.len());
    for (index, obj) in records.iter().enumerate() {
        elements.push(element_from_record(obj, index)?);
    }
    Ok(elements)
}

/// Decode a single element record. `index` is its position in the enclosing
/// array; it is used in error messages and to derive a missing id.
pub fn element_from_record(obj: &Value, index: usize) -> Result<Element, ElementError> {
    if !obj.is_object() {
        return Err(ElementError::NotAnObject { index });
    }

    let discriminant = obj
        .get("type")
        .ok_or_else(|| ElementError::MissingField {
            index,
            field: "type".to_string(),
        })?
        .as_str()
        .ok_or_else(|| ElementError::InvalidField {
            index,
            field: "type".to_string(),
            message: "expected a string".to_string(),
        })?;

    let kind =
        ElementKind::from_discriminant(discriminant).ok_or_else(|| ElementError::UnknownKind {
            index,
            kind: discriminant.to_string(),
        })?;

    let element = match kind.family() {
        ElementFamily::Text => Element::Text(parse_text(obj, kind, index)?),
        ElementFamily::Table => Element::Table(parse_table(obj, kind, index)?),
        ElementFamily::Image => Element::Image(parse_image(obj, index)?),
        ElementFamily::CheckBox => Element::CheckBox(parse_checkbox(obj, index)?),
        ElementFamily::PageBreak => Element::PageBreak(parse_page_break(obj, index)?),
    };
    Ok(element)
}

// ── Parsing helpers ─────────────────────────────────────────────────

fn required_text(obj: &Value, index: usize) -> Result<String, ElementError> {
    match obj.get("text") {
        None | Some(Value::Null) => Err(ElementError::MissingField {
            index,
            field: "text".to_string(),
        }),
        Some(v) => optional_text(Some(v), index),
    }
}

fn optional_text(value: Option<&Value>, index: usize) -> Result<String, ElementError> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ElementError::InvalidField {
            index,
            field: "text".to_string(),
            message: "expected a string".to_string(),
        }),
    }
}

fn parse_element_id(
    obj: &Value,
    kind: ElementKind,
    index: usize,
    text: &str,
) -> Result<String, ElementError> {
    match obj.get("element_id") {
        None | Some(Value::Null) => Ok(derive_element_id(kind, index, text)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ElementError::InvalidField {
            index,
            field: "element_id".to_string(),
            message: "expected a string".to_string(),
        }),
    }
}

fn parse_metadata(obj: &Value, index: usize) -> Result<ElementMetadata, ElementError> {
    match obj.get("metadata") {
        None | Some(Value::Null) => Ok(ElementMetadata::default()),
        Some(m) if m.is_object() => {
            serde_json::from_value(m.clone()).map_err(|e| ElementError::InvalidField {
                index,
                field: "metadata".to_string(),
                message: e.to_string(),
            })
        }
        Some(_) => Err(ElementError::InvalidField {
            index,
            field: "metadata".to_string(),
            message: "expected an object".to_string(),
        }),
    }
}

fn parse_text(obj: &Value, kind: ElementKind, index: usize) -> Result<TextElement, ElementError> {
    let text = required_text(obj, index)?;
    let element_id = parse_element_id(obj, kind, index, &text)?;
    let metadata = parse_metadata(obj, index)?;

    Ok(TextElement {
        kind,
        element_id,
        text,
        metadata,
    })
}

fn parse_table(obj: &Value, kind: ElementKind, index: usize) -> Result<TableElement, ElementError> {
    let text = required_text(obj, index)?;
    let element_id = parse_element_id(obj, kind, index, &text)?;
    let metadata = parse_metadata(obj, index)?;

    Ok(TableElement {
        kind,
        element_id,
        text,
        metadata,
    })
}

fn parse_image(obj: &Value, index: usize) -> Result<ImageElement, ElementError> {
    let text = optional_text(obj.get("text"), index)?;
    let element_id = parse_element_id(obj, ElementKind::Image, index, &text)?;
    let metadata = parse_metadata(obj, index)?;

    Ok(ImageElement {
        element_id,
        text,
        metadata,
    })
}

fn parse_checkbox(obj: &Value, index: usize) -> Result<CheckBoxElement, ElementError> {
    let checked = match obj.get("checked") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            return Err(ElementError::InvalidField {
                index,
                field: "checked".to_string(),
                message: "expected a boolean".to_string(),
            })
        }
    };
    let element_id = parse_element_id(obj, ElementKind::CheckBox, index, "")?;
    let metadata = parse_metadata(obj, index)?;

    Ok(CheckBoxElement {
        element_id,
        checked,
        metadata,
    })
}

fn parse_page_break(obj: &Value, index: usize) -> Result<PageBreakElement, ElementError> {
    let element_id = parse_element_id(obj, ElementKind::PageBreak, index, "")?;
    let metadata = parse_metadata(obj, index)?;

    Ok(PageBreakElement {
        element_id,
        metadata,
    })
}
