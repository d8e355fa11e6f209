//! Rehydration of serialized element JSON.
//!
//! [`partition_json`] runs a fixed sequence of steps, each of which can end
//! the call with an error: resolve the input, gate the text on the element
//! schema's shape, parse and decode it, then overlay `last_modified`.

use rehydrate_elements::{elements_from_value, is_json_processable, Element};
use serde::{Deserialize, Serialize};

use crate::error::RehydrateError;
use crate::source::{JsonInput, RawDocument};

/// Options for [`partition_json`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionJsonOptions {
    /// When false, elements keep the metadata they were serialized with.
    pub include_metadata: bool,
    /// Filename to record on the elements. Not used by rehydration itself;
    /// it is read by the metadata normalization stage.
    pub metadata_filename: Option<String>,
    /// Overrides every element's `last_modified`.
    pub metadata_last_modified: Option<String>,
    /// Take `last_modified` from the stream's own metadata, when the input
    /// is a stream that has any.
    pub infer_timestamp_from_stream: bool,
}

impl Default for PartitionJsonOptions {
    fn default() -> Self {
        PartitionJsonOptions {
            include_metadata: true,
            metadata_filename: None,
            metadata_last_modified: None,
            infer_timestamp_from_stream: false,
        }
    }
}

/// Rebuild the typed element sequence from serialized element JSON.
///
/// Exactly one of `input.path`, `input.stream` and `input.text` must be set.
/// Text consisting only of whitespace yields an empty sequence.
pub fn partition_json(
    input: JsonInput<'_>,
    options: &PartitionJsonOptions,
) -> Result<Vec<Element>, RehydrateError> {
    if input.is_blank_text() {
        tracing::debug!("blank text input, nothing to rehydrate");
        return Ok(Vec::new());
    }

    let source = input.into_source()?;
    let raw = RawDocument::read(source, options.infer_timestamp_from_stream)?;
    tracing::debug!(
        provenance = ?raw.provenance,
        bytes = raw.text.len(),
        last_modified = raw.last_modified.as_deref(),
        "resolved input"
    );

    rehydrate(&raw, options)
}

/// Gate, parse, decode and overlay an already-read document.
pub fn rehydrate(
    raw: &RawDocument,
    options: &PartitionJsonOptions,
) -> Result<Vec<Element>, RehydrateError> {
    if !is_json_processable(&raw.text) {
        tracing::debug!(provenance = ?raw.provenance, "text is not an element array");
        return Err(RehydrateError::SchemaMismatch);
    }

    let value: serde_json::Value = serde_json::from_str(&raw.text)?;
    let mut elements = elements_from_value(&value)?;
    tracing::debug!(elements = elements.len(), "decoded elements");

    if options.include_metadata {
        apply_last_modified(
            &mut elements,
            options.metadata_last_modified.as_deref(),
            raw.last_modified.as_deref(),
        );
    }

    Ok(elements)
}

/// Overlay `last_modified` on every element.
///
/// `explicit` wins over `candidate`; with neither (empty strings count as
/// absent) each element keeps its decoded value.
pub fn apply_last_modified(
    elements: &mut [Element],
    explicit: Option<&str>,
    candidate: Option<&str>,
) {
    let overlay = explicit
        .filter(|s| !s.is_empty())
        .or(candidate.filter(|s| !s.is_empty()));

    for element in elements.iter_mut() {
        if let Some(ts) = overlay {
            element.metadata_mut().last_modified = Some(ts.to_string());
        }
    }
}
