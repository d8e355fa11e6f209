//! rehydrate-elements: typed document elements and their JSON form.
//!
//! Provides the [`Element`] tagged variant for every element kind a
//! partitioned document can contain, a decoder that rebuilds elements from a
//! generic `serde_json::Value` ([`elements_from_value`]), the matching
//! encoder, and the conformance checks used to decide whether a JSON
//! document is in the element schema at all.

pub mod conformance;
pub mod decode;
pub mod encode;
pub mod ids;
pub mod types;

pub use conformance::{is_json_processable, SchemaError, SchemaValidator};
pub use decode::{element_from_record, elements_from_value, ElementError};
pub use encode::{element_to_value, elements_to_json, elements_to_value};
pub use ids::derive_element_id;
pub use types::*;
