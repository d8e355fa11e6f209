//! rehydrate-partition: turn serialized element JSON back into elements.
//!
//! [`partition_json`] is the core entry point. It reads exactly one input
//! (a path, an open stream or a string), rejects text that is not shaped
//! like an element array, decodes the elements and overlays their
//! `last_modified` metadata. [`Pipeline`] composes it with chunking, file
//! type tagging and metadata normalization as explicit follow-on stages.

pub mod error;
pub mod pipeline;
pub mod rehydrate;
pub mod source;
pub mod stages;
pub mod timestamp;

pub use error::{PipelineError, RehydrateError};
pub use pipeline::Pipeline;
pub use rehydrate::{apply_last_modified, partition_json, rehydrate, PartitionJsonOptions};
pub use source::{DocumentStream, JsonInput, JsonSource, Provenance, RawDocument};
pub use stages::{normalize_metadata, tag_filetype, NormalizeOptions, JSON_MIME_TYPE};
pub use timestamp::{format_system_time, normalize_timestamp};
