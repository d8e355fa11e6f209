use rehydrate_chunking::ChunkingError;
use rehydrate_elements::ElementError;

/// All errors that can be returned while rehydrating element JSON.
#[derive(Debug, thiserror::Error)]
pub enum RehydrateError {
    /// Zero or more than one of path, stream and text was supplied.
    #[error("exactly one of path, stream or text must be specified; {0}")]
    InvalidArguments(String),

    /// The source could not be read.
    #[error("failed to read {origin}: {source}")]
    Io {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    /// Stream content is not valid UTF-8.
    #[error("{origin} is not valid UTF-8: {source}")]
    Encoding {
        origin: String,
        #[source]
        source: std::str::Utf8Error,
    },

    /// The text does not look like a serialized element array.
    #[error("JSON cannot be partitioned. Schema does not match the element schema.")]
    SchemaMismatch,

    /// The text looked like an element array but is not valid JSON.
    #[error("not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record could not be decoded into an element.
    #[error(transparent)]
    Decode(#[from] ElementError),
}

/// Errors from a full [`Pipeline`](crate::Pipeline) run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Rehydrate(#[from] RehydrateError),
    #[error(transparent)]
    Chunking(#[from] ChunkingError),
}
