//! rehydrate-chunking: pack document elements into size-bounded chunks.
//!
//! Chunking is a separate pass over an already-built element sequence. It
//! never reorders content: chunks appear in the order of the elements they
//! were built from.

mod chunker;
mod options;
mod split;

pub use chunker::chunk_elements;
pub use options::{ChunkingError, ChunkingOptions, ChunkingStrategy};
pub use split::split_text;
