//! Chunking configuration.

use serde::{Deserialize, Serialize};

/// How pre-chunk boundaries are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkingStrategy {
    /// Pack elements purely by size.
    Basic,
    /// Like `Basic`, but every `Title` starts a new chunk.
    ByTitle,
}

/// Errors raised by the chunking pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChunkingError {
    #[error("invalid chunking options: {0}")]
    InvalidOptions(String),
}

/// Chunk size limits and strategy.
///
/// Lengths are counted in characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingOptions {
    pub strategy: ChunkingStrategy,
    /// Hard limit on the text length of a chunk.
    pub max_characters: usize,
    /// Soft limit: once a pre-chunk reaches this length no further element
    /// is added to it.
    pub new_after_n_chars: usize,
    /// Characters of tail text repeated at the start of the next piece when
    /// an oversized element is split.
    pub overlap: usize,
    /// When false (`ByTitle` only), a page change also starts a new chunk.
    pub multipage_sections: bool,
}

impl Default for ChunkingOptions {
    fn default() -> Self {
        ChunkingOptions {
            strategy: ChunkingStrategy::Basic,
            max_characters: 500,
            new_after_n_chars: 500,
            overlap: 0,
            multipage_sections: true,
        }
    }
}

impl ChunkingOptions {
    /// Options for `strategy` with `max_characters` as both the hard and
    /// the soft limit.
    pub fn new(strategy: ChunkingStrategy, max_characters: usize) -> Self {
        ChunkingOptions {
            strategy,
            max_characters,
            new_after_n_chars: max_characters,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ChunkingError> {
        if self.max_characters == 0 {
            return Err(ChunkingError::InvalidOptions(
                "max_characters must be greater than 0".to_string(),
            ));
        }
        if self.new_after_n_chars > self.max_characters {
            return Err(ChunkingError::InvalidOptions(format!(
                "new_after_n_chars ({}) must not exceed max_characters ({})",
                self.new_after_n_chars, self.max_characters
            )));
        }
        if self.overlap >= self.max_characters {
            return Err(ChunkingError::InvalidOptions(format!(
                "overlap ({}) must be less than max_characters ({})",
                self.overlap, self.max_characters
            )));
        }
        Ok(())
    }
}
