//! Explicit composition of rehydration and the stages that follow it.

use std::path::PathBuf;

use rehydrate_chunking::{chunk_elements, ChunkingOptions};
use rehydrate_elements::Element;

use crate::error::PipelineError;
use crate::rehydrate::{partition_json, PartitionJsonOptions};
use crate::source::JsonInput;
use crate::stages::{normalize_metadata, tag_filetype, NormalizeOptions, JSON_MIME_TYPE};

/// Rehydrate, then optionally chunk, then tag file type, then normalize
/// metadata. Stages run in that order on every call.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    pub partition: PartitionJsonOptions,
    pub chunking: Option<ChunkingOptions>,
    pub assign_parent_ids: bool,
}

impl Pipeline {
    pub fn new(partition: PartitionJsonOptions) -> Self {
        Pipeline {
            partition,
            ..Default::default()
        }
    }

    pub fn with_chunking(mut self, chunking: ChunkingOptions) -> Self {
        self.chunking = Some(chunking);
        self
    }

    pub fn with_parent_ids(mut self, assign: bool) -> Self {
        self.assign_parent_ids = assign;
        self
    }

    pub fn run(&self, input: JsonInput<'_>) -> Result<Vec<Element>, PipelineError> {
        let source_path: Option<PathBuf> = input.path.map(|p| p.to_path_buf());

        let mut elements = partition_json(input, &self.partition)?;

        if let Some(chunking) = &self.chunking {
            elements = chunk_elements(&elements, chunking)?;
        }

        if self.partition.include_metadata {
            elements = tag_filetype(elements, JSON_MIME_TYPE);
            let normalize = NormalizeOptions {
                metadata_filename: self.partition.metadata_filename.as_deref(),
                source_path: source_path.as_deref(),
                assign_parent_ids: self.assign_parent_ids,
            };
            elements = normalize_metadata(elements, &normalize);
        }

        tracing::debug!(
            elements = elements.len(),
            chunked = self.chunking.is_some(),
            "pipeline finished"
        );
        Ok(elements)
    }
}
