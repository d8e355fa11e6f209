//! The chunking pass.
//!
//! Chunking runs in two steps. Elements are first grouped into pre-chunks:
//! runs of text-bearing elements that fit the size window, or a single
//! table. Each pre-chunk is then turned into one or more chunks, splitting
//! any pre-chunk whose text still exceeds `max_characters`.

use rehydrate_elements::{
    derive_element_id, Element, ElementFamily, ElementKind, ElementMetadata, TableElement,
    TextElement,
};

use crate::options::{ChunkingError, ChunkingOptions, ChunkingStrategy};
use crate::split::split_text;

const TEXT_SEPARATOR: &str = "\n\n";

enum PreChunk<'a> {
    Text(Vec<&'a Element>),
    Table(&'a Element),
}

/// Pack `elements` into chunks according to `options`.
///
/// Text-bearing elements become `CompositeElement`s, tables stay isolated
/// (oversized tables become `TableChunk`s) and page breaks are dropped.
pub fn chunk_elements(
    elements: &[Element],
    options: &ChunkingOptions,
) -> Result<Vec<Element>, ChunkingError> {
    options.validate()?;

    let pre_chunks = pre_chunk(elements, options);
    let mut chunks = Vec::new();
    for pre in &pre_chunks {
        match pre {
            PreChunk::Text(members) => text_chunks(members, options, &mut chunks),
            PreChunk::Table(table) => table_chunks(table, options, &mut chunks),
        }
    }

    tracing::debug!(
        elements = elements.len(),
        pre_chunks = pre_chunks.len(),
        chunks = chunks.len(),
        strategy = ?options.strategy,
        "chunked elements"
    );
    Ok(chunks)
}

// ── Pre-chunking ────────────────────────────────────────────────────

fn text_len(s: &str) -> usize {
    s.chars().count()
}

fn pre_chunk<'a>(elements: &'a [Element], options: &ChunkingOptions) -> Vec<PreChunk<'a>> {
    let mut pre_chunks = Vec::new();
    let mut current: Vec<&Element> = Vec::new();
    let mut current_len = 0usize;

    let flush = |current: &mut Vec<&'a Element>,
                 current_len: &mut usize,
                 out: &mut Vec<PreChunk<'a>>| {
        if !current.is_empty() {
            out.push(PreChunk::Text(std::mem::take(current)));
        }
        *current_len = 0;
    };

    for element in elements {
        match element.kind().family() {
            ElementFamily::PageBreak => continue,
            ElementFamily::Table => {
                flush(&mut current, &mut current_len, &mut pre_chunks);
                pre_chunks.push(PreChunk::Table(element));
                continue;
            }
            _ => {}
        }

        if starts_section(element, &current, options) {
            flush(&mut current, &mut current_len, &mut pre_chunks);
        }

        let len = text_len(element.text());
        if !current.is_empty() && len > 0 && !fits(current_len, len, options) {
            flush(&mut current, &mut current_len, &mut pre_chunks);
        }

        if len > 0 {
            current_len = if current_len == 0 {
                len
            } else {
                current_len + TEXT_SEPARATOR.len() + len
            };
        }
        current.push(element);
    }
    flush(&mut current, &mut current_len, &mut pre_chunks);

    pre_chunks
}

fn starts_section(element: &Element, current: &[&Element], options: &ChunkingOptions) -> bool {
    if options.strategy != ChunkingStrategy::ByTitle || current.is_empty() {
        return false;
    }
    if element.kind() == ElementKind::Title {
        return true;
    }
    if !options.multipage_sections {
        let page = element.metadata().page_number;
        let current_page = current.last().and_then(|e| e.metadata().page_number);
        return page.is_some() && current_page.is_some() && page != current_page;
    }
    false
}

fn fits(current_len: usize, len: usize, options: &ChunkingOptions) -> bool {
    if current_len == 0 {
        return true;
    }
    if current_len >= options.new_after_n_chars {
        return false;
    }
    current_len + TEXT_SEPARATOR.len() + len <= options.max_characters
}

// ── Chunk construction ──────────────────────────────────────────────

fn chunk_metadata(first: &Element) -> ElementMetadata {
    let mut metadata = first.metadata().clone();
    metadata.text_as_html = None;
    metadata.coordinates = None;
    metadata.emphasized_text_contents = None;
    metadata.emphasized_text_tags = None;
    metadata.category_depth = None;
    metadata.parent_id = None;
    metadata.detection_class_prob = None;
    metadata.is_continuation = None;
    metadata
}

fn text_chunks(members: &[&Element], options: &ChunkingOptions, out: &mut Vec<Element>) {
    let Some(first) = members.first() else {
        return;
    };
    let text = members
        .iter()
        .map(|e| e.text())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(TEXT_SEPARATOR);
    if text.is_empty() {
        return;
    }

    let metadata = chunk_metadata(first);
    let pieces = if text_len(&text) <= options.max_characters {
        vec![text]
    } else {
        split_text(&text, options.max_characters, options.overlap)
    };

    for (i, piece) in pieces.into_iter().enumerate() {
        let mut metadata = metadata.clone();
        if i > 0 {
            metadata.is_continuation = Some(true);
        }
        out.push(Element::Text(TextElement {
            kind: ElementKind::CompositeElement,
            element_id: derive_element_id(ElementKind::CompositeElement, out.len(), &piece),
            text: piece,
            metadata,
        }));
    }
}

fn table_chunks(table: &Element, options: &ChunkingOptions, out: &mut Vec<Element>) {
    let text = table.text();
    if text_len(text) <= options.max_characters {
        let mut metadata = chunk_metadata(table);
        metadata.text_as_html = table.metadata().text_as_html.clone();
        out.push(Element::Table(TableElement {
            kind: table.kind(),
            element_id: derive_element_id(table.kind(), out.len(), text),
            text: text.to_string(),
            metadata,
        }));
        return;
    }

    let metadata = chunk_metadata(table);
    for (i, piece) in split_text(text, options.max_characters, options.overlap)
        .into_iter()
        .enumerate()
    {
        let mut metadata = metadata.clone();
        if i > 0 {
            metadata.is_continuation = Some(true);
        }
        out.push(Element::Table(TableElement {
            kind: ElementKind::TableChunk,
            element_id: derive_element_id(ElementKind::TableChunk, out.len(), &piece),
            text: piece,
            metadata,
        }));
    }
}
