//! Typed structs representing serialized document elements.
//!
//! An element is one unit of a partitioned document (a title, a paragraph, a
//! table, ...). Elements are grouped into a handful of families that share a
//! payload shape; the discriminant (`"type"` in JSON) is kept as an
//! [`ElementKind`] on every element so the exact kind survives a round-trip.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ── Kinds ───────────────────────────────────────────────────────────

/// The discriminant of a serialized element record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Title,
    NarrativeText,
    ListItem,
    Text,
    UncategorizedText,
    Header,
    Footer,
    Address,
    EmailAddress,
    FigureCaption,
    Formula,
    PageNumber,
    Footnote,
    CodeSnippet,
    CompositeElement,
    Table,
    TableChunk,
    Image,
    CheckBox,
    PageBreak,
}

/// Payload shape shared by a group of element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementFamily {
    Text,
    Table,
    Image,
    CheckBox,
    PageBreak,
}

impl ElementKind {
    pub const ALL: [ElementKind; 20] = [
        ElementKind::Title,
        ElementKind::NarrativeText,
        ElementKind::ListItem,
        ElementKind::Text,
        ElementKind::UncategorizedText,
        ElementKind::Header,
        ElementKind::Footer,
        ElementKind::Address,
        ElementKind::EmailAddress,
        ElementKind::FigureCaption,
        ElementKind::Formula,
        ElementKind::PageNumber,
        ElementKind::Footnote,
        ElementKind::CodeSnippet,
        ElementKind::CompositeElement,
        ElementKind::Table,
        ElementKind::TableChunk,
        ElementKind::Image,
        ElementKind::CheckBox,
        ElementKind::PageBreak,
    ];

    /// The `"type"` value written for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Title => "Title",
            ElementKind::NarrativeText => "NarrativeText",
            ElementKind::ListItem => "ListItem",
            ElementKind::Text => "Text",
            ElementKind::UncategorizedText => "UncategorizedText",
            ElementKind::Header => "Header",
            ElementKind::Footer => "Footer",
            ElementKind::Address => "Address",
            ElementKind::EmailAddress => "EmailAddress",
            ElementKind::FigureCaption => "FigureCaption",
            ElementKind::Formula => "Formula",
            ElementKind::PageNumber => "PageNumber",
            ElementKind::Footnote => "Footnote",
            ElementKind::CodeSnippet => "CodeSnippet",
            ElementKind::CompositeElement => "CompositeElement",
            ElementKind::Table => "Table",
            ElementKind::TableChunk => "TableChunk",
            ElementKind::Image => "Image",
            ElementKind::CheckBox => "CheckBox",
            ElementKind::PageBreak => "PageBreak",
        }
    }

    /// Look up a kind by its `"type"` value. Matching is exact.
    pub fn from_discriminant(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == s)
    }

    pub fn family(self) -> ElementFamily {
        match self {
            ElementKind::Table | ElementKind::TableChunk => ElementFamily::Table,
            ElementKind::Image => ElementFamily::Image,
            ElementKind::CheckBox => ElementFamily::CheckBox,
            ElementKind::PageBreak => ElementFamily::PageBreak,
            _ => ElementFamily::Text,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Metadata ────────────────────────────────────────────────────────

/// Bounding polygon of an element on its page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub points: Vec<(f64, f64)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_height: Option<f64>,
}

/// Provenance and position of an element.
///
/// Every field is optional. Keys this struct does not model are kept in
/// `extra` and written back out unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_directory: Option<String>,
    /// MIME type of the document the element came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filetype: Option<String>,
    /// Last modification time of the source document, `YYYY-MM-DDTHH:MM:SS`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    /// `element_id` of the enclosing section element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_depth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_as_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_urls: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_texts: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emphasized_text_contents: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emphasized_text_tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detection_class_prob: Option<f64>,
    /// Set on chunks that continue an element split across chunk boundaries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_continuation: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Elements ────────────────────────────────────────────────────────

/// An element whose payload is a run of text (titles, paragraphs, list
/// items, composite chunks, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    /// Always a kind in [`ElementFamily::Text`].
    pub kind: ElementKind,
    pub element_id: String,
    pub text: String,
    pub metadata: ElementMetadata,
}

/// A table or a fragment of a split table. The HTML rendering, when known,
/// lives in `metadata.text_as_html`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableElement {
    /// Either [`ElementKind::Table`] or [`ElementKind::TableChunk`].
    pub kind: ElementKind,
    pub element_id: String,
    pub text: String,
    pub metadata: ElementMetadata,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    pub element_id: String,
    /// Alt text or text recognized inside the image; may be empty.
    pub text: String,
    pub metadata: ElementMetadata,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckBoxElement {
    pub element_id: String,
    pub checked: bool,
    pub metadata: ElementMetadata,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageBreakElement {
    pub element_id: String,
    pub metadata: ElementMetadata,
}

/// A single document element, dispatched by family.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(TextElement),
    Table(TableElement),
    Image(ImageElement),
    CheckBox(CheckBoxElement),
    PageBreak(PageBreakElement),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Text(e) => e.kind,
            Element::Table(e) => e.kind,
            Element::Image(_) => ElementKind::Image,
            Element::CheckBox(_) => ElementKind::CheckBox,
            Element::PageBreak(_) => ElementKind::PageBreak,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Element::Text(e) => &e.element_id,
            Element::Table(e) => &e.element_id,
            Element::Image(e) => &e.element_id,
            Element::CheckBox(e) => &e.element_id,
            Element::PageBreak(e) => &e.element_id,
        }
    }

    /// The text payload. Check boxes and page breaks carry none.
    pub fn text(&self) -> &str {
        match self {
            Element::Text(e) => &e.text,
            Element::Table(e) => &e.text,
            Element::Image(e) => &e.text,
            Element::CheckBox(_) | Element::PageBreak(_) => "",
        }
    }

    pub fn metadata(&self) -> &ElementMetadata {
        match self {
            Element::Text(e) => &e.metadata,
            Element::Table(e) => &e.metadata,
            Element::Image(e) => &e.metadata,
            Element::CheckBox(e) => &e.metadata,
            Element::PageBreak(e) => &e.metadata,
        }
    }

    pub fn metadata_mut(&mut self) -> &mut ElementMetadata {
        match self {
            Element::Text(e) => &mut e.metadata,
            Element::Table(e) => &mut e.metadata,
            Element::Image(e) => &mut e.metadata,
            Element::CheckBox(e) => &mut e.metadata,
            Element::PageBreak(e) => &mut e.metadata,
        }
    }
}
