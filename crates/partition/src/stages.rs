//! Post-rehydration stages.
//!
//! Each stage takes the previous stage's elements by value and returns them,
//! in the same order. [`Pipeline`](crate::Pipeline) composes them; they can
//! also be called directly.

use std::path::Path;

use rehydrate_elements::{Element, ElementKind};

/// MIME type recorded on elements rehydrated from element JSON.
pub const JSON_MIME_TYPE: &str = "application/json";

/// Record `filetype` on every element that has none.
pub fn tag_filetype(mut elements: Vec<Element>, filetype: &str) -> Vec<Element> {
    for element in elements.iter_mut() {
        let metadata = element.metadata_mut();
        if metadata.filetype.is_none() {
            metadata.filetype = Some(filetype.to_string());
        }
    }
    elements
}

/// Options for [`normalize_metadata`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeOptions<'a> {
    /// Filename supplied by the caller. Overrides any recorded filename.
    pub metadata_filename: Option<&'a str>,
    /// Path the elements were read from. Only fills in missing filenames.
    pub source_path: Option<&'a Path>,
    /// Point `parent_id` of elements that follow a `Title` at that title.
    pub assign_parent_ids: bool,
}

/// Fill in filename, directory and (optionally) parent ids.
pub fn normalize_metadata(mut elements: Vec<Element>, options: &NormalizeOptions<'_>) -> Vec<Element> {
    if let Some(name) = options.metadata_filename {
        let (filename, directory) = split_filename(Path::new(name));
        for element in elements.iter_mut() {
            let metadata = element.metadata_mut();
            metadata.filename = filename.clone();
            metadata.file_directory = directory.clone();
        }
    } else if let Some(path) = options.source_path {
        let (filename, directory) = split_filename(path);
        for element in elements.iter_mut() {
            let metadata = element.metadata_mut();
            if metadata.filename.is_none() {
                metadata.filename = filename.clone();
                metadata.file_directory = directory.clone();
            }
        }
    }

    if options.assign_parent_ids {
        assign_parent_ids(&mut elements);
    }

    elements
}

fn split_filename(path: &Path) -> (Option<String>, Option<String>) {
    let filename = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned());
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_string_lossy().into_owned());
    (filename, directory)
}

fn assign_parent_ids(elements: &mut [Element]) {
    let mut current_title: Option<String> = None;
    for element in elements.iter_mut() {
        if element.kind() == ElementKind::Title {
            current_title = Some(element.id().to_string());
            continue;
        }
        if let Some(title_id) = &current_title {
            let metadata = element.metadata_mut();
            if metadata.parent_id.is_none() {
                metadata.parent_id = Some(title_id.clone());
            }
        }
    }
}
