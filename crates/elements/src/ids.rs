//! Deterministic element identifiers.

use sha2::{Digest, Sha256};

use crate::types::ElementKind;

/// Derive a stable 32-character hex id for an element that was serialized
/// without one, or for a freshly built chunk.
///
/// The id depends on the element kind, its position in the sequence and its
/// text, so identical text at different positions gets different ids.
pub fn derive_element_id(kind: ElementKind, index: usize, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(kind.as_str().as_bytes());
    hasher.update(index.to_le_bytes());
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    digest
        .iter()
        .take(16)
        .map(|b| format!("{:02x}", b))
        .collect()
}
