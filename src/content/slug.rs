//! Slug derivation
//!
//! A slug is derived from the source path alone, never from front-matter, so
//! retitling a post cannot break inbound links or feed GUIDs. The derivation
//! is a pure function: the same path always yields the same slug, and slugs
//! only change when files move.

use std::path::Path;

/// Derive a slug from a path relative to the content root.
///
/// Each directory component is slugified independently and the extension is
/// dropped. A trailing `index` stem collapses into its parent directory, so
/// `2024/bitboard/index.md` and `2024/bitboard.md` address the same page.
pub fn resolve(relative_path: &Path) -> String {
    let mut segments: Vec<String> = Vec::new();

    let mut components = relative_path.components().peekable();
    while let Some(component) = components.next() {
        let raw = component.as_os_str().to_string_lossy();
        let is_last = components.peek().is_none();

        let stem = if is_last {
            match raw.rsplit_once('.') {
                Some((stem, _ext)) if !stem.is_empty() => stem.to_string(),
                _ => raw.to_string(),
            }
        } else {
            raw.to_string()
        };

        if is_last && stem == "index" && !segments.is_empty() {
            break;
        }

        let segment = slug::slugify(&stem);
        if !segment.is_empty() {
            segments.push(segment);
        }
    }

    if segments.is_empty() {
        // Root-level index file; keep the slug non-empty
        return "index".to_string();
    }

    segments.join("/")
}
