//! Front-matter parsing
//!
//! A content file may open with a `---`-delimited YAML block. The recognized
//! keys are typed below; anything else is preserved opaquely in `extra` so
//! newer content never loses fields on a round-trip. A file without a block
//! is valid (and, lacking a title, a draft). A block that cannot be parsed is
//! an error carrying enough detail for the per-record diagnostic.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Front-matter data from a content file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    /// Display title. Absent means the record is a draft.
    pub title: Option<String>,

    /// Publication date, parsed lazily via [`FrontMatter::parse_date`]
    pub date: Option<String>,

    /// Explicit summary; listing views fall back to a body excerpt
    pub description: Option<String>,

    /// Featured image reference, resolved by the asset binder
    pub featured: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

/// Failure to split or parse a front-matter block
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("front-matter block is never closed")]
    Unterminated,

    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl FrontMatter {
    /// Split a leading front-matter block from `content`.
    /// Returns the parsed block and the remaining body.
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let Some(rest) = strip_opening_fence(content) else {
            // No block at all: an empty front-matter, body unchanged
            return Ok((FrontMatter::default(), content));
        };

        let Some(end) = rest.find("\n---") else {
            return Err(FrontMatterError::Unterminated);
        };

        let block = &rest[..end];
        let body = rest[end + 4..].trim_start_matches(['\n', '\r']);

        if block.trim().is_empty() {
            return Ok((FrontMatter::default(), body));
        }

        let fm: FrontMatter = serde_yaml::from_str(block)?;
        Ok((fm, body))
    }

    /// Parse the declared date, if any
    pub fn parse_date(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// The block must start at the very beginning of the file: a `---` line
/// followed by a newline. A `---` further down is a horizontal rule.
fn strip_opening_fence(content: &str) -> Option<&str> {
    let rest = content.strip_prefix("---")?;
    let rest = rest.strip_prefix('\r').unwrap_or(rest);
    rest.strip_prefix('\n')
}

/// Parse a date string in the formats content authors actually use.
///
/// Timestamps stay naive: the manifest ordering must be byte-identical
/// across rebuilds regardless of the building machine's timezone.
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset; normalized to UTC
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    None
}
