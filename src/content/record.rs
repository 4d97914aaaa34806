//! Content record models

use chrono::NaiveDateTime;

use super::{slug, FrontMatter, FrontMatterError};

/// A content file as discovered by the loader: path and raw text only.
/// The path is relative to the content root with `/` separators and is the
/// record's identity for the whole build.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub path: String,
    pub raw: String,
}

/// A content file after front-matter parsing. Constructed once, then
/// read-only for the rest of the build.
#[derive(Debug, Clone)]
pub struct ContentRecord {
    /// Source path relative to the content root
    pub path: String,

    /// Slug derived from `path` alone
    pub slug: String,

    /// Structured metadata
    pub front: FrontMatter,

    /// Body text with the front-matter block removed
    pub body: String,

    /// Parsed publication date; `None` sorts after every dated record
    pub published_at: Option<NaiveDateTime>,
}

impl ContentRecord {
    /// Parse a raw record into a content record
    pub fn parse(raw: &RawRecord) -> Result<Self, FrontMatterError> {
        let (front, body) = FrontMatter::parse(&raw.raw)?;
        let published_at = front.parse_date();
        Ok(Self {
            path: raw.path.clone(),
            slug: slug::resolve(std::path::Path::new(&raw.path)),
            front,
            body: body.to_string(),
            published_at,
        })
    }

    /// A record without a title is a draft: excluded from listings and
    /// neighbor linking, still reachable at its slug.
    pub fn is_draft(&self) -> bool {
        self.front.title.is_none()
    }

    /// Display title, falling back to the slug
    pub fn title(&self) -> &str {
        self.front.title.as_deref().unwrap_or(&self.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(path: &str, text: &str) -> RawRecord {
        RawRecord {
            path: path.to_string(),
            raw: text.to_string(),
        }
    }

    #[test]
    fn test_parse_populates_slug_and_date() {
        let record = ContentRecord::parse(&raw(
            "2024/bitboard/index.md",
            "---\ntitle: Bitboards\ndate: 2024-02-10\n---\nBody.\n",
        ))
        .unwrap();

        assert_eq!(record.slug, "2024/bitboard");
        assert_eq!(record.title(), "Bitboards");
        assert!(!record.is_draft());
        assert_eq!(
            record.published_at.unwrap().format("%Y-%m-%d").to_string(),
            "2024-02-10"
        );
        assert_eq!(record.body.trim(), "Body.");
    }

    #[test]
    fn test_untitled_record_is_a_draft_with_slug_title() {
        let record =
            ContentRecord::parse(&raw("2024/wip.md", "---\ndate: 2024-02-10\n---\nDraft.\n"))
                .unwrap();
        assert!(record.is_draft());
        assert_eq!(record.title(), "2024/wip");
    }

    #[test]
    fn test_unparseable_date_is_none() {
        let record = ContentRecord::parse(&raw(
            "a.md",
            "---\ntitle: T\ndate: next tuesday\n---\nBody.\n",
        ))
        .unwrap();
        assert!(record.published_at.is_none());
    }
}
