//! Page manifest assembly: ordering, neighbor linking, draft policy
//!
//! The manifest is the single synchronization point of a build. However the
//! upstream stages fan out, everything lands here as one complete snapshot of
//! parsed records, and only then is the listing order computed. Ordering is
//! total: publication date descending, undated records after all dated ones,
//! ties broken by slug ascending, so repeated builds of unchanged content
//! produce identical output.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::assets::ImageHandle;
use crate::config::SiteConfig;
use crate::content::{excerpt, ContentRecord};
use crate::diagnostics::BuildError;

/// One publishable (or draft) page, derived from a content record.
/// Immutable once the manifest is built.
#[derive(Debug, Clone, Serialize)]
pub struct PageEntry {
    /// Unique URL path, derived from the source path
    pub slug: String,

    /// Display title; drafts fall back to the slug
    pub title: String,

    /// Ordering key; `None` for undated records
    pub published_at: Option<NaiveDateTime>,

    /// Declared description, or a pruned body excerpt
    pub summary: String,

    /// Resolved featured image, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<ImageHandle>,

    /// Slug of the entry just before this one in listing order (newer)
    pub previous_slug: Option<String>,

    /// Slug of the entry just after this one in listing order (older)
    pub next_slug: Option<String>,

    /// Source path relative to the content root
    pub source: String,

    /// Drafts are excluded from the listing but reachable by slug
    pub draft: bool,
}

/// The ordered collection of page entries for one build
#[derive(Debug, Default, Serialize)]
pub struct Manifest {
    #[serde(serialize_with = "entry_seq")]
    entries: IndexMap<String, PageEntry>,
    #[serde(serialize_with = "entry_seq")]
    drafts: IndexMap<String, PageEntry>,
}

impl Manifest {
    /// Assemble a manifest from the complete set of parsed records, each
    /// paired with its resolved featured image.
    pub fn build(
        bound: Vec<(ContentRecord, Option<ImageHandle>)>,
        config: &SiteConfig,
    ) -> Result<Self, BuildError> {
        detect_collisions(&bound)?;

        let mut listed: Vec<PageEntry> = Vec::new();
        let mut drafts: Vec<PageEntry> = Vec::new();

        for (record, image) in bound {
            let entry = PageEntry::from_record(record, image, config);
            if entry.draft {
                drafts.push(entry);
            } else {
                listed.push(entry);
            }
        }

        listed.sort_by(listing_order);
        link_neighbors(&mut listed);
        drafts.sort_by(|a, b| a.slug.cmp(&b.slug));

        Ok(Self {
            entries: listed.into_iter().map(|e| (e.slug.clone(), e)).collect(),
            drafts: drafts.into_iter().map(|e| (e.slug.clone(), e)).collect(),
        })
    }

    /// Publishable entries in listing order
    pub fn entries(&self) -> impl Iterator<Item = &PageEntry> {
        self.entries.values()
    }

    /// Draft entries, slug order
    pub fn drafts(&self) -> impl Iterator<Item = &PageEntry> {
        self.drafts.values()
    }

    /// Look up any entry by slug, drafts included
    pub fn get(&self, slug: &str) -> Option<&PageEntry> {
        self.entries.get(slug).or_else(|| self.drafts.get(slug))
    }

    /// Number of publishable entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn draft_count(&self) -> usize {
        self.drafts.len()
    }
}

impl PageEntry {
    fn from_record(
        record: ContentRecord,
        featured_image: Option<ImageHandle>,
        config: &SiteConfig,
    ) -> Self {
        let summary = match &record.front.description {
            Some(description) => description.clone(),
            None => excerpt::excerpt(&record.body, config.excerpt_length),
        };

        Self {
            title: record.title().to_string(),
            draft: record.is_draft(),
            slug: record.slug,
            published_at: record.published_at,
            summary,
            featured_image,
            previous_slug: None,
            next_slug: None,
            source: record.path,
        }
    }
}

/// Two different paths must never share a slug; silently merging content
/// would corrupt the manifest, so the build aborts instead.
fn detect_collisions(bound: &[(ContentRecord, Option<ImageHandle>)]) -> Result<(), BuildError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (record, _) in bound {
        if let Some(&existing) = seen.get(record.slug.as_str()) {
            let (first, second) = if existing <= record.path.as_str() {
                (existing, record.path.as_str())
            } else {
                (record.path.as_str(), existing)
            };
            return Err(BuildError::SlugCollision {
                slug: record.slug.clone(),
                first: first.to_string(),
                second: second.to_string(),
            });
        }
        seen.insert(&record.slug, &record.path);
    }
    Ok(())
}

/// Listing order: date descending, undated last, slug ascending on ties.
/// Total over distinct entries because slugs are unique.
fn listing_order(a: &PageEntry, b: &PageEntry) -> Ordering {
    date_order(&a.published_at, &b.published_at).then_with(|| a.slug.cmp(&b.slug))
}

fn date_order(a: &Option<NaiveDateTime>, b: &Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// One walk over the sorted listing wires each entry to its immediate
/// neighbors; the extremes keep `None` for the missing direction.
fn link_neighbors(listed: &mut [PageEntry]) {
    let slugs: Vec<String> = listed.iter().map(|e| e.slug.clone()).collect();
    for (i, entry) in listed.iter_mut().enumerate() {
        entry.previous_slug = i.checked_sub(1).map(|p| slugs[p].clone());
        entry.next_slug = slugs.get(i + 1).cloned();
    }
}

fn entry_seq<S>(map: &IndexMap<String, PageEntry>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(map.values())
}
