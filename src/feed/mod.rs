//! Input shapes for the feed and sitemap serializers
//!
//! The XML serializers are external collaborators; this module only flattens
//! a manifest plus the site configuration into the record shapes they
//! consume. Entry URLs double as GUIDs, so they must stay stable across
//! builds; they are built from the slug, which is path-derived.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::SiteConfig;
use crate::helpers::url;
use crate::manifest::Manifest;

/// Site-wide channel metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelMeta {
    pub title: String,
    pub description: String,
    pub link: String,
    pub language: String,
    pub author: String,
}

/// One feed item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedEntry {
    pub title: String,
    pub url: String,
    pub guid: String,
    pub summary: String,
    pub published_at: Option<NaiveDateTime>,
}

/// One sitemap location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: Option<NaiveDateTime>,
}

/// Channel metadata from the site configuration
pub fn channel(config: &SiteConfig) -> ChannelMeta {
    ChannelMeta {
        title: config.title.clone(),
        description: config.description.clone(),
        link: url::full_url_for(config, ""),
        language: config.language.clone(),
        author: config.author.name.clone(),
    }
}

/// Feed items for every listed entry, in listing order. Drafts never appear.
pub fn entries(manifest: &Manifest, config: &SiteConfig) -> Vec<FeedEntry> {
    manifest
        .entries()
        .map(|entry| {
            let permalink = permalink(config, &entry.slug);
            FeedEntry {
                title: entry.title.clone(),
                guid: permalink.clone(),
                url: permalink,
                summary: entry.summary.clone(),
                published_at: entry.published_at,
            }
        })
        .collect()
}

/// Sitemap locations: the site root followed by every listed entry
pub fn sitemap(manifest: &Manifest, config: &SiteConfig) -> Vec<SitemapUrl> {
    let mut urls = vec![SitemapUrl {
        loc: url::full_url_for(config, ""),
        lastmod: manifest.entries().filter_map(|e| e.published_at).max(),
    }];

    urls.extend(manifest.entries().map(|entry| SitemapUrl {
        loc: permalink(config, &entry.slug),
        lastmod: entry.published_at,
    }));

    urls
}

fn permalink(config: &SiteConfig, slug: &str) -> String {
    url::full_url_for(config, &format!("{}/", url::encode_path(slug)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentRecord, RawRecord};

    fn manifest() -> Manifest {
        let records = vec![
            (
                "2024/bitboard/index.md",
                "---\ntitle: Bitboards\ndate: 2024-02-10\ndescription: Chess move generation\n---\nBody.\n",
            ),
            (
                "2021/pg-bulk-inserts/index.md",
                "---\ntitle: Bulk inserts\ndate: 2021-03-15\n---\nFaster ingestion with COPY.\n",
            ),
            ("wip.md", "---\ndate: 2024-06-01\n---\nDraft body.\n"),
        ];

        let bound = records
            .into_iter()
            .map(|(path, text)| {
                let raw = RawRecord {
                    path: path.to_string(),
                    raw: text.to_string(),
                };
                (ContentRecord::parse(&raw).unwrap(), None)
            })
            .collect();

        Manifest::build(bound, &SiteConfig::default()).unwrap()
    }

    fn config() -> SiteConfig {
        SiteConfig {
            title: "Test Blog".to_string(),
            url: "https://blog.example".to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_feed_entries_in_listing_order_without_drafts() {
        let feed = entries(&manifest(), &config());
        let titles: Vec<_> = feed.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Bitboards", "Bulk inserts"]);
    }

    #[test]
    fn test_url_and_guid_from_base_url_and_slug() {
        let feed = entries(&manifest(), &config());
        assert_eq!(feed[0].url, "https://blog.example/2024/bitboard/");
        assert_eq!(feed[0].guid, feed[0].url);
    }

    #[test]
    fn test_summary_carried_through() {
        let feed = entries(&manifest(), &config());
        assert_eq!(feed[0].summary, "Chess move generation");
        assert_eq!(feed[1].summary, "Faster ingestion with COPY.");
    }

    #[test]
    fn test_sitemap_has_root_and_entries() {
        let urls = sitemap(&manifest(), &config());
        let locs: Vec<_> = urls.iter().map(|u| u.loc.as_str()).collect();
        assert_eq!(
            locs,
            vec![
                "https://blog.example/",
                "https://blog.example/2024/bitboard/",
                "https://blog.example/2021/pg-bulk-inserts/",
            ]
        );
        // Root lastmod tracks the newest entry
        assert_eq!(urls[0].lastmod, urls[1].lastmod);
    }

    #[test]
    fn test_channel_meta() {
        let meta = channel(&config());
        assert_eq!(meta.title, "Test Blog");
        assert_eq!(meta.link, "https://blog.example/");
    }
}
