//! inkpress: a content pipeline for markdown blogs
//!
//! Turns a tree of markdown files into an ordered page manifest: front-matter
//! parsed, slugs derived from source paths, entries sorted newest-first and
//! linked to their chronological neighbors, featured images resolved to
//! renderable handles. Rendering, feeds, and sitemaps are external
//! collaborators; they consume the manifest and the input shapes in
//! [`feed`], nothing more.

pub mod assets;
pub mod commands;
pub mod config;
pub mod content;
pub mod data;
pub mod diagnostics;
pub mod feed;
pub mod helpers;
pub mod manifest;

use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;

use assets::{AssetResolver, DiskAssets, ImageHandle};
use content::{ContentLoader, ContentRecord};
use diagnostics::{BuildError, Diagnostic, Report};
use manifest::Manifest;

/// Configuration file name, looked up in the site base directory
pub const CONFIG_FILE: &str = "site.yml";

/// The main application value: immutable configuration plus resolved
/// directories, constructed once and passed down explicitly.
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content root holding markdown posts
    pub content_dir: PathBuf,
    /// Directory holding projects/books data files
    pub data_dir: PathBuf,
    /// Output directory for build artifacts
    pub output_dir: PathBuf,
}

impl Site {
    /// Create a site from a base directory, reading `site.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let data_dir = base_dir.join(&config.data_dir);
        let output_dir = base_dir.join(&config.output_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            data_dir,
            output_dir,
        })
    }

    /// Run the pipeline: load → parse → bind assets → assemble the manifest.
    ///
    /// Per-record parsing and asset binding fan out across threads; a failure
    /// stays confined to its record and lands in `report`. No ordering is
    /// assumed from the fan-out: the manifest build is the single
    /// synchronization point and observes the complete snapshot before
    /// sorting and linking.
    pub fn assemble(&self, report: &mut Report) -> Result<Manifest, BuildError> {
        let loader = ContentLoader::new(self.content_dir.clone(), &self.config);
        let raws = loader.load(report)?;

        let parsed: Vec<Result<ContentRecord, Diagnostic>> = raws
            .par_iter()
            .map(|raw| {
                ContentRecord::parse(raw).map_err(|e| Diagnostic::MetadataParse {
                    path: raw.path.clone(),
                    detail: e.to_string(),
                })
            })
            .collect();

        let mut records = Vec::with_capacity(parsed.len());
        for result in parsed {
            match result {
                Ok(record) => records.push(record),
                Err(diagnostic) => report.push(diagnostic),
            }
        }

        let resolver = DiskAssets::new(&self.base_dir, &self.config);
        let bound: Vec<(ContentRecord, Option<ImageHandle>, Option<Diagnostic>)> = records
            .into_par_iter()
            .map(|record| bind_featured(record, &resolver))
            .collect();

        let mut pairs = Vec::with_capacity(bound.len());
        for (record, image, diagnostic) in bound {
            if let Some(d) = diagnostic {
                report.push(d);
            }
            pairs.push((record, image));
        }

        Manifest::build(pairs, &self.config)
    }

    /// Load the projects/books data files
    pub fn load_data(&self) -> Result<data::SiteData> {
        data::load(&self.data_dir)
    }
}

/// Best-effort featured-image binding for one record. A miss degrades to "no
/// image" with a diagnostic; it never fails the build.
fn bind_featured(
    record: ContentRecord,
    resolver: &dyn AssetResolver,
) -> (ContentRecord, Option<ImageHandle>, Option<Diagnostic>) {
    let Some(reference) = record.front.featured.clone() else {
        return (record, None, None);
    };

    match resolver.resolve(&record.path, &reference) {
        Some(handle) => (record, Some(handle), None),
        None => {
            let diagnostic = Diagnostic::AssetMiss {
                path: record.path.clone(),
                reference,
            };
            (record, None, Some(diagnostic))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(base: &Path, rel: &str, text: &str) {
        let path = base.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    fn fixture() -> (tempfile::TempDir, Site) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("content/blog")).unwrap();
        let site = Site::new(dir.path()).unwrap();
        (dir, site)
    }

    #[test]
    fn test_assemble_end_to_end() {
        let (dir, site) = fixture();
        write(
            dir.path(),
            "content/blog/2024/bitboard/index.md",
            "---\ntitle: Bitboards\ndate: 2024-02-10\nfeatured: ./chart.png\n---\nMove generation.\n",
        );
        write(dir.path(), "content/blog/2024/bitboard/chart.png", "png");
        write(
            dir.path(),
            "content/blog/2021/pg-bulk-inserts/index.md",
            "---\ntitle: Bulk inserts\ndate: 2021-03-15\n---\nUse COPY.\n",
        );

        let mut report = Report::new();
        let manifest = site.assemble(&mut report).unwrap();

        assert!(report.is_clean());
        let slugs: Vec<_> = manifest.entries().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["2024/bitboard", "2021/pg-bulk-inserts"]);

        let newest = manifest.get("2024/bitboard").unwrap();
        assert_eq!(
            newest.featured_image.as_ref().unwrap().source,
            "content/blog/2024/bitboard/chart.png"
        );
        assert_eq!(newest.next_slug.as_deref(), Some("2021/pg-bulk-inserts"));
    }

    #[test]
    fn test_one_bad_post_does_not_break_the_build() {
        let (dir, site) = fixture();
        for (slug, date) in [("a", "2023-01-01"), ("b", "2023-02-01"), ("c", "2023-03-01"), ("d", "2023-04-01")] {
            write(
                dir.path(),
                &format!("content/blog/{}.md", slug),
                &format!("---\ntitle: {}\ndate: {}\n---\nBody.\n", slug, date),
            );
        }
        write(dir.path(), "content/blog/bad.md", "---\ntitle: [broken\n---\nBody.\n");

        let mut report = Report::new();
        let manifest = site.assemble(&mut report).unwrap();

        assert_eq!(manifest.len(), 4);
        assert_eq!(report.len(), 1);
        assert!(matches!(
            report.iter().next().unwrap(),
            Diagnostic::MetadataParse { path, .. } if path == "bad.md"
        ));

        let slugs: Vec<_> = manifest.entries().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["d", "c", "b", "a"]);
    }

    #[test]
    fn test_missing_featured_image_degrades() {
        let (dir, site) = fixture();
        write(
            dir.path(),
            "content/blog/post.md",
            "---\ntitle: Post\ndate: 2024-01-01\nfeatured: ./gone.png\n---\nBody.\n",
        );

        let mut report = Report::new();
        let manifest = site.assemble(&mut report).unwrap();

        let entry = manifest.get("post").unwrap();
        assert!(entry.featured_image.is_none());
        assert_eq!(report.len(), 1);
        assert!(matches!(
            report.iter().next().unwrap(),
            Diagnostic::AssetMiss { reference, .. } if reference == "./gone.png"
        ));
    }

    #[test]
    fn test_slug_collision_is_fatal() {
        let (dir, site) = fixture();
        write(dir.path(), "content/blog/a b.md", "---\ntitle: One\n---\nx\n");
        write(dir.path(), "content/blog/a-b.md", "---\ntitle: Two\n---\ny\n");

        let mut report = Report::new();
        let err = site.assemble(&mut report).unwrap_err();
        assert!(matches!(err, BuildError::SlugCollision { slug, .. } if slug == "a-b"));
    }

    #[test]
    fn test_empty_content_root() {
        let (_dir, site) = fixture();
        let mut report = Report::new();
        let manifest = site.assemble(&mut report).unwrap();
        assert!(manifest.is_empty());
        assert!(report.is_clean());
    }
}
