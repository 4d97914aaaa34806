//! Build the manifest and hand-off artifacts

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::diagnostics::Report;
use crate::{feed, Site};

/// Run the pipeline and write the hand-off artifacts for the rendering,
/// feed, and sitemap collaborators into the output directory.
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    let mut report = Report::new();
    let manifest = site.assemble(&mut report)?;
    let data = site.load_data()?;

    fs::create_dir_all(&site.output_dir)
        .with_context(|| format!("creating output dir {:?}", site.output_dir))?;

    write_json(&site.output_dir.join("manifest.json"), &manifest)?;

    let feed_doc = serde_json::json!({
        "channel": feed::channel(&site.config),
        "entries": feed::entries(&manifest, &site.config),
    });
    write_json(&site.output_dir.join("feed.json"), &feed_doc)?;
    write_json(
        &site.output_dir.join("sitemap.json"),
        &feed::sitemap(&manifest, &site.config),
    )?;
    write_json(&site.output_dir.join("data.json"), &data)?;

    tracing::info!(
        "built {} page(s), {} draft(s) in {:.2}s",
        manifest.len(),
        manifest.draft_count(),
        start.elapsed().as_secs_f64()
    );
    report.summarize();

    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("writing {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_build_writes_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("content/blog/2024");
        fs::create_dir_all(&posts).unwrap();
        fs::write(
            posts.join("hello.md"),
            "---\ntitle: Hello\ndate: 2024-01-15\n---\nFirst post.\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        run(&site).unwrap();

        let manifest: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join("public/manifest.json")).unwrap(),
        )
        .unwrap();
        let entries = manifest["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["slug"], "2024/hello");

        for artifact in ["feed.json", "sitemap.json", "data.json"] {
            assert!(dir.path().join("public").join(artifact).exists());
        }
    }
}
