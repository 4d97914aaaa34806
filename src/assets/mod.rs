//! Featured-asset resolution
//!
//! The pipeline never decodes or resizes images; it only resolves a declared
//! reference to a handle the rendering collaborator can hand to its image
//! processor. Resolution is best-effort: a missing file degrades to "no
//! image" and the build carries on.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::config::SiteConfig;
use crate::helpers::url;

/// A renderable image handle at one or more fixed widths
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageHandle {
    /// Path relative to the site base directory, `/`-separated
    pub source: String,

    /// Widths the renderer is expected to produce
    pub widths: Vec<u32>,
}

impl ImageHandle {
    /// Root-relative URL for this asset
    pub fn url(&self, config: &SiteConfig) -> String {
        url::url_for(config, &url::encode_path(&self.source))
    }
}

/// Maps a declared image reference to a renderable handle.
/// `None` is a valid, non-error result.
pub trait AssetResolver {
    fn resolve(&self, record_path: &str, reference: &str) -> Option<ImageHandle>;
}

/// Resolves references against the on-disk layout: first relative to the
/// record's own directory, then against each configured asset directory.
pub struct DiskAssets {
    base_dir: PathBuf,
    content_dir: PathBuf,
    asset_dirs: Vec<PathBuf>,
    widths: Vec<u32>,
}

impl DiskAssets {
    pub fn new(base_dir: &Path, config: &SiteConfig) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            content_dir: base_dir.join(&config.content_dir),
            asset_dirs: config
                .asset_dirs
                .iter()
                .map(|d| base_dir.join(d))
                .collect(),
            widths: config.image_widths.clone(),
        }
    }

    fn candidates(&self, record_path: &str, reference: &str) -> Vec<PathBuf> {
        let reference = reference.trim_start_matches("./");
        let mut candidates = Vec::new();

        if let Some(stripped) = reference.strip_prefix('/') {
            // Site-absolute reference
            candidates.push(self.base_dir.join(stripped));
        } else {
            let record_dir = Path::new(record_path).parent().unwrap_or(Path::new(""));
            candidates.push(self.content_dir.join(record_dir).join(reference));
            for dir in &self.asset_dirs {
                candidates.push(dir.join(reference));
            }
        }

        candidates
    }

    fn handle_for(&self, candidate: &Path) -> Option<ImageHandle> {
        if !candidate.is_file() {
            return None;
        }
        let normalized = normalize(candidate);
        let relative = normalized
            .strip_prefix(&self.base_dir)
            .unwrap_or(&normalized);
        Some(ImageHandle {
            source: relative.to_string_lossy().replace(std::path::MAIN_SEPARATOR, "/"),
            widths: self.widths.clone(),
        })
    }
}

impl AssetResolver for DiskAssets {
    fn resolve(&self, record_path: &str, reference: &str) -> Option<ImageHandle> {
        self.candidates(record_path, reference)
            .iter()
            .find_map(|candidate| self.handle_for(candidate))
    }
}

/// Lexically resolve `.` and `..` components so handles carry clean paths
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
