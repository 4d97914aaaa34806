//! Content loader - walks the content root for markdown files

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::diagnostics::{BuildError, Diagnostic, Report};

use super::RawRecord;

/// Loads raw content records from the content root.
///
/// The loader reads files in directory-walk order; ordering is imposed later
/// by the manifest sort, so no order is promised here. One unreadable file is
/// a diagnostic, not a failure; an unreadable root is fatal.
pub struct ContentLoader {
    content_dir: PathBuf,
    ignore: Vec<glob::Pattern>,
}

impl ContentLoader {
    /// Create a loader for the given content root
    pub fn new(content_dir: PathBuf, config: &SiteConfig) -> Self {
        let ignore = config
            .ignore
            .iter()
            .filter_map(|pattern| match glob::Pattern::new(pattern) {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::warn!("ignoring invalid glob {:?}: {}", pattern, e);
                    None
                }
            })
            .collect();

        Self {
            content_dir,
            ignore,
        }
    }

    /// Load every markdown file under the content root
    pub fn load(&self, report: &mut Report) -> Result<Vec<RawRecord>, BuildError> {
        // An unreadable root means the manifest cannot be trusted
        fs::read_dir(&self.content_dir).map_err(|source| BuildError::SourceUnavailable {
            path: self.content_dir.clone(),
            source,
        })?;

        let mut records = Vec::new();

        for entry in WalkDir::new(&self.content_dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(|p| self.relative_path(p))
                        .unwrap_or_else(|| "<unknown>".to_string());
                    report.push(Diagnostic::PartialRead {
                        path,
                        detail: e.to_string(),
                    });
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            let relative = self.relative_path(path);
            if self.is_ignored(&relative) {
                tracing::debug!("ignored {}", relative);
                continue;
            }

            match fs::read_to_string(path) {
                Ok(raw) => records.push(RawRecord {
                    path: relative,
                    raw,
                }),
                Err(e) => report.push(Diagnostic::PartialRead {
                    path: relative,
                    detail: e.to_string(),
                }),
            }
        }

        tracing::debug!("loaded {} content file(s)", records.len());
        Ok(records)
    }

    fn relative_path(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.content_dir).unwrap_or(path);
        let s = relative.to_string_lossy();
        if std::path::MAIN_SEPARATOR == '/' {
            s.into_owned()
        } else {
            s.replace(std::path::MAIN_SEPARATOR, "/")
        }
    }

    fn is_ignored(&self, relative: &str) -> bool {
        self.ignore.iter().any(|p| p.matches(relative))
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, text: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    #[test]
    fn test_loads_markdown_recursively() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "2024/a/index.md", "---\ntitle: A\n---\nA body\n");
        write(dir.path(), "2023/b.markdown", "B body\n");
        write(dir.path(), "2023/image.png", "not markdown");

        let loader = ContentLoader::new(dir.path().to_path_buf(), &SiteConfig::default());
        let mut report = Report::new();
        let mut records = loader.load(&mut report).unwrap();
        records.sort_by(|a, b| a.path.cmp(&b.path));

        let paths: Vec<_> = records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["2023/b.markdown", "2024/a/index.md"]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ContentLoader::new(dir.path().join("nope"), &SiteConfig::default());
        let mut report = Report::new();
        let err = loader.load(&mut report).unwrap_err();
        assert!(matches!(err, BuildError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_ignore_globs() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "keep.md", "keep\n");
        write(dir.path(), "wip-notes.md", "skip\n");
        write(dir.path(), "2024/wip-draft.md", "skip\n");

        let config = SiteConfig {
            ignore: vec!["wip-*.md".to_string(), "**/wip-*.md".to_string()],
            ..SiteConfig::default()
        };
        let loader = ContentLoader::new(dir.path().to_path_buf(), &config);
        let mut report = Report::new();
        let records = loader.load(&mut report).unwrap();

        let paths: Vec<_> = records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["keep.md"]);
    }

    #[test]
    fn test_invalid_glob_is_skipped_not_fatal() {
        let config = SiteConfig {
            ignore: vec!["[".to_string()],
            ..SiteConfig::default()
        };
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.md", "a\n");
        let loader = ContentLoader::new(dir.path().to_path_buf(), &config);
        let mut report = Report::new();
        assert_eq!(loader.load(&mut report).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_root_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ContentLoader::new(dir.path().to_path_buf(), &SiteConfig::default());
        let mut report = Report::new();
        let records = loader.load(&mut report).unwrap();
        assert!(records.is_empty());
        assert!(report.is_clean());
    }
}
