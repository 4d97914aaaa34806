//! Build diagnostics and error taxonomy
//!
//! Two tiers: [`BuildError`] values are fatal and abort the build with no
//! output, because they mean the manifest itself cannot be trusted.
//! [`Diagnostic`] values are per-record and recoverable: the offending record
//! is skipped or degraded, the diagnostic is collected in a [`Report`], and
//! everything is surfaced together once the build finishes.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal build errors
#[derive(Debug, Error)]
pub enum BuildError {
    /// The content root itself cannot be read
    #[error("content root {path:?} is not readable")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two source paths derive the same slug. Silently merging content is
    /// worse than failing loudly, so this aborts.
    #[error("slug {slug:?} is derived from both {first:?} and {second:?}")]
    SlugCollision {
        slug: String,
        first: String,
        second: String,
    },
}

/// A recoverable, per-record problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A single file could not be read and was skipped
    PartialRead { path: String, detail: String },

    /// A front-matter block could not be parsed; the record is excluded
    MetadataParse { path: String, detail: String },

    /// A declared featured image could not be resolved; the entry gets no image
    AssetMiss { path: String, reference: String },
}

impl Diagnostic {
    /// Source path of the record this diagnostic is attached to
    pub fn path(&self) -> &str {
        match self {
            Diagnostic::PartialRead { path, .. }
            | Diagnostic::MetadataParse { path, .. }
            | Diagnostic::AssetMiss { path, .. } => path,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::PartialRead { path, detail } => {
                write!(f, "skipped unreadable file {}: {}", path, detail)
            }
            Diagnostic::MetadataParse { path, detail } => {
                write!(f, "invalid front-matter in {}: {}", path, detail)
            }
            Diagnostic::AssetMiss { path, reference } => {
                write!(f, "unresolved featured image {:?} in {}", reference, path)
            }
        }
    }
}

/// Collected diagnostics for one build run
#[derive(Debug, Default)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic. Logged immediately so long builds show progress,
    /// kept for the end-of-build summary.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    pub fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, diagnostics: I) {
        for d in diagnostics {
            self.push(d);
        }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Log the batched summary after the build completes
    pub fn summarize(&self) {
        if self.is_clean() {
            return;
        }
        tracing::warn!("build finished with {} diagnostic(s):", self.len());
        for diagnostic in &self.diagnostics {
            tracing::warn!("  {}", diagnostic);
        }
    }
}
