//! Site configuration (site.yml)
//!
//! Loaded once at startup into an immutable value and passed explicitly to
//! every component that needs it. There is no ambient global configuration.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,
    pub author: AuthorConfig,
    pub social: SocialConfig,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub asset_dirs: Vec<String>,
    pub data_dir: String,
    pub output_dir: String,
    #[serde(default)]
    pub ignore: Vec<String>,

    // Listing
    pub excerpt_length: usize,
    pub image_widths: Vec<u32>,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: String::new(),
            language: "en".to_string(),
            author: AuthorConfig::default(),
            social: SocialConfig::default(),

            url: "https://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "content/blog".to_string(),
            asset_dirs: vec!["content/assets".to_string()],
            data_dir: "data".to_string(),
            output_dir: "public".to_string(),
            ignore: Vec::new(),

            excerpt_length: 160,
            image_widths: vec![200, 400, 800],

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Author metadata, surfaced in the feed channel shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    pub name: String,
    pub summary: String,
}

/// Social handles
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    pub twitter: String,
    pub github: String,
    pub linkedin: String,
    pub email: String,
}
