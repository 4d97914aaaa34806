//! Configuration module

pub mod site;

pub use site::{AuthorConfig, SiteConfig, SocialConfig};
