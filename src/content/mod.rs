//! Content handling: loading, front-matter, slugs, excerpts

pub mod excerpt;
pub mod frontmatter;
pub mod loader;
pub mod record;
pub mod slug;

pub use frontmatter::{FrontMatter, FrontMatterError};
pub use loader::ContentLoader;
pub use record::{ContentRecord, RawRecord};
