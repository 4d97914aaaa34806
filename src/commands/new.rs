//! Create a new post

use std::fs;

use anyhow::Result;

use crate::Site;

/// Create a new post skeleton under the content root.
///
/// Posts land in a year directory with their own folder, so co-located
/// images resolve relative to the post: `content/blog/2026/my-title/index.md`.
pub fn run(site: &Site, title: &str, path: Option<&str>) -> Result<()> {
    let now = chrono::Local::now();

    let relative = match path {
        Some(p) => p.trim_matches('/').to_string(),
        None => format!("{}/{}", now.format("%Y"), slug::slugify(title)),
    };

    let post_dir = site.content_dir.join(&relative);
    let file_path = post_dir.join("index.md");

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::create_dir_all(&post_dir)?;

    let content = format!(
        "---\ntitle: {}\ndate: {}\ndescription:\n---\n",
        title,
        now.format("%Y-%m-%d")
    );
    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("content/blog")).unwrap();
        let site = Site::new(dir.path()).unwrap();

        run(&site, "Testing Inkpress", None).unwrap();

        let mut report = crate::diagnostics::Report::new();
        let manifest = site.assemble(&mut report).unwrap();
        assert_eq!(manifest.len(), 1);
        let entry = manifest.entries().next().unwrap();
        assert_eq!(entry.title, "Testing Inkpress");
        assert!(entry.slug.ends_with("/testing-inkpress"));
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("content/blog")).unwrap();
        let site = Site::new(dir.path()).unwrap();

        run(&site, "Twice", Some("2026/twice")).unwrap();
        assert!(run(&site, "Twice", Some("2026/twice")).is_err());
    }
}
