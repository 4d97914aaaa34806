//! List site content

use anyhow::Result;

use crate::data;
use crate::diagnostics::Report;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let manifest = assemble(site)?;
            println!("Posts ({}):", manifest.len());
            for entry in manifest.entries() {
                let date = entry
                    .published_at
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "undated".to_string());
                println!("  {} - {} [{}]", date, entry.title, entry.source);
            }
        }
        "draft" | "drafts" => {
            let manifest = assemble(site)?;
            println!("Drafts ({}):", manifest.draft_count());
            for entry in manifest.drafts() {
                println!("  /{} [{}]", entry.slug, entry.source);
            }
        }
        "project" | "projects" => {
            let data = site.load_data()?;
            println!("Projects ({}):", data.projects.len());
            for project in &data.projects {
                let marker = if project.defunct { " (defunct)" } else { "" };
                println!("  {}{} - {}", project.name, marker, project.url);
            }
        }
        "book" | "books" => {
            let data = site.load_data()?;
            println!("Books ({}):", data.books.len());
            for (shelf, books) in data::shelves(&data.books) {
                println!("  {}:", shelf);
                for book in books {
                    println!("    {}", book.title);
                }
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, draft, project, book",
                content_type
            );
        }
    }

    Ok(())
}

fn assemble(site: &Site) -> Result<crate::manifest::Manifest> {
    let mut report = Report::new();
    let manifest = site.assemble(&mut report)?;
    report.summarize();
    Ok(manifest)
}
