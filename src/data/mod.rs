//! Typed site data: projects and the reading list
//!
//! Both collections live in YAML files under the data directory and carry
//! explicit sort keys; nothing depends on the literal order records appear
//! in the file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::content::frontmatter::parse_date_string;

/// A portfolio project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub url: String,
    pub blurb: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub defunct: bool,
    /// Explicit listing position, lowest first
    #[serde(default)]
    pub rank: u32,
}

/// A reading-list entry. An absent `finished` date means currently reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub finished: Option<String>,
}

impl Book {
    /// Parsed finish date; `None` for unfinished or unparseable entries
    pub fn finished_date(&self) -> Option<NaiveDate> {
        self.finished
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .and_then(parse_date_string)
            .map(|dt| dt.date())
    }
}

/// All data-file collections for one build
#[derive(Debug, Clone, Default, Serialize)]
pub struct SiteData {
    pub projects: Vec<Project>,
    pub books: Vec<Book>,
}

/// Load `projects.yml` and `books.yml` from the data directory.
/// Missing files mean empty collections; malformed files are errors.
pub fn load(data_dir: &Path) -> Result<SiteData> {
    let mut data = SiteData {
        projects: load_file(&data_dir.join("projects.yml"))?,
        books: load_file(&data_dir.join("books.yml"))?,
    };

    data.projects
        .sort_by(|a, b| a.rank.cmp(&b.rank).then_with(|| a.name.cmp(&b.name)));

    Ok(data)
}

fn load_file<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("reading data file {:?}", path))?;
    serde_yaml::from_str(&content).with_context(|| format!("parsing data file {:?}", path))
}

/// Reading-list shelves: a "currently reading" group first, then one group
/// per finish year, newest year first. Books keep file order within a shelf.
pub fn shelves(books: &[Book]) -> Vec<(String, Vec<&Book>)> {
    let mut reading: Vec<&Book> = Vec::new();
    let mut years: Vec<(i32, Vec<&Book>)> = Vec::new();

    for book in books {
        match book.finished_date() {
            None => reading.push(book),
            Some(date) => {
                let year = chrono::Datelike::year(&date);
                match years.iter_mut().find(|(y, _)| *y == year) {
                    Some((_, shelf)) => shelf.push(book),
                    None => years.push((year, vec![book])),
                }
            }
        }
    }

    years.sort_by(|a, b| b.0.cmp(&a.0));

    let mut shelves = Vec::new();
    if !reading.is_empty() {
        shelves.push(("currently reading".to_string(), reading));
    }
    shelves.extend(years.into_iter().map(|(y, shelf)| (y.to_string(), shelf)));
    shelves
}
