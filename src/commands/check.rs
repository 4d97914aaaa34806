//! Validate content without writing output

use anyhow::Result;

use crate::diagnostics::Report;
use crate::Site;

/// Run the full pipeline, print every diagnostic, write nothing.
///
/// A run with only recoverable diagnostics still exits zero: the manifest is
/// complete and internally consistent without the excluded records. Fatal
/// errors propagate and abort.
pub fn run(site: &Site) -> Result<()> {
    let mut report = Report::new();
    let manifest = site.assemble(&mut report)?;
    let data = site.load_data()?;

    println!(
        "{} page(s), {} draft(s), {} project(s), {} book(s)",
        manifest.len(),
        manifest.draft_count(),
        data.projects.len(),
        data.books.len()
    );

    if report.is_clean() {
        println!("no diagnostics");
    } else {
        println!("{} diagnostic(s):", report.len());
        for diagnostic in report.iter() {
            println!("  {}", diagnostic);
        }
    }

    Ok(())
}
