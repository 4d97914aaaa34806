//! Clean the output directory

use std::fs;

use anyhow::Result;

use crate::Site;

/// Remove the output directory
pub fn run(site: &Site) -> Result<()> {
    if site.output_dir.exists() {
        fs::remove_dir_all(&site.output_dir)?;
        tracing::info!("Removed {:?}", site.output_dir);
    }
    Ok(())
}
