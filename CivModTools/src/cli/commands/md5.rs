//! CLI command for refreshing manifest content hashes

use std::path::Path;
use std::time::Instant;

use anyhow::Context;

use crate::cli::progress::{OperationProgress, print_done};
use crate::mods::update_manifest_hashes_with_progress;

/// Recompute the MD5 of every imported file of a manifest
pub fn execute(source: &Path, output: Option<&Path>, quiet: bool) -> anyhow::Result<()> {
    let start = Instant::now();

    let display = OperationProgress::new(3, quiet);
    let result = update_manifest_hashes_with_progress(source, output, &|p| display.update(p))
        .with_context(|| format!("Failed to update hashes of {}", source.display()))?;

    if !quiet {
        println!(
            "Hashed {} file(s), {} changed",
            result.updated, result.changed
        );
        print_done(start.elapsed());
    }
    Ok(())
}
