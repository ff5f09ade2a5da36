//! CLI command for descriptor validation

use std::path::Path;

use console::style;

use crate::model::Severity;
use crate::mods::validate_file;

/// Validate a descriptor file and print every issue
pub fn execute(source: &Path, json: bool) -> anyhow::Result<()> {
    let report = validate_file(source)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} ({})", source.display(), report.format.display_name());
        for issue in &report.issues {
            let level = match issue.severity() {
                Severity::Error => style("error").red().bold(),
                Severity::Warning => style("warning").yellow().bold(),
            };
            println!("  {level}: {}: {}", issue.field, issue.message);
        }
        println!(
            "\n{} error(s), {} warning(s)",
            report.error_count(),
            report.warning_count()
        );
    }

    if report.is_valid() {
        if !json {
            println!("Validation: PASSED");
        }
        Ok(())
    } else {
        anyhow::bail!(
            "validation failed: {} error(s) in {}",
            report.error_count(),
            source.display()
        )
    }
}
