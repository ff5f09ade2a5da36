//! Solution (`.civ5sln`) writing

use std::fs;
use std::path::Path;

use quick_xml::events::BytesStart;

use crate::error::Result;
use crate::formats::civ5proj::project_root;
use crate::formats::xml::XmlOutput;
use crate::model::SolutionModel;
use crate::utils::render_guid;

/// Write a solution to disk
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_civ5sln<P: AsRef<Path>>(solution: &SolutionModel, path: P) -> Result<()> {
    let xml = serialize_civ5sln(solution)?;
    fs::write(path, xml)?;
    Ok(())
}

/// Serialize a solution
///
/// # Errors
/// Returns an error if XML serialization fails.
pub fn serialize_civ5sln(solution: &SolutionModel) -> Result<String> {
    let mut out = XmlOutput::new()?;
    out.start(project_root())?;

    out.open("PropertyGroup")?;
    out.field("Name", &solution.name)?;
    out.field("ProjectGuid", &render_guid(&solution.project_guid))?;
    out.optional_field("Configuration", solution.configuration.as_deref())?;
    out.end("PropertyGroup")?;

    if !solution.is_empty() {
        out.open("ItemGroup")?;
        for reference in solution.projects() {
            let mut element = BytesStart::new("Projects");
            element.push_attribute(("Include", reference.path.as_str()));
            out.start(element)?;
            out.field("ProjectName", &reference.name)?;
            out.end("Projects")?;
        }
        out.end("ItemGroup")?;
    }

    out.end("Project")?;
    out.finish()
}
