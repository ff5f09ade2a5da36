//! Solution (`.civ5sln`) reading

use std::path::Path;

use crate::error::{Error, Result};
use crate::formats::xml::{FieldReader, XmlElement, non_empty, parse_document, read_text_file};
use crate::model::{IssueKind, ProjectReference, ReadReport, SolutionModel, ValidationIssue};

/// Read a solution from disk
///
/// # Errors
/// Returns an error if the file cannot be read, is not well-formed XML, or a
/// required field is missing or malformed.
pub fn read_civ5sln<P: AsRef<Path>>(path: P) -> Result<SolutionModel> {
    let content = read_text_file(path.as_ref())?;
    parse_civ5sln(&content)
}

/// Parse a solution, failing on the first missing or malformed field.
///
/// # Errors
/// Returns [`Error::Schema`] naming the offending field, or an XML error.
pub fn parse_civ5sln(content: &str) -> Result<SolutionModel> {
    parse_civ5sln_report(content)?.into_strict()
}

/// Parse a solution leniently.
///
/// Project references are kept in file order. A reference repeating an
/// earlier path is dropped with a warning.
///
/// # Errors
/// Returns an error only if the XML is malformed or the root is not `<Project>`.
pub fn parse_civ5sln_report(content: &str) -> Result<ReadReport<SolutionModel>> {
    let root = parse_document(content)?;
    if root.name != "Project" {
        return Err(Error::schema(
            "Project",
            format!("expected root element <Project>, found <{}>", root.name),
        ));
    }

    let mut fields = FieldReader::new();
    let empty = XmlElement::default();
    let props = root
        .children_named("PropertyGroup")
        .find(|group| group.child("Name").is_some())
        .or_else(|| root.child("PropertyGroup"))
        .unwrap_or(&empty);

    let name = fields.text(props.child_text("Name"), "PropertyGroup/Name");
    let project_guid = fields.guid(props.child_text("ProjectGuid"), "PropertyGroup/ProjectGuid");
    let mut solution = SolutionModel::new(name, project_guid);
    solution.configuration = non_empty(props.child_text("Configuration"));

    let mut index = 0;
    for group in root.children_named("ItemGroup") {
        for element in group.children_named("Projects") {
            index += 1;
            let base = format!("ItemGroup/Projects[{index}]");
            let path = fields.text(element.attr("Include"), &format!("{base}@Include"));
            let display = element
                .child_text("ProjectName")
                .or_else(|| element.attr("ProjectName"));
            let display = fields.text(display, &format!("{base}/ProjectName"));

            if path.is_empty() {
                continue;
            }
            let reference = ProjectReference::new(&path, display);
            if !solution.push_loaded(reference) {
                tracing::warn!("Duplicate solution entry for {}, keeping the first", path);
                fields.push(ValidationIssue::new(
                    IssueKind::Unsupported,
                    base,
                    format!("duplicate reference to {path} ignored"),
                ));
            }
        }
    }

    Ok(fields.finish(solution))
}
