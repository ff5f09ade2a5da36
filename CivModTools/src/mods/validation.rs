//! Descriptor validation
//!
//! Validation never fails on bad data: every problem becomes a
//! [`ValidationIssue`] so a single run reports all of them. Errors are
//! reserved for files that cannot be read or parsed as XML at all.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::formats::civ5proj::parse_civ5proj_report;
use crate::formats::civ5sln::parse_civ5sln_report;
use crate::formats::fields::FieldPaths;
use crate::formats::modinfo::parse_modinfo_report;
use crate::formats::xml::read_text_file;
use crate::formats::ModFormat;
use crate::model::{
    ActionKind, AssociationType, IssueKind, ModProject, Severity, SolutionModel, ValidationIssue,
};
use crate::utils::{game_to_system_path, is_guid, is_md5_hash, path_key};

/// Result of validating a descriptor file
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// The validated file
    pub path: PathBuf,
    /// Format detected from the extension
    pub format: ModFormat,
    /// Every problem found, reader issues first
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Whether no error-severity issue was found. Warnings are allowed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity() == severity)
            .count()
    }
}

/// Check a mod model against the rules of `format` (manifest or project).
#[must_use]
pub fn validate_project(project: &ModProject, format: ModFormat) -> Vec<ValidationIssue> {
    let paths = FieldPaths::new(format);
    let manifest = format == ModFormat::Modinfo;
    let mut issues = Vec::new();

    // Identity
    check_guid(&mut issues, Some(project.mod_guid.as_str()), &paths.mod_guid());
    if !manifest {
        check_guid(
            &mut issues,
            project.guid.as_deref(),
            &paths.property("ProjectGuid"),
        );
    }
    require(&mut issues, &project.version, &paths.mod_version());

    // Descriptive properties
    for (value, name) in [
        (&project.name, "Name"),
        (&project.teaser, "Teaser"),
        (&project.description, "Description"),
        (&project.authors, "Authors"),
    ] {
        require(&mut issues, value, &paths.property(name));
    }

    let save_version = &project.min_compatible_save_version;
    let field = paths.property("MinCompatibleSaveVersion");
    if save_version.trim().is_empty() {
        issues.push(ValidationIssue::missing(field));
    } else if !save_version.trim().bytes().all(|b| b.is_ascii_digit()) {
        issues.push(ValidationIssue::new(
            IssueKind::InvalidValue,
            field,
            format!("'{save_version}' is not an integer"),
        ));
    }

    // Associations
    if project.game_dependency().is_none() {
        issues.push(ValidationIssue::new(
            IssueKind::MissingField,
            paths.game_dependency(),
            "no Game dependency",
        ));
    }
    for (i, dep) in project.dependencies.iter().enumerate() {
        if dep.kind != AssociationType::Game {
            let base = paths.dependency(dep.kind, i + 1);
            check_guid(&mut issues, dep.id.as_deref(), &paths.association_id(&base));
        }
    }
    for (i, block) in project.blockers.iter().enumerate() {
        let base = paths.blocker(i + 1);
        check_guid(&mut issues, block.id.as_deref(), &paths.association_id(&base));
    }

    // Files
    let mut seen = HashSet::new();
    for (i, file) in project.files.iter().enumerate() {
        let base = paths.file(i + 1);
        if file.path.trim().is_empty() {
            issues.push(ValidationIssue::missing(paths.file_path(&base)));
        } else if !seen.insert(path_key(&file.path)) {
            issues.push(ValidationIssue::new(
                IssueKind::InvalidValue,
                paths.file_path(&base),
                format!("duplicate file entry {}", file.path),
            ));
        }
        if manifest {
            check_file_hash(&mut issues, file.import, file.md5.as_deref(), &paths.file_md5(&base));
        }
    }

    // Actions
    let mut global = 0;
    for (set, actions) in &project.actions {
        for (i, action) in actions.iter().enumerate() {
            global += 1;
            let base = paths.action(set, if manifest { i + 1 } else { global });
            if action.path.trim().is_empty() {
                issues.push(ValidationIssue::missing(paths.action_path(&base)));
            }
            if let ActionKind::Other(ref name) = action.kind {
                issues.push(ValidationIssue::new(
                    IssueKind::Unsupported,
                    base,
                    format!("unknown action '{name}'"),
                ));
            }
        }
    }

    // Entry points
    for (i, entry) in project.entry_points.iter().enumerate() {
        let base = paths.entry_point(i + 1);
        require(&mut issues, &entry.kind, &paths.entry_point_type(&base));
        require(&mut issues, &entry.file, &paths.entry_point_file(&base));
    }

    issues
}

/// Check a solution model.
#[must_use]
pub fn validate_solution(solution: &SolutionModel) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    require(&mut issues, &solution.name, "PropertyGroup/Name");
    check_guid(
        &mut issues,
        Some(solution.project_guid.as_str()),
        "PropertyGroup/ProjectGuid",
    );

    if solution.is_empty() {
        issues.push(ValidationIssue::new(
            IssueKind::MissingField,
            "ItemGroup/Projects",
            "solution lists no projects",
        ));
    }
    for (i, reference) in solution.projects().enumerate() {
        require(
            &mut issues,
            &reference.name,
            &format!("ItemGroup/Projects[{}]/ProjectName", i + 1),
        );
    }
    issues
}

/// Validate a descriptor file, detecting its format from the extension.
///
/// Reader issues and model issues are merged, keeping the first issue for
/// each field. Solution references to missing project files are reported as
/// warnings.
///
/// # Errors
/// Returns an error if the extension is not supported or the file cannot be
/// read or parsed as XML.
pub fn validate_file(path: &Path) -> Result<ValidationReport> {
    let format = ModFormat::from_path(path)?;
    let content = read_text_file(path)?;

    let issues = match format {
        ModFormat::Modinfo => {
            let report = parse_modinfo_report(&content)?;
            let model_issues = validate_project(&report.value, format);
            merge_issues(report.issues, model_issues)
        }
        ModFormat::Civ5Proj => {
            let report = parse_civ5proj_report(&content)?;
            let model_issues = validate_project(&report.value, format);
            merge_issues(report.issues, model_issues)
        }
        ModFormat::Civ5Sln => {
            let report = parse_civ5sln_report(&content)?;
            let mut model_issues = validate_solution(&report.value);
            let root = path.parent().unwrap_or_else(|| Path::new("."));
            for (i, reference) in report.value.projects().enumerate() {
                if !game_to_system_path(root, &reference.path).is_file() {
                    model_issues.push(ValidationIssue::new(
                        IssueKind::DanglingReference,
                        format!("ItemGroup/Projects[{}]@Include", i + 1),
                        format!("project file {} not found", reference.path),
                    ));
                }
            }
            merge_issues(report.issues, model_issues)
        }
    };

    tracing::info!(
        "Validated {:?}: {} issue(s)",
        path,
        issues.len()
    );
    Ok(ValidationReport {
        path: path.to_path_buf(),
        format,
        issues,
    })
}

fn merge_issues(
    reader: Vec<ValidationIssue>,
    model: Vec<ValidationIssue>,
) -> Vec<ValidationIssue> {
    let mut seen = HashSet::new();
    reader
        .into_iter()
        .chain(model)
        .filter(|issue| seen.insert(issue.field.clone()))
        .collect()
}

fn require(issues: &mut Vec<ValidationIssue>, value: &str, field: &str) {
    if value.trim().is_empty() {
        issues.push(ValidationIssue::missing(field));
    }
}

fn check_guid(issues: &mut Vec<ValidationIssue>, value: Option<&str>, field: &str) {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => issues.push(ValidationIssue::missing(field)),
        Some(guid) if !is_guid(guid) => issues.push(ValidationIssue::new(
            IssueKind::InvalidValue,
            field,
            format!("'{guid}' is not a GUID"),
        )),
        Some(_) => {}
    }
}

fn check_file_hash(issues: &mut Vec<ValidationIssue>, import: bool, md5: Option<&str>, field: &str) {
    match (import, md5) {
        (true, None) => issues.push(ValidationIssue::new(
            IssueKind::InvalidHash,
            field,
            "imported file has no md5",
        )),
        (true, Some(hash)) if !is_md5_hash(hash) || hash.bytes().any(|b| b.is_ascii_lowercase()) => {
            issues.push(ValidationIssue::new(
                IssueKind::InvalidHash,
                field,
                format!("'{hash}' is not an uppercase MD5 hash"),
            ));
        }
        (false, Some(_)) => issues.push(ValidationIssue::new(
            IssueKind::InvalidHash,
            field,
            "non-imported file carries an md5",
        )),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Association, ModAction, ModFile};

    fn valid_project() -> ModProject {
        ModProject {
            guid: Some("{7c3f4a55-3a8b-4f0e-9b7c-2d1e0f6a5b4c}".to_string()),
            mod_guid: "{d1b6328c-ff44-4b0d-aad7-c657f83610cd}".to_string(),
            name: "Community Patch".to_string(),
            version: "139".to_string(),
            teaser: "Fixes".to_string(),
            description: "Fixes bugs.".to_string(),
            authors: "Community".to_string(),
            min_compatible_save_version: "0".to_string(),
            dependencies: vec![Association::new(AssociationType::Game)],
            files: vec![ModFile {
                path: "Lua\\a.lua".to_string(),
                import: true,
                md5: Some("098F6BCD4621D373CADE4E832627B4F6".to_string()),
                sub_type: None,
            }],
            ..ModProject::default()
        }
    }

    fn fields(issues: &[ValidationIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.field.as_str()).collect()
    }

    #[test]
    fn test_valid_project_has_no_issues() {
        let project = valid_project();
        assert!(validate_project(&project, ModFormat::Modinfo).is_empty());
        assert!(validate_project(&project, ModFormat::Civ5Proj).is_empty());
    }

    #[test]
    fn test_reports_every_problem() {
        let mut project = valid_project();
        project.teaser.clear();
        project.mod_guid = "not-a-guid".to_string();
        project.min_compatible_save_version = "1.5".to_string();
        project.dependencies.clear();
        project.files[0].md5 = Some("098f6bcd4621d373cade4e832627b4f6".to_string());
        project.files.push(ModFile {
            path: "lua/A.lua".to_string(),
            import: false,
            md5: Some("098F6BCD4621D373CADE4E832627B4F6".to_string()),
            sub_type: None,
        });
        project.push_action(
            "OnModActivated",
            ModAction::new(ActionKind::Other("UpdateUserData".to_string()), "a.sql"),
        );

        let issues = validate_project(&project, ModFormat::Modinfo);
        assert_eq!(
            fields(&issues),
            [
                "Mod@id",
                "Properties/Teaser",
                "Properties/MinCompatibleSaveVersion",
                "Dependencies/Game",
                "Files/File[1]@md5",
                "Files/File[2]",
                "Files/File[2]@md5",
                "Actions/OnModActivated[1]",
            ]
        );
        let unsupported = issues.last().unwrap();
        assert_eq!(unsupported.kind, IssueKind::Unsupported);
        assert_eq!(unsupported.severity(), Severity::Warning);
    }

    #[test]
    fn test_project_format_ignores_hashes_and_needs_project_guid() {
        let mut project = valid_project();
        project.files[0].md5 = None;
        project.guid = None;
        let issues = validate_project(&project, ModFormat::Civ5Proj);
        assert_eq!(fields(&issues), ["PropertyGroup/ProjectGuid"]);
    }

    #[test]
    fn test_validate_solution() {
        let solution = SolutionModel::new("", "{0d66d522-b624-4bc5-acfe-15a0c5b729f4}");
        let issues = validate_solution(&solution);
        assert_eq!(fields(&issues), ["PropertyGroup/Name", "ItemGroup/Projects"]);
    }

    #[test]
    fn test_merge_keeps_first_issue_per_field() {
        let merged = merge_issues(
            vec![ValidationIssue::missing("Properties/Teaser")],
            vec![
                ValidationIssue::missing("Properties/Teaser"),
                ValidationIssue::missing("Properties/Authors"),
            ],
        );
        assert_eq!(fields(&merged), ["Properties/Teaser", "Properties/Authors"]);
    }
}
