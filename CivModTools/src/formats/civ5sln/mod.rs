//! ModBuddy solution (`.civ5sln`) format module

mod reader;
mod writer;

pub use reader::{parse_civ5sln, parse_civ5sln_report, read_civ5sln};
pub use writer::{serialize_civ5sln, write_civ5sln};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IssueKind, ProjectReference, SolutionModel, UpsertOutcome};
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Project DefaultTargets="Deploy" ToolsVersion="4.0" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <PropertyGroup>
    <Name>Community Pack</Name>
    <ProjectGuid>{0D66D522-B624-4BC5-ACFE-15A0C5B729F4}</ProjectGuid>
    <Configuration>Default</Configuration>
  </PropertyGroup>
  <ItemGroup>
    <Projects Include="Community Patch.civ5proj">
      <ProjectName>Community Patch</ProjectName>
    </Projects>
    <Projects Include="Extras/More Luxuries.civ5proj">
      <ProjectName>More Luxuries</ProjectName>
    </Projects>
    <Projects Include="Tweaks.civ5proj">
      <ProjectName>Tweaks &amp; Fixes</ProjectName>
    </Projects>
  </ItemGroup>
</Project>
"#;

    fn reference_blocks(xml: &str) -> Vec<&str> {
        xml.split("<Projects ").skip(1).collect()
    }

    #[test]
    fn test_parse_sample() {
        let solution = parse_civ5sln(SAMPLE).unwrap();
        assert_eq!(solution.name, "Community Pack");
        assert_eq!(solution.project_guid, "{0d66d522-b624-4bc5-acfe-15a0c5b729f4}");
        assert_eq!(solution.configuration.as_deref(), Some("Default"));

        let refs: Vec<(&str, &str)> = solution
            .projects()
            .map(|p| (p.path.as_str(), p.name.as_str()))
            .collect();
        assert_eq!(
            refs,
            [
                ("Community Patch.civ5proj", "Community Patch"),
                ("Extras\\More Luxuries.civ5proj", "More Luxuries"),
                ("Tweaks.civ5proj", "Tweaks & Fixes"),
            ]
        );
    }

    #[test]
    fn test_merge_updates_in_place() {
        let mut solution = parse_civ5sln(SAMPLE).unwrap();
        let before = serialize_civ5sln(&solution).unwrap();

        let outcome = solution.upsert_project(ProjectReference::new(
            "extras\\more luxuries.civ5proj",
            "More Luxuries II",
        ));
        assert_eq!(outcome, UpsertOutcome::Updated);

        let after = serialize_civ5sln(&solution).unwrap();
        let (before, after) = (reference_blocks(&before), reference_blocks(&after));
        assert_eq!(after.len(), 3);
        assert_eq!(after[0], before[0]);
        assert!(after[1].contains("<ProjectName>More Luxuries II</ProjectName>"));
        assert_eq!(after[2], before[2]);
    }

    #[test]
    fn test_round_trip_is_stable() {
        let solution = parse_civ5sln(SAMPLE).unwrap();
        let first = serialize_civ5sln(&solution).unwrap();
        assert_eq!(parse_civ5sln(&first).unwrap(), solution);
        assert_eq!(serialize_civ5sln(&parse_civ5sln(&first).unwrap()).unwrap(), first);
    }

    #[test]
    fn test_duplicate_reference_keeps_first() {
        let content = SAMPLE.replace(
            "<Projects Include=\"Tweaks.civ5proj\">",
            "<Projects Include=\"community patch.civ5proj\">",
        );
        let report = parse_civ5sln_report(&content).unwrap();
        assert_eq!(report.value.len(), 2);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].kind, IssueKind::Unsupported);
        assert_eq!(
            report.value.project("Community Patch.civ5proj").unwrap().name,
            "Community Patch"
        );
        assert!(parse_civ5sln(&content).is_ok());
    }

    #[test]
    fn test_missing_name_is_schema_error() {
        let content = SAMPLE.replace("<Name>Community Pack</Name>", "");
        assert!(parse_civ5sln(&content).is_err());
    }

    #[test]
    fn test_writer_canonicalizes_guid() {
        let solution = SolutionModel::new("Community Pack", "0D66D522-B624-4BC5-ACFE-15A0C5B729F4");
        let xml = serialize_civ5sln(&solution).unwrap();
        assert!(xml.contains("<ProjectGuid>{0d66d522-b624-4bc5-acfe-15a0c5b729f4}</ProjectGuid>"));
    }
}
