//! ModBuddy project (`.civ5proj`) format module

mod reader;
mod writer;

pub use reader::{parse_civ5proj, parse_civ5proj_report, read_civ5proj};
pub use writer::{MSBUILD_NAMESPACE, serialize_civ5proj, write_civ5proj};

pub(crate) use writer::project_root;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{
        ActionKind, Association, AssociationType, IssueKind, ModProject,
        RELOAD_AUDIO_SYSTEM_DEFAULT,
    };
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Project DefaultTargets="Deploy" ToolsVersion="4.0" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <PropertyGroup>
    <Configuration Condition=" '$(Configuration)' == '' ">Default</Configuration>
    <ProjectGuid>{7C3F4A55-3A8B-4F0E-9B7C-2D1E0F6A5B4C}</ProjectGuid>
    <Name>Community Patch</Name>
    <Guid>{D1B6328C-FF44-4B0D-AAD7-C657F83610CD}</Guid>
    <ModVersion>139</ModVersion>
    <Stability>Stable</Stability>
    <Teaser>Bug fixes</Teaser>
    <Description>Fixes bugs.</Description>
    <Authors>Community</Authors>
    <Homepage>https://example.org/cp?a=1&amp;b=2</Homepage>
    <AffectsSavedGames>true</AffectsSavedGames>
    <MinCompatibleSaveVersion>0</MinCompatibleSaveVersion>
    <SupportsSinglePlayer>true</SupportsSinglePlayer>
    <SupportsMultiplayer>true</SupportsMultiplayer>
    <SupportsHotSeat>true</SupportsHotSeat>
    <SupportsMac>false</SupportsMac>
    <ReloadUnitSystem>false</ReloadUnitSystem>
    <ReloadLandmarkSystem>true</ReloadLandmarkSystem>
    <ReloadStrategicViewSystem>true</ReloadStrategicViewSystem>
  </PropertyGroup>
  <PropertyGroup Condition=" '$(Configuration)' == 'Default' ">
    <OutputPath>.</OutputPath>
  </PropertyGroup>
  <ModDependencies>
    <Association>
      <Type>Game</Type>
      <Name>Civilization V</Name>
      <MinVersion>1.0.3.279</MinVersion>
      <MaxVersion>999.0</MaxVersion>
    </Association>
  </ModDependencies>
  <ModActions>
    <Action>
      <Set>OnModActivated</Set>
      <Type>UpdateDatabase</Type>
      <FileName>SQL/Core.sql</FileName>
    </Action>
  </ModActions>
  <ItemGroup>
    <Folder Include="SQL" />
    <Content Include="SQL/Core.sql">
      <SubType>Lua</SubType>
      <ImportIntoVFS>false</ImportIntoVFS>
    </Content>
    <Content Include="Art\Icon.dds">
      <ImportIntoVFS>True</ImportIntoVFS>
    </Content>
  </ItemGroup>
  <ModContent>
    <Content>
      <Type>InGameUIAddin</Type>
      <Name>Helpers</Name>
      <FileName>Lua\Helpers.lua</FileName>
    </Content>
  </ModContent>
  <Import Project="$(MSBuildLocalExtensionPath)Civ5Mod.targets" />
</Project>
"#;

    #[test]
    fn test_parse_sample() {
        let project = parse_civ5proj(SAMPLE).unwrap();

        assert_eq!(
            project.guid.as_deref(),
            Some("{7c3f4a55-3a8b-4f0e-9b7c-2d1e0f6a5b4c}")
        );
        assert_eq!(project.mod_guid, "{d1b6328c-ff44-4b0d-aad7-c657f83610cd}");
        assert_eq!(project.version, "139");
        assert_eq!(
            project.homepage.as_deref(),
            Some("https://example.org/cp?a=1&b=2")
        );
        assert_eq!(project.reload_audio_system, RELOAD_AUDIO_SYSTEM_DEFAULT);
        assert!(!project.reload_unit_system);
        assert_eq!(project.hide_setup_game, None);

        let game = project.game_dependency().unwrap();
        assert_eq!(game.kind, AssociationType::Game);
        assert_eq!(game.id, None);

        assert_eq!(project.files.len(), 2);
        assert_eq!(project.files[0].path, "SQL\\Core.sql");
        assert_eq!(project.files[0].sub_type.as_deref(), Some("Lua"));
        assert!(!project.files[0].import);
        assert!(project.files[1].import);

        let (set, action) = project.iter_actions().next().unwrap();
        assert_eq!(set, "OnModActivated");
        assert_eq!(action.kind, ActionKind::UpdateDatabase);
        assert_eq!(action.path, "SQL\\Core.sql");

        assert_eq!(project.entry_points[0].kind, "InGameUIAddin");
        assert_eq!(project.entry_points[0].description, None);
    }

    #[test]
    fn test_round_trip_is_stable() {
        let project = parse_civ5proj(SAMPLE).unwrap();
        let first = serialize_civ5proj(&project).unwrap();
        let reparsed = parse_civ5proj(&first).unwrap();
        assert_eq!(reparsed, project);
        assert_eq!(serialize_civ5proj(&reparsed).unwrap(), first);
    }

    #[test]
    fn test_written_layout() {
        let project = parse_civ5proj(SAMPLE).unwrap();
        let xml = serialize_civ5proj(&project).unwrap();

        assert!(xml.contains(
            "<Project DefaultTargets=\"Deploy\" ToolsVersion=\"4.0\" xmlns=\"http://schemas.microsoft.com/developer/msbuild/2003\">"
        ));
        assert!(xml.contains(
            "    <Configuration Condition=\" '$(Configuration)' == '' \">Default</Configuration>\n"
        ));
        assert!(xml.contains("    <AffectsSavedGames>true</AffectsSavedGames>\n"));
        assert!(xml.contains("    <SupportsMac>false</SupportsMac>\n"));
        assert!(xml.contains("<Content Include=\"Art\\Icon.dds\">"));
        assert!(xml.contains(
            "  <Import Project=\"$(MSBuildLocalExtensionPath)Civ5Mod.targets\" />\n"
        ));
        assert!(!xml.contains("ReloadAudioSystem"));
        assert!(!xml.contains("<ModBlockers"));
    }

    #[test]
    fn test_missing_project_guid() {
        let content = SAMPLE.replace(
            "<ProjectGuid>{7C3F4A55-3A8B-4F0E-9B7C-2D1E0F6A5B4C}</ProjectGuid>",
            "",
        );
        let report = parse_civ5proj_report(&content).unwrap();
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].field, "PropertyGroup/ProjectGuid");

        let project = report.value;
        assert!(matches!(
            serialize_civ5proj(&project),
            Err(Error::Schema { .. })
        ));
    }

    #[test]
    fn test_unknown_association_type() {
        let content = SAMPLE.replace("<Type>Game</Type>", "<Type>Expansion</Type>");
        let report = parse_civ5proj_report(&content).unwrap();
        assert_eq!(report.issues[0].kind, IssueKind::InvalidValue);
        assert_eq!(report.issues[0].field, "ModDependencies/Association[1]/Type");
        assert!(report.value.dependencies.is_empty());
    }

    #[test]
    fn test_writer_canonicalizes_guids() {
        let mut dependency = Association::new(AssociationType::Mod);
        dependency.name = "Community Patch".to_string();
        dependency.id = Some("D1B6328C-FF44-4B0D-AAD7-C657F83610CD".to_string());
        let project = ModProject {
            guid: Some("7C3F4A55-3A8B-4F0E-9B7C-2D1E0F6A5B4C".to_string()),
            mod_guid: "{0E3751A1-F840-4E1B-9706-519BF484E59D}".to_string(),
            version: "1".to_string(),
            name: "Extras".to_string(),
            dependencies: vec![dependency],
            ..ModProject::default()
        };

        let xml = serialize_civ5proj(&project).unwrap();
        assert!(xml.contains("<ProjectGuid>{7c3f4a55-3a8b-4f0e-9b7c-2d1e0f6a5b4c}</ProjectGuid>"));
        assert!(xml.contains("<Guid>{0e3751a1-f840-4e1b-9706-519bf484e59d}</Guid>"));
        assert!(xml.contains("<Id>{d1b6328c-ff44-4b0d-aad7-c657f83610cd}</Id>"));
    }
}
