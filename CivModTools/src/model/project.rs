//! The unified in-memory mod model
//!
//! Both the manifest (`.modinfo`) and the project (`.civ5proj`) readers produce
//! a [`ModProject`]; every writer consumes one.

use std::fmt;

use indexmap::IndexMap;

/// Value `ReloadAudioSystem` takes when a manifest is built from a project file,
/// which has no field for it.
pub const RELOAD_AUDIO_SYSTEM_DEFAULT: bool = true;

/// A complete mod description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModProject {
    /// Project GUID. Only project files carry one.
    pub guid: Option<String>,
    /// The mod's stable identifier (manifest `id`, project `Guid`).
    pub mod_guid: String,
    pub name: String,
    pub version: String,
    /// Load-order numeral from a `(N) Name (v X).modinfo` file name.
    pub prefix: Option<String>,

    pub teaser: String,
    pub description: String,
    pub authors: String,
    pub homepage: Option<String>,
    pub stability: Option<String>,
    pub special_thanks: Option<String>,

    pub affects_saved_games: bool,
    pub supports_single_player: bool,
    pub supports_multiplayer: bool,
    pub supports_hot_seat: bool,
    pub supports_mac: bool,
    pub reload_unit_system: bool,
    pub reload_landmark_system: bool,
    pub reload_strategic_view_system: bool,
    /// Manifest only.
    pub reload_audio_system: bool,
    pub hide_setup_game: Option<bool>,

    pub min_compatible_save_version: String,

    pub dependencies: Vec<Association>,
    pub blockers: Vec<Association>,
    pub files: Vec<ModFile>,
    pub actions: ActionSets,
    pub entry_points: Vec<EntryPoint>,
}

impl ModProject {
    /// Append an action to `set`, creating the set after existing ones if needed.
    pub fn push_action(&mut self, set: impl Into<String>, action: ModAction) {
        self.actions.entry(set.into()).or_default().push(action);
    }

    /// The `Game` dependency, if any.
    #[must_use]
    pub fn game_dependency(&self) -> Option<&Association> {
        self.dependencies
            .iter()
            .find(|d| d.kind == AssociationType::Game)
    }

    /// Iterate every action with the name of its set, in document order.
    pub fn iter_actions(&self) -> impl Iterator<Item = (&str, &ModAction)> {
        self.actions
            .iter()
            .flat_map(|(set, actions)| actions.iter().map(move |a| (set.as_str(), a)))
    }

    /// Files imported into the game's virtual file system.
    pub fn imported_files(&self) -> impl Iterator<Item = &ModFile> {
        self.files.iter().filter(|f| f.import)
    }
}

/// Kind of a dependency or blocker association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssociationType {
    Game,
    Dlc,
    Mod,
}

impl AssociationType {
    /// Name used in both file formats.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Game => "Game",
            Self::Dlc => "Dlc",
            Self::Mod => "Mod",
        }
    }

    /// Parse a type name (case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "game" => Some(Self::Game),
            "dlc" => Some(Self::Dlc),
            "mod" => Some(Self::Mod),
            _ => None,
        }
    }
}

impl fmt::Display for AssociationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dependency or blocker record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    pub kind: AssociationType,
    /// Display name. For manifest blockers and mod dependencies this is the `title`.
    pub name: String,
    /// Target GUID. `Game` associations have none.
    pub id: Option<String>,
    pub min_version: Option<String>,
    pub max_version: Option<String>,
}

impl Association {
    /// An association of `kind` with no name, id or version bounds.
    #[must_use]
    pub fn new(kind: AssociationType) -> Self {
        Self {
            kind,
            name: String::new(),
            id: None,
            min_version: None,
            max_version: None,
        }
    }
}

/// A content file shipped with the mod.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModFile {
    /// Game path, backslash-separated.
    pub path: String,
    /// Whether the file is imported into the game's virtual file system.
    pub import: bool,
    /// Uppercase MD5 of the content. Required when `import` is set.
    pub md5: Option<String>,
    /// ModBuddy `SubType` hint (e.g. `Lua`). Project files only.
    pub sub_type: Option<String>,
}

/// Actions grouped by action-set name (e.g. `OnModActivated`).
pub type ActionSets = IndexMap<String, Vec<ModAction>>;

/// Kind of a mod action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionKind {
    UpdateDatabase,
    SetDllPath,
    /// Any other action element, kept verbatim.
    Other(String),
}

impl ActionKind {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::UpdateDatabase => "UpdateDatabase",
            Self::SetDllPath => "SetDllPath",
            Self::Other(name) => name,
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "UpdateDatabase" => Self::UpdateDatabase,
            "SetDllPath" => Self::SetDllPath,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single action inside an action set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModAction {
    pub kind: ActionKind,
    /// Game path the action operates on.
    pub path: String,
}

impl ModAction {
    #[must_use]
    pub fn new(kind: ActionKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

/// A mod entry point (UI add-in, custom map script, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    /// Entry point type, e.g. `InGameUIAddin`.
    pub kind: String,
    /// Game path of the entry file.
    pub file: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_action_preserves_set_order() {
        let mut project = ModProject::default();
        project.push_action("OnModActivated", ModAction::new(ActionKind::UpdateDatabase, "a.sql"));
        project.push_action("OnGameStart", ModAction::new(ActionKind::UpdateDatabase, "b.sql"));
        project.push_action("OnModActivated", ModAction::new(ActionKind::SetDllPath, "c.dll"));

        let sets: Vec<&str> = project.actions.keys().map(String::as_str).collect();
        assert_eq!(sets, ["OnModActivated", "OnGameStart"]);

        let flat: Vec<(&str, &str)> = project
            .iter_actions()
            .map(|(set, a)| (set, a.path.as_str()))
            .collect();
        assert_eq!(
            flat,
            [("OnModActivated", "a.sql"), ("OnModActivated", "c.dll"), ("OnGameStart", "b.sql")]
        );
    }

    #[test]
    fn test_association_type_parse() {
        assert_eq!(AssociationType::parse("Game"), Some(AssociationType::Game));
        assert_eq!(AssociationType::parse("dlc"), Some(AssociationType::Dlc));
        assert_eq!(AssociationType::parse("Map"), None);
    }

    #[test]
    fn test_action_kind_keeps_unknown_names() {
        assert_eq!(ActionKind::parse("SetDllPath"), ActionKind::SetDllPath);
        assert_eq!(
            ActionKind::parse("UpdateUserData").as_str(),
            "UpdateUserData"
        );
    }
}
