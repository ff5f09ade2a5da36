//! Solution model
//!
//! A solution groups project references. References are kept in an ordered
//! map keyed by normalized path, so updating one project never disturbs the
//! position or content of the others.

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::utils::{new_guid, normalize_game_path, path_key};

/// Configuration name ModBuddy gives new solutions.
pub const DEFAULT_CONFIGURATION: &str = "Default";

/// A project listed in a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectReference {
    /// Project file path relative to the solution, backslash-separated.
    pub path: String,
    /// Display name (`ProjectName`).
    pub name: String,
}

impl ProjectReference {
    #[must_use]
    pub fn new(path: impl AsRef<str>, name: impl Into<String>) -> Self {
        Self {
            path: normalize_game_path(path.as_ref()),
            name: name.into(),
        }
    }

    /// Key used to match references across loads.
    #[must_use]
    pub fn key(&self) -> String {
        path_key(&self.path)
    }
}

/// What [`SolutionModel::upsert_project`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A reference with the same path was replaced in place.
    Updated,
    /// The reference was appended.
    Added,
}

/// A `.civ5sln` solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionModel {
    pub name: String,
    pub project_guid: String,
    pub configuration: Option<String>,
    projects: IndexMap<String, ProjectReference>,
}

impl SolutionModel {
    /// Empty solution with the given identity.
    #[must_use]
    pub fn new(name: impl Into<String>, project_guid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project_guid: project_guid.into(),
            configuration: None,
            projects: IndexMap::new(),
        }
    }

    /// New solution holding a single project, with a fresh GUID and the
    /// default configuration.
    #[must_use]
    pub fn for_project(name: impl Into<String>, reference: ProjectReference) -> Self {
        let mut solution = Self::new(name, new_guid());
        solution.configuration = Some(DEFAULT_CONFIGURATION.to_string());
        solution.upsert_project(reference);
        solution
    }

    /// Add a reference while loading. Returns `false` and keeps the first
    /// entry when the path is already listed.
    pub fn push_loaded(&mut self, reference: ProjectReference) -> bool {
        match self.projects.entry(reference.key()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(reference);
                true
            }
        }
    }

    /// Insert or replace the reference for `reference.path`.
    ///
    /// An existing entry with the same path keeps its position; a new one is
    /// appended. Every other entry is left untouched.
    pub fn upsert_project(&mut self, reference: ProjectReference) -> UpsertOutcome {
        match self.projects.entry(reference.key()) {
            Entry::Occupied(mut slot) => {
                slot.insert(reference);
                UpsertOutcome::Updated
            }
            Entry::Vacant(slot) => {
                slot.insert(reference);
                UpsertOutcome::Added
            }
        }
    }

    /// Look up a reference by path (separator- and case-insensitive).
    #[must_use]
    pub fn project(&self, path: &str) -> Option<&ProjectReference> {
        self.projects.get(&path_key(path))
    }

    /// References in solution order.
    pub fn projects(&self) -> impl ExactSizeIterator<Item = &ProjectReference> {
        self.projects.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
