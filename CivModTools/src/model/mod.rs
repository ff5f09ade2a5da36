//! In-memory model shared by every descriptor format

pub mod issue;
pub mod project;
pub mod solution;

pub use issue::{IssueKind, ReadReport, Severity, ValidationIssue};
pub use project::{
    ActionKind, ActionSets, Association, AssociationType, EntryPoint, ModAction, ModFile,
    ModProject, RELOAD_AUDIO_SYSTEM_DEFAULT,
};
pub use solution::{DEFAULT_CONFIGURATION, ProjectReference, SolutionModel, UpsertOutcome};
