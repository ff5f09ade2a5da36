//! Validation issues
//!
//! Readers and the validator report data problems as [`ValidationIssue`]s
//! instead of failing, so one pass can surface every problem in a file.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// Category of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IssueKind {
    /// A required element or attribute is absent or empty.
    MissingField,
    /// A value has the wrong shape (GUID, boolean, number, ...).
    InvalidValue,
    /// A content hash is missing or malformed.
    InvalidHash,
    /// The value is understood but not supported by the game tools.
    Unsupported,
    /// A reference points at a file that does not exist.
    DanglingReference,
}

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Warning,
    Error,
}

impl IssueKind {
    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            Self::Unsupported | Self::DanglingReference => Severity::Warning,
            Self::MissingField | Self::InvalidValue | Self::InvalidHash => Severity::Error,
        }
    }
}

/// A single problem found in a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    /// Element or attribute path, e.g. `Properties/Teaser` or `Files/File[3]@md5`.
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(kind: IssueKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(IssueKind::MissingField, field, "required field is missing")
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity() {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{level}: {}: {}", self.field, self.message)
    }
}

/// A leniently parsed value together with every problem found while reading it.
#[derive(Debug, Clone)]
pub struct ReadReport<T> {
    pub value: T,
    pub issues: Vec<ValidationIssue>,
}

impl<T> ReadReport<T> {
    /// The value, or a schema error for the first error-severity issue.
    pub fn into_strict(self) -> Result<T> {
        match self.issues.into_iter().find(ValidationIssue::is_error) {
            Some(issue) => Err(Error::schema(issue.field, issue.message)),
            None => Ok(self.value),
        }
    }

    /// Like [`ReadReport::into_strict`], but ignores issues `tolerate` accepts.
    pub fn into_strict_except(self, tolerate: impl Fn(&ValidationIssue) -> bool) -> Result<T> {
        match self
            .issues
            .into_iter()
            .find(|issue| issue.is_error() && !tolerate(issue))
        {
            Some(issue) => Err(Error::schema(issue.field, issue.message)),
            None => Ok(self.value),
        }
    }
}
