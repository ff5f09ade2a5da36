//! Error types for `CivModTools`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `CivModTools` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Naming Errors ====================
    /// A file name does not follow the expected naming pattern.
    #[error("invalid file name '{name}': {reason}")]
    NameFormat {
        /// The offending file name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    // ==================== Schema Errors ====================
    /// A required field is missing or malformed while reading a descriptor.
    #[error("schema error in {field}: {message}")]
    Schema {
        /// Element or attribute path of the field (e.g. `Properties/Teaser`).
        field: String,
        /// Description of the problem.
        message: String,
    },

    /// The file extension does not name a supported descriptor format.
    #[error("unsupported file type: {path}")]
    UnsupportedFormat {
        /// The path that could not be classified.
        path: PathBuf,
    },

    // ==================== Content Errors ====================
    /// One or more imported content files could not be hashed.
    #[error("{} content file(s) not found: {}", .paths.len(), .paths.join(", "))]
    ContentFilesNotFound {
        /// Game paths of every file that could not be resolved.
        paths: Vec<String>,
    },

    // ==================== Parsing Errors ====================
    /// XML parsing error.
    #[error("XML parse error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// XML attribute error.
    #[error("XML attribute error: {0}")]
    XmlAttrError(String),

    /// UTF-8 conversion error.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    // ==================== File System Errors ====================
    /// Invalid file path.
    #[error("invalid path: {0}")]
    InvalidPath(String),
}

impl Error {
    /// Shorthand for a [`Error::Schema`] error.
    pub(crate) fn schema(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Schema {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`Error::NameFormat`] error.
    pub(crate) fn name_format(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::NameFormat {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

// Add conversion from quick_xml::events::attributes::AttrError
impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttrError(err.to_string())
    }
}

/// A specialized Result type for `CivModTools` operations.
pub type Result<T> = std::result::Result<T, Error>;
