//! Error types for the export pipeline
//!
//! Errors fall into two classes. Fatal errors abort the whole batch before any
//! file is written; per-file errors are reported against a single slug and the
//! rest of the batch carries on.

use std::path::PathBuf;
use thiserror::Error;


/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// The unified error type for the exporter
#[derive(Error, Debug)]
pub enum ExportError {
    /// The source document could not be read
    #[error("Error reading input file {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source document is not valid JSON
    #[error("Error parsing JSON data: {0}")]
    ParseInput(#[from] serde_json::Error),

    /// The source document parsed but cannot be iterated as records
    #[error("Error parsing JSON data: expected an array of records, found {found}")]
    NotAnArray { found: &'static str },

    /// The output directory could not be created
    #[error("Error creating output directory {}: {source}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A single article could not be written
    #[error("Error writing file for slug \"{slug}\" ({}): {source}", path.display())]
    WriteFile {
        slug: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The slug would place the file outside the output directory
    #[error("Error writing file for slug \"{slug}\": slug is not a plain file name")]
    UnsafeSlug { slug: String },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExportError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error aborts the whole batch
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::WriteFile { .. } | Self::UnsafeSlug { .. })
    }

    /// The slug a per-file error is attributed to
    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::WriteFile { slug, .. } | Self::UnsafeSlug { slug } => Some(slug),
            _ => None,
        }
    }

    /// Process exit code used by strict mode
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::ReadInput { .. } => 3,
            Self::ParseInput(_) | Self::NotAnArray { .. } => 4,
            Self::CreateOutputDir { .. } | Self::WriteFile { .. } | Self::UnsafeSlug { .. } => 5,
        }
    }
}
