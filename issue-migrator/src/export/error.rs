//! Export decoding error types.

use thiserror::Error;

/// Errors that can occur while reading a Bitbucket export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to open the archive file.
    #[error("Failed to open '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a readable zip archive.
    #[error("Failed to read archive: {0}")]
    ArchiveError(#[from] zip::result::ZipError),

    /// The archive does not contain the export data file.
    #[error("Archive does not contain '{name}'")]
    MissingDataFile { name: String },

    /// The data file is not a valid export.
    #[error("Failed to decode export JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}
