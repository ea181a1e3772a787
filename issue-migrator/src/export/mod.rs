//! Bitbucket export decoding.
//!
//! A Bitbucket issue export is a zip archive holding a single JSON data file
//! (`db-1.0.json`) alongside attachments. This module locates that file and
//! decodes it into [`BitbucketExport`].

mod error;
mod source_issue;

pub use error::ExportError;
pub use source_issue::{BitbucketExport, Component, ExportMeta, SourceIssue};

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use tracing::{debug, info};

/// Name of the data file inside a Bitbucket export archive.
pub const EXPORT_DATA_FILE: &str = "db-1.0.json";

/// Opens an export archive on disk and decodes it.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be opened, is not a zip
/// archive, lacks [`EXPORT_DATA_FILE`], or holds invalid JSON.
pub fn read_export(path: &Path) -> Result<BitbucketExport, ExportError> {
    info!(path = %path.display(), "Reading export archive");
    let file = File::open(path).map_err(|e| ExportError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;
    decode_archive(BufReader::new(file))
}

/// Decodes an export from any seekable zip stream.
///
/// # Errors
///
/// See [`read_export`].
pub fn decode_archive<R: Read + Seek>(reader: R) -> Result<BitbucketExport, ExportError> {
    let mut archive = zip::ZipArchive::new(reader)?;

    for name in archive.file_names().filter(|n| *n != EXPORT_DATA_FILE) {
        debug!(file = name, "Skipping archive entry");
    }

    let data = match archive.by_name(EXPORT_DATA_FILE) {
        Ok(data) => data,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(ExportError::MissingDataFile {
                name: EXPORT_DATA_FILE.to_string(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    let export: BitbucketExport = serde_json::from_reader(BufReader::new(data))?;
    info!(
        issues = export.issues.len(),
        components = export.components.len(),
        default_kind = %export.meta.default_kind,
        "Decoded export"
    );
    Ok(export)
}

/// Decodes the raw contents of an export data file.
///
/// # Errors
///
/// Returns [`ExportError::JsonError`] if the bytes are not a valid export.
pub fn decode_json(bytes: &[u8]) -> Result<BitbucketExport, ExportError> {
    Ok(serde_json::from_slice(bytes)?)
}
