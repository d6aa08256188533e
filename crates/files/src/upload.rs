//! Uploaded file payloads and filename handling.
//!
//! An upload arrives with a client-declared filename that may contain
//! directory components (browsers and HTTP clients differ here, and Windows
//! clients send backslash-separated paths). The declared name is kept
//! verbatim as the upload's source, while the display name is derived by
//! stripping everything up to the last path separator.

use crate::FilesError;
use dcr_types::NonEmptyText;
use std::fs;
use std::path::Path;

/// A single uploaded file: payload bytes plus naming.
///
/// The *original filename* is whatever the client declared, preserved
/// verbatim. The *name* is the sanitized display form derived from it and
/// is guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    name: NonEmptyText,
    original_filename: String,
    payload: Vec<u8>,
}

impl UploadedFile {
    /// Creates an `UploadedFile` from a declared filename and payload.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::InvalidFilename` if the declared filename is
    /// empty or reduces to nothing once path components are stripped.
    pub fn new(original_filename: impl Into<String>, payload: Vec<u8>) -> Result<Self, FilesError> {
        let original_filename = original_filename.into();
        let name = sanitize_filename(&original_filename)?;
        Ok(Self {
            name,
            original_filename,
            payload,
        })
    }

    /// Reads an `UploadedFile` from the filesystem.
    ///
    /// The file's contents become the payload and its path (as given)
    /// becomes the declared filename.
    ///
    /// # Errors
    ///
    /// Returns `FilesError::Io` if the file cannot be read, or
    /// `FilesError::InvalidFilename` if the path has no usable filename
    /// component.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FilesError> {
        let path = path.as_ref();
        let payload = fs::read(path)?;
        Self::new(path.to_string_lossy().into_owned(), payload)
    }

    /// Sanitized display name (no directory components).
    pub fn name(&self) -> &NonEmptyText {
        &self.name
    }

    /// The filename exactly as the client declared it.
    pub fn original_filename(&self) -> &str {
        &self.original_filename
    }

    /// The uploaded bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Size of the payload in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.payload.len() as u64
    }
}

/// Derives a display name from a declared filename.
///
/// Takes the portion after the last `/` or `\` separator and trims
/// surrounding whitespace. Declared names consisting only of separators or
/// whitespace are rejected rather than silently renamed.
fn sanitize_filename(declared: &str) -> Result<NonEmptyText, FilesError> {
    let last = declared
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(declared);
    NonEmptyText::new(last).map_err(|_| FilesError::InvalidFilename(declared.to_owned()))
}
