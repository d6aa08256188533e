//! DCR uploaded-file handling
//!
//! This crate covers the byte-level concerns of a submission upload before
//! any repository object exists for it:
//!
//! - [`UploadedFile`] carries the payload together with the filename the
//!   client declared and a sanitized display name derived from it
//! - [`format`] sniffs a media format from payload bytes, with an extension
//!   fallback for text formats that carry no magic bytes
//! - [`checksum`] produces the hex digests exposed alongside stored files
//!
//! ## Design Principles
//!
//! - The declared filename is preserved verbatim as the upload's *source*;
//!   only the derived display name is transformed
//! - Format detection is best-effort and never fails; unknown content maps
//!   to a well-defined fallback format
//! - Nothing here touches repository state; attaching an upload to an item
//!   is the submission step's job
//!
//! ## Example Usage
//!
//! ```
//! use dcr_files::{format, UploadedFile};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = UploadedFile::new("reports/2024/final.pdf", b"%PDF-1.7".to_vec())?;
//! assert_eq!(file.name().as_str(), "final.pdf");
//! assert_eq!(file.original_filename(), "reports/2024/final.pdf");
//!
//! let detected = format::detect(file.payload(), Some(file.original_filename()));
//! assert_eq!(detected.mime_type(), "application/pdf");
//! # Ok(())
//! # }
//! ```

pub mod checksum;
pub mod format;
mod upload;

pub use format::FileFormat;
pub use upload::UploadedFile;

/// Errors that can occur while handling an uploaded file
#[derive(Debug, thiserror::Error)]
pub enum FilesError {
    /// The declared filename was empty or reduced to nothing after
    /// stripping path components
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
