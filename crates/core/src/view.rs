//! Read-only projection of a submission's uploaded files.
//!
//! Builds the per-bitstream view objects a client renders for this step.
//! The traversal walks every content bundle of the item in bundle order,
//! then bitstream order within each bundle; nothing here mutates the
//! submission.

use crate::config::StepConfig;
use crate::error::BoxError;
use crate::submission::Bitstream;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Digest reported alongside a stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecksumView {
    pub algorithm: String,
    pub value: String,
}

/// Client-facing view of one uploaded bitstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BitstreamView {
    pub id: Uuid,
    pub name: Option<String>,
    pub source: Option<String>,
    pub size_bytes: u64,
    pub mime_type: Option<String>,
    pub checksum: ChecksumView,
    pub uploaded_at: DateTime<Utc>,
}

/// The step's read payload: every uploaded file, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataUpload {
    pub files: Vec<BitstreamView>,
}

/// Builds the client-facing view of a single bitstream.
pub trait UploadViewBuilder {
    /// Produces the view object for one bitstream.
    ///
    /// Failures propagate unchanged out of the projection.
    fn build_upload_view(
        &self,
        config: &StepConfig,
        bitstream: &Bitstream,
    ) -> Result<BitstreamView, BoxError>;
}

/// Default view builder: reports payload size, sniffed MIME type and a
/// SHA-256 content digest.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256ViewBuilder;

impl UploadViewBuilder for Sha256ViewBuilder {
    fn build_upload_view(
        &self,
        _config: &StepConfig,
        bitstream: &Bitstream,
    ) -> Result<BitstreamView, BoxError> {
        Ok(BitstreamView {
            id: bitstream.id(),
            name: bitstream.name().map(str::to_owned),
            source: bitstream.source().map(str::to_owned),
            size_bytes: bitstream.size_bytes(),
            mime_type: bitstream.format().map(|f| f.mime_type().to_owned()),
            checksum: ChecksumView {
                algorithm: dcr_files::checksum::SHA256_ALGORITHM.to_owned(),
                value: dcr_files::checksum::sha256_hex(bitstream.payload()),
            },
            uploaded_at: bitstream.created_at(),
        })
    }
}
