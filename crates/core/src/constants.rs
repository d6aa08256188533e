//! Constants used throughout the DCR submission core.
//!
//! This module contains the well-known names shared between the patch
//! classifier, the ingestion workflow and the response-path builders, to
//! ensure consistency across the codebase and make maintenance easier.

/// Name of the bundle that holds end-user-visible files for a submission.
pub const CONTENT_BUNDLE_NAME: &str = "ORIGINAL";

/// Form name of the input section governing per-file metadata.
pub const UPLOAD_METADATA_SECTION: &str = "bitstream-metadata";

/// Substring marking a patch path as a per-file metadata edit.
pub const METADATA_PATH_MARKER: &str = "metadata";

/// Substring marking a patch path as an access-condition edit.
pub const ACCESS_CONDITIONS_PATH_MARKER: &str = "accessConditions";

/// Namespace prefix carried by qualified metadata field segments.
pub const METADATA_FIELD_MARKER: &str = "dc.";

/// First segment of every client-addressable section path.
pub const OPERATION_PATH_SECTIONS: &str = "sections";
