//! Media format detection for uploaded payloads.
//!
//! Detection is content-first: magic bytes are matched via `infer`, which
//! covers binary formats (images, archives, PDF, office documents). Text
//! formats carry no magic bytes, so a small extension table covers the
//! common ones. Anything else maps to [`FileFormat::unknown`].
//!
//! Detection is best-effort and should not be considered authoritative; a
//! repository may re-identify formats later with richer heuristics.

use serde::{Deserialize, Serialize};

/// MIME type assigned when no format can be determined.
pub const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

/// Extension fallbacks for text formats `infer` cannot sniff.
const TEXT_FORMATS: &[(&str, &str, &str)] = &[
    ("txt", "text/plain", "Plain text"),
    ("md", "text/markdown", "Markdown"),
    ("csv", "text/csv", "Comma-separated values"),
    ("tsv", "text/tab-separated-values", "Tab-separated values"),
    ("html", "text/html", "HTML"),
    ("css", "text/css", "CSS"),
    ("xml", "application/xml", "XML"),
    ("json", "application/json", "JSON"),
    ("yaml", "application/yaml", "YAML"),
    ("yml", "application/yaml", "YAML"),
];

/// An identified media format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFormat {
    mime_type: String,
    description: String,
    extension: Option<String>,
}

impl FileFormat {
    /// Creates a format from its parts.
    pub fn new(
        mime_type: impl Into<String>,
        description: impl Into<String>,
        extension: Option<String>,
    ) -> Self {
        Self {
            mime_type: mime_type.into(),
            description: description.into(),
            extension,
        }
    }

    /// The fallback format for unidentifiable content.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_MIME_TYPE, "Unknown", None)
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Whether this is the unidentified-content fallback.
    pub fn is_unknown(&self) -> bool {
        self.mime_type == UNKNOWN_MIME_TYPE
    }
}

/// Identifies the format of a payload.
///
/// Magic-byte sniffing runs first; if the content is not recognised, the
/// declared filename's extension is matched against the text-format table.
/// Never fails: unidentifiable content yields [`FileFormat::unknown`].
pub fn detect(payload: &[u8], filename: Option<&str>) -> FileFormat {
    if let Some(kind) = infer::get(payload) {
        return FileFormat::new(
            kind.mime_type(),
            kind.mime_type(),
            Some(kind.extension().to_owned()),
        );
    }

    if let Some(ext) = filename.and_then(extension_of) {
        let ext = ext.to_ascii_lowercase();
        for (candidate, mime, description) in TEXT_FORMATS {
            if *candidate == ext {
                return FileFormat::new(*mime, *description, Some(ext));
            }
        }
    }

    FileFormat::unknown()
}

/// Extension of a declared filename, ignoring directory components.
fn extension_of(filename: &str) -> Option<&str> {
    let basename = filename.rsplit(['/', '\\']).next()?;
    let (stem, ext) = basename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext)
}
