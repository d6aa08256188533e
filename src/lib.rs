//! # DCR Submit
//!
//! Composition crate for the DCR submission upload step: re-exports the
//! public surface of the member crates and wires the default collaborators
//! together.
//!
//! The step itself lives in `dcr-core`; byte-level upload handling in
//! `dcr_files`; validated text types in `dcr-types`. An outer request
//! layer supplies the transport (HTTP routing, authentication,
//! serialization) and the patch handlers, then drives [`UploadStep`]'s
//! three operations.
//!
//! ## Example Usage
//!
//! ```
//! use dcr_submit::{
//!     in_memory_upload_step, Context, HandlerRegistry, InProgressSubmission, StepConfig,
//!     UploadedFile, YamlSchemaRegistry,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schemas = YamlSchemaRegistry::from_str("bitstream-metadata:\n  - dc.title\n")?;
//! let step = in_memory_upload_step(Box::new(schemas), HandlerRegistry::new());
//!
//! let config = StepConfig::new("upload")?;
//! let mut submission = InProgressSubmission::default();
//! let file = UploadedFile::new("hello.txt", b"hi there".to_vec())?;
//!
//! assert!(step
//!     .upload(&Context::anonymous(), &config, &mut submission, &file)
//!     .is_none());
//! let data = step.get_data(&submission, &config)?;
//! assert_eq!(data.files.len(), 1);
//! # Ok(())
//! # }
//! ```

pub use dcr_core::{
    classify, Bitstream, BitstreamIngester, BitstreamKey, BitstreamView, BoxError, Bundle,
    ChecksumView, ContentError, ContentService, Context, DataUpload, FormatDetector,
    HandlerRegistry, InMemoryContentService, InProgressSubmission, InputSchema, Item,
    OperationCategory, PatchHandler, PatchOperation, Request, SchemaRegistry, Sha256ViewBuilder,
    SniffingFormatDetector, StepConfig, StepError, StepResult, UploadError, UploadStep,
    UploadViewBuilder, Verb, YamlSchemaRegistry,
};
pub use dcr_core::constants;
pub use dcr_files::{FileFormat, FilesError, UploadedFile};
pub use dcr_types::{MetadataFieldId, NonEmptyText, TextError};

/// Builds an upload step from a content service and schema registry,
/// wiring the default format detector and view builder.
pub fn default_upload_step(
    content: Box<dyn ContentService>,
    schemas: Box<dyn SchemaRegistry>,
    handlers: HandlerRegistry,
) -> UploadStep {
    UploadStep::new(
        BitstreamIngester::new(content, Box::new(SniffingFormatDetector)),
        Box::new(Sha256ViewBuilder),
        schemas,
        handlers,
    )
}

/// Builds an upload step backed by the in-process content service, for
/// tests and embedders without a real store.
pub fn in_memory_upload_step(
    schemas: Box<dyn SchemaRegistry>,
    handlers: HandlerRegistry,
) -> UploadStep {
    default_upload_step(Box::new(InMemoryContentService::new()), schemas, handlers)
}
