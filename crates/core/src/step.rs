//! The upload step.
//!
//! Ties the pieces together behind the three operations the outer request
//! layer consumes: a read projection of the uploaded files, patch
//! dispatch with a schema gate for metadata edits, and file ingestion.
//! The submission is passed explicitly through every call; the step holds
//! only its collaborators.

use crate::classify::{classify, OperationCategory};
use crate::config::StepConfig;
use crate::constants::{METADATA_FIELD_MARKER, UPLOAD_METADATA_SECTION};
use crate::context::{Context, Request};
use crate::handlers::HandlerRegistry;
use crate::ingest::{BitstreamIngester, UploadError};
use crate::patch::PatchOperation;
use crate::schema::SchemaRegistry;
use crate::submission::InProgressSubmission;
use crate::view::{DataUpload, UploadViewBuilder};
use crate::{StepError, StepResult};
use dcr_files::UploadedFile;

/// Upload step for an in-progress submission.
///
/// Exposes the uploaded bitstreams for client display and applies per-file
/// edits and new uploads to the submission.
pub struct UploadStep {
    ingester: BitstreamIngester,
    views: Box<dyn UploadViewBuilder>,
    schemas: Box<dyn SchemaRegistry>,
    handlers: HandlerRegistry,
}

impl UploadStep {
    pub fn new(
        ingester: BitstreamIngester,
        views: Box<dyn UploadViewBuilder>,
        schemas: Box<dyn SchemaRegistry>,
        handlers: HandlerRegistry,
    ) -> Self {
        Self {
            ingester,
            views,
            schemas,
            handlers,
        }
    }

    /// Read-only projection of the submission's uploaded files, in bundle
    /// order then bitstream order.
    pub fn get_data(
        &self,
        submission: &InProgressSubmission,
        config: &StepConfig,
    ) -> StepResult<DataUpload> {
        let mut result = DataUpload::default();
        for bundle in self
            .ingester
            .content()
            .content_bundles(submission.item())
        {
            for bitstream in bundle.bitstreams() {
                let view = self
                    .views
                    .build_upload_view(config, bitstream)
                    .map_err(StepError::View)?;
                result.files.push(view);
            }
        }
        Ok(result)
    }

    /// Classifies, validates and executes one patch operation against the
    /// submission.
    ///
    /// Metadata edits are gated on the `bitstream-metadata` input schema
    /// before the handler runs; an operation targeting a field the section
    /// does not carry fails with `UnprocessableOperation` and reaches no
    /// handler. Handler failures propagate unchanged.
    pub fn do_patch_processing(
        &self,
        ctx: &Context,
        request: &Request,
        submission: &mut InProgressSubmission,
        op: &PatchOperation,
        _config: &StepConfig,
    ) -> StepResult<()> {
        let category = classify(op);
        let handler = self.handlers.resolve(category, op.op)?;

        if category == OperationCategory::MetadataEdit {
            let schema = self.schemas.inputs_by_form_name(UPLOAD_METADATA_SECTION)?;
            let absolute = handler.absolute_path(&op.path);
            let field = find_metadata_field(&absolute);
            match field {
                Some(field) if schema.is_field_present(field) => handler
                    .perform(ctx, request, submission, op)
                    .map_err(StepError::Handler),
                _ => Err(StepError::UnprocessableOperation {
                    field: field.map(str::to_owned),
                    section: UPLOAD_METADATA_SECTION.to_owned(),
                }),
            }
        } else {
            handler
                .perform(ctx, request, submission, op)
                .map_err(StepError::Handler)
        }
    }

    /// Ingests one uploaded file into the submission.
    ///
    /// Returns `None` on success, or a structured [`UploadError`]
    /// addressing the failed position; never raises.
    pub fn upload(
        &self,
        ctx: &Context,
        config: &StepConfig,
        submission: &mut InProgressSubmission,
        file: &UploadedFile,
    ) -> Option<UploadError> {
        self.ingester.ingest(ctx, submission, config, file)
    }
}

/// Extracts the target metadata field from a patch path: the first
/// `/`-separated segment carrying the metadata namespace marker. Returns
/// `None` when the path addresses no qualified field.
fn find_metadata_field(path: &str) -> Option<&str> {
    path.split('/')
        .find(|segment| segment.contains(METADATA_FIELD_MARKER))
}
