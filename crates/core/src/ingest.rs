//! Bitstream ingestion workflow.
//!
//! Takes an uploaded byte payload, attaches it to the submission's item
//! (ensuring the content container exists, appending otherwise), names it,
//! assigns a detected format and persists the result. Ingestion is a
//! boundary: any failure inside it is caught, logged and converted into a
//! structured [`UploadError`] pointing at the list position the client
//! should inspect; the underlying fault never escapes.

use crate::config::StepConfig;
use crate::constants::CONTENT_BUNDLE_NAME;
use crate::content::ContentService;
use crate::context::Context;
use crate::error::BoxError;
use crate::submission::{Bitstream, InProgressSubmission};
use crate::{StepError, StepResult};
use dcr_files::{FileFormat, UploadedFile};
use serde::Serialize;
use uuid::Uuid;

/// Identifies the format of a newly created bitstream.
pub trait FormatDetector {
    /// Best-effort format identification for the given bitstream.
    ///
    /// Called after naming, so implementations may consult the source
    /// filename as well as the payload.
    fn guess_format(&self, ctx: &Context, bitstream: &Bitstream) -> Result<FileFormat, BoxError>;
}

/// Default detector: sniffs payload content, falling back to the source
/// filename's extension. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct SniffingFormatDetector;

impl FormatDetector for SniffingFormatDetector {
    fn guess_format(&self, _ctx: &Context, bitstream: &Bitstream) -> Result<FileFormat, BoxError> {
        Ok(dcr_files::format::detect(
            bitstream.payload(),
            bitstream.source(),
        ))
    }
}

/// Structured, client-addressable ingestion failure report.
///
/// `paths` points at the position within this step's view the client
/// should inspect: `<section>/files/<N>` when a content bundle already
/// existed (N is the position the failed upload would have occupied), or
/// the step's own section path when no file list existed yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadError {
    message: String,
    paths: Vec<String>,
}

impl UploadError {
    pub fn new(message: impl Into<String>, paths: Vec<String>) -> Self {
        Self {
            message: message.into(),
            paths,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }
}

/// The ingestion workflow: ensure container, append, name, format,
/// persist.
///
/// A standalone component deliberately separate from the step's patch
/// dispatch; the step consumes it by composition.
pub struct BitstreamIngester {
    content: Box<dyn ContentService>,
    formats: Box<dyn FormatDetector>,
}

impl BitstreamIngester {
    pub fn new(content: Box<dyn ContentService>, formats: Box<dyn FormatDetector>) -> Self {
        Self { content, formats }
    }

    /// The content service this ingester persists through.
    pub fn content(&self) -> &dyn ContentService {
        self.content.as_ref()
    }

    /// Ingests one uploaded file into the submission's item.
    ///
    /// Returns `None` on success. Every failure is caught here and
    /// returned as a structured [`UploadError`]; callers never see the
    /// underlying fault.
    pub fn ingest(
        &self,
        ctx: &Context,
        submission: &mut InProgressSubmission,
        config: &StepConfig,
        file: &UploadedFile,
    ) -> Option<UploadError> {
        let had_content_bundle = !self.content.content_bundles(submission.item()).is_empty();

        match self.try_ingest(ctx, submission, file) {
            Ok(id) => {
                tracing::debug!(bitstream = %id, name = %file.name(), "bitstream ingested");
                None
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    file = file.original_filename(),
                    "bitstream ingestion failed"
                );
                let path = if had_content_bundle {
                    // Position the failed upload would have occupied,
                    // counted at the moment of failure.
                    let position = self
                        .content
                        .content_bundles(submission.item())
                        .first()
                        .map(|bundle| bundle.bitstreams().len())
                        .unwrap_or(0);
                    format!("{}/files/{}", config.section_path(), position)
                } else {
                    config.section_path()
                };
                Some(UploadError::new(err.to_string(), vec![path]))
            }
        }
    }

    /// The fallible part of ingestion, strictly sequential: container
    /// lookup, creation or append, naming, format assignment, then the two
    /// persistence calls (bitstream first, owning item second).
    fn try_ingest(
        &self,
        ctx: &Context,
        submission: &mut InProgressSubmission,
        file: &UploadedFile,
    ) -> StepResult<Uuid> {
        let item = submission.item_mut();

        let key = match item.bundle_position(CONTENT_BUNDLE_NAME) {
            None => self.content.create_container_with_entry(
                ctx,
                item,
                CONTENT_BUNDLE_NAME,
                file.payload(),
            )?,
            Some(position) => self.content.create_entry(ctx, item, position, file.payload())?,
        };

        let missing =
            || StepError::Internal("created bitstream is missing from its bundle".into());

        let bitstream = item.bitstream_mut(&key).ok_or_else(missing)?;
        bitstream.set_name(file.name().as_str());
        bitstream.set_source(file.original_filename());

        let format = self
            .formats
            .guess_format(ctx, bitstream)
            .map_err(StepError::Format)?;
        bitstream.set_format(format);
        let id = bitstream.id();

        self.content
            .update_bitstream(ctx, item.bitstream(&key).ok_or_else(missing)?)?;
        self.content.update_item(ctx, item)?;

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentError, InMemoryContentService};
    use crate::submission::{BitstreamKey, Bundle, Item};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn upload(name: &str, payload: &[u8]) -> UploadedFile {
        UploadedFile::new(name, payload.to_vec()).unwrap()
    }

    fn ingester() -> BitstreamIngester {
        BitstreamIngester::new(
            Box::new(InMemoryContentService::new()),
            Box::new(SniffingFormatDetector),
        )
    }

    fn config() -> StepConfig {
        StepConfig::new("upload").unwrap()
    }

    #[test]
    fn first_upload_creates_the_content_bundle() {
        let ctx = Context::anonymous();
        let mut submission = InProgressSubmission::default();

        let error = ingester().ingest(
            &ctx,
            &mut submission,
            &config(),
            &upload("papers/main.pdf", b"%PDF-1.4 content"),
        );
        assert!(error.is_none());

        let item = submission.item();
        assert_eq!(item.bundles().len(), 1);
        assert_eq!(item.bundles()[0].name(), CONTENT_BUNDLE_NAME);

        let bitstream = &item.bundles()[0].bitstreams()[0];
        assert_eq!(bitstream.name(), Some("main.pdf"));
        assert_eq!(bitstream.source(), Some("papers/main.pdf"));
        assert_eq!(
            bitstream.format().map(|f| f.mime_type()),
            Some("application/pdf")
        );
    }

    #[test]
    fn repeated_uploads_reuse_the_container() {
        let ctx = Context::anonymous();
        let step = config();
        let ingester = ingester();

        // Start from a submission that already holds two files.
        let mut submission = InProgressSubmission::default();
        for name in ["a.txt", "b.txt"] {
            assert!(ingester
                .ingest(&ctx, &mut submission, &step, &upload(name, b"seed"))
                .is_none());
        }

        for name in ["c.txt", "d.txt", "e.txt"] {
            assert!(ingester
                .ingest(&ctx, &mut submission, &step, &upload(name, b"more"))
                .is_none());
        }

        let item = submission.item();
        assert_eq!(item.content_bundles().count(), 1);
        let bundle = item.content_bundles().next().unwrap();
        assert_eq!(bundle.bitstreams().len(), 5);
        for bitstream in bundle.bitstreams() {
            assert!(bitstream.name().is_some());
            assert!(bitstream.source().is_some());
            assert!(bitstream.format().is_some());
        }
    }

    /// Content service whose creation calls always fail.
    struct FailingContentService;

    impl ContentService for FailingContentService {
        fn create_container_with_entry(
            &self,
            _ctx: &Context,
            _item: &mut Item,
            _container: &str,
            _payload: &[u8],
        ) -> Result<BitstreamKey, ContentError> {
            Err(ContentError::Storage("disk full".into()))
        }

        fn create_entry(
            &self,
            _ctx: &Context,
            _item: &mut Item,
            _bundle_position: usize,
            _payload: &[u8],
        ) -> Result<BitstreamKey, ContentError> {
            Err(ContentError::Storage("disk full".into()))
        }

        fn update_bitstream(
            &self,
            _ctx: &Context,
            _bitstream: &Bitstream,
        ) -> Result<(), ContentError> {
            Ok(())
        }

        fn update_item(&self, _ctx: &Context, _item: &Item) -> Result<(), ContentError> {
            Ok(())
        }
    }

    #[test]
    fn failure_without_bundle_points_at_the_step() {
        let ctx = Context::anonymous();
        let ingester = BitstreamIngester::new(
            Box::new(FailingContentService),
            Box::new(SniffingFormatDetector),
        );
        let mut submission = InProgressSubmission::default();

        let error = ingester
            .ingest(&ctx, &mut submission, &config(), &upload("f.txt", b"x"))
            .expect("ingestion must report the failure");

        assert_eq!(error.paths(), ["/sections/upload"]);
        assert!(error.message().contains("disk full"));
    }

    #[test]
    fn failure_with_bundle_points_at_the_next_position() {
        let ctx = Context::anonymous();
        let ingester = BitstreamIngester::new(
            Box::new(FailingContentService),
            Box::new(SniffingFormatDetector),
        );

        let mut submission = InProgressSubmission::default();
        let item = submission.item_mut();
        let mut bundle = Bundle::new(CONTENT_BUNDLE_NAME);
        for _ in 0..3 {
            bundle.push_bitstream(Bitstream::new(b"seed".to_vec()));
        }
        item.push_bundle(bundle);

        let error = ingester
            .ingest(&ctx, &mut submission, &config(), &upload("f.txt", b"x"))
            .expect("ingestion must report the failure");

        assert_eq!(error.paths(), ["/sections/upload/files/3"]);
    }

    /// Content service that accepts creation but refuses to persist the
    /// item.
    struct ItemUpdateFails(InMemoryContentService);

    impl ContentService for ItemUpdateFails {
        fn create_container_with_entry(
            &self,
            ctx: &Context,
            item: &mut Item,
            container: &str,
            payload: &[u8],
        ) -> Result<BitstreamKey, ContentError> {
            self.0
                .create_container_with_entry(ctx, item, container, payload)
        }

        fn create_entry(
            &self,
            ctx: &Context,
            item: &mut Item,
            bundle_position: usize,
            payload: &[u8],
        ) -> Result<BitstreamKey, ContentError> {
            self.0.create_entry(ctx, item, bundle_position, payload)
        }

        fn update_bitstream(
            &self,
            _ctx: &Context,
            _bitstream: &Bitstream,
        ) -> Result<(), ContentError> {
            Ok(())
        }

        fn update_item(&self, _ctx: &Context, _item: &Item) -> Result<(), ContentError> {
            Err(ContentError::Storage("commit refused".into()))
        }
    }

    #[test]
    fn late_failure_counts_the_created_bitstream() {
        let ctx = Context::anonymous();
        let ingester = BitstreamIngester::new(
            Box::new(ItemUpdateFails(InMemoryContentService::new())),
            Box::new(SniffingFormatDetector),
        );

        let mut submission = InProgressSubmission::default();
        submission
            .item_mut()
            .push_bundle(Bundle::new(CONTENT_BUNDLE_NAME));

        let error = ingester
            .ingest(&ctx, &mut submission, &config(), &upload("f.txt", b"x"))
            .expect("ingestion must report the failure");

        // The bitstream was appended before persistence failed, so the
        // reported position reflects the count at the moment of failure.
        assert_eq!(error.paths(), ["/sections/upload/files/1"]);
        assert!(error.message().contains("commit refused"));
    }

    /// Detector standing in for an external service that is down.
    struct OfflineDetector;

    impl FormatDetector for OfflineDetector {
        fn guess_format(
            &self,
            _ctx: &Context,
            _bitstream: &Bitstream,
        ) -> Result<FileFormat, BoxError> {
            Err("format scanner offline".into())
        }
    }

    #[test]
    fn detector_failure_is_caught_and_structured() {
        let ctx = Context::anonymous();
        let ingester = BitstreamIngester::new(
            Box::new(InMemoryContentService::new()),
            Box::new(OfflineDetector),
        );
        let mut submission = InProgressSubmission::default();

        let error = ingester
            .ingest(&ctx, &mut submission, &config(), &upload("f.txt", b"x"))
            .expect("ingestion must report the failure");

        assert!(error.message().contains("format scanner offline"));
        assert_eq!(error.paths(), ["/sections/upload"]);
    }

    /// Records the order of content-service calls.
    struct RecordingContentService {
        inner: InMemoryContentService,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl ContentService for RecordingContentService {
        fn create_container_with_entry(
            &self,
            ctx: &Context,
            item: &mut Item,
            container: &str,
            payload: &[u8],
        ) -> Result<BitstreamKey, ContentError> {
            self.log.borrow_mut().push("create");
            self.inner
                .create_container_with_entry(ctx, item, container, payload)
        }

        fn create_entry(
            &self,
            ctx: &Context,
            item: &mut Item,
            bundle_position: usize,
            payload: &[u8],
        ) -> Result<BitstreamKey, ContentError> {
            self.log.borrow_mut().push("create");
            self.inner.create_entry(ctx, item, bundle_position, payload)
        }

        fn update_bitstream(
            &self,
            ctx: &Context,
            bitstream: &Bitstream,
        ) -> Result<(), ContentError> {
            self.log.borrow_mut().push("update_bitstream");
            self.inner.update_bitstream(ctx, bitstream)
        }

        fn update_item(&self, ctx: &Context, item: &Item) -> Result<(), ContentError> {
            self.log.borrow_mut().push("update_item");
            self.inner.update_item(ctx, item)
        }
    }

    #[test]
    fn persists_bitstream_before_item() {
        let ctx = Context::anonymous();
        let log = Rc::new(RefCell::new(Vec::new()));
        let ingester = BitstreamIngester::new(
            Box::new(RecordingContentService {
                inner: InMemoryContentService::new(),
                log: Rc::clone(&log),
            }),
            Box::new(SniffingFormatDetector),
        );
        let mut submission = InProgressSubmission::default();

        assert!(ingester
            .ingest(&ctx, &mut submission, &config(), &upload("f.txt", b"x"))
            .is_none());

        assert_eq!(*log.borrow(), ["create", "update_bitstream", "update_item"]);
    }
}
