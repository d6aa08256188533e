//! # DCR Submission Core
//!
//! Core logic for the upload step of an in-progress submission in the DCR
//! digital content repository.
//!
//! This crate contains the step's three operations and the machinery
//! behind them:
//! - Patch operation classification and dispatch, with a schema gate for
//!   per-file metadata edits
//! - Bitstream ingestion (ensure container, append, name, format, persist)
//!   with structured, client-addressable failure reporting
//! - A read-only projection of the uploaded files for client display
//!
//! **No transport concerns**: HTTP routing, serialization of requests and
//! authentication belong to the outer request layer, which consumes this
//! crate's [`UploadStep`]. Persistence, format heuristics and patch-handler
//! semantics are external collaborators reached through the traits in
//! [`content`], [`ingest`], [`schema`] and [`handlers`].

pub mod classify;
pub mod config;
pub mod constants;
pub mod content;
pub mod context;
mod error;
pub mod handlers;
pub mod ingest;
pub mod patch;
pub mod schema;
pub mod step;
pub mod submission;
pub mod view;

pub use classify::{classify, OperationCategory};
pub use config::StepConfig;
pub use content::{ContentError, ContentService, InMemoryContentService};
pub use context::{Context, Request};
pub use error::{BoxError, StepError, StepResult};
pub use handlers::{HandlerRegistry, PatchHandler};
pub use ingest::{BitstreamIngester, FormatDetector, SniffingFormatDetector, UploadError};
pub use patch::{PatchOperation, Verb};
pub use schema::{InputSchema, SchemaRegistry, YamlSchemaRegistry};
pub use step::UploadStep;
pub use submission::{Bitstream, BitstreamKey, Bundle, InProgressSubmission, Item};
pub use view::{BitstreamView, ChecksumView, DataUpload, Sha256ViewBuilder, UploadViewBuilder};
