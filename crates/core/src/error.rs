//! Error types for the submission upload step.

use crate::classify::OperationCategory;
use crate::content::ContentError;
use crate::patch::Verb;

/// Opaque failure produced by an external collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A patch targeted a metadata field the configured section does not
    /// carry. Raised before the handler runs; invalid fields never reach
    /// persistence.
    #[error(
        "attribute {} is not present in section {}",
        .field.as_deref().unwrap_or("<undefined>"),
        .section
    )]
    UnprocessableOperation {
        field: Option<String>,
        section: String,
    },

    /// No handler is registered for a (category, verb) pair. A deployment
    /// defect, not a client error; never swallowed.
    #[error("no patch handler registered for category {category} and verb {verb}")]
    UnknownOperationMapping {
        category: OperationCategory,
        verb: Verb,
    },

    #[error("unknown input section: {0}")]
    UnknownSection(String),

    #[error("failed to read input section configuration: {0}")]
    SchemaRead(std::io::Error),

    #[error("failed to parse input section configuration: {0}")]
    SchemaParse(serde_yaml::Error),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("format detection failed: {0}")]
    Format(BoxError),

    #[error("building upload view failed: {0}")]
    View(BoxError),

    /// A dispatched patch handler failed; the underlying message passes
    /// through untranslated.
    #[error("{0}")]
    Handler(BoxError),

    #[error("internal: {0}")]
    Internal(String),
}

pub type StepResult<T> = std::result::Result<T, StepError>;
