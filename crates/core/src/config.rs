//! Step configuration.
//!
//! Configuration is resolved once when the submission definition is loaded
//! and then passed into the step on every call. The step id is validated at
//! construction because it is embedded into every client-addressable
//! response path this step produces.

use crate::constants::OPERATION_PATH_SECTIONS;
use crate::{StepError, StepResult};
use dcr_types::NonEmptyText;

/// Identity of this step within the overall submission definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepConfig {
    id: NonEmptyText,
}

impl StepConfig {
    /// Creates a `StepConfig` with the given step id.
    ///
    /// # Errors
    ///
    /// Returns `StepError::InvalidInput` if the id is empty or
    /// whitespace-only.
    pub fn new(id: impl AsRef<str>) -> StepResult<Self> {
        let id = NonEmptyText::new(id)
            .map_err(|_| StepError::InvalidInput("step id cannot be empty".into()))?;
        Ok(Self { id })
    }

    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Client-addressable path of this step: `/sections/<id>`.
    pub fn section_path(&self) -> String {
        format!("/{}/{}", OPERATION_PATH_SECTIONS, self.id)
    }
}
