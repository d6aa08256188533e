//! Patch handlers and their registry.
//!
//! Handler semantics (what a metadata edit or a file move actually does to
//! the submission) live outside this core; this module fixes the contract
//! they must satisfy and the registry the dispatcher resolves them from.
//! The registry is populated once at initialization, so an unmapped
//! (category, verb) pair is a deployment defect rather than a normal error
//! path.

use crate::classify::OperationCategory;
use crate::context::{Context, Request};
use crate::error::BoxError;
use crate::patch::{PatchOperation, Verb};
use crate::submission::InProgressSubmission;
use crate::{StepError, StepResult};
use std::collections::HashMap;

/// A handler for one category of patch operation.
pub trait PatchHandler {
    /// Applies the operation to the submission.
    ///
    /// Failures propagate to the dispatcher untranslated.
    fn perform(
        &self,
        ctx: &Context,
        request: &Request,
        submission: &mut InProgressSubmission,
        op: &PatchOperation,
    ) -> Result<(), BoxError>;

    /// Strips the step-addressing prefix (`/sections/<step-id>`) from an
    /// operation path, yielding the path relative to this step's view.
    fn absolute_path(&self, path: &str) -> String {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .skip(2)
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Registry resolving (category, verb) pairs to handler instances.
///
/// Built once at initialization; lookups never mutate it.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<(OperationCategory, Verb), Box<dyn PatchHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for the given pair, replacing any previous one.
    pub fn register(
        &mut self,
        category: OperationCategory,
        verb: Verb,
        handler: Box<dyn PatchHandler>,
    ) {
        self.handlers.insert((category, verb), handler);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(
        mut self,
        category: OperationCategory,
        verb: Verb,
        handler: Box<dyn PatchHandler>,
    ) -> Self {
        self.register(category, verb, handler);
        self
    }

    /// Resolves the handler for a (category, verb) pair.
    ///
    /// # Errors
    ///
    /// Returns `StepError::UnknownOperationMapping` if no handler is
    /// registered for the pair.
    pub fn resolve(&self, category: OperationCategory, verb: Verb) -> StepResult<&dyn PatchHandler> {
        self.handlers
            .get(&(category, verb))
            .map(Box::as_ref)
            .ok_or(StepError::UnknownOperationMapping { category, verb })
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("mappings", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
