//! Request-scoped plumbing handed through to collaborators.

use std::collections::HashMap;
use uuid::Uuid;

/// Execution context for one request-handling unit of work.
///
/// Passed explicitly through every call rather than held as ambient state;
/// collaborators (content service, format detector, patch handlers) receive
/// it alongside the objects they operate on.
#[derive(Debug, Clone, Default)]
pub struct Context {
    current_user: Option<Uuid>,
}

impl Context {
    /// A context with no acting user.
    pub fn anonymous() -> Self {
        Self { current_user: None }
    }

    /// A context acting on behalf of the given user.
    pub fn as_user(user: Uuid) -> Self {
        Self {
            current_user: Some(user),
        }
    }

    pub fn current_user(&self) -> Option<Uuid> {
        self.current_user
    }
}

/// The client request a patch document arrived with.
///
/// Handlers may consult request parameters (form fields, query parameters)
/// while applying an operation; this core never reads them itself.
#[derive(Debug, Clone, Default)]
pub struct Request {
    parameters: HashMap<String, String>,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a request parameter, replacing any previous value.
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }
}
