//! Patch operations.
//!
//! A patch document is an ordered list of operations, each a verb plus a
//! slash-delimited path locating the target within the submission's JSON
//! view, with an optional value. Operations are immutable once parsed; the
//! classifier and dispatcher only ever read them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Patch operation verb.
///
/// All six JSON-Patch verbs parse, but only `add`, `remove`, `replace` and
/// `move` are meaningfully distinguished by this step; the rest fall
/// through the default classification and will normally have no registered
/// handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Add,
    Remove,
    Replace,
    Move,
    Test,
    Copy,
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Verb::Add => "add",
            Verb::Remove => "remove",
            Verb::Replace => "replace",
            Verb::Move => "move",
            Verb::Test => "test",
            Verb::Copy => "copy",
        };
        write!(f, "{s}")
    }
}

/// A single verb+path[+value] instruction describing one edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    /// The operation verb.
    pub op: Verb,
    /// Slash-delimited path locating the target within the step's view.
    pub path: String,
    /// Optional operation payload. For `move`/`copy` the originating
    /// location travels in here too; this core passes it through opaquely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl PatchOperation {
    pub fn new(op: Verb, path: impl Into<String>) -> Self {
        Self {
            op,
            path: path.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }
}
