//! Patch operation classification.
//!
//! Maps an operation onto the handler category that should process it,
//! using only the verb and path, never the value. Paths are inspected by
//! substring marker; that matching is deliberately confined to this module
//! so a structured path representation could replace it without touching
//! callers.

use crate::constants::{ACCESS_CONDITIONS_PATH_MARKER, METADATA_PATH_MARKER};
use crate::patch::{PatchOperation, Verb};

/// Handler category for a classified patch operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationCategory {
    /// Edit of a bitstream's descriptive metadata.
    MetadataEdit,
    /// Edit of a bitstream's access conditions.
    AccessConditionEdit,
    /// Removal of a bitstream (or of the whole file list).
    PlainRemove,
    /// Reordering of bitstreams within the file list.
    PlainMove,
}

impl std::fmt::Display for OperationCategory {
    /// Renders the category's registry entry name.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OperationCategory::MetadataEdit => "bitstreammetadata",
            OperationCategory::AccessConditionEdit => "accessConditions",
            OperationCategory::PlainRemove => "bitstreamremove",
            OperationCategory::PlainMove => "bitstreammove",
        };
        write!(f, "{s}")
    }
}

/// Classifies an operation by verb and path markers.
///
/// Marker precedence is not uniform across the branches: `remove` and
/// `move` check the metadata marker first, while every other verb checks
/// the access-condition marker first. Callers rely on this exact ordering
/// for paths that match both markers, so it must not be "simplified".
pub fn classify(op: &PatchOperation) -> OperationCategory {
    match op.op {
        Verb::Remove => {
            if op.path.contains(METADATA_PATH_MARKER) {
                OperationCategory::MetadataEdit
            } else if op.path.contains(ACCESS_CONDITIONS_PATH_MARKER) {
                OperationCategory::AccessConditionEdit
            } else {
                OperationCategory::PlainRemove
            }
        }
        Verb::Move => {
            if op.path.contains(METADATA_PATH_MARKER) {
                OperationCategory::MetadataEdit
            } else {
                OperationCategory::PlainMove
            }
        }
        _ => {
            if op.path.contains(ACCESS_CONDITIONS_PATH_MARKER) {
                OperationCategory::AccessConditionEdit
            } else {
                OperationCategory::MetadataEdit
            }
        }
    }
}
