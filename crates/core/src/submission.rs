//! The in-progress submission and its content tree.
//!
//! A submission owns exactly one item; the item owns named bundles; each
//! bundle owns an ordered sequence of bitstreams. Bitstream order is
//! display-relevant, so both bundle and bitstream sequences are append-only
//! and preserve insertion order. A bitstream is addressed by its position
//! within its owning bundle (see [`BitstreamKey`]).
//!
//! Nothing here persists anything: mutations happen in place on these
//! objects and an external content service is told to persist them (see
//! [`crate::content`]).

use crate::constants::CONTENT_BUNDLE_NAME;
use chrono::{DateTime, Utc};
use dcr_files::FileFormat;
use uuid::Uuid;

/// A single uploaded file's byte payload plus descriptive metadata.
///
/// Display name, source filename and format are unset at creation and are
/// assigned by the ingestion workflow before the bitstream is considered
/// complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitstream {
    id: Uuid,
    name: Option<String>,
    source: Option<String>,
    format: Option<FileFormat>,
    payload: Vec<u8>,
    created_at: DateTime<Utc>,
}

impl Bitstream {
    /// Creates a fresh bitstream holding `payload`, with naming and format
    /// still unset.
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: None,
            source: None,
            format: None,
            payload,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Display name shown to end users.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// The filename the upload was declared with, preserved verbatim.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = Some(source.into());
    }

    pub fn format(&self) -> Option<&FileFormat> {
        self.format.as_ref()
    }

    pub fn set_format(&mut self, format: FileFormat) {
        self.format = Some(format);
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn size_bytes(&self) -> u64 {
        self.payload.len() as u64
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A named, ordered container of bitstreams within an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    id: Uuid,
    name: String,
    bitstreams: Vec<Bitstream>,
}

impl Bundle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            bitstreams: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bitstreams(&self) -> &[Bitstream] {
        &self.bitstreams
    }

    /// Appends a bitstream, returning its position within this bundle.
    pub fn push_bitstream(&mut self, bitstream: Bitstream) -> usize {
        self.bitstreams.push(bitstream);
        self.bitstreams.len() - 1
    }

    pub fn bitstream_mut(&mut self, position: usize) -> Option<&mut Bitstream> {
        self.bitstreams.get_mut(position)
    }

    /// Removes and returns the bitstream at `position`; later bitstreams
    /// shift down to close the gap.
    pub fn remove_bitstream(&mut self, position: usize) -> Option<Bitstream> {
        if position < self.bitstreams.len() {
            Some(self.bitstreams.remove(position))
        } else {
            None
        }
    }

    /// Moves the bitstream at `from` so it sits at `to`, preserving the
    /// relative order of the others. Returns `false` if either position is
    /// out of range.
    pub fn move_bitstream(&mut self, from: usize, to: usize) -> bool {
        if from >= self.bitstreams.len() || to >= self.bitstreams.len() {
            return false;
        }
        let bitstream = self.bitstreams.remove(from);
        self.bitstreams.insert(to, bitstream);
        true
    }
}

/// Position of a bitstream within an item: bundle position, then bitstream
/// position inside that bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitstreamKey {
    pub bundle: usize,
    pub bitstream: usize,
}

/// The subject content record of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: Uuid,
    bundles: Vec<Bundle>,
}

impl Item {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            bundles: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn bundles(&self) -> &[Bundle] {
        &self.bundles
    }

    /// Appends a bundle, returning its position within this item.
    pub fn push_bundle(&mut self, bundle: Bundle) -> usize {
        self.bundles.push(bundle);
        self.bundles.len() - 1
    }

    pub fn bundle_mut(&mut self, position: usize) -> Option<&mut Bundle> {
        self.bundles.get_mut(position)
    }

    /// Position of the first bundle with the given name.
    ///
    /// The data model does not forbid several bundles sharing a name; every
    /// workflow in this crate targets the first.
    pub fn bundle_position(&self, name: &str) -> Option<usize> {
        self.bundles.iter().position(|b| b.name() == name)
    }

    /// The item's content bundles, in stored order.
    pub fn content_bundles(&self) -> impl Iterator<Item = &Bundle> {
        self.bundles
            .iter()
            .filter(|b| b.name() == CONTENT_BUNDLE_NAME)
    }

    pub fn bitstream(&self, key: &BitstreamKey) -> Option<&Bitstream> {
        self.bundles
            .get(key.bundle)
            .and_then(|b| b.bitstreams().get(key.bitstream))
    }

    pub fn bitstream_mut(&mut self, key: &BitstreamKey) -> Option<&mut Bitstream> {
        self.bundles
            .get_mut(key.bundle)
            .and_then(|b| b.bitstream_mut(key.bitstream))
    }
}

impl Default for Item {
    fn default() -> Self {
        Self::new()
    }
}

/// The in-progress object being edited by this step.
///
/// Created before the step runs, mutated in place by patch and upload
/// operations, persisted by an external store after each mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InProgressSubmission {
    id: Uuid,
    item: Item,
}

impl InProgressSubmission {
    pub fn new(item: Item) -> Self {
        Self {
            id: Uuid::new_v4(),
            item,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn item_mut(&mut self) -> &mut Item {
        &mut self.item
    }
}

impl Default for InProgressSubmission {
    fn default() -> Self {
        Self::new(Item::new())
    }
}
