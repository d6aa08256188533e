//! Content persistence boundary.
//!
//! Storage of items, bundles and bitstreams belongs to an external content
//! service; this module fixes the interface the ingestion workflow consumes
//! and ships an in-process implementation for tests and embedders without a
//! real store.
//!
//! The service mutates the domain objects it is handed and performs no
//! concurrency control of its own: callers must ensure a single active
//! writer per submission (normally the transaction layer around the step).

use crate::context::Context;
use crate::submission::{Bitstream, BitstreamKey, Bundle, Item};

/// Errors produced by a content service.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// A bundle position did not exist on the item.
    #[error("no bundle at position {0}")]
    BundleNotFound(usize),

    /// The backing store rejected the payload.
    #[error("bitstream storage rejected the payload: {0}")]
    Storage(String),

    /// I/O error from the backing store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persistence operations for submission content.
pub trait ContentService {
    /// The item's content bundles, in stored order.
    ///
    /// The provided implementation traverses the in-memory item; a backing
    /// store may override it to consult its own indexes.
    fn content_bundles<'a>(&self, item: &'a Item) -> Vec<&'a Bundle> {
        item.content_bundles().collect()
    }

    /// Creates the named container bundle and a first bitstream inside it,
    /// as one unit: on error, nothing is attached to the item.
    ///
    /// Returns the location of the new bitstream.
    fn create_container_with_entry(
        &self,
        ctx: &Context,
        item: &mut Item,
        container: &str,
        payload: &[u8],
    ) -> Result<BitstreamKey, ContentError>;

    /// Appends a bitstream to the bundle at `bundle_position` (a position
    /// within the item's bundle list).
    ///
    /// Returns the location of the new bitstream.
    fn create_entry(
        &self,
        ctx: &Context,
        item: &mut Item,
        bundle_position: usize,
        payload: &[u8],
    ) -> Result<BitstreamKey, ContentError>;

    /// Persists a mutated bitstream.
    fn update_bitstream(&self, ctx: &Context, bitstream: &Bitstream) -> Result<(), ContentError>;

    /// Persists the owning item.
    fn update_item(&self, ctx: &Context, item: &Item) -> Result<(), ContentError>;
}

/// In-process content service.
///
/// Bundles and bitstreams live entirely on the item, so creation is plain
/// appending and the persistence calls are accepted without further effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryContentService;

impl InMemoryContentService {
    pub fn new() -> Self {
        Self
    }
}

impl ContentService for InMemoryContentService {
    fn create_container_with_entry(
        &self,
        _ctx: &Context,
        item: &mut Item,
        container: &str,
        payload: &[u8],
    ) -> Result<BitstreamKey, ContentError> {
        let mut bundle = Bundle::new(container);
        let bitstream = bundle.push_bitstream(Bitstream::new(payload.to_vec()));
        let bundle = item.push_bundle(bundle);
        Ok(BitstreamKey { bundle, bitstream })
    }

    fn create_entry(
        &self,
        _ctx: &Context,
        item: &mut Item,
        bundle_position: usize,
        payload: &[u8],
    ) -> Result<BitstreamKey, ContentError> {
        let bundle = item
            .bundle_mut(bundle_position)
            .ok_or(ContentError::BundleNotFound(bundle_position))?;
        let bitstream = bundle.push_bitstream(Bitstream::new(payload.to_vec()));
        Ok(BitstreamKey {
            bundle: bundle_position,
            bitstream,
        })
    }

    fn update_bitstream(&self, _ctx: &Context, _bitstream: &Bitstream) -> Result<(), ContentError> {
        Ok(())
    }

    fn update_item(&self, _ctx: &Context, _item: &Item) -> Result<(), ContentError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CONTENT_BUNDLE_NAME;

    #[test]
    fn container_creation_attaches_bundle_and_entry() {
        let ctx = Context::anonymous();
        let service = InMemoryContentService::new();
        let mut item = Item::new();

        let key = service
            .create_container_with_entry(&ctx, &mut item, CONTENT_BUNDLE_NAME, b"bytes")
            .unwrap();

        assert_eq!(key, BitstreamKey { bundle: 0, bitstream: 0 });
        assert_eq!(item.bundles().len(), 1);
        assert_eq!(item.bundles()[0].name(), CONTENT_BUNDLE_NAME);
        assert_eq!(item.bitstream(&key).unwrap().payload(), b"bytes");
    }

    #[test]
    fn entries_append_in_order() {
        let ctx = Context::anonymous();
        let service = InMemoryContentService::new();
        let mut item = Item::new();

        let first = service
            .create_container_with_entry(&ctx, &mut item, CONTENT_BUNDLE_NAME, b"one")
            .unwrap();
        let second = service
            .create_entry(&ctx, &mut item, first.bundle, b"two")
            .unwrap();

        assert_eq!(second.bitstream, 1);
        assert_eq!(item.bundles()[0].bitstreams().len(), 2);
        assert_eq!(item.bitstream(&second).unwrap().payload(), b"two");
    }

    #[test]
    fn create_entry_rejects_missing_bundle() {
        let ctx = Context::anonymous();
        let service = InMemoryContentService::new();
        let mut item = Item::new();

        assert!(matches!(
            service.create_entry(&ctx, &mut item, 0, b"bytes"),
            Err(ContentError::BundleNotFound(0))
        ));
        assert!(item.bundles().is_empty());
    }

    #[test]
    fn content_bundles_uses_item_order() {
        let ctx = Context::anonymous();
        let service = InMemoryContentService::new();
        let mut item = Item::new();
        item.push_bundle(Bundle::new("LICENSE"));
        service
            .create_container_with_entry(&ctx, &mut item, CONTENT_BUNDLE_NAME, b"x")
            .unwrap();

        let bundles = service.content_bundles(&item);
        assert_eq!(bundles.len(), 1);
        assert_eq!(bundles[0].name(), CONTENT_BUNDLE_NAME);
    }
}
