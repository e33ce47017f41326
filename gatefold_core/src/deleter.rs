// Copyright 2026 the Gatefold Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-aligned deferred destruction.
//!
//! Elements removed from the display lists during a pass must not be freed
//! while that pass (or the draw passes of the same frame) could still observe
//! them. [`DeferredDeleter`] is the only destruction path: removal from lists
//! happens synchronously inside a completion callback, the handle is queued
//! here, and [`drain`](DeferredDeleter::drain) runs once per frame after both
//! draw passes.
//!
//! Enqueueing an element that is still reachable from a display list is a
//! caller bug; the structural discipline in
//! [`ViewCompositor`](crate::compositor::ViewCompositor) prevents it (this is
//! a precondition, not a runtime-checked error).

use alloc::vec::Vec;

use crate::element::{ElementId, ElementStore};

/// Queue of elements pending destruction, drained once per frame.
#[derive(Debug, Default)]
pub struct DeferredDeleter {
    queue: Vec<ElementId>,
}

impl DeferredDeleter {
    /// Creates an empty deleter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether anything is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of queued subtree roots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Queues an element (and thereby the subtree it owns) for destruction.
    ///
    /// The element must already be detached from every display list and from
    /// its parent. Each element may be queued at most once.
    pub fn enqueue(&mut self, id: ElementId) {
        debug_assert!(
            !self.queue.contains(&id),
            "element queued for deletion twice: {id:?}"
        );
        self.queue.push(id);
    }

    /// Destroys every queued subtree and empties the queue.
    ///
    /// Runs outside the update/draw passes. An empty queue is a no-op.
    /// Returns the number of elements destroyed, children included.
    pub fn drain(&mut self, store: &mut ElementStore) -> usize {
        let mut freed = 0;
        for id in self.queue.drain(..) {
            freed += destroy_subtree(store, id);
        }
        freed
    }
}

/// Destroys `id` and its children, bottom-up.
fn destroy_subtree(store: &mut ElementStore, id: ElementId) -> usize {
    let children: Vec<ElementId> = store.children(id).collect();
    let mut freed = 0;
    for child in children {
        freed += destroy_subtree(store, child);
    }
    store.destroy_element(id);
    freed + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_on_empty_queue_is_noop() {
        let mut store = ElementStore::new();
        let mut deleter = DeferredDeleter::new();
        assert!(deleter.is_empty());
        assert_eq!(deleter.drain(&mut store), 0);
    }

    #[test]
    fn drain_destroys_whole_subtree() {
        let mut store = ElementStore::new();
        let mut deleter = DeferredDeleter::new();

        let root = store.create_element();
        let child = store.create_element();
        let grandchild = store.create_element();
        store.add_child(root, child);
        store.add_child(child, grandchild);

        deleter.enqueue(root);
        // Still alive until the drain step.
        assert!(store.is_alive(root));
        assert!(store.is_alive(grandchild));

        assert_eq!(deleter.drain(&mut store), 3);
        assert!(!store.is_alive(root));
        assert!(!store.is_alive(child));
        assert!(!store.is_alive(grandchild));
        assert!(deleter.is_empty());
    }

    #[test]
    #[should_panic(expected = "queued for deletion twice")]
    fn double_enqueue_panics_in_debug() {
        let mut store = ElementStore::new();
        let mut deleter = DeferredDeleter::new();
        let id = store.create_element();
        deleter.enqueue(id);
        deleter.enqueue(id);
    }
}
