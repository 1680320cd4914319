#![forbid(unsafe_code)]

//! Per-gesture session state.
//!
//! A [`DragSession`] is created when a drag starts on an item and consumed
//! when the gesture's stop event is resolved. It carries everything the stop
//! handler needs that the stop-time event context cannot be trusted to
//! provide: the origin index captured before any mutation, the value removed
//! from the source collection, and the collection that performed an in-place
//! reorder.
//!
//! # Invariants
//!
//! 1. `origin_index` is captured at start, before any splice.
//! 2. `moved_item` is populated (by the remove handler) before the session
//!    can enter [`DragPhase::Relocated`].
//! 3. `Relocated` and `Rejected` are mutually exclusive terminal phases for
//!    the destination side.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::event::CollectionId;

/// Where a session stands on the relocation axis.
///
/// `Started → Relocating → (Relocated | Rejected)`. A session that never
/// leaves `Started` resolves as a pure in-place reorder (if an update
/// recorded a resort target) or as an unchanged drop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DragPhase {
    /// Session created; no cross-collection movement observed yet.
    #[default]
    Started,
    /// The item left its source collection (`remove` fired); the moved value
    /// is held on the session until a destination accepts or refuses it.
    Relocating,
    /// A destination accepted the item and its model was spliced.
    Relocated,
    /// The destination was disabled at the moment of receive; the model was
    /// not touched and stop will roll the item back to its origin.
    Rejected,
}

impl DragPhase {
    /// Whether the destination side has reached a final answer.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, DragPhase::Relocated | DragPhase::Rejected)
    }
}

/// Transient record for one drag gesture.
///
/// Owned exclusively by the [`Reconciler`](crate::reconcile::Reconciler) for
/// the gesture's lifetime; no other component reads or writes it.
#[derive(Debug)]
pub struct DragSession<T> {
    origin: CollectionId,
    origin_index: usize,
    moved_item: Option<T>,
    resort_target: Option<CollectionId>,
    destination: Option<CollectionId>,
    inserted_at: Option<usize>,
    phase: DragPhase,
}

impl<T> DragSession<T> {
    /// Open a session for an item picked up at `origin_index` in `origin`.
    #[must_use]
    pub fn new(origin: CollectionId, origin_index: usize) -> Self {
        Self {
            origin,
            origin_index,
            moved_item: None,
            resort_target: None,
            destination: None,
            inserted_at: None,
            phase: DragPhase::Started,
        }
    }

    /// The collection the drag began in.
    #[must_use]
    pub fn origin(&self) -> CollectionId {
        self.origin
    }

    /// The item's index in the source collection at drag start.
    ///
    /// Only meaningful until the first mutation of the source collection.
    #[must_use]
    pub fn origin_index(&self) -> usize {
        self.origin_index
    }

    /// Current phase on the relocation axis.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// The collection that performed an in-place reorder, if any.
    #[must_use]
    pub fn resort_target(&self) -> Option<CollectionId> {
        self.resort_target
    }

    /// The destination that accepted the item, if any.
    #[must_use]
    pub fn destination(&self) -> Option<CollectionId> {
        self.destination
    }

    /// The index the item was inserted at in the destination, if any.
    #[must_use]
    pub fn inserted_at(&self) -> Option<usize> {
        self.inserted_at
    }

    /// Whether a remove handler already captured the moved value.
    #[must_use]
    pub fn has_moved_item(&self) -> bool {
        self.moved_item.is_some()
    }

    /// Record which collection reordered itself during this gesture.
    ///
    /// Update events fire on a collection newly receiving an item too, so
    /// this is accepted in any phase; the stop handler only acts on it when
    /// no relocation happened.
    pub fn record_resort_target(&mut self, collection: CollectionId) {
        self.resort_target = Some(collection);
    }

    /// Store the value the remove handler took out of the source collection
    /// and advance to [`DragPhase::Relocating`].
    ///
    /// The caller must have verified the session is in `Started`.
    pub fn capture_removed(&mut self, item: T) {
        debug_assert_eq!(self.phase, DragPhase::Started);
        self.moved_item = Some(item);
        self.phase = DragPhase::Relocating;
    }

    /// Take the moved value out for insertion into a destination.
    pub fn take_moved(&mut self) -> Option<T> {
        self.moved_item.take()
    }

    /// Mark the session relocated into `destination` at `index`.
    ///
    /// The caller must have verified the moved value was present.
    pub fn mark_relocated(&mut self, destination: CollectionId, index: usize) {
        debug_assert_eq!(self.phase, DragPhase::Relocating);
        self.destination = Some(destination);
        self.inserted_at = Some(index);
        self.phase = DragPhase::Relocated;
    }

    /// Mark the destination's refusal; the model was not mutated.
    pub fn mark_rejected(&mut self) {
        debug_assert!(!self.phase.is_terminal());
        self.phase = DragPhase::Rejected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(raw: u64) -> CollectionId {
        CollectionId::new(raw)
    }

    #[test]
    fn new_session_starts_clean() {
        let s: DragSession<&str> = DragSession::new(col(1), 3);
        assert_eq!(s.phase(), DragPhase::Started);
        assert_eq!(s.origin(), col(1));
        assert_eq!(s.origin_index(), 3);
        assert!(!s.has_moved_item());
        assert!(s.resort_target().is_none());
        assert!(s.destination().is_none());
    }

    #[test]
    fn capture_then_relocate() {
        let mut s = DragSession::new(col(1), 0);
        s.capture_removed("b");
        assert_eq!(s.phase(), DragPhase::Relocating);
        assert!(s.has_moved_item());

        assert_eq!(s.take_moved(), Some("b"));
        s.mark_relocated(col(2), 1);
        assert_eq!(s.phase(), DragPhase::Relocated);
        assert_eq!(s.destination(), Some(col(2)));
        assert_eq!(s.inserted_at(), Some(1));
    }

    #[test]
    fn rejection_keeps_moved_item_for_rollback() {
        let mut s = DragSession::new(col(1), 2);
        s.capture_removed("c");
        s.mark_rejected();
        assert_eq!(s.phase(), DragPhase::Rejected);
        // The rollback path still needs the value.
        assert_eq!(s.take_moved(), Some("c"));
    }

    #[test]
    fn resort_target_is_plain_data() {
        let mut s: DragSession<u8> = DragSession::new(col(1), 0);
        s.record_resort_target(col(1));
        assert_eq!(s.resort_target(), Some(col(1)));
        // A later update overwrites it.
        s.record_resort_target(col(2));
        assert_eq!(s.resort_target(), Some(col(2)));
    }

    #[test]
    fn terminal_phases() {
        assert!(!DragPhase::Started.is_terminal());
        assert!(!DragPhase::Relocating.is_terminal());
        assert!(DragPhase::Relocated.is_terminal());
        assert!(DragPhase::Rejected.is_terminal());
    }
}
