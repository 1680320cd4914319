#![forbid(unsafe_code)]

//! Drag-session reconciliation: the gesture state machine.
//!
//! [`Reconciler`] consumes the five gesture events a drag engine emits
//! (`start`, `update`, `receive`, `remove`, `stop`) and mutates the backing
//! collections exactly once per gesture, in the correct order, with rollback
//! when the destination refuses the item.
//!
//! # State Machine
//!
//! Each gesture owns one [`DragSession`], keyed by [`ItemId`]:
//!
//! - `start` opens the session and captures the origin index before any
//!   mutation.
//! - `update` records which collection reordered itself, because the
//!   stop-time event context can resolve the wrong collection when several
//!   sortables are connected.
//! - `remove` (source side of a cross-list move) takes the item out of the
//!   source model and parks it on the session: `Started → Relocating`.
//! - `receive` (destination side) either inserts the parked item
//!   (`Relocating → Relocated`) or, when the destination is disabled, marks
//!   the refusal without touching the model (`→ Rejected`).
//! - `stop` resolves: rollback for `Rejected` (and for `Relocating` whose
//!   receive never fired), remove-then-insert for a pure in-place reorder,
//!   then one change notification per affected collection.
//!
//! # Invariants
//!
//! 1. Exactly one of {in-place reorder, relocation, rejection} holds by the
//!    time stop fires; an untouched drop resolves as `Unchanged`.
//! 2. The moved value is captured before any insertion into a destination;
//!    inserting an absent value is a detectable error, never silent.
//! 3. Each affected collection is notified exactly once per gesture, not
//!    once per intermediate event.
//!
//! # Failure Modes
//!
//! Out-of-order or duplicate delivery (receive before remove, double
//! receive) raises a [`ReconcileError`]; a gesture cancelled without a stop
//! event leaks its session until the next start for the same item, which
//! discards the stale record with a warning.

use std::collections::HashMap;

use ahash::RandomState;
use tracing::{debug, trace, warn};

use crate::error::{ReconcileError, Result};
use crate::event::{CollectionId, DragEvent, EventName, ItemId};
use crate::registry::SortableSet;
use crate::session::{DragPhase, DragSession};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Host-side hooks fired at gesture boundaries.
///
/// Fire-and-forget: the reconciler neither awaits nor inspects anything from
/// these. Typical use is toggling an "is sorting" flag in application state.
pub trait GestureObserver {
    /// A drag gesture started on `item`.
    fn gesture_started(&mut self, item: ItemId) {
        let _ = item;
    }

    /// The gesture on `item` is stopping. Fires before resolution, so the
    /// collections still hold their pre-resolution contents.
    fn gesture_stopped(&mut self, item: ItemId) {
        let _ = item;
    }
}

/// How a gesture resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DragOutcome {
    /// The item was dropped where it started; no model changed.
    Unchanged,
    /// In-place reorder within one collection.
    Resorted {
        /// The collection that reordered itself.
        collection: CollectionId,
        /// Index the item was picked up from.
        from: usize,
        /// Index the item settled at.
        to: usize,
    },
    /// The item moved from one collection to another.
    Relocated {
        /// Where the drag began.
        source: CollectionId,
        /// The collection that accepted the item.
        destination: CollectionId,
        /// Index in the source at drag start.
        from: usize,
        /// Index in the destination after insertion.
        to: usize,
    },
    /// The destination refused the item; the source was restored.
    Rejected {
        /// The collection the item was rolled back into.
        source: CollectionId,
        /// The index it was restored at.
        restored_at: usize,
    },
}

/// The drag-session reconciliation engine.
///
/// One `Reconciler` serves all collections connected in a [`SortableSet`].
/// Sessions are looked up by item identity in an explicit map; nothing is
/// ever attached to the dragged element itself.
pub struct Reconciler<T> {
    sessions: HashMap<ItemId, DragSession<T>, RandomState>,
    observer: Option<Box<dyn GestureObserver>>,
}

impl<T> Default for Reconciler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Reconciler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("active_sessions", &self.sessions.len())
            .finish()
    }
}

impl<T> Reconciler<T> {
    /// Create a reconciler with no observer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: HashMap::default(),
            observer: None,
        }
    }

    /// Install the gesture observer.
    pub fn set_observer(&mut self, observer: Box<dyn GestureObserver>) {
        self.observer = Some(observer);
    }

    /// Whether an unresolved session exists for `item`.
    #[must_use]
    pub fn has_session(&self, item: ItemId) -> bool {
        self.sessions.contains_key(&item)
    }

    /// The phase of the unresolved session for `item`, if any.
    #[must_use]
    pub fn session_phase(&self, item: ItemId) -> Option<DragPhase> {
        self.sessions.get(&item).map(DragSession::phase)
    }

    /// Handle gesture start. Must run before the drag engine performs any
    /// bookkeeping that depends on the item's index.
    ///
    /// Opens a fresh session capturing the origin collection and index. Any
    /// stale session for the same item (a gesture the host never delivered a
    /// stop for) is discarded with a warning.
    pub fn on_start(&mut self, event: &DragEvent, set: &SortableSet<T>) -> Result<()> {
        if !set.contains(event.collection) {
            return Err(ReconcileError::UnknownCollection(event.collection));
        }
        if let Some(stale) = self.sessions.remove(&event.item) {
            warn!(
                item = event.item.0,
                phase = ?stale.phase(),
                "discarding stale drag session; previous gesture never stopped"
            );
        }
        self.sessions.insert(
            event.item,
            DragSession::new(event.collection, event.index),
        );
        trace!(
            item = event.item.0,
            collection = event.collection.get(),
            index = event.index,
            "drag gesture started"
        );
        if let Some(observer) = self.observer.as_mut() {
            observer.gesture_started(event.item);
        }
        Ok(())
    }

    /// Handle an in-collection position change.
    ///
    /// Fires for a plain reorder and also on a collection newly receiving an
    /// item (in addition to receive), so it is accepted in any phase. The
    /// session carries the collection id itself; the stop handler never
    /// trusts the stop-time event context to name the resorted collection.
    pub fn on_update(&mut self, event: &DragEvent, set: &SortableSet<T>) -> Result<()> {
        if !set.contains(event.collection) {
            return Err(ReconcileError::UnknownCollection(event.collection));
        }
        let session = self
            .sessions
            .get_mut(&event.item)
            .ok_or(ReconcileError::NoSession(event.item))?;
        session.record_resort_target(event.collection);
        trace!(
            item = event.item.0,
            collection = event.collection.get(),
            "resort target recorded"
        );
        Ok(())
    }

    /// Handle the source side of a cross-list move.
    ///
    /// Removes exactly one element from the session's origin collection and
    /// parks it on the session. A singleton collection removes index 0
    /// regardless of the captured origin index (which may be stale);
    /// otherwise the origin index is used, because by the time remove fires
    /// the current visual index may already reflect the destination.
    pub fn on_remove(&mut self, event: &DragEvent, set: &mut SortableSet<T>) -> Result<()> {
        if !set.contains(event.collection) {
            return Err(ReconcileError::UnknownCollection(event.collection));
        }
        let session = self
            .sessions
            .get_mut(&event.item)
            .ok_or(ReconcileError::NoSession(event.item))?;
        if session.phase() != DragPhase::Started {
            return Err(ReconcileError::InvalidPhase {
                item: event.item,
                event: EventName::Remove,
                phase: session.phase(),
            });
        }

        let source = session.origin();
        let model = set.model_mut(source)?;
        let len = model.len();
        let remove_at = if len == 1 {
            0
        } else if session.origin_index() < len {
            session.origin_index()
        } else {
            return Err(ReconcileError::IndexOutOfBounds {
                collection: source,
                index: session.origin_index(),
                len,
            });
        };

        let Some(item) = model.splice(remove_at, 1, Vec::new()).into_iter().next() else {
            return Err(ReconcileError::IndexOutOfBounds {
                collection: source,
                index: remove_at,
                len,
            });
        };
        session.capture_removed(item);
        debug!(
            item = event.item.0,
            source = source.get(),
            index = remove_at,
            "item left source collection"
        );
        Ok(())
    }

    /// Handle the destination side of a cross-list move.
    ///
    /// If the destination engine is disabled, the refusal is recorded and the
    /// model is left untouched; the stop handler rolls the item back. A
    /// receive with no prior remove raises [`ReconcileError::MissingMovedItem`]
    /// rather than inserting an absent value, and a second receive for the
    /// same session raises [`ReconcileError::InvalidPhase`] rather than
    /// double-inserting.
    pub fn on_receive(&mut self, event: &DragEvent, set: &mut SortableSet<T>) -> Result<()> {
        let disabled = set.is_disabled(event.collection)?;
        let session = self
            .sessions
            .get_mut(&event.item)
            .ok_or(ReconcileError::NoSession(event.item))?;
        if session.phase().is_terminal() {
            return Err(ReconcileError::InvalidPhase {
                item: event.item,
                event: EventName::Receive,
                phase: session.phase(),
            });
        }

        if disabled {
            session.mark_rejected();
            debug!(
                item = event.item.0,
                destination = event.collection.get(),
                "receive rejected: destination disabled"
            );
            return Ok(());
        }

        if session.phase() != DragPhase::Relocating {
            return Err(ReconcileError::MissingMovedItem(event.item));
        }
        let len = set.model(event.collection)?.len();
        if event.index > len {
            return Err(ReconcileError::IndexOutOfBounds {
                collection: event.collection,
                index: event.index,
                len,
            });
        }
        let item = session
            .take_moved()
            .ok_or(ReconcileError::MissingMovedItem(event.item))?;
        set.model_mut(event.collection)?
            .splice(event.index, 0, vec![item]);
        session.mark_relocated(event.collection, event.index);
        debug!(
            item = event.item.0,
            destination = event.collection.get(),
            index = event.index,
            "item inserted into destination collection"
        );
        Ok(())
    }

    /// Handle gesture stop: resolve the session and discard it.
    ///
    /// The stop observer is notified unconditionally, before resolution.
    /// Resolution order: rejection rollback (explicit or implicit), then
    /// in-place reorder, then exactly one change notification per affected
    /// collection.
    pub fn on_stop(&mut self, event: &DragEvent, set: &mut SortableSet<T>) -> Result<DragOutcome> {
        let mut session = self
            .sessions
            .remove(&event.item)
            .ok_or(ReconcileError::NoSession(event.item))?;

        if let Some(observer) = self.observer.as_mut() {
            observer.gesture_stopped(event.item);
        }

        let mut affected: Vec<CollectionId> = Vec::with_capacity(2);
        let outcome = match session.phase() {
            DragPhase::Rejected | DragPhase::Relocating => {
                if session.phase() == DragPhase::Relocating {
                    warn!(
                        item = event.item.0,
                        "receive never fired for a relocating session; treating as rejection"
                    );
                }
                let source = session.origin();
                let restored_at = session.origin_index();
                if let Some(item) = session.take_moved() {
                    set.model_mut(source)?.splice(restored_at, 0, vec![item]);
                    affected.push(source);
                }
                DragOutcome::Rejected {
                    source,
                    restored_at,
                }
            }
            DragPhase::Relocated => {
                let source = session.origin();
                // Both recorded together by mark_relocated.
                let (destination, to) = match (session.destination(), session.inserted_at()) {
                    (Some(destination), Some(to)) => (destination, to),
                    _ => {
                        return Err(ReconcileError::InvalidPhase {
                            item: event.item,
                            event: EventName::Stop,
                            phase: session.phase(),
                        });
                    }
                };
                affected.push(source);
                if destination != source {
                    affected.push(destination);
                }
                DragOutcome::Relocated {
                    source,
                    destination,
                    from: session.origin_index(),
                    to,
                }
            }
            DragPhase::Started => match session.resort_target() {
                Some(collection) => {
                    let from = session.origin_index();
                    let to = event.index;
                    let model = set.model_mut(collection)?;
                    let len = model.len();
                    if from >= len || to >= len {
                        return Err(ReconcileError::IndexOutOfBounds {
                            collection,
                            index: from.max(to),
                            len,
                        });
                    }
                    // Remove-then-insert preserves the relative order of all
                    // untouched elements.
                    let moved = model.splice(from, 1, Vec::new());
                    model.splice(to, 0, moved);
                    affected.push(collection);
                    DragOutcome::Resorted {
                        collection,
                        from,
                        to,
                    }
                }
                None => DragOutcome::Unchanged,
            },
        };

        for id in affected {
            set.model_mut(id)?.notify_changed();
        }
        debug!(item = event.item.0, ?outcome, "drag gesture resolved");
        Ok(outcome)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
