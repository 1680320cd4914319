#![forbid(unsafe_code)]

//! Reconciliation error taxonomy.
//!
//! Every variant here indicates a host/engine contract violation, not a
//! recoverable user outcome. A drop onto a disabled destination is *not* an
//! error: it resolves to [`DragOutcome::Rejected`] through the rollback path.
//!
//! [`DragOutcome::Rejected`]: crate::reconcile::DragOutcome::Rejected

use thiserror::Error;

use crate::event::{CollectionId, EventName, ItemId};
use crate::session::DragPhase;

/// Errors raised by the reconciliation handlers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReconcileError {
    /// A handler was invoked without a prior, unresolved session for the
    /// item (e.g. `receive` before `start`).
    #[error("no unresolved drag session for item {0:?}")]
    NoSession(ItemId),

    /// The session exists but is in a phase that cannot accept this event
    /// (e.g. a spurious second `receive`, or `remove` after `remove`).
    #[error("drag session for item {item:?} is in phase {phase:?} and cannot accept {event}")]
    InvalidPhase {
        /// The dragged item.
        item: ItemId,
        /// The event that arrived out of order.
        event: EventName,
        /// The session's current phase.
        phase: DragPhase,
    },

    /// `receive` would insert, but no prior `remove` captured the moved
    /// value. Never silently insert an absent value.
    #[error("receive for item {0:?} arrived before remove captured the moved value")]
    MissingMovedItem(ItemId),

    /// The event referenced a collection that was never registered.
    #[error("drag event referenced unregistered collection {0:?}")]
    UnknownCollection(CollectionId),

    /// An index captured earlier no longer fits the collection it targets.
    #[error("index {index} out of bounds for collection {collection:?} of length {len}")]
    IndexOutOfBounds {
        /// The collection being mutated.
        collection: CollectionId,
        /// The offending index.
        index: usize,
        /// The collection's length at the time of the mutation.
        len: usize,
    },
}

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, ReconcileError>;
