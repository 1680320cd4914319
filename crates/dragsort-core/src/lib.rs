#![forbid(unsafe_code)]

//! Core: drag-session reconciliation for sortable lists.
//!
//! # Role in dragsort
//! `dragsort-core` is the model layer. It owns the transient per-gesture
//! state (one [`session::DragSession`] per dragged item) and the state
//! machine that mutates the backing collections exactly once per gesture,
//! with rollback when a drop target refuses the item.
//!
//! # Primary responsibilities
//! - **DragEvent**: the `(item, collection, index)` context a drag engine
//!   delivers with each gesture event.
//! - **DragSession**: transient record created at drag start, consumed at
//!   drag stop, tracking what happened to one dragged item.
//! - **SortableSet**: registry of the connected collections (model binding
//!   plus engine handle) that may participate in a gesture.
//! - **Reconciler**: the five gesture handlers (`start`, `update`,
//!   `receive`, `remove`, `stop`) and the resolution algorithm.
//!
//! # How it fits in the system
//! An external drag-and-drop engine decides *when* gestures happen and
//! delivers events; `dragsort-runtime` installs the handlers and keeps the
//! engine's configuration in sync. This crate never touches rendering,
//! hit-testing, or pointer input.

pub mod error;
pub mod event;
pub mod model;
pub mod reconcile;
pub mod registry;
pub mod session;

pub use error::{ReconcileError, Result};
pub use event::{CollectionId, DragEvent, EventName, ItemId};
pub use model::{ModelBinding, VecBinding};
pub use reconcile::{DragOutcome, GestureObserver, Reconciler};
pub use registry::{EngineOption, NullEngine, SortEngine, SortableSet};
pub use session::{DragPhase, DragSession};

#[cfg(any(test, feature = "test-helpers"))]
pub use registry::{StubEngine, StubState};
