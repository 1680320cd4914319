#![forbid(unsafe_code)]

//! Registry of connected sortable collections.
//!
//! Each registered collection pairs a model binding with a handle to the
//! external drag-and-drop engine widget that renders it. The reconciler
//! reads engine state (is the drop target disabled?) through this registry;
//! the runtime's config synchronizer writes engine state (options,
//! enable/disable) through it.

use std::collections::HashMap;

use ahash::RandomState;

use crate::error::{ReconcileError, Result};
use crate::event::CollectionId;
use crate::model::ModelBinding;

/// A plain option value applied to a drag engine.
///
/// `Callback` marks that a handler chain is installed for an event-name
/// option; the chain itself lives host-side, the engine only needs to know
/// the option is occupied.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineOption {
    /// Boolean option (e.g. `disabled`).
    Flag(bool),
    /// Numeric option (e.g. `opacity`, `zIndex`).
    Number(f64),
    /// Textual option (e.g. `axis`, `placeholder`).
    Text(String),
    /// An event-name option now routed through a handler chain.
    Callback,
}

/// The external drag-and-drop engine surface for one collection.
///
/// The engine owns drag visuals, hit-testing, and pointer handling; this
/// trait is only the configuration/state seam the reconciliation core needs.
pub trait SortEngine {
    /// Apply one configuration option.
    fn set_option(&mut self, name: &str, value: EngineOption);

    /// Allow drags to start from and drop into this collection.
    fn enable(&mut self);

    /// Refuse drops into this collection.
    fn disable(&mut self);

    /// Whether the collection currently refuses drops.
    fn is_disabled(&self) -> bool;

    /// Resynchronize the engine's visual state with the backing collection.
    ///
    /// Called when the backing collection is replaced externally, outside
    /// any gesture.
    fn refresh(&mut self);
}

/// Always-enabled engine for headless hosts and plain logical lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEngine;

impl SortEngine for NullEngine {
    fn set_option(&mut self, _name: &str, _value: EngineOption) {}
    fn enable(&mut self) {}
    fn disable(&mut self) {}
    fn is_disabled(&self) -> bool {
        false
    }
    fn refresh(&mut self) {}
}

/// Observable state of a [`StubEngine`].
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Clone, Default)]
pub struct StubState {
    /// Every `set_option` call, in order.
    pub options: Vec<(String, EngineOption)>,
    /// Current disabled state.
    pub disabled: bool,
    /// Number of `refresh` calls.
    pub refresh_count: u32,
}

/// Recording engine for tests: remembers option writes and toggles.
///
/// State lives behind an `Rc<RefCell<..>>` so tests keep a handle after the
/// engine is boxed into a [`SortableSet`]. Single-threaded by design, like
/// everything else in the gesture model.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Clone, Default)]
pub struct StubEngine {
    state: std::rc::Rc<std::cell::RefCell<StubState>>,
}

#[cfg(any(test, feature = "test-helpers"))]
impl StubEngine {
    /// Create a stub engine plus the handle to observe it with.
    #[must_use]
    pub fn new() -> (Self, std::rc::Rc<std::cell::RefCell<StubState>>) {
        let engine = Self::default();
        let state = engine.state.clone();
        (engine, state)
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl SortEngine for StubEngine {
    fn set_option(&mut self, name: &str, value: EngineOption) {
        self.state
            .borrow_mut()
            .options
            .push((name.to_string(), value));
    }

    fn enable(&mut self) {
        self.state.borrow_mut().disabled = false;
    }

    fn disable(&mut self) {
        self.state.borrow_mut().disabled = true;
    }

    fn is_disabled(&self) -> bool {
        self.state.borrow().disabled
    }

    fn refresh(&mut self) {
        self.state.borrow_mut().refresh_count += 1;
    }
}

struct Slot<T> {
    model: Box<dyn ModelBinding<T>>,
    engine: Box<dyn SortEngine>,
}

/// The set of sortable collections connected for drag-and-drop.
///
/// Collections that may exchange items during one gesture must be registered
/// in the same set; the reconciler resolves [`CollectionId`]s against it.
pub struct SortableSet<T> {
    slots: HashMap<CollectionId, Slot<T>, RandomState>,
    next_id: u64,
}

impl<T> Default for SortableSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SortableSet<T> {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: HashMap::default(),
            next_id: 0,
        }
    }

    /// Register a collection, pairing its model with its engine handle.
    pub fn register(
        &mut self,
        model: Box<dyn ModelBinding<T>>,
        engine: Box<dyn SortEngine>,
    ) -> CollectionId {
        let id = CollectionId::new(self.next_id);
        self.next_id += 1;
        self.slots.insert(id, Slot { model, engine });
        id
    }

    /// Whether `id` names a registered collection.
    #[must_use]
    pub fn contains(&self, id: CollectionId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Borrow a collection's model.
    pub fn model(&self, id: CollectionId) -> Result<&dyn ModelBinding<T>> {
        self.slots
            .get(&id)
            .map(|slot| slot.model.as_ref())
            .ok_or(ReconcileError::UnknownCollection(id))
    }

    /// Mutably borrow a collection's model.
    pub fn model_mut(&mut self, id: CollectionId) -> Result<&mut dyn ModelBinding<T>> {
        let slot = self
            .slots
            .get_mut(&id)
            .ok_or(ReconcileError::UnknownCollection(id))?;
        Ok(slot.model.as_mut())
    }

    /// Mutably borrow a collection's engine handle.
    pub fn engine_mut(&mut self, id: CollectionId) -> Result<&mut dyn SortEngine> {
        let slot = self
            .slots
            .get_mut(&id)
            .ok_or(ReconcileError::UnknownCollection(id))?;
        Ok(slot.engine.as_mut())
    }

    /// Whether a collection's engine currently refuses drops.
    pub fn is_disabled(&self, id: CollectionId) -> Result<bool> {
        self.slots
            .get(&id)
            .map(|slot| slot.engine.is_disabled())
            .ok_or(ReconcileError::UnknownCollection(id))
    }

    /// Replace a collection's contents from outside any gesture.
    ///
    /// Splices the new items in, then asks the engine to refresh so visual
    /// and model state resynchronize without a drag.
    pub fn replace_items(&mut self, id: CollectionId, items: Vec<T>) -> Result<()> {
        let slot = self
            .slots
            .get_mut(&id)
            .ok_or(ReconcileError::UnknownCollection(id))?;
        let len = slot.model.len();
        slot.model.splice(0, len, items);
        slot.model.notify_changed();
        slot.engine.refresh();
        Ok(())
    }
}

impl<T> std::fmt::Debug for SortableSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortableSet")
            .field("collections", &self.slots.len())
            .finish()
    }
}
