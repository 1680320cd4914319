#![forbid(unsafe_code)]

//! Live configuration sync between the option map and a drag engine.
//!
//! One [`ConfigSynchronizer`] serves one sortable collection. It guarantees
//! two things for the collection's lifetime:
//!
//! 1. For every gesture event the reconciler cares about, the reconciliation
//!    link is the first link in that event's chain, and stays first through
//!    any number of option-map changes.
//! 2. The engine's live configuration mirrors the option map: plain values
//!    pass straight through, event-name keys are occupied by a callback
//!    marker while their handlers run host-side.
//!
//! # Failure Modes
//!
//! A handler installed under a key that is not a gesture event name is
//! dropped with a warning; the engine never sees it. Errors raised by the
//! reconciliation link abort the dispatch and propagate to the caller, so a
//! user handler never observes a collection the reconciler refused to touch.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use dragsort_core::{
    CollectionId, DragEvent, EngineOption, EventName, ReconcileError, Reconciler, SortableSet,
};
use tracing::{debug, warn};

use crate::chain::{Control, Handler, HandlerChain};
use crate::options::{OptionValue, SortOptions};

/// Build the reconciliation link for one gesture event name.
///
/// The link always continues so user handlers behind it get to run; a user
/// handler can veto later links but never unseat the reconciler.
fn reconcile_link<T: 'static>(
    name: EventName,
    reconciler: Rc<RefCell<Reconciler<T>>>,
) -> Handler<T> {
    Box::new(move |event, set| {
        let mut rec = reconciler.borrow_mut();
        match name {
            EventName::Start => rec.on_start(event, set)?,
            EventName::Update => rec.on_update(event, set)?,
            EventName::Remove => rec.on_remove(event, set)?,
            EventName::Receive => rec.on_receive(event, set)?,
            EventName::Stop => {
                let outcome = rec.on_stop(event, set)?;
                debug!(item = event.item.0, ?outcome, "gesture resolved");
            }
            EventName::Over => {}
        }
        Ok(Control::Continue)
    })
}

/// Per-collection glue between the declarative option map, the handler
/// chains, and the engine's live configuration.
pub struct ConfigSynchronizer<T> {
    collection: CollectionId,
    reconciler: Rc<RefCell<Reconciler<T>>>,
    chains: BTreeMap<EventName, HandlerChain<T>>,
}

impl<T> std::fmt::Debug for ConfigSynchronizer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigSynchronizer")
            .field("collection", &self.collection.get())
            .field("chains", &self.chains.len())
            .finish()
    }
}

impl<T: 'static> ConfigSynchronizer<T> {
    /// Wire a collection up: seed the reconciliation links, merge the option
    /// maps (local entries win), install user handlers behind the links, and
    /// push every option to the engine.
    pub fn new(
        collection: CollectionId,
        reconciler: Rc<RefCell<Reconciler<T>>>,
        defaults: SortOptions<T>,
        local: SortOptions<T>,
        set: &mut SortableSet<T>,
    ) -> Result<Self, ReconcileError> {
        let mut chains = BTreeMap::new();
        for name in EventName::RECONCILED {
            let mut chain = HandlerChain::new();
            chain.push(reconcile_link(name, reconciler.clone()));
            chains.insert(name, chain);
        }

        let mut sync = Self {
            collection,
            reconciler,
            chains,
        };
        // The reconciled event options are occupied whether or not the user
        // supplied handlers for them.
        let engine = set.engine_mut(collection)?;
        for name in EventName::RECONCILED {
            engine.set_option(name.as_str(), EngineOption::Callback);
        }
        sync.apply(SortOptions::merged(defaults, local), set)?;
        Ok(sync)
    }

    /// The collection this synchronizer serves.
    #[must_use]
    pub fn collection(&self) -> CollectionId {
        self.collection
    }

    /// React to a replaced option map.
    ///
    /// Each event-name key mentioned in `options` has its chain rebuilt from
    /// scratch: reconciliation link first, then the new handler. Keys absent
    /// from `options` keep their existing chains. Plain values pass through
    /// to the engine as on construction.
    pub fn options_changed(
        &mut self,
        options: SortOptions<T>,
        set: &mut SortableSet<T>,
    ) -> Result<(), ReconcileError> {
        for (key, value) in options.into_entries() {
            match value {
                OptionValue::Handler(handler) => match EventName::from_key(&key) {
                    Some(name) => {
                        let mut chain = HandlerChain::new();
                        if name.is_reconciled() {
                            chain.push(reconcile_link(name, self.reconciler.clone()));
                        }
                        chain.push(handler);
                        self.chains.insert(name, chain);
                        set.engine_mut(self.collection)?
                            .set_option(&key, EngineOption::Callback);
                    }
                    None => {
                        warn!(key = %key, "handler under a non-event option key; dropped");
                    }
                },
                value => {
                    set.engine_mut(self.collection)?
                        .set_option(&key, value.engine_value());
                }
            }
        }
        Ok(())
    }

    /// React to the enabled signal.
    pub fn set_enabled(
        &mut self,
        enabled: bool,
        set: &mut SortableSet<T>,
    ) -> Result<(), ReconcileError> {
        let engine = set.engine_mut(self.collection)?;
        if enabled {
            engine.enable();
        } else {
            engine.disable();
        }
        debug!(
            collection = self.collection.get(),
            enabled, "enabled signal changed"
        );
        Ok(())
    }

    /// Run the chain for one engine event.
    ///
    /// An event name with no chain (an `over` nobody subscribed to)
    /// continues.
    pub fn dispatch(
        &mut self,
        name: EventName,
        event: &DragEvent,
        set: &mut SortableSet<T>,
    ) -> Result<Control, ReconcileError> {
        match self.chains.get_mut(&name) {
            Some(chain) => chain.invoke(event, set),
            None => Ok(Control::Continue),
        }
    }

    /// Install user handlers and plain options from a merged map.
    ///
    /// Handlers append behind whatever the chain already holds, so the
    /// reconciliation link seeded at construction stays first.
    fn apply(
        &mut self,
        options: SortOptions<T>,
        set: &mut SortableSet<T>,
    ) -> Result<(), ReconcileError> {
        for (key, value) in options.into_entries() {
            match value {
                OptionValue::Handler(handler) => match EventName::from_key(&key) {
                    Some(name) => {
                        self.chains.entry(name).or_default().push(handler);
                        set.engine_mut(self.collection)?
                            .set_option(&key, EngineOption::Callback);
                    }
                    None => {
                        warn!(key = %key, "handler under a non-event option key; dropped");
                    }
                },
                value => {
                    set.engine_mut(self.collection)?
                        .set_option(&key, value.engine_value());
                }
            }
        }
        Ok(())
    }
}
