#![forbid(unsafe_code)]

//! Ordered handler chains with an explicit continue/stop result.
//!
//! Composition is positional: links run front-to-back, and a link returning
//! [`Control::Stop`] vetoes everything behind it. "No opinion" is expressed
//! by returning [`Control::Continue`], never by a falsy sentinel, so a
//! handler that merely has nothing to add cannot accidentally silence the
//! handlers installed after it.
//!
//! The reconciliation link for each gesture event is prepended, which keeps
//! it first regardless of when user-supplied handlers arrive.

use dragsort_core::{DragEvent, ReconcileError, SortableSet};

/// Whether the rest of a handler chain should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Let the next link run.
    Continue,
    /// Veto every link behind this one.
    Stop,
}

/// One link in a handler chain.
pub type Handler<T> =
    Box<dyn FnMut(&DragEvent, &mut SortableSet<T>) -> Result<Control, ReconcileError>>;

/// An ordered list of handlers for one gesture event name.
pub struct HandlerChain<T> {
    links: Vec<Handler<T>>,
}

impl<T> Default for HandlerChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HandlerChain<T> {
    /// Create an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self { links: Vec::new() }
    }

    /// Append a handler to run after every existing link.
    pub fn push(&mut self, handler: Handler<T>) {
        self.links.push(handler);
    }

    /// Insert a handler ahead of every existing link.
    pub fn prepend(&mut self, handler: Handler<T>) {
        self.links.insert(0, handler);
    }

    /// Number of links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the chain has no links.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Run the chain front-to-back.
    ///
    /// A link returning [`Control::Stop`] short-circuits the rest and the
    /// chain reports `Stop`; an error aborts the chain and propagates. An
    /// empty chain continues.
    pub fn invoke(
        &mut self,
        event: &DragEvent,
        set: &mut SortableSet<T>,
    ) -> Result<Control, ReconcileError> {
        for link in &mut self.links {
            if link(event, set)? == Control::Stop {
                return Ok(Control::Stop);
            }
        }
        Ok(Control::Continue)
    }
}

impl<T> std::fmt::Debug for HandlerChain<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerChain")
            .field("links", &self.links.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dragsort_core::{CollectionId, ItemId};

    use std::cell::RefCell;
    use std::rc::Rc;

    fn event() -> DragEvent {
        DragEvent::new(ItemId(1), CollectionId::new(0), 0)
    }

    fn recording(
        log: &Rc<RefCell<Vec<&'static str>>>,
        tag: &'static str,
        result: Control,
    ) -> Handler<u8> {
        let log = log.clone();
        Box::new(move |_event, _set| {
            log.borrow_mut().push(tag);
            Ok(result)
        })
    }

    #[test]
    fn links_run_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut chain = HandlerChain::new();
        chain.push(recording(&log, "first", Control::Continue));
        chain.push(recording(&log, "second", Control::Continue));

        let mut set = SortableSet::new();
        let control = chain.invoke(&event(), &mut set).unwrap();
        assert_eq!(control, Control::Continue);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn stop_vetoes_later_links() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut chain = HandlerChain::new();
        chain.push(recording(&log, "veto", Control::Stop));
        chain.push(recording(&log, "never", Control::Continue));

        let mut set = SortableSet::new();
        let control = chain.invoke(&event(), &mut set).unwrap();
        assert_eq!(control, Control::Stop);
        assert_eq!(*log.borrow(), vec!["veto"]);
    }

    #[test]
    fn prepend_runs_before_existing_links() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut chain = HandlerChain::new();
        chain.push(recording(&log, "user", Control::Continue));
        chain.prepend(recording(&log, "reconcile", Control::Continue));

        let mut set = SortableSet::new();
        chain.invoke(&event(), &mut set).unwrap();
        assert_eq!(*log.borrow(), vec!["reconcile", "user"]);
    }

    #[test]
    fn error_aborts_the_chain() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut chain: HandlerChain<u8> = HandlerChain::new();
        chain.push(Box::new(|event, _set| {
            Err(ReconcileError::NoSession(event.item))
        }));
        chain.push(recording(&log, "never", Control::Continue));

        let mut set = SortableSet::new();
        let err = chain.invoke(&event(), &mut set).unwrap_err();
        assert_eq!(err, ReconcileError::NoSession(ItemId(1)));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn empty_chain_continues() {
        let mut chain: HandlerChain<u8> = HandlerChain::new();
        let mut set = SortableSet::new();
        assert_eq!(chain.invoke(&event(), &mut set).unwrap(), Control::Continue);
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
    }
}
