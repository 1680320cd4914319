#![forbid(unsafe_code)]

//! Runtime glue: handler chains and live configuration sync.
//!
//! # Role in dragsort
//! `dragsort-runtime` sits between an external drag-and-drop engine and the
//! reconciliation core. It owns no gesture state of its own; it guarantees
//! that the reconciler's handler is always the first link in the chain for
//! each gesture event, and that the engine's live configuration tracks two
//! external signals: a declarative option map and an enabled/disabled
//! boolean.
//!
//! # Primary responsibilities
//! - **HandlerChain**: ordered, typed handler composition with an explicit
//!   continue/stop result instead of truthiness.
//! - **SortOptions**: the declarative option map, merged from process-wide
//!   defaults and component-local values.
//! - **ConfigSynchronizer**: one per sortable collection; installs the
//!   reconciliation links, reacts to option-map and enabled-signal changes,
//!   and dispatches engine events through the chains.

pub mod chain;
pub mod options;
pub mod sync;

pub use chain::{Control, Handler, HandlerChain};
pub use options::{OptionValue, SortOptions};
pub use sync::ConfigSynchronizer;
