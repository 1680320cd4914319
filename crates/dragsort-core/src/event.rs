#![forbid(unsafe_code)]

//! Gesture event types and identities.
//!
//! Sessions are looked up by [`ItemId`], an explicit host-assigned identity,
//! rather than by annotating the dragged element itself. Collections are
//! addressed by [`CollectionId`], assigned when a collection is registered
//! with the [`SortableSet`](crate::registry::SortableSet).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identity of a draggable visual element.
///
/// The host assigns these (e.g. from its hit-test ids). The same id must be
/// delivered for every event of one gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemId(pub u64);

/// Identity of one registered sortable collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollectionId(u64);

impl CollectionId {
    /// Create a collection id from a raw value.
    ///
    /// Normally ids come from [`SortableSet::register`]; this constructor
    /// exists for hosts that keep their own collection registry.
    ///
    /// [`SortableSet::register`]: crate::registry::SortableSet::register
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// The named gesture events a drag engine emits.
///
/// `Over` is reserved: the runtime accepts a user handler for it but the
/// reconciler installs no handling of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EventName {
    Start,
    Stop,
    Update,
    Receive,
    Remove,
    Over,
}

impl EventName {
    /// All event names the reconciler installs a handler for.
    pub const RECONCILED: [EventName; 5] = [
        EventName::Start,
        EventName::Stop,
        EventName::Update,
        EventName::Receive,
        EventName::Remove,
    ];

    /// The option-map key for this event.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EventName::Start => "start",
            EventName::Stop => "stop",
            EventName::Update => "update",
            EventName::Receive => "receive",
            EventName::Remove => "remove",
            EventName::Over => "over",
        }
    }

    /// Parse an option-map key into an event name.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "start" => Some(EventName::Start),
            "stop" => Some(EventName::Stop),
            "update" => Some(EventName::Update),
            "receive" => Some(EventName::Receive),
            "remove" => Some(EventName::Remove),
            "over" => Some(EventName::Over),
            _ => None,
        }
    }

    /// Whether the reconciler installs its own handler for this event.
    #[must_use]
    pub const fn is_reconciled(self) -> bool {
        !matches!(self, EventName::Over)
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Context delivered with every gesture event.
///
/// `index` is the item's current visual index in `collection` at the moment
/// the event fires. Identity of an item inside a collection is positional;
/// only `item` is stable across the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEvent {
    /// The dragged element.
    pub item: ItemId,
    /// The collection the event fired on.
    pub collection: CollectionId,
    /// The item's current visual index in that collection.
    pub index: usize,
}

impl DragEvent {
    /// Create an event context.
    #[must_use]
    pub const fn new(item: ItemId, collection: CollectionId, index: usize) -> Self {
        Self {
            item,
            collection,
            index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_name_round_trips_through_keys() {
        for name in [
            EventName::Start,
            EventName::Stop,
            EventName::Update,
            EventName::Receive,
            EventName::Remove,
            EventName::Over,
        ] {
            assert_eq!(EventName::from_key(name.as_str()), Some(name));
        }
    }

    #[test]
    fn unknown_key_is_not_an_event_name() {
        assert_eq!(EventName::from_key("axis"), None);
        assert_eq!(EventName::from_key(""), None);
    }

    #[test]
    fn over_is_not_reconciled() {
        assert!(!EventName::Over.is_reconciled());
        for name in EventName::RECONCILED {
            assert!(name.is_reconciled());
        }
    }
}
