#![forbid(unsafe_code)]

//! Backing collection bindings.
//!
//! The reconciler never assumes a particular storage, only index-addressable
//! splice semantics: remove a contiguous run, insert new items in its place,
//! return what was removed. [`VecBinding`] is the stock `Vec`-backed binding;
//! hosts with reactive stores implement [`ModelBinding`] themselves.

/// An ordered, mutable, index-addressable sequence of items.
///
/// `notify_changed` is the "contents changed, resynchronize dependents" hook;
/// the reconciler calls it exactly once per affected collection when a
/// gesture resolves, never once per intermediate event.
pub trait ModelBinding<T> {
    /// The current contents, in order.
    fn items(&self) -> &[T];

    /// Remove `delete_count` items starting at `index`, insert `insert` in
    /// their place, and return the removed items.
    ///
    /// Out-of-range arguments clamp to the sequence bounds (the reconciler
    /// bounds-checks before mutating, so clamping is a backstop, not a
    /// correctness mechanism).
    fn splice(&mut self, index: usize, delete_count: usize, insert: Vec<T>) -> Vec<T>;

    /// Tell dependent views/state that the contents changed.
    fn notify_changed(&mut self);

    /// Number of items.
    fn len(&self) -> usize {
        self.items().len()
    }

    /// Whether the collection is empty.
    fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// `Vec`-backed model binding with a change revision counter.
///
/// The revision increments on every `notify_changed`, which lets hosts (and
/// tests) observe how many times a gesture resolution touched the binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VecBinding<T> {
    items: Vec<T>,
    revision: u64,
}

impl<T> VecBinding<T> {
    /// Create a binding over the given items.
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self { items, revision: 0 }
    }

    /// How many times `notify_changed` has fired.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Consume the binding, returning the items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> ModelBinding<T> for VecBinding<T> {
    fn items(&self) -> &[T] {
        &self.items
    }

    fn splice(&mut self, index: usize, delete_count: usize, insert: Vec<T>) -> Vec<T> {
        let start = index.min(self.items.len());
        let end = start.saturating_add(delete_count).min(self.items.len());
        self.items.splice(start..end, insert).collect()
    }

    fn notify_changed(&mut self) {
        self.revision += 1;
    }
}

impl<T> From<Vec<T>> for VecBinding<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splice_removes_and_returns() {
        let mut b = VecBinding::new(vec!['a', 'b', 'c', 'd']);
        let removed = b.splice(1, 2, Vec::new());
        assert_eq!(removed, vec!['b', 'c']);
        assert_eq!(b.items(), &['a', 'd']);
    }

    #[test]
    fn splice_inserts_without_removal() {
        let mut b = VecBinding::new(vec![1, 4]);
        let removed = b.splice(1, 0, vec![2, 3]);
        assert!(removed.is_empty());
        assert_eq!(b.items(), &[1, 2, 3, 4]);
    }

    #[test]
    fn splice_replaces_in_place() {
        let mut b = VecBinding::new(vec!["x", "y", "z"]);
        let removed = b.splice(1, 1, vec!["Y"]);
        assert_eq!(removed, vec!["y"]);
        assert_eq!(b.items(), &["x", "Y", "z"]);
    }

    #[test]
    fn splice_clamps_out_of_range() {
        let mut b = VecBinding::new(vec![1, 2]);
        // Start beyond the end appends.
        let removed = b.splice(10, 5, vec![3]);
        assert!(removed.is_empty());
        assert_eq!(b.items(), &[1, 2, 3]);

        // Delete count clamps to the tail.
        let removed = b.splice(1, 100, Vec::new());
        assert_eq!(removed, vec![2, 3]);
        assert_eq!(b.items(), &[1]);
    }

    #[test]
    fn notify_bumps_revision() {
        let mut b: VecBinding<u8> = VecBinding::new(Vec::new());
        assert_eq!(b.revision(), 0);
        b.notify_changed();
        b.notify_changed();
        assert_eq!(b.revision(), 2);
    }

    #[test]
    fn len_tracks_contents() {
        let mut b = VecBinding::new(vec![1, 2, 3]);
        assert_eq!(b.len(), 3);
        assert!(!b.is_empty());
        b.splice(0, 3, Vec::new());
        assert!(b.is_empty());
    }
}
