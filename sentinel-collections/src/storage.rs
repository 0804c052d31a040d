//! Node allocator abstraction for the linked lists.
//!
//! A list never allocates nodes directly. It asks its [`Storage`] for a slot,
//! receives a stable index, and links nodes to each other by index. Removing
//! an index hands the value back and frees the slot for reuse.

/// Marker for an absent link.
///
/// Used for `tail.next` on linear lists and `head.prev` on the linear doubly
/// linked list. No storage ever hands out this index.
pub const NIL: usize = usize::MAX;

/// Slab-like storage with stable indices.
///
/// # Requirements
///
/// Implementations must provide:
/// - **Stable indices**: an index remains valid until explicitly removed
/// - **O(1)** insert, remove, get operations
/// - **No aliasing**: two live values never share an index
///
/// `slab::Slab<T>` is the default implementation. Custom pools can implement
/// this trait to control where nodes live.
///
/// # Example
///
/// ```
/// use sentinel_collections::Storage;
///
/// let mut storage: slab::Slab<u64> = Storage::with_capacity(4);
/// let idx = Storage::insert(&mut storage, 42);
/// assert_eq!(Storage::get(&storage, idx), Some(&42));
/// assert_eq!(Storage::remove(&mut storage, idx), Some(42));
/// ```
pub trait Storage<T> {
    /// Creates storage with room for at least `capacity` values.
    fn with_capacity(capacity: usize) -> Self
    where
        Self: Sized;

    /// Stores a value, returning its stable index.
    fn insert(&mut self, value: T) -> usize;

    /// Removes and returns the value at `index`, if present.
    fn remove(&mut self, index: usize) -> Option<T>;

    /// Returns a reference to the value at `index`, if present.
    fn get(&self, index: usize) -> Option<&T>;

    /// Returns a mutable reference to the value at `index`, if present.
    fn get_mut(&mut self, index: usize) -> Option<&mut T>;

    /// Returns the number of occupied slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slots are occupied.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// slab::Slab implementation
// =============================================================================

impl<T> Storage<T> for slab::Slab<T> {
    #[inline]
    fn with_capacity(capacity: usize) -> Self {
        slab::Slab::with_capacity(capacity)
    }

    #[inline]
    fn insert(&mut self, value: T) -> usize {
        let index = slab::Slab::insert(self, value);
        debug_assert_ne!(index, NIL);
        index
    }

    #[inline]
    fn remove(&mut self, index: usize) -> Option<T> {
        self.try_remove(index)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        slab::Slab::get(self, index)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        slab::Slab::get_mut(self, index)
    }

    #[inline]
    fn len(&self) -> usize {
        slab::Slab::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let mut storage: slab::Slab<u64> = Storage::with_capacity(16);

        let idx = Storage::insert(&mut storage, 42);
        assert_eq!(Storage::len(&storage), 1);
        assert_eq!(Storage::get(&storage, idx), Some(&42));

        assert_eq!(Storage::remove(&mut storage, idx), Some(42));
        assert_eq!(Storage::get(&storage, idx), None);
        assert!(Storage::is_empty(&storage));
    }

    #[test]
    fn get_mut() {
        let mut storage: slab::Slab<u64> = Storage::with_capacity(16);

        let idx = Storage::insert(&mut storage, 10);
        *Storage::get_mut(&mut storage, idx).unwrap() = 20;

        assert_eq!(Storage::get(&storage, idx), Some(&20));
    }

    #[test]
    fn remove_nonexistent() {
        let mut storage: slab::Slab<u64> = Storage::with_capacity(16);

        let idx = Storage::insert(&mut storage, 42);
        Storage::remove(&mut storage, idx);

        // Double remove returns None
        assert_eq!(Storage::remove(&mut storage, idx), None);
        assert_eq!(Storage::remove(&mut storage, NIL), None);
    }

    #[test]
    fn slot_reuse() {
        let mut storage: slab::Slab<u64> = Storage::with_capacity(4);

        let idx1 = Storage::insert(&mut storage, 1);
        Storage::remove(&mut storage, idx1);

        let idx2 = Storage::insert(&mut storage, 2);
        assert_eq!(idx1, idx2);
    }
}
