//! Position handles into a linked list.

/// A position in a linked list.
///
/// A cursor is a plain `(current, head, tail)` triple of storage indices. It
/// does not borrow the list, so it can be held across mutations; the list
/// methods that take a cursor ([`get`], [`advance`], [`insert_after`], ...)
/// validate it on every call.
///
/// Because the cursor carries the list's sentinel indices, boundary checks
/// need nothing from the list object itself: a cursor at either sentinel can
/// never be dereferenced.
///
/// # Invariants
///
/// A cursor must only be used with the list that produced it. Using it with
/// another list is not detected and yields unspecified (but memory-safe)
/// results. A cursor whose node has been erased is stale; passing it back is
/// reported as an error when the slot is vacant and is otherwise unspecified.
///
/// [`get`]: crate::SinglyLinked::get
/// [`advance`]: crate::SinglyLinked::advance
/// [`insert_after`]: crate::SinglyLinked::insert_after
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    current: usize,
    head: usize,
    tail: usize,
}

impl Cursor {
    #[inline]
    pub(crate) const fn new(current: usize, head: usize, tail: usize) -> Self {
        Self {
            current,
            head,
            tail,
        }
    }

    /// Returns the storage index of the node under the cursor.
    #[inline]
    pub const fn index(&self) -> usize {
        self.current
    }

    /// Returns `true` if the cursor sits on the head sentinel.
    #[inline]
    pub const fn is_before_begin(&self) -> bool {
        self.current == self.head
    }

    /// Returns `true` if the cursor sits on the tail sentinel.
    #[inline]
    pub const fn is_end(&self) -> bool {
        self.current == self.tail
    }

    /// Returns `true` if the cursor sits on either sentinel.
    #[inline]
    pub const fn is_sentinel(&self) -> bool {
        self.is_before_begin() || self.is_end()
    }
}
