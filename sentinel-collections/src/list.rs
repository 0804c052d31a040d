//! Doubly linked lists bounded by two sentinel nodes.
//!
//! Same layout as [`forward`](crate::forward) with a backward link on every
//! node, so both ends are O(1) and cursors can step in either direction.
//!
//! ```text
//! linear:    (none) <- head <-> a <-> b <-> tail -> (none)
//! circular:  ... tail <-> head <-> a <-> b <-> tail <-> head ...
//! ```
//!
//! # Example
//!
//! ```
//! use sentinel_collections::{Error, List};
//!
//! let mut list: List<u32> = List::from([1, 2, 4]);
//!
//! // insert places the value before the cursor
//! let four = list.advance_by(list.begin(), 2)?;
//! let three = list.insert(four, 3)?;
//! assert_eq!(list.get(three), Ok(&3));
//!
//! // Walk backward from end()
//! let mut cursor = list.retreat(list.end())?;
//! assert_eq!(list.get(cursor), Ok(&4));
//! cursor = list.retreat_by(cursor, 3)?;
//! assert_eq!(list.get(cursor), Ok(&1));
//!
//! // Nothing before the first element on a linear list
//! assert_eq!(list.retreat(cursor), Err(Error::InvalidPosition));
//!
//! assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), vec![4, 3, 2, 1]);
//! # Ok::<(), Error>(())
//! ```

use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem;

use crate::node::{CIRCULAR, DoublyNode, LINEAR};
use crate::storage::{NIL, Storage};
use crate::{Cursor, Error, Result};

/// A doubly linked list with open ends: `head.prev` and `tail.next` are
/// absent.
pub type List<T, S = slab::Slab<DoublyNode<T>>> = DoublyLinked<T, LINEAR, S>;

/// A doubly linked list whose sentinels link to each other, closing a ring.
pub type CircularList<T, S = slab::Slab<DoublyNode<T>>> = DoublyLinked<T, CIRCULAR, S>;

/// A sentinel-bounded doubly linked list.
///
/// Usually named through [`List`] or [`CircularList`].
///
/// # Type Parameters
///
/// - `T`: Element type
/// - `RING`: [`LINEAR`](crate::LINEAR) or [`CIRCULAR`](crate::CIRCULAR)
/// - `S`: Node storage (default `slab::Slab<DoublyNode<T>>`)
pub struct DoublyLinked<T, const RING: bool, S = slab::Slab<DoublyNode<T>>>
where
    S: Storage<DoublyNode<T>>,
{
    nodes: S,
    head: usize,
    tail: usize,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T, const RING: bool, S> DoublyLinked<T, RING, S>
where
    S: Storage<DoublyNode<T>>,
{
    /// Creates an empty list. Allocates the two sentinels.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list whose storage has room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = S::with_capacity(capacity.saturating_add(2));
        let head = nodes.insert(DoublyNode::sentinel());
        let tail = nodes.insert(DoublyNode::sentinel());

        let mut list = Self {
            nodes,
            head,
            tail,
            len: 0,
            _marker: PhantomData,
        };
        list.link_sentinels();
        list
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the node storage, sentinels included.
    #[inline]
    pub fn storage(&self) -> &S {
        &self.nodes
    }

    // ========================================================================
    // Cursors
    // ========================================================================

    /// Returns a cursor at the head sentinel.
    #[inline]
    pub fn before_begin(&self) -> Cursor {
        self.cursor(self.head)
    }

    /// Returns a cursor at the first element, or [`end`](Self::end) if empty.
    #[inline]
    pub fn begin(&self) -> Cursor {
        self.cursor(self.node(self.head).next)
    }

    /// Returns a cursor at the tail sentinel.
    #[inline]
    pub fn end(&self) -> Cursor {
        self.cursor(self.tail)
    }

    /// Dereferences a cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRangeDereference`] if the cursor is at a sentinel
    /// or its node no longer exists.
    #[inline]
    pub fn get(&self, cursor: Cursor) -> Result<&T> {
        if cursor.is_sentinel() {
            return Err(Error::OutOfRangeDereference);
        }
        self.nodes
            .get(cursor.index())
            .and_then(|node| node.slot.value())
            .ok_or(Error::OutOfRangeDereference)
    }

    /// Dereferences a cursor mutably.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    #[inline]
    pub fn get_mut(&mut self, cursor: Cursor) -> Result<&mut T> {
        if cursor.is_sentinel() {
            return Err(Error::OutOfRangeDereference);
        }
        self.nodes
            .get_mut(cursor.index())
            .and_then(|node| node.slot.value_mut())
            .ok_or(Error::OutOfRangeDereference)
    }

    /// Moves a cursor one node forward.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPosition`] when advancing a linear list's
    /// `end()`, or when the cursor's node no longer exists.
    #[inline]
    pub fn advance(&self, cursor: Cursor) -> Result<Cursor> {
        if !RING && cursor.is_end() {
            return Err(Error::InvalidPosition);
        }
        let next = self
            .nodes
            .get(cursor.index())
            .ok_or(Error::InvalidPosition)?
            .next;

        if !RING {
            return Ok(self.cursor(next));
        }
        if self.is_empty() {
            return Ok(self.end());
        }
        let next = if next == self.tail { self.node(self.tail).next } else { next };
        let next = if next == self.head { self.node(self.head).next } else { next };
        Ok(self.cursor(next))
    }

    /// Moves a cursor one node backward.
    ///
    /// # Errors
    ///
    /// On a linear list, returns [`Error::InvalidPosition`] when the
    /// predecessor is `before_begin()` or absent. Also fails when the
    /// cursor's node no longer exists.
    #[inline]
    pub fn retreat(&self, cursor: Cursor) -> Result<Cursor> {
        let prev = self
            .nodes
            .get(cursor.index())
            .ok_or(Error::InvalidPosition)?
            .prev;

        if !RING {
            if prev == self.head || prev == NIL {
                return Err(Error::InvalidPosition);
            }
            return Ok(self.cursor(prev));
        }
        if self.is_empty() {
            return Ok(self.end());
        }
        let prev = if prev == self.head { self.node(self.head).prev } else { prev };
        let prev = if prev == self.tail { self.node(self.tail).prev } else { prev };
        Ok(self.cursor(prev))
    }

    /// Moves a cursor `n` nodes forward.
    ///
    /// # Errors
    ///
    /// Fails like [`advance`](Self::advance) at the first invalid step.
    pub fn advance_by(&self, mut cursor: Cursor, n: usize) -> Result<Cursor> {
        for _ in 0..n {
            cursor = self.advance(cursor)?;
        }
        Ok(cursor)
    }

    /// Moves a cursor `n` nodes backward.
    ///
    /// # Errors
    ///
    /// Fails like [`retreat`](Self::retreat) at the first invalid step.
    pub fn retreat_by(&self, mut cursor: Cursor, n: usize) -> Result<Cursor> {
        for _ in 0..n {
            cursor = self.retreat(cursor)?;
        }
        Ok(cursor)
    }

    /// Moves a cursor forward for positive `distance`, backward for negative.
    ///
    /// # Errors
    ///
    /// Fails like [`advance`](Self::advance) or [`retreat`](Self::retreat).
    #[inline]
    pub fn move_by(&self, cursor: Cursor, distance: isize) -> Result<Cursor> {
        if distance >= 0 {
            self.advance_by(cursor, distance.unsigned_abs())
        } else {
            self.retreat_by(cursor, distance.unsigned_abs())
        }
    }

    // ========================================================================
    // Positional insert / erase
    // ========================================================================

    /// Inserts `value` before the cursor and returns a cursor to it.
    ///
    /// `end()` is a valid position and appends.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPosition`] if the cursor is at `before_begin()`
    /// or its node no longer exists.
    pub fn insert(&mut self, cursor: Cursor, value: T) -> Result<Cursor> {
        if cursor.is_before_begin() {
            return Err(Error::InvalidPosition);
        }
        if self.nodes.get(cursor.index()).is_none() {
            return Err(Error::InvalidPosition);
        }
        let index = self.link_before(cursor.index(), value);
        Ok(self.cursor(index))
    }

    /// Removes the element under the cursor.
    ///
    /// Returns a cursor to the element that followed it (possibly `end()`).
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyContainer`] if the list is empty
    /// - [`Error::InvalidPosition`] if the cursor is at a sentinel or its
    ///   node no longer exists
    pub fn erase(&mut self, cursor: Cursor) -> Result<Cursor> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }
        if cursor.is_sentinel() {
            return Err(Error::InvalidPosition);
        }
        let next = self
            .nodes
            .get(cursor.index())
            .ok_or(Error::InvalidPosition)?
            .next;

        drop(self.unlink(cursor.index()));
        Ok(self.cursor(next))
    }

    // ========================================================================
    // Front / back
    // ========================================================================

    /// Prepends an element. O(1).
    #[inline]
    pub fn push_front(&mut self, value: T) {
        let first = self.node(self.head).next;
        self.link_before(first, value);
    }

    /// Appends an element. O(1).
    #[inline]
    pub fn push_back(&mut self, value: T) {
        self.link_before(self.tail, value);
    }

    /// Removes and returns the first element. O(1).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn pop_front(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }
        let first = self.node(self.head).next;
        Ok(self.unlink(first))
    }

    /// Removes and returns the last element. O(1).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn pop_back(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }
        let last = self.node(self.tail).prev;
        Ok(self.unlink(last))
    }

    /// Returns a reference to the first element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn front(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }
        self.get(self.begin())
    }

    /// Returns a mutable reference to the first element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Result<&mut T> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }
        self.get_mut(self.begin())
    }

    /// Returns a reference to the last element. O(1).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn back(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }
        self.get(self.cursor(self.node(self.tail).prev))
    }

    /// Returns a mutable reference to the last element. O(1).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the list is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Result<&mut T> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }
        let last = self.cursor(self.node(self.tail).prev);
        self.get_mut(last)
    }

    // ========================================================================
    // Bulk operations
    // ========================================================================

    /// Removes every element and relinks the sentinels to each other.
    ///
    /// Safe to call on an empty list.
    pub fn clear(&mut self) {
        let mut index = self.node(self.head).next;
        while index != self.tail {
            let next = self.node(index).next;
            self.nodes.remove(index);
            index = next;
        }
        self.link_sentinels();
        self.len = 0;
    }

    /// Moves the contents out, leaving a fresh empty list with its own
    /// sentinel pair behind.
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns a double-ended iterator over references to elements.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, S> {
        Iter {
            nodes: &self.nodes,
            front: self.node(self.head).next,
            back: self.node(self.tail).prev,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Returns a double-ended iterator over mutable references to elements.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T, S> {
        let front = self.node(self.head).next;
        let back = self.node(self.tail).prev;
        IterMut {
            nodes: &mut self.nodes,
            front,
            back,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    #[inline]
    fn cursor(&self, index: usize) -> Cursor {
        Cursor::new(index, self.head, self.tail)
    }

    #[inline]
    fn node(&self, index: usize) -> &DoublyNode<T> {
        match self.nodes.get(index) {
            Some(node) => node,
            None => unreachable!("link {index} does not refer to a live node"),
        }
    }

    #[inline]
    fn node_mut(&mut self, index: usize) -> &mut DoublyNode<T> {
        match self.nodes.get_mut(index) {
            Some(node) => node,
            None => unreachable!("link {index} does not refer to a live node"),
        }
    }

    /// Points the sentinels at each other, closing the ring if circular.
    fn link_sentinels(&mut self) {
        let (head, tail) = (self.head, self.tail);
        let head_node = self.node_mut(head);
        head_node.next = tail;
        head_node.prev = if RING { tail } else { NIL };

        let tail_node = self.node_mut(tail);
        tail_node.prev = head;
        tail_node.next = if RING { head } else { NIL };
    }

    fn link_before(&mut self, next: usize, value: T) -> usize {
        let prev = self.node(next).prev;
        let index = self.nodes.insert(DoublyNode::occupied(value, prev, next));
        self.node_mut(prev).next = index;
        self.node_mut(next).prev = index;
        self.len += 1;
        index
    }

    /// Unlinks and frees an element node. The caller guarantees `index` is
    /// neither sentinel.
    fn unlink(&mut self, index: usize) -> T {
        let (prev, next) = {
            let node = self.node(index);
            (node.prev, node.next)
        };
        self.node_mut(prev).next = next;
        self.node_mut(next).prev = prev;
        self.len -= 1;

        match self.nodes.remove(index).and_then(|node| node.slot.into_value()) {
            Some(value) => value,
            None => unreachable!("unlinked a sentinel"),
        }
    }
}

impl<T, const RING: bool, S> Default for DoublyLinked<T, RING, S>
where
    S: Storage<DoublyNode<T>>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const RING: bool, S> Clone for DoublyLinked<T, RING, S>
where
    S: Storage<DoublyNode<T>>,
{
    fn clone(&self) -> Self {
        let mut list = Self::with_capacity(self.len);
        for value in self.iter() {
            list.push_back(value.clone());
        }
        list
    }
}

impl<T: fmt::Debug, const RING: bool, S> fmt::Debug for DoublyLinked<T, RING, S>
where
    S: Storage<DoublyNode<T>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, const RING: bool, S> PartialEq for DoublyLinked<T, RING, S>
where
    S: Storage<DoublyNode<T>>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, const RING: bool, S> Eq for DoublyLinked<T, RING, S> where S: Storage<DoublyNode<T>> {}

impl<T, const RING: bool, S> Extend<T> for DoublyLinked<T, RING, S>
where
    S: Storage<DoublyNode<T>>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T, const RING: bool, S> FromIterator<T> for DoublyLinked<T, RING, S>
where
    S: Storage<DoublyNode<T>>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T, const RING: bool, S, const N: usize> From<[T; N]> for DoublyLinked<T, RING, S>
where
    S: Storage<DoublyNode<T>>,
{
    fn from(values: [T; N]) -> Self {
        let mut list = Self::with_capacity(N);
        list.extend(values);
        list
    }
}

impl<T, const RING: bool, S> IntoIterator for DoublyLinked<T, RING, S>
where
    S: Storage<DoublyNode<T>>,
{
    type Item = T;
    type IntoIter = IntoIter<T, RING, S>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T, const RING: bool, S> IntoIterator for &'a DoublyLinked<T, RING, S>
where
    S: Storage<DoublyNode<T>>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, S>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const RING: bool, S> IntoIterator for &'a mut DoublyLinked<T, RING, S>
where
    S: Storage<DoublyNode<T>>,
{
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, S>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Double-ended iterator over references to list elements.
pub struct Iter<'a, T, S> {
    nodes: &'a S,
    front: usize,
    back: usize,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T: 'a, S> Iterator for Iter<'a, T, S>
where
    S: Storage<DoublyNode<T>>,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.front)?;
        self.front = node.next;
        self.remaining -= 1;
        node.slot.value()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, S> DoubleEndedIterator for Iter<'a, T, S>
where
    S: Storage<DoublyNode<T>>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.back)?;
        self.back = node.prev;
        self.remaining -= 1;
        node.slot.value()
    }
}

impl<'a, T: 'a, S> ExactSizeIterator for Iter<'a, T, S> where S: Storage<DoublyNode<T>> {}

impl<'a, T: 'a, S> FusedIterator for Iter<'a, T, S> where S: Storage<DoublyNode<T>> {}

impl<T, S> Clone for Iter<'_, T, S> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

/// Double-ended iterator over mutable references to list elements.
pub struct IterMut<'a, T, S> {
    nodes: &'a mut S,
    front: usize,
    back: usize,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T: 'a, S> Iterator for IterMut<'a, T, S>
where
    S: Storage<DoublyNode<T>>,
{
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get_mut(self.front)?;
        self.front = node.next;
        self.remaining -= 1;
        let value = node.slot.value_mut()?;

        // Extend lifetime - safe because `remaining` stops both ends before
        // they meet, so each node is yielded once
        Some(unsafe { &mut *(value as *mut T) })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, S> DoubleEndedIterator for IterMut<'a, T, S>
where
    S: Storage<DoublyNode<T>>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get_mut(self.back)?;
        self.back = node.prev;
        self.remaining -= 1;
        let value = node.slot.value_mut()?;

        // Extend lifetime - see `next`
        Some(unsafe { &mut *(value as *mut T) })
    }
}

impl<'a, T: 'a, S> ExactSizeIterator for IterMut<'a, T, S> where S: Storage<DoublyNode<T>> {}

impl<'a, T: 'a, S> FusedIterator for IterMut<'a, T, S> where S: Storage<DoublyNode<T>> {}

/// Owning iterator over list elements.
pub struct IntoIter<T, const RING: bool, S>
where
    S: Storage<DoublyNode<T>>,
{
    list: DoublyLinked<T, RING, S>,
}

impl<T, const RING: bool, S> Iterator for IntoIter<T, RING, S>
where
    S: Storage<DoublyNode<T>>,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, const RING: bool, S> DoubleEndedIterator for IntoIter<T, RING, S>
where
    S: Storage<DoublyNode<T>>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back().ok()
    }
}

impl<T, const RING: bool, S> ExactSizeIterator for IntoIter<T, RING, S> where
    S: Storage<DoublyNode<T>>
{
}
