//! Singly linked lists bounded by two sentinel nodes.
//!
//! A list owns one [`Storage`] holding its nodes. The first two entries are
//! the head and tail sentinels: they live as long as the list, never hold a
//! value, and make every insertion and removal an ordinary relink between two
//! existing nodes.
//!
//! ```text
//! linear:    head -> a -> b -> c -> tail -> (none)
//! circular:  head -> a -> b -> c -> tail -> head ...
//! ```
//!
//! There is no backward link, so `push_back`, `pop_back` and `back` walk the
//! list from the head sentinel. Use [`List`](crate::List) when the back of the
//! sequence is hot.
//!
//! # Example
//!
//! ```
//! use sentinel_collections::{Error, ForwardList};
//!
//! let mut list: ForwardList<u32> = ForwardList::from([1, 2, 3]);
//!
//! // Insert after the first element
//! let first = list.begin();
//! let pos = list.insert_after(first, 10)?;
//! assert_eq!(list.get(pos), Ok(&10));
//!
//! // Sentinels are never dereferenceable
//! assert_eq!(list.get(list.end()), Err(Error::OutOfRangeDereference));
//! assert_eq!(list.get(list.before_begin()), Err(Error::OutOfRangeDereference));
//!
//! // erase_after returns the cursor now following `first`
//! let next = list.erase_after(first)?;
//! assert_eq!(list.get(next), Ok(&2));
//!
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
//! # Ok::<(), Error>(())
//! ```
//!
//! # Circular Lists
//!
//! A [`CircularForwardList`] links the tail sentinel back to the head. Cursor
//! movement skips both sentinels, so advancing from the last element lands on
//! the first one.
//!
//! ```
//! use sentinel_collections::{CircularForwardList, Error};
//!
//! let ring: CircularForwardList<char> = CircularForwardList::from(['a', 'b']);
//!
//! let mut cursor = ring.begin();
//! let mut seen = Vec::new();
//! for _ in 0..5 {
//!     seen.push(*ring.get(cursor)?);
//!     cursor = ring.advance(cursor)?;
//! }
//! assert_eq!(seen, vec!['a', 'b', 'a', 'b', 'a']);
//! # Ok::<(), Error>(())
//! ```

use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem;

use crate::node::{CIRCULAR, LINEAR, SinglyNode};
use crate::storage::{NIL, Storage};
use crate::{Cursor, Error, Result};

/// A singly linked list whose tail sentinel ends the chain.
pub type ForwardList<T, S = slab::Slab<SinglyNode<T>>> = SinglyLinked<T, LINEAR, S>;

/// A singly linked list whose tail sentinel links back to its head sentinel.
pub type CircularForwardList<T, S = slab::Slab<SinglyNode<T>>> = SinglyLinked<T, CIRCULAR, S>;

/// A sentinel-bounded singly linked list.
///
/// Usually named through [`ForwardList`] or [`CircularForwardList`].
///
/// # Type Parameters
///
/// - `T`: Element type
/// - `RING`: [`LINEAR`](crate::LINEAR) or [`CIRCULAR`](crate::CIRCULAR)
/// - `S`: Node storage (default `slab::Slab<SinglyNode<T>>`)
pub struct SinglyLinked<T, const RING: bool, S = slab::Slab<SinglyNode<T>>>
where
    S: Storage<SinglyNode<T>>,
{
    nodes: S,
    head: usize,
    tail: usize,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T, const RING: bool, S> SinglyLinked<T, RING, S>
where
    S: Storage<SinglyNode<T>>,
{
    /// Creates an empty list. Allocates the two sentinels.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list whose storage has room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = S::with_capacity(capacity.saturating_add(2));
        let head = nodes.insert(SinglyNode::sentinel());
        let tail = nodes.insert(SinglyNode::sentinel());

        let mut list = Self {
            nodes,
            head,
            tail,
            len: 0,
            _marker: PhantomData,
        };
        list.node_mut(head).next = tail;
        list.node_mut(tail).next = if RING { head } else { NIL };
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
        self.cursor(self.next_of(self.head))
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
    /// On a linear list the last element advances onto `end()`. On a circular
    /// list both sentinels are skipped, so the last element advances onto the
    /// first one.
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

        if RING {
            Ok(self.cursor(self.skip_sentinels(next)))
        } else {
            Ok(self.cursor(next))
        }
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

    // ========================================================================
    // Positional insert / erase
    // ========================================================================

    /// Inserts `value` after the cursor and returns a cursor to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPosition`] if the cursor is at `end()` or its
    /// node no longer exists.
    pub fn insert_after(&mut self, cursor: Cursor, value: T) -> Result<Cursor> {
        if cursor.is_end() {
            return Err(Error::InvalidPosition);
        }
        self.check(cursor)?;
        let index = self.link_after(cursor.index(), value);
        Ok(self.cursor(index))
    }

    /// Inserts `value` before the cursor and returns a cursor to it.
    ///
    /// O(n): walks from the head to find the predecessor. `end()` is a valid
    /// position and appends.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPosition`] if the cursor is at `before_begin()`
    /// or is not reachable in this list.
    pub fn insert_before(&mut self, cursor: Cursor, value: T) -> Result<Cursor> {
        if cursor.is_before_begin() {
            return Err(Error::InvalidPosition);
        }
        self.check(cursor)?;
        let prev = self
            .predecessor(cursor.index())
            .ok_or(Error::InvalidPosition)?;
        let index = self.link_after(prev, value);
        Ok(self.cursor(index))
    }

    /// Removes the element after the cursor.
    ///
    /// Returns a cursor to the node that now follows the cursor's node.
    ///
    /// On a circular list, erasing after the last element wraps around and
    /// removes the first element.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyContainer`] if the list is empty
    /// - [`Error::InvalidPosition`] if the cursor is at `end()`, or, on a
    ///   linear list, if the element after it is `end()`
    pub fn erase_after(&mut self, cursor: Cursor) -> Result<Cursor> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }
        if cursor.is_end() {
            return Err(Error::InvalidPosition);
        }
        let next = self
            .nodes
            .get(cursor.index())
            .ok_or(Error::InvalidPosition)?
            .next;

        let prev = if next != self.tail {
            cursor.index()
        } else if RING {
            self.head
        } else {
            return Err(Error::InvalidPosition);
        };

        drop(self.unlink_after(prev));
        Ok(self.cursor(self.next_of(prev)))
    }

    /// Removes the element under the cursor.
    ///
    /// O(n): walks from the head to find the predecessor. Returns a cursor
    /// to the node that took the erased element's place.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyContainer`] if the list is empty
    /// - [`Error::InvalidPosition`] if the cursor is at a sentinel or is not
    ///   reachable in this list
    pub fn erase(&mut self, cursor: Cursor) -> Result<Cursor> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }
        if cursor.is_sentinel() {
            return Err(Error::InvalidPosition);
        }
        self.check(cursor)?;
        let prev = self
            .predecessor(cursor.index())
            .ok_or(Error::InvalidPosition)?;

        drop(self.unlink_after(prev));
        Ok(self.cursor(self.next_of(prev)))
    }

    // ========================================================================
    // Front / back
    // ========================================================================

    /// Prepends an element. O(1).
    #[inline]
    pub fn push_front(&mut self, value: T) {
        self.link_after(self.head, value);
    }

    /// Appends an element. O(n): walks to the last element.
    #[inline]
    pub fn push_back(&mut self, value: T) {
        let last = self.last();
        self.link_after(last, value);
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
        Ok(self.unlink_after(self.head))
    }

    /// Removes and returns the last element. O(n): walks to its predecessor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the list is empty.
    pub fn pop_back(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }

        let mut prev = self.head;
        let mut index = self.next_of(prev);
        while self.next_of(index) != self.tail {
            prev = index;
            index = self.next_of(index);
        }
        Ok(self.unlink_after(prev))
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

    /// Returns a reference to the last element. O(n).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the list is empty.
    pub fn back(&self) -> Result<&T> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }
        self.get(self.cursor(self.last()))
    }

    /// Returns a mutable reference to the last element. O(n).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the list is empty.
    pub fn back_mut(&mut self) -> Result<&mut T> {
        if self.is_empty() {
            return Err(Error::EmptyContainer);
        }
        let last = self.cursor(self.last());
        self.get_mut(last)
    }

    // ========================================================================
    // Bulk operations
    // ========================================================================

    /// Removes every element and relinks the sentinels to each other.
    ///
    /// Safe to call on an empty list.
    pub fn clear(&mut self) {
        let mut index = self.next_of(self.head);
        while index != self.tail {
            let next = self.next_of(index);
            self.nodes.remove(index);
            index = next;
        }

        let tail = self.tail;
        self.node_mut(self.head).next = tail;
        self.len = 0;
    }

    /// Moves the contents out, leaving a fresh empty list with its own
    /// sentinel pair behind.
    ///
    /// # Example
    ///
    /// ```
    /// use sentinel_collections::ForwardList;
    ///
    /// let mut a: ForwardList<u8> = ForwardList::from([1, 2]);
    /// let b = a.take();
    ///
    /// assert!(a.is_empty());
    /// assert_eq!(a.begin(), a.end());
    /// a.push_back(3); // still usable
    /// assert_eq!(b.len(), 2);
    /// ```
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns an iterator over references to elements, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, S> {
        Iter {
            nodes: &self.nodes,
            current: self.next_of(self.head),
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Returns an iterator over mutable references to elements, front to back.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T, S> {
        let current = self.next_of(self.head);
        IterMut {
            nodes: &mut self.nodes,
            current,
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
    fn check(&self, cursor: Cursor) -> Result<()> {
        match self.nodes.get(cursor.index()) {
            Some(_) => Ok(()),
            None => Err(Error::InvalidPosition),
        }
    }

    #[inline]
    fn node(&self, index: usize) -> &SinglyNode<T> {
        match self.nodes.get(index) {
            Some(node) => node,
            None => unreachable!("link {index} does not refer to a live node"),
        }
    }

    #[inline]
    fn node_mut(&mut self, index: usize) -> &mut SinglyNode<T> {
        match self.nodes.get_mut(index) {
            Some(node) => node,
            None => unreachable!("link {index} does not refer to a live node"),
        }
    }

    #[inline]
    fn next_of(&self, index: usize) -> usize {
        self.node(index).next
    }

    /// Steps over the sentinels of a ring. `tail.next` is `head`.
    #[inline]
    fn skip_sentinels(&self, mut index: usize) -> usize {
        if index == self.tail {
            index = self.next_of(self.tail);
        }
        if index == self.head {
            index = self.next_of(self.head);
        }
        index
    }

    /// Index of the last element, or the head sentinel if empty.
    fn last(&self) -> usize {
        let mut index = self.head;
        loop {
            let next = self.next_of(index);
            if next == self.tail {
                return index;
            }
            index = next;
        }
    }

    /// Index of the node whose successor is `target`.
    fn predecessor(&self, target: usize) -> Option<usize> {
        let mut index = self.head;
        loop {
            let next = self.next_of(index);
            if next == target {
                return Some(index);
            }
            if next == self.tail {
                return None;
            }
            index = next;
        }
    }

    fn link_after(&mut self, prev: usize, value: T) -> usize {
        let next = self.next_of(prev);
        let index = self.nodes.insert(SinglyNode::occupied(value, next));
        self.node_mut(prev).next = index;
        self.len += 1;
        index
    }

    /// Unlinks and frees the element after `prev`. The caller guarantees it
    /// is not the tail sentinel.
    fn unlink_after(&mut self, prev: usize) -> T {
        let index = self.next_of(prev);
        let next = self.next_of(index);
        self.node_mut(prev).next = next;
        self.len -= 1;

        match self.nodes.remove(index).and_then(|node| node.slot.into_value()) {
            Some(value) => value,
            None => unreachable!("unlinked a sentinel"),
        }
    }
}

impl<T, const RING: bool, S> Default for SinglyLinked<T, RING, S>
where
    S: Storage<SinglyNode<T>>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const RING: bool, S> Clone for SinglyLinked<T, RING, S>
where
    S: Storage<SinglyNode<T>>,
{
    /// Deep copy: replays every element into a new node chain.
    fn clone(&self) -> Self {
        let mut list = Self::with_capacity(self.len);
        let mut last = list.head;
        for value in self.iter() {
            last = list.link_after(last, value.clone());
        }
        list
    }
}

impl<T: fmt::Debug, const RING: bool, S> fmt::Debug for SinglyLinked<T, RING, S>
where
    S: Storage<SinglyNode<T>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, const RING: bool, S> PartialEq for SinglyLinked<T, RING, S>
where
    S: Storage<SinglyNode<T>>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, const RING: bool, S> Eq for SinglyLinked<T, RING, S> where S: Storage<SinglyNode<T>> {}

impl<T, const RING: bool, S> Extend<T> for SinglyLinked<T, RING, S>
where
    S: Storage<SinglyNode<T>>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut last = self.last();
        for value in iter {
            last = self.link_after(last, value);
        }
    }
}

impl<T, const RING: bool, S> FromIterator<T> for SinglyLinked<T, RING, S>
where
    S: Storage<SinglyNode<T>>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T, const RING: bool, S, const N: usize> From<[T; N]> for SinglyLinked<T, RING, S>
where
    S: Storage<SinglyNode<T>>,
{
    fn from(values: [T; N]) -> Self {
        let mut list = Self::with_capacity(N);
        list.extend(values);
        list
    }
}

impl<T, const RING: bool, S> IntoIterator for SinglyLinked<T, RING, S>
where
    S: Storage<SinglyNode<T>>,
{
    type Item = T;
    type IntoIter = IntoIter<T, RING, S>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T, const RING: bool, S> IntoIterator for &'a SinglyLinked<T, RING, S>
where
    S: Storage<SinglyNode<T>>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, S>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, const RING: bool, S> IntoIterator for &'a mut SinglyLinked<T, RING, S>
where
    S: Storage<SinglyNode<T>>,
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

/// Iterator over references to list elements.
pub struct Iter<'a, T, S> {
    nodes: &'a S,
    current: usize,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T: 'a, S> Iterator for Iter<'a, T, S>
where
    S: Storage<SinglyNode<T>>,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.current)?;
        self.current = node.next;
        self.remaining -= 1;
        node.slot.value()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, S> ExactSizeIterator for Iter<'a, T, S> where S: Storage<SinglyNode<T>> {}

impl<'a, T: 'a, S> FusedIterator for Iter<'a, T, S> where S: Storage<SinglyNode<T>> {}

impl<T, S> Clone for Iter<'_, T, S> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            current: self.current,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

/// Iterator over mutable references to list elements.
pub struct IterMut<'a, T, S> {
    nodes: &'a mut S,
    current: usize,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T: 'a, S> Iterator for IterMut<'a, T, S>
where
    S: Storage<SinglyNode<T>>,
{
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get_mut(self.current)?;
        self.current = node.next;
        self.remaining -= 1;
        let value = node.slot.value_mut()?;

        // Extend lifetime - safe because we visit each node exactly once
        Some(unsafe { &mut *(value as *mut T) })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, S> ExactSizeIterator for IterMut<'a, T, S> where S: Storage<SinglyNode<T>> {}

impl<'a, T: 'a, S> FusedIterator for IterMut<'a, T, S> where S: Storage<SinglyNode<T>> {}

/// Owning iterator that pops elements from the front.
pub struct IntoIter<T, const RING: bool, S>
where
    S: Storage<SinglyNode<T>>,
{
    list: SinglyLinked<T, RING, S>,
}

impl<T, const RING: bool, S> Iterator for IntoIter<T, RING, S>
where
    S: Storage<SinglyNode<T>>,
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

impl<T, const RING: bool, S> ExactSizeIterator for IntoIter<T, RING, S> where
    S: Storage<SinglyNode<T>>
{
}
