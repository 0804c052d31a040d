//! LIFO adapter over any container that can grow and shrink at the back.
//!
//! [`Stack`] forwards `push`, `pop` and `top` to the backing container's
//! `push_back`, `pop_back` and `back`. The backing decides the cost model:
//! [`Vector`] and [`List`](crate::List) are O(1) at the back, a
//! [`ForwardList`](crate::ForwardList) walks the whole list on every
//! operation.
//!
//! # Example
//!
//! ```
//! use sentinel_collections::{Error, List, Stack};
//!
//! // Vector-backed by default
//! let mut stack: Stack<u32> = Stack::new();
//! stack.push(1);
//! stack.push(2);
//! assert_eq!(stack.top(), Ok(&2));
//! assert_eq!(stack.pop(), Ok(2));
//!
//! // Any backing container works
//! let mut linked: Stack<u32, List<u32>> = Stack::new();
//! linked.push(7);
//! assert_eq!(linked.pop(), Ok(7));
//! assert_eq!(linked.pop(), Err(Error::EmptyContainer));
//! # Ok::<(), Error>(())
//! ```

use core::fmt;
use core::marker::PhantomData;
use core::mem;

use crate::forward::SinglyLinked;
use crate::list::DoublyLinked;
use crate::node::{DoublyNode, SinglyNode};
use crate::storage::Storage;
use crate::vector::Vector;
use crate::{Error, Result};

/// A container usable as the backing of a [`Stack`].
pub trait Backing<T> {
    /// Appends an element at the back.
    fn push_back(&mut self, value: T);

    /// Removes and returns the back element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the container is empty.
    fn pop_back(&mut self) -> Result<T>;

    /// Returns the back element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the container is empty.
    fn back(&self) -> Result<&T>;

    /// Returns the back element mutably.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the container is empty.
    fn back_mut(&mut self) -> Result<&mut T>;

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the container holds no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Backing implementations
// =============================================================================

impl<T> Backing<T> for Vector<T> {
    #[inline]
    fn push_back(&mut self, value: T) {
        Vector::push_back(self, value);
    }

    #[inline]
    fn pop_back(&mut self) -> Result<T> {
        Vector::pop_back(self)
    }

    #[inline]
    fn back(&self) -> Result<&T> {
        self.as_slice().last().ok_or(Error::EmptyContainer)
    }

    #[inline]
    fn back_mut(&mut self) -> Result<&mut T> {
        self.as_mut_slice().last_mut().ok_or(Error::EmptyContainer)
    }

    #[inline]
    fn len(&self) -> usize {
        Vector::len(self)
    }
}

impl<T, const RING: bool, S> Backing<T> for SinglyLinked<T, RING, S>
where
    S: Storage<SinglyNode<T>>,
{
    #[inline]
    fn push_back(&mut self, value: T) {
        SinglyLinked::push_back(self, value);
    }

    #[inline]
    fn pop_back(&mut self) -> Result<T> {
        SinglyLinked::pop_back(self)
    }

    #[inline]
    fn back(&self) -> Result<&T> {
        SinglyLinked::back(self)
    }

    #[inline]
    fn back_mut(&mut self) -> Result<&mut T> {
        SinglyLinked::back_mut(self)
    }

    #[inline]
    fn len(&self) -> usize {
        SinglyLinked::len(self)
    }
}

impl<T, const RING: bool, S> Backing<T> for DoublyLinked<T, RING, S>
where
    S: Storage<DoublyNode<T>>,
{
    #[inline]
    fn push_back(&mut self, value: T) {
        DoublyLinked::push_back(self, value);
    }

    #[inline]
    fn pop_back(&mut self) -> Result<T> {
        DoublyLinked::pop_back(self)
    }

    #[inline]
    fn back(&self) -> Result<&T> {
        DoublyLinked::back(self)
    }

    #[inline]
    fn back_mut(&mut self) -> Result<&mut T> {
        DoublyLinked::back_mut(self)
    }

    #[inline]
    fn len(&self) -> usize {
        DoublyLinked::len(self)
    }
}

// =============================================================================
// Stack
// =============================================================================

/// A LIFO stack over a [`Backing`] container.
///
/// The top of the stack is the back of the container, so borrowed iteration
/// runs from the bottom of the stack to the top.
pub struct Stack<T, C = Vector<T>> {
    inner: C,
    _marker: PhantomData<T>,
}

impl<T, C: Backing<T>> Stack<T, C> {
    /// Creates an empty stack.
    #[inline]
    pub fn new() -> Self
    where
        C: Default,
    {
        Self::from_inner(C::default())
    }

    /// Wraps an existing container. Its back element becomes the top.
    #[inline]
    pub fn from_inner(inner: C) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    /// Pushes a value onto the top.
    #[inline]
    pub fn push(&mut self, value: T) {
        self.inner.push_back(value);
    }

    /// Removes and returns the top value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the stack is empty.
    #[inline]
    pub fn pop(&mut self) -> Result<T> {
        self.inner.pop_back()
    }

    /// Returns the top value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the stack is empty.
    #[inline]
    pub fn top(&self) -> Result<&T> {
        self.inner.back()
    }

    /// Returns the top value mutably.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the stack is empty.
    #[inline]
    pub fn top_mut(&mut self) -> Result<&mut T> {
        self.inner.back_mut()
    }

    /// Returns the number of values on the stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the stack is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the backing container.
    #[inline]
    pub fn as_inner(&self) -> &C {
        &self.inner
    }

    /// Unwraps the backing container.
    #[inline]
    pub fn into_inner(self) -> C {
        self.inner
    }

    /// Moves the contents out, leaving an empty stack behind.
    #[inline]
    pub fn take(&mut self) -> Self
    where
        C: Default,
    {
        Self::from_inner(mem::take(&mut self.inner))
    }

    /// Iterates from the bottom of the stack to the top.
    #[inline]
    pub fn iter<'a>(&'a self) -> <&'a C as IntoIterator>::IntoIter
    where
        &'a C: IntoIterator<Item = &'a T>,
    {
        (&self.inner).into_iter()
    }
}

impl<T, C: Backing<T> + Default> Default for Stack<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Clone> Clone for Stack<T, C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, C: fmt::Debug> fmt::Debug for Stack<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Stack").field(&self.inner).finish()
    }
}

impl<T, C: PartialEq> PartialEq for Stack<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T, C: Eq> Eq for Stack<T, C> {}

impl<T, C: Backing<T> + Default> FromIterator<T> for Stack<T, C> {
    /// Pushes every value in order; the last one ends up on top.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut stack = Self::new();
        for value in iter {
            stack.push(value);
        }
        stack
    }
}

impl<T, C: Backing<T> + Default, const N: usize> From<[T; N]> for Stack<T, C> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T, C> IntoIterator for &'a Stack<T, C>
where
    &'a C: IntoIterator<Item = &'a T>,
{
    type Item = &'a T;
    type IntoIter = <&'a C as IntoIterator>::IntoIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        (&self.inner).into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CircularForwardList, CircularList, ForwardList, List};

    fn stack_law<C: Backing<u64> + Default>() {
        let mut stack: Stack<u64, C> = Stack::new();
        assert!(stack.is_empty());

        for i in 0..20 {
            stack.push(i);
            assert_eq!(stack.top(), Ok(&i));
        }
        assert_eq!(stack.len(), 20);
        assert!(!stack.is_empty());

        for i in (0..20).rev() {
            assert_eq!(stack.pop(), Ok(i));
        }
        assert!(stack.is_empty());
        assert_eq!(stack.pop(), Err(Error::EmptyContainer));
        assert_eq!(stack.top(), Err(Error::EmptyContainer));
    }

    #[test]
    fn stack_law_vector() {
        stack_law::<Vector<u64>>();
    }

    #[test]
    fn stack_law_forward_list() {
        stack_law::<ForwardList<u64>>();
    }

    #[test]
    fn stack_law_circular_forward_list() {
        stack_law::<CircularForwardList<u64>>();
    }

    #[test]
    fn stack_law_list() {
        stack_law::<List<u64>>();
    }

    #[test]
    fn stack_law_circular_list() {
        stack_law::<CircularList<u64>>();
    }

    #[test]
    fn top_mut_modifies_top() {
        let mut stack: Stack<u64> = Stack::from([1, 2]);
        *stack.top_mut().unwrap() = 20;
        assert_eq!(stack.pop(), Ok(20));
        assert_eq!(stack.top(), Ok(&1));
    }

    #[test]
    fn iteration_runs_bottom_to_top() {
        let stack: Stack<u64, List<u64>> = Stack::from([1, 2, 3]);
        assert_eq!(stack.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);

        let mut seen = Vec::new();
        for value in &stack {
            seen.push(*value);
        }
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn inner_access() {
        let stack: Stack<u64> = Stack::from_inner(Vector::from([4, 5]));
        assert_eq!(stack.top(), Ok(&5));
        assert_eq!(stack.as_inner().as_slice(), &[4, 5]);
        assert_eq!(stack.into_inner().len(), 2);
    }

    #[test]
    fn take_and_clone() {
        let mut a: Stack<u64> = Stack::from([1, 2, 3]);
        let copy = a.clone();
        let b = a.take();

        assert!(a.is_empty());
        assert_eq!(b, copy);
        a.push(9);
        assert_eq!(a.top(), Ok(&9));
        assert_eq!(b.len(), 3);
    }

    #[test]
    fn debug_shows_backing() {
        let stack: Stack<u64> = Stack::from([1, 2]);
        assert_eq!(format!("{stack:?}"), "Stack([1, 2])");
    }
}
