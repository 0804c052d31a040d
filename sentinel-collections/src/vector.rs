//! Contiguous growable array with an explicit size/capacity split.
//!
//! The buffer is a single allocation of `capacity` slots. Slots `[0, len)` are
//! initialized, the rest are not. Growth never happens in place: a larger
//! buffer is allocated, the live elements are moved over bitwise, and the old
//! buffer is released. Since a bitwise move cannot fail, a reservation either
//! completes or leaves the vector untouched.
//!
//! Growth policy:
//! - first allocation: [`Vector::INITIAL_CAPACITY`] slots
//! - full buffer: capacity times [`Vector::GROWTH_FACTOR`]
//! - [`reserve`](Vector::reserve): exactly the requested capacity, never shrinks
//!
//! # Example
//!
//! ```
//! use sentinel_collections::{Error, Vector};
//!
//! let mut v: Vector<u32> = Vector::new();
//! assert_eq!(v.capacity(), 0);
//!
//! v.push_back(1);
//! assert_eq!(v.capacity(), 8);
//!
//! v.insert(0, 0)?;
//! assert_eq!(v.as_slice(), &[0, 1]);
//! assert_eq!(v.at(5), Err(Error::IndexOutOfRange { index: 5, len: 2 }));
//! # Ok::<(), Error>(())
//! ```

use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem;
use core::ops::{Deref, DerefMut, Index, IndexMut};
use core::ptr::{self, NonNull};
use core::slice;
use std::alloc::{Layout, alloc, dealloc, handle_alloc_error};

use crate::{Error, Result};

/// A growable array.
pub struct Vector<T> {
    /// Dangling while `cap == 0` or `T` is zero-sized.
    ptr: NonNull<T>,
    len: usize,
    cap: usize,
    _marker: PhantomData<T>,
}

// Safety: Vector owns its elements like Vec<T> does.
unsafe impl<T: Send> Send for Vector<T> {}
unsafe impl<T: Sync> Sync for Vector<T> {}

impl<T> Vector<T> {
    /// Capacity of the first allocation made by a growing insert.
    pub const INITIAL_CAPACITY: usize = 8;

    /// Multiplier applied to a full buffer's capacity.
    pub const GROWTH_FACTOR: usize = 2;

    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// Creates an empty vector. Does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Creates an empty vector with exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if the capacity overflows the address space.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut vector = Self::new();
        vector.reserve(capacity);
        vector
    }

    /// Creates a vector of `len` clones of `value`, with capacity exactly
    /// `len`.
    pub fn with_len(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut vector = Self::with_capacity(len);
        vector.resize(len, value);
        vector
    }

    /// Returns the number of live elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no live elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the buffer.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns the live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // Safety: [0, len) is initialized and ptr is aligned and non-null
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // Safety: [0, len) is initialized and ptr is aligned and non-null
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    // ========================================================================
    // Capacity
    // ========================================================================

    /// Grows the buffer to exactly `capacity` slots. No-op if the buffer is
    /// already that large.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] if the layout does not fit in
    /// `isize::MAX` bytes. The vector is unchanged.
    pub fn try_reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity <= self.cap {
            return Ok(());
        }
        if Self::IS_ZST {
            self.cap = capacity;
            return Ok(());
        }

        let layout = Layout::array::<T>(capacity).map_err(|_| Error::CapacityOverflow)?;
        let raw = unsafe { alloc(layout) };
        let Some(new_ptr) = NonNull::new(raw as *mut T) else {
            handle_alloc_error(layout);
        };

        // Safety: the new buffer holds at least `len` slots and the two
        // allocations are distinct
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.len);
        }
        self.release();
        self.ptr = new_ptr;
        self.cap = capacity;
        Ok(())
    }

    /// Grows the buffer to exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if the layout does not fit.
    #[inline]
    pub fn reserve(&mut self, capacity: usize) {
        if let Err(err) = self.try_reserve(capacity) {
            panic!("{err}");
        }
    }

    /// Makes room for one more element using the doubling policy.
    fn grow_for_one(&mut self) {
        if self.len < self.cap {
            return;
        }
        let target = if self.cap == 0 {
            Self::INITIAL_CAPACITY
        } else {
            match self.cap.checked_mul(Self::GROWTH_FACTOR) {
                Some(target) => target,
                None => panic!("{}", Error::CapacityOverflow),
            }
        };
        self.reserve(target);
    }

    /// Frees the buffer without touching elements.
    fn release(&mut self) {
        if self.cap == 0 || Self::IS_ZST {
            return;
        }
        // Layout was valid when this buffer was allocated
        if let Ok(layout) = Layout::array::<T>(self.cap) {
            unsafe { dealloc(self.ptr.as_ptr() as *mut u8, layout) };
        }
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Appends an element. Amortized O(1).
    ///
    /// # Panics
    ///
    /// Panics if growing the buffer overflows the address space.
    #[inline]
    pub fn push_back(&mut self, value: T) {
        self.grow_for_one();
        unsafe { self.ptr.as_ptr().add(self.len).write(value) };
        self.len += 1;
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyContainer`] if the vector is empty.
    #[inline]
    pub fn pop_back(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Error::EmptyContainer);
        }
        self.len -= 1;
        // Safety: slot `len` was initialized and is now outside the live range
        Ok(unsafe { self.ptr.as_ptr().add(self.len).read() })
    }

    /// Inserts `value` at `pos`, shifting later elements right. Returns `pos`.
    ///
    /// `pos == len()` appends.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `pos > len()`.
    pub fn insert(&mut self, pos: usize, value: T) -> Result<usize> {
        if pos > self.len {
            return Err(Error::IndexOutOfRange {
                index: pos,
                len: self.len,
            });
        }
        self.grow_for_one();
        unsafe {
            let at = self.ptr.as_ptr().add(pos);
            ptr::copy(at, at.add(1), self.len - pos);
            at.write(value);
        }
        self.len += 1;
        Ok(pos)
    }

    /// Removes the element at `pos` and returns `pos`, which now holds the
    /// following element.
    ///
    /// `pos == len()` removes nothing and returns `pos` unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `pos > len()`.
    #[inline]
    pub fn erase(&mut self, pos: usize) -> Result<usize> {
        if pos == self.len {
            return Ok(pos);
        }
        drop(self.remove(pos)?);
        Ok(pos)
    }

    /// Removes and returns the element at `pos`, shifting later elements left.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `pos >= len()`.
    pub fn remove(&mut self, pos: usize) -> Result<T> {
        if pos >= self.len {
            return Err(Error::IndexOutOfRange {
                index: pos,
                len: self.len,
            });
        }
        let value = unsafe {
            let at = self.ptr.as_ptr().add(pos);
            let value = at.read();
            ptr::copy(at.add(1), at, self.len - pos - 1);
            value
        };
        self.len -= 1;
        Ok(value)
    }

    /// Resizes to `len` elements, cloning `value` into new slots.
    ///
    /// Growing reserves exactly `len` slots. Shrinking drops the tail and
    /// keeps the capacity.
    pub fn resize(&mut self, len: usize, value: T)
    where
        T: Clone,
    {
        self.resize_with(len, || value.clone());
    }

    /// Resizes to `len` elements, filling new slots with `f()`.
    pub fn resize_with<F: FnMut() -> T>(&mut self, len: usize, mut f: F) {
        if len <= self.len {
            self.truncate(len);
            return;
        }
        self.reserve(len);
        while self.len < len {
            unsafe { self.ptr.as_ptr().add(self.len).write(f()) };
            self.len += 1;
        }
    }

    /// Drops elements past `len`. No-op if `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let tail =
            ptr::slice_from_raw_parts_mut(unsafe { self.ptr.as_ptr().add(len) }, self.len - len);
        // Shorten first so a panicking destructor cannot cause a double drop
        self.len = len;
        unsafe { ptr::drop_in_place(tail) };
    }

    /// Drops every element. Keeps the buffer.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Moves the contents out, leaving an empty vector with no buffer.
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Bounds-checked access.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len()`.
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Bounds-checked mutable access.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len()`.
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Returns the first element.
    ///
    /// # Panics
    ///
    /// Panics if the vector is empty.
    #[inline]
    pub fn front(&self) -> &T {
        match self.as_slice().first() {
            Some(value) => value,
            None => panic!("front() on an empty vector"),
        }
    }

    /// Returns the first element mutably.
    ///
    /// # Panics
    ///
    /// Panics if the vector is empty.
    #[inline]
    pub fn front_mut(&mut self) -> &mut T {
        match self.as_mut_slice().first_mut() {
            Some(value) => value,
            None => panic!("front_mut() on an empty vector"),
        }
    }

    /// Returns the last element.
    ///
    /// # Panics
    ///
    /// Panics if the vector is empty.
    #[inline]
    pub fn back(&self) -> &T {
        match self.as_slice().last() {
            Some(value) => value,
            None => panic!("back() on an empty vector"),
        }
    }

    /// Returns the last element mutably.
    ///
    /// # Panics
    ///
    /// Panics if the vector is empty.
    #[inline]
    pub fn back_mut(&mut self) -> &mut T {
        match self.as_mut_slice().last_mut() {
            Some(value) => value,
            None => panic!("back_mut() on an empty vector"),
        }
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        self.clear();
        self.release();
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Vector<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: Clone> Clone for Vector<T> {
    /// Deep copy with capacity equal to the source length.
    fn clone(&self) -> Self {
        let mut vector = Self::with_capacity(self.len);
        for value in self.iter() {
            vector.push_back(value.clone());
        }
        vector
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vector = Self::new();
        vector.extend(iter);
        vector
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T> {
    fn from(values: [T; N]) -> Self {
        let mut vector = Self::with_capacity(N);
        vector.extend(values);
        vector
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    #[inline]
    fn into_iter(mut self) -> Self::IntoIter {
        let back = self.len;
        // The iterator owns [front, back) now; the vector only frees the buffer
        self.len = 0;
        IntoIter {
            vector: self,
            front: 0,
            back,
        }
    }
}

// =============================================================================
// IntoIter
// =============================================================================

/// Owning iterator over vector elements.
pub struct IntoIter<T> {
    vector: Vector<T>,
    front: usize,
    back: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        // Safety: slots in [front, back) are initialized and read once
        let value = unsafe { self.vector.ptr.as_ptr().add(self.front).read() };
        self.front += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // Safety: see `next`
        Some(unsafe { self.vector.ptr.as_ptr().add(self.back).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let rest = ptr::slice_from_raw_parts_mut(
            unsafe { self.vector.ptr.as_ptr().add(self.front) },
            self.back - self.front,
        );
        self.front = self.back;
        unsafe { ptr::drop_in_place(rest) };
    }
}
