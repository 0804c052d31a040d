//! Storage cells for the linked lists.
//!
//! Every node carries a [`Slot`] tag. Sentinels are ordinary nodes in the
//! list's storage whose slot is [`Slot::Sentinel`]; they are allocated with
//! the list and never hold a value.

use crate::storage::NIL;

/// Topology of a list with no wrap-around: `tail.next` is absent.
pub const LINEAR: bool = false;

/// Topology of a ring: the sentinels link back to each other so that the
/// element after the last one is the first one.
pub const CIRCULAR: bool = true;

/// Contents of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<T> {
    /// Boundary marker. Never dereferenceable.
    Sentinel,
    /// A live element.
    Occupied(T),
}

impl<T> Slot<T> {
    /// Returns `true` for a boundary marker.
    #[inline]
    pub const fn is_sentinel(&self) -> bool {
        matches!(self, Slot::Sentinel)
    }

    /// Returns the element, or `None` for a sentinel.
    #[inline]
    pub fn value(&self) -> Option<&T> {
        match self {
            Slot::Occupied(value) => Some(value),
            Slot::Sentinel => None,
        }
    }

    /// Returns the element mutably, or `None` for a sentinel.
    #[inline]
    pub fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            Slot::Occupied(value) => Some(value),
            Slot::Sentinel => None,
        }
    }

    /// Consumes the slot, returning the element if there was one.
    #[inline]
    pub fn into_value(self) -> Option<T> {
        match self {
            Slot::Occupied(value) => Some(value),
            Slot::Sentinel => None,
        }
    }
}

/// A node of a singly linked list.
///
/// Holds one slot and the index of its successor. Users only see `&T` and
/// `&mut T` through the list accessors.
#[derive(Debug)]
pub struct SinglyNode<T> {
    pub(crate) slot: Slot<T>,
    pub(crate) next: usize,
}

impl<T> SinglyNode<T> {
    #[inline]
    pub(crate) const fn sentinel() -> Self {
        Self {
            slot: Slot::Sentinel,
            next: NIL,
        }
    }

    #[inline]
    pub(crate) const fn occupied(value: T, next: usize) -> Self {
        Self {
            slot: Slot::Occupied(value),
            next,
        }
    }

    /// Returns this node's slot.
    #[inline]
    pub fn slot(&self) -> &Slot<T> {
        &self.slot
    }
}

/// A node of a doubly linked list.
#[derive(Debug)]
pub struct DoublyNode<T> {
    pub(crate) slot: Slot<T>,
    pub(crate) prev: usize,
    pub(crate) next: usize,
}

impl<T> DoublyNode<T> {
    #[inline]
    pub(crate) const fn sentinel() -> Self {
        Self {
            slot: Slot::Sentinel,
            prev: NIL,
            next: NIL,
        }
    }

    #[inline]
    pub(crate) const fn occupied(value: T, prev: usize, next: usize) -> Self {
        Self {
            slot: Slot::Occupied(value),
            prev,
            next,
        }
    }

    /// Returns this node's slot.
    #[inline]
    pub fn slot(&self) -> &Slot<T> {
        &self.slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_has_no_value() {
        let mut slot: Slot<u64> = Slot::Sentinel;
        assert!(slot.is_sentinel());
        assert_eq!(slot.value(), None);
        assert_eq!(slot.value_mut(), None);
        assert_eq!(slot.into_value(), None);
    }

    #[test]
    fn occupied_slot_access() {
        let mut slot = Slot::Occupied(5u64);
        assert!(!slot.is_sentinel());
        *slot.value_mut().unwrap() += 1;
        assert_eq!(slot.value(), Some(&6));
        assert_eq!(slot.into_value(), Some(6));
    }

    #[test]
    fn fresh_sentinels_are_unlinked() {
        let s: SinglyNode<u8> = SinglyNode::sentinel();
        assert_eq!(s.next, NIL);
        assert!(s.slot().is_sentinel());

        let d: DoublyNode<u8> = DoublyNode::sentinel();
        assert_eq!(d.prev, NIL);
        assert_eq!(d.next, NIL);
    }
}
