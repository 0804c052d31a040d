//! Sentinel-bounded sequence containers.
//!
//! Linked lists, a growable array, and a stack adapter, built around two
//! ideas:
//!
//! - **Sentinel nodes**: every list allocates a head and a tail node at
//!   construction and keeps them until it is dropped. They never hold a value.
//!   Every element therefore has a real predecessor and successor, and the
//!   boundary rules reduce to "is this cursor at a sentinel?".
//! - **Nodes in an arena**: nodes live in a [`Storage`] (default
//!   `slab::Slab`) and link to each other by index. The list owns the arena,
//!   so there are no ownership cycles even when the sentinels close a ring.
//!
//! # Containers
//!
//! | Container | Links | Ends | `push_back` / `pop_back` |
//! |-----------|-------|------|--------------------------|
//! | [`ForwardList`] | next | open | O(n) walk |
//! | [`CircularForwardList`] | next | ring | O(n) walk |
//! | [`List`] | next + prev | open | O(1) |
//! | [`CircularList`] | next + prev | ring | O(1) |
//! | [`Vector`] | contiguous | - | amortized O(1) |
//! | [`Stack`] | any of the above | - | delegates |
//!
//! # Cursors
//!
//! A [`Cursor`] is a copyable `(current, head, tail)` triple. It does not
//! borrow its list; every operation that takes one re-validates it, and
//! dereferencing a sentinel fails with [`Error::OutOfRangeDereference`].
//!
//! ```
//! use sentinel_collections::{Error, ForwardList};
//!
//! let mut list: ForwardList<&str> = ForwardList::new();
//! assert_eq!(list.begin(), list.end());
//!
//! let a = list.insert_after(list.before_begin(), "a")?;
//! list.insert_after(a, "b")?;
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["a", "b"]);
//!
//! assert_eq!(list.get(list.end()), Err(Error::OutOfRangeDereference));
//! assert_eq!(list.insert_after(list.end(), "c"), Err(Error::InvalidPosition));
//! # Ok::<(), Error>(())
//! ```
//!
//! # Topology
//!
//! The `RING` const parameter picks between open ends ([`LINEAR`]) and a ring
//! ([`CIRCULAR`]). On a ring, cursor movement skips the sentinels, so stepping
//! past the last element lands on the first.
//!
//! ```
//! use sentinel_collections::{CircularList, Error};
//!
//! let ring: CircularList<u8> = CircularList::from([1, 2, 3]);
//! let last = ring.retreat(ring.begin())?;
//! assert_eq!(ring.get(last), Ok(&3));
//! assert_eq!(ring.advance(last), Ok(ring.begin()));
//! # Ok::<(), Error>(())
//! ```
//!
//! # Moving Out
//!
//! `take()` on any container returns its contents and leaves a fresh, empty,
//! usable instance behind: lists get a new sentinel pair, a vector drops its
//! buffer.
//!
//! ```
//! use sentinel_collections::Vector;
//!
//! let mut a: Vector<u32> = Vector::from([1, 2, 3]);
//! let b = a.take();
//! assert_eq!((a.len(), a.capacity()), (0, 0));
//! assert_eq!(b.as_slice(), &[1, 2, 3]);
//! ```
//!
//! # Threading
//!
//! Containers are single-owner values with no internal locking. They are
//! `Send`/`Sync` exactly when their element type and storage are.

#![warn(missing_docs)]

pub mod cursor;
pub mod error;
pub mod forward;
pub mod list;
pub mod node;
pub mod stack;
pub mod storage;
pub mod vector;

pub use cursor::Cursor;
pub use error::{Error, Result};
pub use forward::{CircularForwardList, ForwardList, SinglyLinked};
pub use list::{CircularList, DoublyLinked, List};
pub use node::{CIRCULAR, DoublyNode, LINEAR, SinglyNode, Slot};
pub use stack::{Backing, Stack};
pub use storage::{NIL, Storage};
pub use vector::Vector;
