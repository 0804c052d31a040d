//! Lists running on a user-supplied node pool.

use sentinel_collections::{
    CircularForwardList, DoublyNode, Error, ForwardList, List, SinglyNode, Stack, Storage,
};

/// Free-list pool over a `Vec`, counting every insert and remove.
struct CountingPool<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
    len: usize,
    inserts: usize,
    removes: usize,
}

impl<T> Storage<T> for CountingPool<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
            inserts: 0,
            removes: 0,
        }
    }

    fn insert(&mut self, value: T) -> usize {
        self.inserts += 1;
        self.len += 1;
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(value);
                index
            }
            None => {
                self.slots.push(Some(value));
                self.slots.len() - 1
            }
        }
    }

    fn remove(&mut self, index: usize) -> Option<T> {
        let value = self.slots.get_mut(index)?.take()?;
        self.free.push(index);
        self.removes += 1;
        self.len -= 1;
        Some(value)
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)?.as_ref()
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)?.as_mut()
    }

    fn len(&self) -> usize {
        self.len
    }
}

type PooledForward = ForwardList<u64, CountingPool<SinglyNode<u64>>>;
type PooledList = List<u64, CountingPool<DoublyNode<u64>>>;

#[test]
fn sentinels_are_allocated_once() {
    let mut list = PooledList::new();
    assert_eq!(list.storage().inserts, 2);
    assert_eq!(list.storage().len(), 2);

    list.push_back(1);
    list.push_back(2);
    list.clear();
    list.clear();

    // Clear frees elements only
    assert_eq!(list.storage().inserts, 4);
    assert_eq!(list.storage().removes, 2);
    assert_eq!(list.storage().len(), 2);
}

#[test]
fn one_node_per_insert_and_erase() {
    let mut list = PooledForward::new();
    let first = list.insert_after(list.before_begin(), 1).unwrap();
    list.insert_after(first, 2).unwrap();
    assert_eq!(list.storage().inserts, 4);

    list.erase_after(list.before_begin()).unwrap();
    assert_eq!(list.storage().removes, 1);
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![2]);
}

#[test]
fn freed_slots_are_reused() {
    let mut list = PooledList::new();
    list.push_back(1);
    let before = list.storage().slots.len();

    list.pop_back().unwrap();
    list.push_back(2);
    assert_eq!(list.storage().slots.len(), before);
    assert_eq!(list.back(), Ok(&2));
}

#[test]
fn rejected_operations_do_not_allocate() {
    let mut list = PooledForward::from([1]);
    let inserts = list.storage().inserts;

    assert_eq!(list.insert_after(list.end(), 9), Err(Error::InvalidPosition));
    assert_eq!(list.insert_before(list.before_begin(), 9), Err(Error::InvalidPosition));
    assert_eq!(list.storage().inserts, inserts);
}

#[test]
fn take_gives_source_a_fresh_pool() {
    let mut a = PooledList::from([1, 2, 3]);
    let b = a.take();

    assert_eq!(a.storage().inserts, 2);
    assert_eq!(b.storage().len(), 5);
}

#[test]
fn pooled_ring_and_stack() {
    let mut ring: CircularForwardList<u64, CountingPool<SinglyNode<u64>>> =
        CircularForwardList::from([1, 2]);
    let last = ring.advance(ring.begin()).unwrap();
    assert_eq!(ring.advance(last), Ok(ring.begin()));

    let mut stack: Stack<u64, PooledList> = Stack::new();
    stack.push(5);
    stack.push(6);
    assert_eq!(stack.pop(), Ok(6));
    assert_eq!(stack.as_inner().storage().removes, 1);
    ring.clear();
    assert!(ring.is_empty());
}
