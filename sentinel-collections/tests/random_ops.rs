//! Randomized operation sequences checked against `Vec`/`VecDeque` models.

use std::collections::VecDeque;

use proptest::prelude::*;
use sentinel_collections::{
    CircularForwardList, CircularList, Error, ForwardList, List, Stack, Vector,
};

#[derive(Debug, Clone)]
enum Op {
    PushFront(u32),
    PushBack(u32),
    PopFront,
    PopBack,
    /// Insert at `index % (len + 1)`
    InsertAt(usize, u32),
    /// Erase at `index % len`
    EraseAt(usize),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<u32>().prop_map(Op::PushFront),
        3 => any::<u32>().prop_map(Op::PushBack),
        2 => Just(Op::PopFront),
        2 => Just(Op::PopBack),
        3 => (any::<usize>(), any::<u32>()).prop_map(|(i, v)| Op::InsertAt(i, v)),
        3 => any::<usize>().prop_map(Op::EraseAt),
        1 => Just(Op::Clear),
    ]
}

fn model_pop_front(model: &mut VecDeque<u32>) -> Result<u32, Error> {
    model.pop_front().ok_or(Error::EmptyContainer)
}

fn model_pop_back(model: &mut VecDeque<u32>) -> Result<u32, Error> {
    model.pop_back().ok_or(Error::EmptyContainer)
}

proptest! {
    #[test]
    fn list_matches_model(ops in prop::collection::vec(op(), 0..200)) {
        let mut list: List<u32> = List::new();
        let mut model = VecDeque::new();

        for op in ops {
            match op {
                Op::PushFront(v) => { list.push_front(v); model.push_front(v); }
                Op::PushBack(v) => { list.push_back(v); model.push_back(v); }
                Op::PopFront => prop_assert_eq!(list.pop_front(), model_pop_front(&mut model)),
                Op::PopBack => prop_assert_eq!(list.pop_back(), model_pop_back(&mut model)),
                Op::InsertAt(i, v) => {
                    let i = i % (model.len() + 1);
                    let pos = list.advance_by(list.begin(), i).unwrap();
                    let at = list.insert(pos, v).unwrap();
                    prop_assert_eq!(list.get(at), Ok(&v));
                    model.insert(i, v);
                }
                Op::EraseAt(i) => {
                    if model.is_empty() {
                        prop_assert_eq!(list.erase(list.begin()), Err(Error::EmptyContainer));
                    } else {
                        let i = i % model.len();
                        let pos = list.advance_by(list.begin(), i).unwrap();
                        list.erase(pos).unwrap();
                        model.remove(i);
                    }
                }
                Op::Clear => { list.clear(); model.clear(); }
            }

            prop_assert_eq!(list.len(), model.len());
            prop_assert!(list.iter().eq(model.iter()));
            prop_assert!(list.iter().rev().eq(model.iter().rev()));
        }
    }

    #[test]
    fn circular_list_matches_model(ops in prop::collection::vec(op(), 0..200)) {
        let mut ring: CircularList<u32> = CircularList::new();
        let mut model = VecDeque::new();

        for op in ops {
            match op {
                Op::PushFront(v) => { ring.push_front(v); model.push_front(v); }
                Op::PushBack(v) => { ring.push_back(v); model.push_back(v); }
                Op::PopFront => prop_assert_eq!(ring.pop_front(), model_pop_front(&mut model)),
                Op::PopBack => prop_assert_eq!(ring.pop_back(), model_pop_back(&mut model)),
                Op::InsertAt(i, v) => {
                    // Circular advance never reaches end() on a non-empty ring,
                    // so the last slot is reached from end() directly
                    let i = i % (model.len() + 1);
                    let pos = if i == model.len() {
                        ring.end()
                    } else {
                        ring.advance_by(ring.begin(), i).unwrap()
                    };
                    ring.insert(pos, v).unwrap();
                    model.insert(i, v);
                }
                Op::EraseAt(i) => {
                    if !model.is_empty() {
                        let i = i % model.len();
                        // Going backward exercises the other direction of the ring
                        let pos = ring.move_by(ring.begin(), i as isize - model.len() as isize).unwrap();
                        ring.erase(pos).unwrap();
                        model.remove(i);
                    }
                }
                Op::Clear => { ring.clear(); model.clear(); }
            }

            prop_assert_eq!(ring.len(), model.len());
            prop_assert!(ring.iter().eq(model.iter()));
        }
    }

    #[test]
    fn forward_list_matches_model(ops in prop::collection::vec(op(), 0..200)) {
        let mut list: ForwardList<u32> = ForwardList::new();
        let mut model = VecDeque::new();

        for op in ops {
            match op {
                Op::PushFront(v) => { list.push_front(v); model.push_front(v); }
                Op::PushBack(v) => { list.push_back(v); model.push_back(v); }
                Op::PopFront => prop_assert_eq!(list.pop_front(), model_pop_front(&mut model)),
                Op::PopBack => prop_assert_eq!(list.pop_back(), model_pop_back(&mut model)),
                Op::InsertAt(i, v) => {
                    let i = i % (model.len() + 1);
                    let prev = list.advance_by(list.before_begin(), i).unwrap();
                    list.insert_after(prev, v).unwrap();
                    model.insert(i, v);
                }
                Op::EraseAt(i) => {
                    if model.is_empty() {
                        prop_assert_eq!(
                            list.erase_after(list.before_begin()),
                            Err(Error::EmptyContainer)
                        );
                    } else {
                        let i = i % model.len();
                        let pos = list.advance_by(list.begin(), i).unwrap();
                        list.erase(pos).unwrap();
                        model.remove(i);
                    }
                }
                Op::Clear => { list.clear(); model.clear(); }
            }

            prop_assert_eq!(list.len(), model.len());
            prop_assert!(list.iter().eq(model.iter()));
        }
    }

    #[test]
    fn circular_forward_list_matches_model(ops in prop::collection::vec(op(), 0..200)) {
        let mut ring: CircularForwardList<u32> = CircularForwardList::new();
        let mut model = VecDeque::new();

        for op in ops {
            match op {
                Op::PushFront(v) => { ring.push_front(v); model.push_front(v); }
                Op::PushBack(v) => { ring.push_back(v); model.push_back(v); }
                Op::PopFront => prop_assert_eq!(ring.pop_front(), model_pop_front(&mut model)),
                Op::PopBack => prop_assert_eq!(ring.pop_back(), model_pop_back(&mut model)),
                Op::InsertAt(i, v) => {
                    let i = i % (model.len() + 1);
                    let prev = if i == 0 {
                        ring.before_begin()
                    } else {
                        ring.advance_by(ring.begin(), i - 1).unwrap()
                    };
                    ring.insert_after(prev, v).unwrap();
                    model.insert(i, v);
                }
                Op::EraseAt(i) => {
                    if !model.is_empty() {
                        // erase_after wraps: erasing after index i removes i + 1 mod len
                        let i = i % model.len();
                        let prev = ring.advance_by(ring.begin(), i).unwrap();
                        ring.erase_after(prev).unwrap();
                        model.remove((i + 1) % model.len());
                    }
                }
                Op::Clear => { ring.clear(); model.clear(); }
            }

            prop_assert_eq!(ring.len(), model.len());
            prop_assert!(ring.iter().eq(model.iter()));
        }
    }

    #[test]
    fn vector_matches_model(ops in prop::collection::vec(op(), 0..200)) {
        let mut vector: Vector<u32> = Vector::new();
        let mut model: Vec<u32> = Vec::new();

        for op in ops {
            match op {
                Op::PushFront(v) => { vector.insert(0, v).unwrap(); model.insert(0, v); }
                Op::PushBack(v) => { vector.push_back(v); model.push(v); }
                Op::PopFront => {
                    if model.is_empty() {
                        prop_assert_eq!(vector.remove(0), Err(Error::IndexOutOfRange { index: 0, len: 0 }));
                    } else {
                        prop_assert_eq!(vector.remove(0), Ok(model.remove(0)));
                    }
                }
                Op::PopBack => prop_assert_eq!(vector.pop_back(), model.pop().ok_or(Error::EmptyContainer)),
                Op::InsertAt(i, v) => {
                    let i = i % (model.len() + 1);
                    prop_assert_eq!(vector.insert(i, v), Ok(i));
                    model.insert(i, v);
                }
                Op::EraseAt(i) => {
                    // Includes len() itself, which is a no-op
                    let i = i % (model.len() + 1);
                    prop_assert_eq!(vector.erase(i), Ok(i));
                    if i < model.len() {
                        model.remove(i);
                    }
                }
                Op::Clear => { vector.clear(); model.clear(); }
            }

            prop_assert!(vector.len() <= vector.capacity());
            prop_assert_eq!(vector.as_slice(), model.as_slice());
        }
    }

    #[test]
    fn stack_law_holds(values in prop::collection::vec(any::<u32>(), 0..100)) {
        let mut vector_stack: Stack<u32> = Stack::new();
        let mut list_stack: Stack<u32, List<u32>> = Stack::new();
        let mut forward_stack: Stack<u32, ForwardList<u32>> = Stack::new();

        for &v in &values {
            vector_stack.push(v);
            list_stack.push(v);
            forward_stack.push(v);
        }
        for &v in values.iter().rev() {
            prop_assert_eq!(vector_stack.pop(), Ok(v));
            prop_assert_eq!(list_stack.pop(), Ok(v));
            prop_assert_eq!(forward_stack.pop(), Ok(v));
        }
        prop_assert!(vector_stack.is_empty());
        prop_assert!(list_stack.is_empty());
        prop_assert!(forward_stack.is_empty());
    }

    #[test]
    fn growth_is_doubling(n in 1usize..300) {
        let mut vector: Vector<u32> = Vector::new();
        for i in 0..n {
            vector.push_back(i as u32);
        }
        let expected = (n.next_power_of_two()).max(Vector::<u32>::INITIAL_CAPACITY);
        prop_assert_eq!(vector.capacity(), expected);
    }
}
