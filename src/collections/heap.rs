use crate::{Error, Result};
use ahash::RandomState;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

/// An array-backed binary min-heap of fixed capacity,
/// which knows where every enrolled value sits.
///
/// Values are ordered by a comparison supplied on each mutating call,
/// so keys may live outside the heap, e.g., in a distance table.
/// After a key of an enrolled value is lowered, [IndexedMinHeap::decrease_key] restores the order.
///
/// | Operation      | Complexity                  |
/// | -------------- | --------------------------- |
/// | `insert`       | $O(\log n)$                 |
/// | `extract_min`  | $O(\log n)$                 |
/// | `decrease_key` | $O(\log n)$                 |
/// | `remove`       | $O(\log n)$                 |
/// | `peek`         | $O(1)$                      |
///
/// Free slots are picked first-fit, i.e., the lowest free index.
/// An empty slot never has a non-empty descendant between operations.
pub struct IndexedMinHeap<T>
where
    T: Clone + Eq + Hash,
{
    slots: Vec<Option<T>>,
    key_map: HashMap<T, usize, RandomState>,
    free: BTreeSet<usize>,
}

impl<T> IndexedMinHeap<T>
where
    T: Clone + Eq + Hash,
{
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            key_map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            free: (0..capacity).collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.key_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_map.is_empty()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.key_map.contains_key(value)
    }

    /// The minimum, if any.
    pub fn peek(&self) -> Option<&T> {
        self.slots.first().and_then(|x| x.as_ref())
    }

    /// Enrolls a value.
    ///
    /// Returns `false`, leaving the heap unchanged, when the heap is full or the value is already enrolled.
    pub fn insert<C>(&mut self, value: T, cmp: C) -> bool
    where
        C: Fn(&T, &T) -> Ordering,
    {
        if self.key_map.contains_key(&value) {
            return false;
        }
        let slot = match self.free.iter().next() {
            None => return false,
            Some(slot) => *slot,
        };
        self.free.remove(&slot);
        self.slots[slot] = Some(value.clone());
        self.key_map.insert(value, slot);
        self.sift_up(slot, &cmp);
        true
    }

    /// Removes and returns the minimum.
    pub fn extract_min<C>(&mut self, cmp: C) -> Result<T>
    where
        C: Fn(&T, &T) -> Ordering,
    {
        if self.peek().is_none() {
            return Err(Error::EmptyHeap);
        }
        self.vacate(0, &cmp).ok_or(Error::EmptyHeap)
    }

    /// Restores the heap order after the key of `value` was lowered.
    ///
    /// Returns `false` if `value` is not enrolled.
    pub fn decrease_key<C>(&mut self, value: &T, cmp: C) -> bool
    where
        C: Fn(&T, &T) -> Ordering,
    {
        match self.key_map.get(value) {
            None => false,
            Some(slot) => {
                let slot = *slot;
                self.sift_up(slot, &cmp);
                true
            }
        }
    }

    /// Removes an arbitrary enrolled value.
    pub fn remove<C>(&mut self, value: &T, cmp: C) -> Option<T>
    where
        C: Fn(&T, &T) -> Ordering,
    {
        let slot = *self.key_map.get(value)?;
        self.vacate(slot, &cmp)
    }

    /// Takes the value out of `slot` and patches the hole
    /// by promoting the smaller child, level by level, until a leaf is reached.
    fn vacate<C>(&mut self, slot: usize, cmp: &C) -> Option<T>
    where
        C: Fn(&T, &T) -> Ordering,
    {
        let value = self.slots[slot].take()?;
        self.key_map.remove(&value);
        let mut hole = slot;
        while let Some(child) = self.smaller_child(hole, cmp) {
            let promoted = self.slots[child].take();
            if let Some(x) = promoted.as_ref() {
                self.key_map.insert(x.clone(), hole);
            }
            self.slots[hole] = promoted;
            hole = child;
        }
        self.free.insert(hole);
        Some(value)
    }

    fn smaller_child<C>(&self, parent: usize, cmp: &C) -> Option<usize>
    where
        C: Fn(&T, &T) -> Ordering,
    {
        let left = parent * 2 + 1;
        let right = left + 1;
        match (self.value_at(left), self.value_at(right)) {
            (None, None) => None,
            (Some(_), None) => Some(left),
            (None, Some(_)) => Some(right),
            (Some(l), Some(r)) => {
                if cmp(r, l) == Ordering::Less {
                    Some(right)
                } else {
                    Some(left)
                }
            }
        }
    }

    fn sift_up<C>(&mut self, mut slot: usize, cmp: &C)
    where
        C: Fn(&T, &T) -> Ordering,
    {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            let go_up = match (self.value_at(slot), self.value_at(parent)) {
                (Some(x), Some(p)) => cmp(x, p) == Ordering::Less,
                (Some(_), None) => true,
                _ => false,
            };
            if !go_up {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
        for slot in [a, b] {
            if let Some(x) = self.slots[slot].as_ref() {
                self.key_map.insert(x.clone(), slot);
            }
        }
        match (self.slots[a].is_some(), self.slots[b].is_some()) {
            (true, false) => {
                self.free.remove(&a);
                self.free.insert(b);
            }
            (false, true) => {
                self.free.remove(&b);
                self.free.insert(a);
            }
            _ => {}
        }
    }

    fn value_at(&self, slot: usize) -> Option<&T> {
        self.slots.get(slot).and_then(|x| x.as_ref())
    }

    #[cfg(test)]
    fn assert_invariants<C>(&self, cmp: C)
    where
        C: Fn(&T, &T) -> Ordering,
    {
        assert_eq!(self.free.len() + self.key_map.len(), self.capacity());
        for (slot, x) in self.slots.iter().enumerate() {
            match x {
                None => {
                    assert!(self.free.contains(&slot));
                    assert!(self.value_at(slot * 2 + 1).is_none());
                    assert!(self.value_at(slot * 2 + 2).is_none());
                }
                Some(x) => {
                    assert_eq!(self.key_map.get(x), Some(&slot));
                    for child in [slot * 2 + 1, slot * 2 + 2] {
                        if let Some(c) = self.value_at(child) {
                            assert_ne!(cmp(c, x), Ordering::Less);
                        }
                    }
                }
            }
        }
    }
}
