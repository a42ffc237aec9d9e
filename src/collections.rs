use std::hash::BuildHasherDefault;

use indexmap::IndexMap;
use rustc_hash::FxHasher;

/// Use indexmap for fast lookups and rustc_hash for fast hashing
pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Binary max-heap with mutable priorities
/// The highest numeric priority is served first, so callers that want a
/// min-queue (e.g. A* ordering by f-cost) push negated priorities.
/// Elements are located by value equality, never by priority, which lets a
/// search update an already-enqueued node in place (decrease-key).
#[derive(Debug)]
pub struct PriorityQueue<T> {
    // heap[0] is the root; children of i live at 2i+1 and 2i+2
    heap: Vec<(T, f64)>,
}

impl<T: PartialEq> PriorityQueue<T> {
    pub fn new() -> Self {
        Self { heap: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Insert an item with the given priority
    /// Duplicates are allowed and become distinct entries
    pub fn push(&mut self, item: T, priority: f64) {
        self.heap.push((item, priority));
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return the highest-priority item, or None when empty
    pub fn pop(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        let (item, _) = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(item)
    }

    /// The highest-priority item without removing it
    pub fn peek(&self) -> Option<&T> {
        self.heap.first().map(|(item, _)| item)
    }

    /// Find an enqueued item equal to the given one
    pub fn get(&self, item: &T) -> Option<&T> {
        self.heap.iter().find(|(it, _)| it == item).map(|(it, _)| it)
    }

    /// Mutable access to an enqueued item equal to the given one
    /// The mutation must not change what the item compares equal to
    pub fn get_mut(&mut self, item: &T) -> Option<&mut T> {
        self.heap
            .iter_mut()
            .find(|(it, _)| it == item)
            .map(|(it, _)| it)
    }

    /// Update the priority of the first enqueued item equal to the given one
    /// and restore heap order; returns false if no such item is enqueued
    pub fn change_priority(&mut self, item: &T, priority: f64) -> bool {
        let Some(idx) = self.heap.iter().position(|(it, _)| it == item) else {
            return false;
        };
        self.heap[idx].1 = priority;
        // only one of these moves the entry
        self.sift_up(idx);
        self.sift_down(idx);
        true
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.heap[idx].1.total_cmp(&self.heap[parent].1).is_le() {
                break;
            }
            self.heap.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut largest = idx;

            if left < len && self.heap[left].1.total_cmp(&self.heap[largest].1).is_gt() {
                largest = left;
            }
            if right < len && self.heap[right].1.total_cmp(&self.heap[largest].1).is_gt() {
                largest = right;
            }
            if largest == idx {
                break;
            }
            self.heap.swap(idx, largest);
            idx = largest;
        }
    }
}

impl<T: PartialEq> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
