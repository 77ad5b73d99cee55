//! Max-priority queue keyed by a score extracted from each element

use crate::spatial::PartitionNode;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Elements that expose a scalar priority; larger values pop first
pub trait Prioritized {
    /// Score used to order the element
    fn priority(&self) -> f64;
}

impl<T: Prioritized + ?Sized> Prioritized for &T {
    fn priority(&self) -> f64 {
        (**self).priority()
    }
}

impl Prioritized for PartitionNode {
    fn priority(&self) -> f64 {
        self.error()
    }
}

// Key is captured once on push so the heap never re-queries the element
struct Entry<T> {
    key: f64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key.total_cmp(&other.key) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.total_cmp(&other.key)
    }
}

/// Binary max-heap over [`Prioritized`] elements
///
/// Push and pop are O(log n), length is O(1). The order of elements with equal
/// priority is unspecified.
pub struct PriorityQueue<T> {
    heap: BinaryHeap<Entry<T>>,
}

impl<T: Prioritized> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Prioritized> PriorityQueue<T> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Create an empty queue with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Insert an element
    pub fn push(&mut self, item: T) {
        let key = item.priority();
        self.heap.push(Entry { key, item });
    }

    /// Remove the element with the highest priority, `None` when empty
    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|entry| entry.item)
    }

    /// Highest-priority element without removing it
    pub fn peek(&self) -> Option<&T> {
        self.heap.peek().map(|entry| &entry.item)
    }

    /// Priority of the element that would be popped next
    pub fn peek_priority(&self) -> Option<f64> {
        self.heap.peek().map(|entry| entry.key)
    }

    /// Number of pending elements
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True when nothing is pending
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Pending elements in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.heap.iter().map(|entry| &entry.item)
    }
}

impl<T: Prioritized> Extend<T> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T: Prioritized> FromIterator<T> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}
