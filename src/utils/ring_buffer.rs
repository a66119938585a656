//! A bounded buffer that drops its oldest element when full.

use std::collections::VecDeque;
use std::collections::vec_deque;

// ============================================================================
// RingBuffer
// ============================================================================

/// A fixed-capacity buffer with O(1) push.
///
/// When the buffer is at capacity, pushing evicts the oldest element. Storage
/// grows lazily up to the capacity, so a large bound costs nothing until used.
#[derive(Clone, PartialEq, Eq)]
pub struct RingBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// Creates an empty buffer holding at most `capacity` elements.
    ///
    /// A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Appends an element, returning the evicted oldest element if full.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    pub fn extend(&mut self, iter: impl IntoIterator<Item = T>) {
        for item in iter {
            self.push(item);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates oldest to newest. Use `.rev()` for newest first.
    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.items.iter()
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.iter().cloned().collect()
    }
}

impl<T> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RingBuffer")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("elements", &self.items)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_within_capacity() {
        let mut buf = RingBuffer::new(3);
        assert_eq!(buf.push(1), None);
        assert_eq!(buf.push(2), None);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.to_vec(), vec![1, 2]);
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut buf = RingBuffer::new(3);
        buf.extend([1, 2, 3]);
        assert_eq!(buf.push(4), Some(1));
        assert_eq!(buf.to_vec(), vec![2, 3, 4]);
    }

    #[test]
    fn test_reverse_iteration() {
        let mut buf = RingBuffer::new(2);
        buf.extend(["a", "b", "c"]);
        let newest_first: Vec<_> = buf.iter().rev().copied().collect();
        assert_eq!(newest_first, vec!["c", "b"]);
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let mut buf = RingBuffer::new(0);
        buf.push("x");
        assert_eq!(buf.push("y"), Some("x"));
    }

    #[test]
    fn test_clear() {
        let mut buf = RingBuffer::new(4);
        buf.extend(0..4);
        buf.clear();
        assert!(buf.is_empty());
        buf.push(9);
        assert_eq!(buf.to_vec(), vec![9]);
    }
}
