use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A max-priority queue over arbitrary items. Ordering is by priority
/// only; ties come out in unspecified order.
#[derive(Debug, Clone)]
pub struct MaxQueue<T> {
    heap: BinaryHeap<Entry<T>>,
}

impl<T> MaxQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, item: T, priority: u32) {
        self.heap.push(Entry { priority, item });
    }

    /// Removes and returns an item with the current maximum priority.
    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|entry| entry.item)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Default for MaxQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
struct Entry<T> {
    priority: u32,
    item: T,
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority.cmp(&other.priority)
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl<T> Eq for Entry<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_order() {
        let mut queue = MaxQueue::new();
        queue.push("low", 1);
        queue.push("high", 9);
        queue.push("mid", 5);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Some("high"));
        assert_eq!(queue.pop(), Some("mid"));
        assert_eq!(queue.pop(), Some("low"));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_equal_priorities_all_come_out() {
        let mut queue = MaxQueue::new();
        for item in 0..4 {
            queue.push(item, 7);
        }
        let mut items: Vec<i32> = std::iter::from_fn(|| queue.pop()).collect();
        items.sort_unstable();
        assert_eq!(items, vec![0, 1, 2, 3]);
    }
}
