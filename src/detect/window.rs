//! Fixed-capacity sliding window of the most recent inputs.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct Window<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> Window<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `item`, dropping the oldest entry when full.
    pub fn push(&mut self, item: T) {
        if self.capacity == 0 {
            return;
        }
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.items.len() == self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

impl<T> Window<T> {
    /// True when the window is full and equals `target` element-wise.
    pub fn matches<U>(&self, target: &[U]) -> bool
    where
        T: PartialEq<U>,
    {
        self.is_full()
            && self.items.len() == target.len()
            && self.items.iter().zip(target).all(|(a, b)| a == b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_exceeds_capacity() {
        let mut w = Window::new(3);
        for i in 0..10 {
            w.push(i);
            assert!(w.len() <= 3);
        }
        assert_eq!(w.iter().copied().collect::<Vec<_>>(), vec![7, 8, 9]);
    }

    #[test]
    fn partial_window_never_matches() {
        let mut w = Window::new(3);
        w.push(1);
        w.push(2);
        assert!(!w.is_full());
        assert!(!w.matches(&[1, 2]));
        w.push(3);
        assert!(w.matches(&[1, 2, 3]));
    }

    #[test]
    fn clear_empties() {
        let mut w = Window::new(2);
        w.push("a");
        w.clear();
        assert!(w.is_empty());
    }

    #[test]
    fn zero_capacity_stays_empty() {
        let mut w = Window::new(0);
        w.push(1);
        assert!(w.is_empty());
        assert!(!w.is_full());
    }
}
