use std::collections::VecDeque;
use std::hash::Hash;
use std::iter::FromIterator;

use crate::HashSet;

/// A FIFO queue that also behaves like a set (it cannot contain duplicate values).
#[derive(Clone, Debug)]
pub struct SetQueue<T> {
    set: HashSet<T>,
    queue: VecDeque<T>,
}

impl<T: Hash + Eq + Copy> SetQueue<T> {
    pub fn new() -> Self {
        Self {
            set: HashSet::default(),
            queue: VecDeque::new(),
        }
    }

    /// Adds `e` to the back of the queue. Returns `false` if `e` is already pending.
    pub fn push(&mut self, e: T) -> bool {
        if self.set.insert(e) {
            self.queue.push_back(e);
            true
        } else {
            false
        }
    }

    pub fn pop(&mut self) -> Option<T> {
        let e = self.queue.pop_front()?;
        self.set.remove(&e);
        Some(e)
    }

    pub fn contains(&self, e: &T) -> bool {
        self.set.contains(e)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.set.clear();
        self.queue.clear();
    }
}

impl<T: Hash + Eq + Copy> Default for SetQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq + Copy> Extend<T> for SetQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for e in iter {
            self.push(e);
        }
    }
}

impl<T: Hash + Eq + Copy> FromIterator<T> for SetQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}
