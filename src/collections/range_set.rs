use std::fmt::{self, Debug, Formatter};

/// A set of `usize` values in the range `0..capacity`, backed by a bit per value.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct RangeSet {
    len: usize,
    bits: Vec<bool>,
}

impl RangeSet {
    #[cfg(test)]
    pub fn new(capacity: usize) -> RangeSet {
        RangeSet {
            len: 0,
            bits: vec![false; capacity],
        }
    }

    pub fn with_all(capacity: usize) -> RangeSet {
        RangeSet {
            len: capacity,
            bits: vec![true; capacity],
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, n: usize) -> bool {
        self.bits[n]
    }

    pub fn insert(&mut self, n: usize) -> bool {
        if self.bits[n] {
            return false;
        }
        self.bits[n] = true;
        self.len += 1;
        true
    }

    pub fn remove(&mut self, n: usize) -> bool {
        if !self.bits[n] {
            return false;
        }
        self.bits[n] = false;
        self.len -= 1;
        true
    }

    pub fn single_value(&self) -> Option<usize> {
        match self.len {
            1 => self.iter().next(),
            _ => None,
        }
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            bits: &self.bits,
            index: 0,
        }
    }
}

impl Debug for RangeSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

pub(crate) struct Iter<'a> {
    bits: &'a [bool],
    index: usize,
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        for i in self.index..self.bits.len() {
            if self.bits[i] {
                self.index = i + 1;
                return Some(i);
            }
        }
        self.index = self.bits.len();
        None
    }
}

impl Extend<usize> for RangeSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for i in iter {
            self.insert(i);
        }
    }
}
