use crate::collections::range_set;
use crate::collections::RangeSet;
use crate::csp::Value;
use crate::HashMap;

/// The values a variable may take.
///
/// The full domain is an ordered list of distinct values fixed at creation. The current domain is
/// the subset of it that has not been pruned, tracked by position so that iteration always follows
/// the full domain order.
#[derive(Clone, Debug)]
pub struct Domain {
    values: Vec<Value>,
    positions: HashMap<Value, usize>,
    current: RangeSet,
}

impl Domain {
    /// Creates a domain with every value present. Returns the first repeated value as an error.
    pub(crate) fn new(values: Vec<Value>) -> Result<Self, Value> {
        let mut positions = HashMap::default();
        for (i, &value) in values.iter().enumerate() {
            if positions.insert(value, i).is_some() {
                return Err(value);
            }
        }
        let current = RangeSet::with_all(values.len());
        Ok(Self {
            values,
            positions,
            current,
        })
    }

    pub fn full(&self) -> &[Value] {
        &self.values
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            values: &self.values,
            iter: self.current.iter(),
        }
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn contains(&self, value: Value) -> bool {
        self.positions
            .get(&value)
            .map_or(false, |&i| self.current.contains(i))
    }

    pub fn single_value(&self) -> Option<Value> {
        self.current.single_value().map(|i| self.values[i])
    }

    /// Removes `value` from the current domain. Returns `false` if it was not present.
    pub(crate) fn remove(&mut self, value: Value) -> bool {
        match self.positions.get(&value) {
            Some(&i) => self.current.remove(i),
            None => false,
        }
    }

    /// Puts a pruned value back. Returns `false` if the value is not pruned or not in the full domain.
    pub(crate) fn insert(&mut self, value: Value) -> bool {
        match self.positions.get(&value) {
            Some(&i) => self.current.insert(i),
            None => false,
        }
    }

    pub(crate) fn restore_all(&mut self) {
        self.current = RangeSet::with_all(self.values.len());
    }
}

pub struct Iter<'a> {
    values: &'a [Value],
    iter: range_set::Iter<'a>,
}

impl Iterator for Iter<'_> {
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|i| self.values[i])
    }
}

impl<'a> IntoIterator for &'a Domain {
    type Item = Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
