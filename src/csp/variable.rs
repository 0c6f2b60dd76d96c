use crate::csp::domain::{self, Domain};
use crate::csp::Value;

/// A CSP variable with a finite domain and an optional assigned value.
///
/// Only `Csp` mutates a variable, so the current domain has a single writer.
#[derive(Clone, Debug)]
pub struct Variable {
    name: String,
    domain: Domain,
    assigned: Option<Value>,
}

impl Variable {
    pub(crate) fn new(name: String, domain: Domain) -> Self {
        Self {
            name,
            domain,
            assigned: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_domain(&self) -> &[Value] {
        self.domain.full()
    }

    pub fn full_domain_size(&self) -> usize {
        self.domain.full().len()
    }

    /// The values that have not been pruned, in full domain order
    pub fn cur_domain(&self) -> domain::Iter<'_> {
        self.domain.iter()
    }

    pub fn cur_domain_size(&self) -> usize {
        self.domain.len()
    }

    pub fn in_cur_domain(&self, value: Value) -> bool {
        self.domain.contains(value)
    }

    /// Whether a constraint tuple may use `value` for this variable: it must equal the assigned
    /// value if there is one, otherwise it must be in the current domain.
    pub fn is_admissible(&self, value: Value) -> bool {
        match self.assigned {
            Some(assigned) => assigned == value,
            None => self.domain.contains(value),
        }
    }

    pub fn assigned_value(&self) -> Option<Value> {
        self.assigned
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned.is_some()
    }

    pub(crate) fn prune_value(&mut self, value: Value) -> bool {
        self.domain.remove(value)
    }

    pub(crate) fn unprune_value(&mut self, value: Value) -> bool {
        self.domain.insert(value)
    }

    pub(crate) fn assign(&mut self, value: Value) -> bool {
        if self.assigned.is_some() || !self.domain.contains(value) {
            return false;
        }
        self.assigned = Some(value);
        true
    }

    pub(crate) fn unassign(&mut self) -> Option<Value> {
        self.assigned.take()
    }

    pub(crate) fn reset(&mut self) {
        self.assigned = None;
        self.domain.restore_all();
    }
}

#[cfg(test)]
mod tests {
    use super::Variable;
    use crate::csp::domain::Domain;

    fn variable(values: Vec<i32>) -> Variable {
        Variable::new("V".to_string(), Domain::new(values).unwrap())
    }

    #[test]
    fn assign_requires_current_value() {
        let mut v = variable(vec![0, 1, 2]);
        v.prune_value(1);
        assert!(!v.assign(1));
        assert!(v.assign(2));
        assert!(!v.assign(0));
        assert_eq!(Some(2), v.assigned_value());
        assert_eq!(Some(2), v.unassign());
        assert!(!v.is_assigned());
    }

    #[test]
    fn admissible_values() {
        let mut v = variable(vec![0, 1, 2]);
        v.prune_value(0);
        assert!(!v.is_admissible(0));
        assert!(v.is_admissible(1));
        v.assign(2);
        assert!(!v.is_admissible(1));
        assert!(v.is_admissible(2));
        // assignment does not shrink the stored domain
        assert_eq!(2, v.cur_domain_size());
    }

    #[test]
    fn reset() {
        let mut v = variable(vec![3, 4]);
        v.prune_value(3);
        v.assign(4);
        v.reset();
        assert!(!v.is_assigned());
        assert_eq!(vec![3, 4], v.cur_domain().collect::<Vec<_>>());
    }
}
