use crate::csp::{Value, VarId, Variable};
use crate::error::InvalidCsp;
use crate::{HashMap, HashSet};

/// A table constraint: an ordered scope and the explicit list of value tuples that satisfy it.
///
/// Tuples are positional, so `tuple[i]` is a value for `scope[i]`. Tuples never change after
/// construction.
#[derive(Clone, Debug)]
pub struct Constraint {
    name: String,
    scope: Vec<VarId>,
    tuples: Vec<Vec<Value>>,
    tuple_set: HashSet<Vec<Value>>,
    // (scope position, value) -> indices into `tuples`
    supports: HashMap<(usize, Value), Vec<usize>>,
}

impl Constraint {
    /// Creates a constraint, dropping duplicate tuples. Scope validity is checked by `CspBuilder`.
    pub(crate) fn new(
        name: String,
        scope: Vec<VarId>,
        satisfying_tuples: impl IntoIterator<Item = Vec<Value>>,
    ) -> Result<Self, InvalidCsp> {
        let mut tuples = Vec::new();
        let mut tuple_set = HashSet::default();
        let mut supports: HashMap<(usize, Value), Vec<usize>> = HashMap::default();
        for tuple in satisfying_tuples {
            if tuple.len() != scope.len() {
                return Err(InvalidCsp::TupleArity {
                    constraint: name,
                    expected: scope.len(),
                    found: tuple.len(),
                });
            }
            if !tuple_set.insert(tuple.clone()) {
                continue;
            }
            let index = tuples.len();
            for (position, &value) in tuple.iter().enumerate() {
                supports.entry((position, value)).or_default().push(index);
            }
            tuples.push(tuple);
        }
        Ok(Self {
            name,
            scope,
            tuples,
            tuple_set,
            supports,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> &[VarId] {
        &self.scope
    }

    pub fn arity(&self) -> usize {
        self.scope.len()
    }

    pub fn satisfying_tuples(&self) -> &[Vec<Value>] {
        &self.tuples
    }

    /// The position of `var` in the scope
    pub fn position(&self, var: VarId) -> Option<usize> {
        self.scope.iter().position(|&v| v == var)
    }

    pub fn n_unassigned(&self, variables: &[Variable]) -> usize {
        self.unassigned_vars(variables).count()
    }

    pub fn unassigned_vars<'a>(
        &'a self,
        variables: &'a [Variable],
    ) -> impl Iterator<Item = VarId> + 'a {
        self.scope
            .iter()
            .copied()
            .filter(move |&var| !variables[var].is_assigned())
    }

    /// The assigned value of each scope variable, in scope order
    pub fn assigned_values(&self, variables: &[Variable]) -> Vec<Option<Value>> {
        self.scope
            .iter()
            .map(|&var| variables[var].assigned_value())
            .collect()
    }

    /// Returns true if the positional vector `values` is a satisfying tuple.
    pub fn check(&self, values: &[Value]) -> bool {
        self.tuple_set.contains(values)
    }

    /// Returns true if some satisfying tuple has `value` for `var` and, for every other variable in
    /// the scope, a value that variable still admits. Variables outside of the scope are always
    /// supported.
    pub fn has_support(&self, variables: &[Variable], var: VarId, value: Value) -> bool {
        let position = match self.position(var) {
            Some(position) => position,
            None => return true,
        };
        let candidates = match self.supports.get(&(position, value)) {
            Some(candidates) => candidates,
            None => return false,
        };
        candidates
            .iter()
            .any(|&t| self.tuple_is_admissible(variables, &self.tuples[t], position))
    }

    fn tuple_is_admissible(&self, variables: &[Variable], tuple: &[Value], skip: usize) -> bool {
        self.scope
            .iter()
            .zip(tuple)
            .enumerate()
            .all(|(i, (&var, &value))| i == skip || variables[var].is_admissible(value))
    }
}
