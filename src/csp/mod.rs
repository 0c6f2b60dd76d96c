//! Variables, table constraints and the CSP registry that owns them

pub use self::constraint::Constraint;
pub use self::domain::Domain;
pub use self::variable::Variable;

use std::fmt;
use std::fs;
use std::ops::Range;
use std::path::Path;

use itertools::Itertools;
use vec_map::VecMap;

use crate::error::{CspFromFileError, InvalidCsp, ParseCspError};
use crate::parse::parse_csp;
use crate::HashMap;

mod constraint;
pub mod domain;
mod variable;

pub type VarId = usize;
pub type ConstraintId = usize;
pub type Value = i32;

/// A value removed from a variable's current domain during propagation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pruning {
    pub var: VarId,
    pub value: Value,
}

impl Pruning {
    pub fn new(var: VarId, value: Value) -> Self {
        Self { var, value }
    }
}

/// A finite-domain constraint satisfaction problem.
///
/// The sets of variables and constraints are fixed once built. Domains and assignments change
/// during search, and only through the methods of this type.
#[derive(Clone, Debug)]
pub struct Csp {
    name: String,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    var_constraints: VecMap<Vec<ConstraintId>>,
    names: HashMap<String, VarId>,
}

impl Csp {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CspFromFileError> {
        let s = fs::read_to_string(path)?;
        let csp = Self::parse(&s)?;
        Ok(csp)
    }

    pub fn parse(s: &str) -> Result<Self, ParseCspError> {
        parse_csp(s)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id]
    }

    pub fn variable_id(&self, name: &str) -> Option<VarId> {
        self.names.get(name).copied()
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn constraint(&self, id: ConstraintId) -> &Constraint {
        &self.constraints[id]
    }

    pub fn constraint_ids(&self) -> Range<ConstraintId> {
        0..self.constraints.len()
    }

    /// All constraints with `var` in their scope
    pub fn constraints_with_var(&self, var: VarId) -> &[ConstraintId] {
        self.var_constraints.get(var).map_or(&[][..], Vec::as_slice)
    }

    pub fn unassigned_vars(&self) -> impl Iterator<Item = VarId> + '_ {
        self.variables
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_assigned())
            .map(|(id, _)| id)
    }

    /// The assigned value of every variable, if all are assigned
    pub fn assignment(&self) -> Option<Vec<Value>> {
        self.variables.iter().map(Variable::assigned_value).collect()
    }

    /// Returns true if every variable is assigned and every constraint is satisfied.
    pub fn is_solved(&self) -> bool {
        let assignment = match self.assignment() {
            Some(assignment) => assignment,
            None => return false,
        };
        self.constraints.iter().all(|c| {
            let values = c.scope().iter().map(|&var| assignment[var]).collect_vec();
            c.check(&values)
        })
    }

    /// Removes `value` from the current domain of `var`. Returns `false` if it was already absent.
    pub fn prune(&mut self, var: VarId, value: Value) -> bool {
        self.variables[var].prune_value(value)
    }

    /// Puts a pruned value back. Returns `false` if the value was not pruned.
    pub fn restore(&mut self, var: VarId, value: Value) -> bool {
        self.variables[var].unprune_value(value)
    }

    /// Restores a pruning record, most recent first.
    pub fn restore_all(&mut self, pruned: &[Pruning]) {
        for p in pruned.iter().rev() {
            let restored = self.restore(p.var, p.value);
            debug_assert!(restored, "restored a value that was not pruned");
        }
    }

    /// Assigns `value` to `var`. Returns `false` if `var` is already assigned or `value` is not in
    /// its current domain.
    pub fn assign(&mut self, var: VarId, value: Value) -> bool {
        self.variables[var].assign(value)
    }

    pub fn unassign(&mut self, var: VarId) -> Option<Value> {
        self.variables[var].unassign()
    }

    /// Unassigns every variable and restores every full domain
    pub fn reset(&mut self) {
        for v in &mut self.variables {
            v.reset();
        }
    }
}

impl fmt::Display for Csp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        for v in &self.variables {
            match v.assigned_value() {
                Some(value) => writeln!(f, "  {} = {}", v.name(), value)?,
                None => writeln!(f, "  {} in {{{}}}", v.name(), v.cur_domain().join(", "))?,
            }
        }
        Ok(())
    }
}

/// Builds a `Csp`, validating variables and constraint scopes as they are added
#[derive(Debug)]
pub struct CspBuilder {
    name: String,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    names: HashMap<String, VarId>,
}

impl CspBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            constraints: Vec::new(),
            names: HashMap::default(),
        }
    }

    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        domain: impl IntoIterator<Item = Value>,
    ) -> Result<VarId, InvalidCsp> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(InvalidCsp::InvalidName(name));
        }
        if self.names.contains_key(&name) {
            return Err(InvalidCsp::DuplicateVariable(name));
        }
        let domain = match Domain::new(domain.into_iter().collect()) {
            Ok(domain) => domain,
            Err(value) => return Err(InvalidCsp::DuplicateValue { variable: name, value }),
        };
        let id = self.variables.len();
        self.names.insert(name.clone(), id);
        self.variables.push(Variable::new(name, domain));
        Ok(id)
    }

    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        scope: Vec<VarId>,
        satisfying_tuples: impl IntoIterator<Item = Vec<Value>>,
    ) -> Result<ConstraintId, InvalidCsp> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(InvalidCsp::InvalidName(name));
        }
        if scope.is_empty() {
            return Err(InvalidCsp::EmptyScope(name));
        }
        for (i, &var) in scope.iter().enumerate() {
            if var >= self.variables.len() {
                return Err(InvalidCsp::UnknownVariable {
                    constraint: name,
                    var,
                });
            }
            if scope[..i].contains(&var) {
                return Err(InvalidCsp::RepeatedVariable {
                    constraint: name,
                    variable: self.variables[var].name().to_string(),
                });
            }
        }
        let constraint = Constraint::new(name, scope, satisfying_tuples)?;
        let id = self.constraints.len();
        self.constraints.push(constraint);
        Ok(id)
    }

    pub fn variable_id(&self, name: &str) -> Option<VarId> {
        self.names.get(name).copied()
    }

    pub fn build(self) -> Csp {
        let mut var_constraints: VecMap<Vec<ConstraintId>> = VecMap::new();
        for (id, c) in self.constraints.iter().enumerate() {
            for &var in c.scope() {
                var_constraints.entry(var).or_insert_with(Vec::new).push(id);
            }
        }
        debug!(
            "built CSP {} with {} variables and {} constraints",
            self.name,
            self.variables.len(),
            self.constraints.len()
        );
        Csp {
            name: self.name,
            variables: self.variables,
            constraints: self.constraints,
            var_constraints,
            names: self.names,
        }
    }
}

/// Returns true if `name` can be written as a single token of the text format.
pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(|c: char| c.is_whitespace() || c == '#')
}

#[cfg(test)]
mod tests {
    use super::{CspBuilder, Pruning};
    use crate::error::InvalidCsp;

    #[test]
    fn duplicate_variable() {
        let mut builder = CspBuilder::new("test");
        builder.add_variable("A", vec![0]).unwrap();
        assert_eq!(
            Err(InvalidCsp::DuplicateVariable("A".to_string())),
            builder.add_variable("A", vec![1])
        );
    }

    #[test]
    fn duplicate_value() {
        let mut builder = CspBuilder::new("test");
        assert_eq!(
            Err(InvalidCsp::DuplicateValue {
                variable: "A".to_string(),
                value: 1
            }),
            builder.add_variable("A", vec![1, 2, 1])
        );
    }

    #[test]
    fn invalid_names() {
        let mut builder = CspBuilder::new("test");
        for name in &["", "my var", "a\tb", "#c", "x#"] {
            assert_eq!(
                Err(InvalidCsp::InvalidName(name.to_string())),
                builder.add_variable(*name, vec![0])
            );
        }
        let a = builder.add_variable("A", vec![0]).unwrap();
        assert_eq!(
            Err(InvalidCsp::InvalidName("#c".to_string())),
            builder.add_constraint("#c", vec![a], vec![vec![0]])
        );
        assert_eq!(
            Err(InvalidCsp::InvalidName("A B".to_string())),
            builder.add_constraint("A B", vec![a], vec![vec![0]])
        );
        assert!(builder.add_constraint("A<=1", vec![a], vec![vec![0]]).is_ok());
    }

    #[test]
    fn invalid_scopes() {
        let mut builder = CspBuilder::new("test");
        let a = builder.add_variable("A", vec![0, 1]).unwrap();
        assert_eq!(
            Err(InvalidCsp::EmptyScope("C".to_string())),
            builder.add_constraint("C", vec![], Vec::new())
        );
        assert_eq!(
            Err(InvalidCsp::UnknownVariable {
                constraint: "C".to_string(),
                var: 3
            }),
            builder.add_constraint("C", vec![a, 3], Vec::new())
        );
        assert_eq!(
            Err(InvalidCsp::RepeatedVariable {
                constraint: "C".to_string(),
                variable: "A".to_string()
            }),
            builder.add_constraint("C", vec![a, a], Vec::new())
        );
    }

    #[test]
    fn constraints_with_var() {
        let mut builder = CspBuilder::new("test");
        let a = builder.add_variable("A", vec![0, 1]).unwrap();
        let b = builder.add_variable("B", vec![0, 1]).unwrap();
        let c = builder.add_variable("C", vec![0, 1]).unwrap();
        builder.add_constraint("AB", vec![a, b], Vec::new()).unwrap();
        builder.add_constraint("B", vec![b], Vec::new()).unwrap();
        let csp = builder.build();
        assert_eq!(&[0], csp.constraints_with_var(a));
        assert_eq!(&[0, 1], csp.constraints_with_var(b));
        assert!(csp.constraints_with_var(c).is_empty());
        assert_eq!(Some(b), csp.variable_id("B"));
    }

    #[test]
    fn restore_all() {
        let mut builder = CspBuilder::new("test");
        let a = builder.add_variable("A", vec![0, 1, 2]).unwrap();
        let mut csp = builder.build();
        assert!(csp.prune(a, 0));
        assert!(!csp.prune(a, 0));
        assert!(csp.prune(a, 2));
        csp.restore_all(&[Pruning::new(a, 0), Pruning::new(a, 2)]);
        assert_eq!(vec![0, 1, 2], csp.variable(a).cur_domain().collect::<Vec<_>>());
    }

    #[test]
    fn is_solved() {
        let mut builder = CspBuilder::new("test");
        let a = builder.add_variable("A", vec![0, 1]).unwrap();
        builder.add_constraint("A=1", vec![a], vec![vec![1]]).unwrap();
        let mut csp = builder.build();
        assert!(!csp.is_solved());
        csp.assign(a, 0);
        assert!(!csp.is_solved());
        csp.unassign(a);
        csp.assign(a, 1);
        assert!(csp.is_solved());
        csp.reset();
        assert_eq!(None, csp.assignment());
    }
}
