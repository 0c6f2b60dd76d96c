//! Constraint propagators
//!
//! A propagator is called by search after each assignment (or once before any assignment) and
//! prunes values that can no longer be part of a solution. Every pruned value is reported so that
//! search can restore it when it backtracks.

pub use self::backtracking::PlainBacktracking;
pub use self::forward_checking::ForwardChecking;
pub use self::gac::GeneralizedArcConsistency;

use std::fmt;
use std::str::FromStr;

use enum_dispatch::enum_dispatch;

use crate::csp::{ConstraintId, Csp, Pruning, Value, VarId};
use crate::error::UnknownPropagator;

mod backtracking;
mod forward_checking;
mod gac;
#[cfg(test)]
mod test_util;

#[enum_dispatch]
pub trait Propagate {
    /// Propagates the assignment of `new_var`, or establishes initial consistency if `new_var` is
    /// `None`.
    fn propagate(&self, csp: &mut Csp, new_var: Option<VarId>) -> Propagation;
}

/// One of the interchangeable propagation policies
#[enum_dispatch(Propagate)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagator {
    PlainBacktracking,
    ForwardChecking,
    GeneralizedArcConsistency,
}

impl Propagator {
    pub const ALL: [Propagator; 3] = [
        Propagator::PlainBacktracking(PlainBacktracking),
        Propagator::ForwardChecking(ForwardChecking),
        Propagator::GeneralizedArcConsistency(GeneralizedArcConsistency),
    ];

    /// The short name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Propagator::PlainBacktracking(_) => "bt",
            Propagator::ForwardChecking(_) => "fc",
            Propagator::GeneralizedArcConsistency(_) => "gac",
        }
    }
}

impl Default for Propagator {
    fn default() -> Self {
        GeneralizedArcConsistency.into()
    }
}

impl FromStr for Propagator {
    type Err = UnknownPropagator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| UnknownPropagator(s.to_string()))
    }
}

impl fmt::Display for Propagator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropagateStatus {
    /// No dead end was found
    Consistent,
    /// A constraint with every variable assigned is not satisfied
    Violated(ConstraintId),
    /// The current domain of a variable became empty
    Wipeout(VarId),
}

/// The verdict of a propagator call and every value it pruned
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Propagation {
    pub status: PropagateStatus,
    pub pruned: Vec<Pruning>,
}

impl Propagation {
    fn consistent(pruned: Vec<Pruning>) -> Self {
        Self {
            status: PropagateStatus::Consistent,
            pruned,
        }
    }

    fn violated(constraint: ConstraintId) -> Self {
        Self {
            status: PropagateStatus::Violated(constraint),
            pruned: Vec::new(),
        }
    }

    fn wipeout(var: VarId, pruned: Vec<Pruning>) -> Self {
        Self {
            status: PropagateStatus::Wipeout(var),
            pruned,
        }
    }

    /// Returns false if a dead end was found and search must backtrack.
    pub fn is_consistent(&self) -> bool {
        self.status == PropagateStatus::Consistent
    }
}

/// Constraints with `var` in their scope and exactly `n` unassigned variables
fn constraints_with_unassigned(csp: &Csp, var: VarId, n: usize) -> Vec<ConstraintId> {
    csp.constraints_with_var(var)
        .iter()
        .copied()
        .filter(|&c| csp.constraint(c).n_unassigned(csp.variables()) == n)
        .collect()
}

fn prune(csp: &mut Csp, pruned: &mut Vec<Pruning>, var: VarId, value: Value) {
    let removed = csp.prune(var, value);
    debug_assert!(removed, "pruned a value that is not in the current domain");
    trace!("pruned {} from {}", value, csp.variable(var).name());
    pruned.push(Pruning::new(var, value));
}
