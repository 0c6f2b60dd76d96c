use itertools::Itertools;

use crate::csp::{ConstraintId, Csp, Pruning, VarId};
use crate::propagate::{constraints_with_unassigned, prune, Propagate, Propagation};

/// Checks constraints that have exactly one unassigned variable, pruning the values of that
/// variable which cannot satisfy the constraint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ForwardChecking;

impl Propagate for ForwardChecking {
    fn propagate(&self, csp: &mut Csp, new_var: Option<VarId>) -> Propagation {
        let constraints = match new_var {
            // before any assignment only unary constraints are checked
            None => csp
                .constraint_ids()
                .filter(|&c| {
                    let constraint = csp.constraint(c);
                    constraint.arity() == 1 && constraint.n_unassigned(csp.variables()) == 1
                })
                .collect_vec(),
            Some(var) => constraints_with_unassigned(csp, var, 1),
        };
        let mut pruned = Vec::new();
        for c in constraints {
            if let Err(var) = forward_check(csp, c, &mut pruned) {
                debug!(
                    "forward checking {} wiped out the domain of {}",
                    csp.constraint(c).name(),
                    csp.variable(var).name()
                );
                return Propagation::wipeout(var, pruned);
            }
        }
        Propagation::consistent(pruned)
    }
}

/// Prunes every value of the only unassigned variable of constraint `c` that does not satisfy `c`
/// together with the assigned values. Returns the variable as an error if its domain is wiped out.
fn forward_check(csp: &mut Csp, c: ConstraintId, pruned: &mut Vec<Pruning>) -> Result<(), VarId> {
    let constraint = csp.constraint(c);
    let variables = csp.variables();
    let (slot, var) = match constraint
        .scope()
        .iter()
        .copied()
        .enumerate()
        .find(|&(_, v)| !variables[v].is_assigned())
    {
        Some(unassigned) => unassigned,
        None => return Ok(()),
    };
    let mut vector = constraint
        .scope()
        .iter()
        .map(|&v| variables[v].assigned_value().unwrap_or_default())
        .collect_vec();
    let to_prune = variables[var]
        .cur_domain()
        .filter(|&value| {
            vector[slot] = value;
            !constraint.check(&vector)
        })
        .collect_vec();
    for value in to_prune {
        prune(csp, pruned, var, value);
    }
    if csp.variable(var).cur_domain_size() == 0 {
        Err(var)
    } else {
        Ok(())
    }
}
