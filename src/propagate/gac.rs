use itertools::Itertools;

use crate::collections::SetQueue;
use crate::csp::{ConstraintId, Csp, Pruning, Value, VarId};
use crate::propagate::{prune, Propagate, Propagation};

/// Generalized arc consistency: every value left in a current domain has a supporting tuple in
/// every constraint on its variable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GeneralizedArcConsistency;

impl Propagate for GeneralizedArcConsistency {
    fn propagate(&self, csp: &mut Csp, new_var: Option<VarId>) -> Propagation {
        let mut pruned = Vec::new();
        match new_var {
            None => {
                let mut queue: SetQueue<ConstraintId> = csp.constraint_ids().collect();
                if let Err(var) = enforce(csp, &mut queue, &mut pruned) {
                    return Propagation::wipeout(var, pruned);
                }
            }
            Some(new_var) => {
                // the assigned value is the only one left for new_var
                if let Some(assigned) = csp.variable(new_var).assigned_value() {
                    let others = csp
                        .variable(new_var)
                        .cur_domain()
                        .filter(|&value| value != assigned)
                        .collect_vec();
                    for value in others {
                        prune(csp, &mut pruned, new_var, value);
                    }
                }
                let mut queue: SetQueue<ConstraintId> =
                    csp.constraints_with_var(new_var).iter().copied().collect();
                if let Err(var) = enforce(csp, &mut queue, &mut pruned) {
                    // undo everything here, search has nothing to restore
                    csp.restore_all(&pruned);
                    return Propagation::wipeout(var, Vec::new());
                }
            }
        }
        Propagation::consistent(pruned)
    }
}

/// Revises constraints until the queue is empty. A constraint that prunes a value puts every
/// constraint on the pruned variable back in the queue.
fn enforce(
    csp: &mut Csp,
    queue: &mut SetQueue<ConstraintId>,
    pruned: &mut Vec<Pruning>,
) -> Result<(), VarId> {
    while let Some(c) = queue.pop() {
        for position in 0..csp.constraint(c).arity() {
            let var = csp.constraint(c).scope()[position];
            let unsupported = unsupported_values(csp, c, var);
            if unsupported.is_empty() {
                continue;
            }
            for value in unsupported {
                prune(csp, pruned, var, value);
            }
            if csp.variable(var).cur_domain_size() == 0 {
                debug!(
                    "GAC on {} wiped out the domain of {}",
                    csp.constraint(c).name(),
                    csp.variable(var).name()
                );
                queue.clear();
                return Err(var);
            }
            queue.extend(csp.constraints_with_var(var).iter().copied());
        }
    }
    Ok(())
}

fn unsupported_values(csp: &Csp, c: ConstraintId, var: VarId) -> Vec<Value> {
    let constraint = csp.constraint(c);
    csp.variable(var)
        .cur_domain()
        .filter(|&value| !constraint.has_support(csp.variables(), var, value))
        .collect()
}
