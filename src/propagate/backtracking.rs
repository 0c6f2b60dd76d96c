use crate::csp::{Csp, VarId};
use crate::propagate::{constraints_with_unassigned, Propagate, Propagation};

/// Checks constraints once all of their variables are assigned. Never prunes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlainBacktracking;

impl Propagate for PlainBacktracking {
    fn propagate(&self, csp: &mut Csp, new_var: Option<VarId>) -> Propagation {
        let new_var = match new_var {
            Some(var) => var,
            None => return Propagation::consistent(Vec::new()),
        };
        for c in constraints_with_unassigned(csp, new_var, 0) {
            let constraint = csp.constraint(c);
            let values: Option<Vec<_>> = constraint
                .assigned_values(csp.variables())
                .into_iter()
                .collect();
            if !values.map_or(false, |values| constraint.check(&values)) {
                debug!("constraint {} is violated", constraint.name());
                return Propagation::violated(c);
            }
        }
        Propagation::consistent(Vec::new())
    }
}
