use itertools::Itertools;

use crate::csp::{Csp, VarId};
use crate::propagate::{Propagate, PropagateStatus, Propagation, Propagator};
use crate::solve::{SearchConfig, SearchStats, Solution};

pub(crate) struct SearchContext<'a> {
    csp: &'a mut Csp,
    propagator: Propagator,
    solution_limit: Option<usize>,
    solutions: Vec<Solution>,
    stats: SearchStats,
}

impl<'a> SearchContext<'a> {
    pub fn new(csp: &'a mut Csp, config: &SearchConfig) -> Self {
        Self {
            csp,
            propagator: config.propagator,
            solution_limit: config.solution_limit,
            solutions: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    pub fn csp(&mut self) -> &mut Csp {
        &mut *self.csp
    }

    pub fn record(&mut self, propagation: &Propagation) {
        self.stats.prunings += propagation.pruned.len() as u64;
        if !propagation.is_consistent() {
            self.stats.failures += 1;
        }
    }

    pub fn finish(self) -> (Vec<Solution>, SearchStats) {
        (self.solutions, self.stats)
    }

    /// Searches the subtree below the current assignment. Returns false if search stopped because
    /// the solution limit was reached.
    pub fn search(&mut self, depth: u32) -> bool {
        let next = self.csp.unassigned_vars().next();
        let var = match next {
            Some(var) => var,
            None => return self.on_solution(),
        };
        let values = self.csp.variable(var).cur_domain().collect_vec();
        for value in values {
            if !self.csp.assign(var, value) {
                continue;
            }
            self.stats.decisions += 1;
            trace!(
                "Assigning {} = {} (depth={})",
                self.csp.variable(var).name(),
                value,
                depth
            );
            let propagation = self.propagator.propagate(self.csp, Some(var));
            self.record(&propagation);
            let finished = match propagation.status {
                PropagateStatus::Consistent => self.search(depth + 1),
                status => {
                    self.log_failure(var, status);
                    true
                }
            };
            self.csp.restore_all(&propagation.pruned);
            self.csp.unassign(var);
            if !finished {
                return false;
            }
        }
        true
    }

    fn on_solution(&mut self) -> bool {
        debug_assert!(self.csp.is_solved());
        let solution = match self.csp.assignment() {
            Some(solution) => solution,
            None => return true,
        };
        debug!("Found solution #{}", self.solutions.len() + 1);
        self.solutions.push(solution);
        self.solution_limit
            .map_or(true, |limit| self.solutions.len() < limit)
    }

    fn log_failure(&self, var: VarId, status: PropagateStatus) {
        let name = self.csp.variable(var).name();
        match status {
            PropagateStatus::Violated(c) => debug!(
                "Assignment of {} violates {}",
                name,
                self.csp.constraint(c).name()
            ),
            PropagateStatus::Wipeout(wiped) => debug!(
                "Assignment of {} wipes out {}",
                name,
                self.csp.variable(wiped).name()
            ),
            PropagateStatus::Consistent => {}
        }
    }
}
