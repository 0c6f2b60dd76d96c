//! Backtracking search over a CSP, pruning with a chosen propagator

use std::time::{Duration, Instant};

use crate::csp::{Csp, Value};
use crate::propagate::{Propagate, Propagator};

use self::search::SearchContext;

mod search;

/// The value of every variable, indexed by `VarId`
pub type Solution = Vec<Value>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub propagator: Propagator,
    /// Stop after this many solutions. `None` finds every solution.
    pub solution_limit: Option<usize>,
}

impl SearchConfig {
    pub fn new(propagator: Propagator) -> Self {
        Self {
            propagator,
            ..Self::default()
        }
    }

    pub fn all_solutions(mut self) -> Self {
        self.solution_limit = None;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            propagator: Propagator::default(),
            solution_limit: Some(1),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of values assigned
    pub decisions: u64,
    /// Number of values pruned by the propagator, including the initial call
    pub prunings: u64,
    /// Number of propagator calls that found a dead end
    pub failures: u64,
    pub elapsed: Duration,
}

#[derive(Clone, Debug)]
pub struct SearchResult {
    pub solutions: Vec<Solution>,
    /// True if the whole search tree was explored
    pub exhausted: bool,
    pub stats: SearchStats,
}

impl SearchResult {
    pub fn is_satisfiable(&self) -> bool {
        !self.solutions.is_empty()
    }

    /// Returns true if search proved that there are no solutions.
    pub fn is_unsatisfiable(&self) -> bool {
        self.exhausted && self.solutions.is_empty()
    }
}

/// Searches for solutions of `csp`.
///
/// Every variable is unassigned first. Variables are assigned in declaration order and values are
/// tried in domain order. When this returns, every assignment has been undone and every pruned
/// value restored.
pub fn solve(csp: &mut Csp, config: &SearchConfig) -> SearchResult {
    let start = Instant::now();
    info!("Searching {} with {}", csp.name(), config.propagator);
    for var in 0..csp.variables().len() {
        csp.unassign(var);
    }
    let mut context = SearchContext::new(csp, config);
    let exhausted = if config.solution_limit == Some(0) {
        false
    } else {
        let propagation = config.propagator.propagate(context.csp(), None);
        context.record(&propagation);
        let exhausted = !propagation.is_consistent() || context.search(0);
        context.csp().restore_all(&propagation.pruned);
        exhausted
    };
    let (solutions, mut stats) = context.finish();
    stats.elapsed = start.elapsed();
    info!(
        "Found {} solution(s) with {} decisions and {} failures in {:?}",
        solutions.len(),
        stats.decisions,
        stats.failures,
        stats.elapsed
    );
    SearchResult {
        solutions,
        exhausted,
        stats,
    }
}
