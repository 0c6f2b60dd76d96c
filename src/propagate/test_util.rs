use itertools::Itertools;

use crate::csp::{Csp, CspBuilder, Value};

/// A and B over {0, 1, 2} with A != B
pub(crate) fn not_equal() -> Csp {
    let mut builder = CspBuilder::new("not-equal");
    let a = builder.add_variable("A", 0..3).unwrap();
    let b = builder.add_variable("B", 0..3).unwrap();
    let tuples = (0..3)
        .cartesian_product(0..3)
        .filter(|(x, y)| x != y)
        .map(|(x, y)| vec![x, y]);
    builder.add_constraint("A!=B", vec![a, b], tuples).unwrap();
    builder.build()
}

/// Three variables over {0, 1} that must all differ, as one ternary constraint. Its table is empty.
pub(crate) fn all_different_3() -> Csp {
    let mut builder = CspBuilder::new("all-different");
    let scope = (0..3)
        .map(|i| builder.add_variable(format!("V{}", i), 0..2).unwrap())
        .collect_vec();
    let tuples = (0..3)
        .map(|_| 0..2)
        .multi_cartesian_product()
        .filter(|t: &Vec<Value>| t[0] != t[1] && t[1] != t[2] && t[0] != t[2]);
    builder.add_constraint("all-different", scope, tuples).unwrap();
    builder.build()
}

pub(crate) fn cur_domain(csp: &Csp, var: usize) -> Vec<Value> {
    csp.variable(var).cur_domain().collect()
}
