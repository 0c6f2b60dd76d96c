//! Generate random table CSPs

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::csp::{Csp, CspBuilder, Value, VarId};
use crate::error::InvalidCsp;
use crate::parse::write_csp;

const TERNARY_PER_VARIABLE: f64 = 0.25;
const UNARY_PROBABILITY: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerateConfig {
    pub variables: usize,
    pub domain_size: usize,
    /// The probability that a pair of variables is constrained
    pub density: f64,
    /// The probability that a tuple is left out of a constraint table
    pub tightness: f64,
    pub seed: Option<u64>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            variables: 8,
            domain_size: 4,
            density: 0.4,
            tightness: 0.3,
            seed: None,
        }
    }
}

/// Generates a CSP with variables `X0`, `X1`, ... over `0..domain_size`, random binary constraints
/// between pairs of variables, and a few unary and ternary constraints.
pub fn generate_csp(config: &GenerateConfig) -> Result<Csp, InvalidCsp> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let density = clamp(config.density);
    let keep = 1.0 - clamp(config.tightness);
    let name = match config.seed {
        Some(seed) => format!("random-{}", seed),
        None => "random".to_string(),
    };
    let mut builder = CspBuilder::new(name);
    let vars = (0..config.variables)
        .map(|i| builder.add_variable(format!("X{}", i), 0..config.domain_size as Value))
        .collect::<Result<Vec<VarId>, _>>()?;
    for &var in &vars {
        if rng.gen_bool(UNARY_PROBABILITY) {
            let scope = vec![var];
            let tuples = random_table(&mut rng, config.domain_size, 1, keep);
            builder.add_constraint(format!("U{}", var), scope, tuples)?;
        }
    }
    for (&x, &y) in vars.iter().tuple_combinations() {
        if rng.gen_bool(density) {
            let tuples = random_table(&mut rng, config.domain_size, 2, keep);
            builder.add_constraint(format!("B{}_{}", x, y), vec![x, y], tuples)?;
        }
    }
    if vars.len() >= 3 {
        let count = (vars.len() as f64 * TERNARY_PER_VARIABLE) as usize;
        for i in 0..count {
            let mut scope = vars.choose_multiple(&mut rng, 3).copied().collect_vec();
            scope.sort_unstable();
            let tuples = random_table(&mut rng, config.domain_size, 3, keep);
            builder.add_constraint(format!("T{}", i), scope, tuples)?;
        }
    }
    let csp = builder.build();
    debug!("Generated CSP:\n{}", write_csp(&csp));
    Ok(csp)
}

/// Every tuple of `arity` values in `0..domain_size`, each kept with probability `keep`
fn random_table(
    rng: &mut impl Rng,
    domain_size: usize,
    arity: usize,
    keep: f64,
) -> Vec<Vec<Value>> {
    (0..arity)
        .map(|_| 0..domain_size as Value)
        .multi_cartesian_product()
        .filter(|_| rng.gen_bool(keep))
        .collect()
}

fn clamp(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.max(0.0).min(1.0)
    }
}
