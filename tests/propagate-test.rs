use anyhow::Result;
use itertools::Itertools;

use csprop::csp::{Value, VarId};
use csprop::generate::{generate_csp, GenerateConfig};
use csprop::propagate::{ForwardChecking, GeneralizedArcConsistency};
use csprop::{Csp, CspBuilder, Propagate, PropagateStatus, Propagator};

const SEEDS: std::ops::Range<u64> = 0..24;

fn random_csp(seed: u64) -> Result<Csp> {
    let config = GenerateConfig {
        variables: 6,
        domain_size: 3,
        density: 0.5,
        tightness: 0.35,
        seed: Some(seed),
    };
    Ok(generate_csp(&config)?)
}

/// Every solution, by enumerating all full assignments
fn brute_force(csp: &Csp) -> Vec<Vec<Value>> {
    csp.variables()
        .iter()
        .map(|v| v.full_domain().to_vec())
        .multi_cartesian_product()
        .filter(|assignment| {
            csp.constraints().iter().all(|c| {
                let values = c.scope().iter().map(|&v| assignment[v]).collect_vec();
                c.check(&values)
            })
        })
        .collect()
}

fn cur_domains(csp: &Csp) -> Vec<Vec<Value>> {
    csp.variables()
        .iter()
        .map(|v| v.cur_domain().collect())
        .collect()
}

/// Calls `f` with a copy of `csp` for every value left in every domain, with that value assigned
fn for_each_assignment(csp: &Csp, mut f: impl FnMut(Csp, VarId, Value)) {
    for (var, variable) in csp.variables().iter().enumerate() {
        for value in variable.cur_domain() {
            let mut csp = csp.clone();
            assert!(csp.assign(var, value));
            f(csp, var, value);
        }
    }
}

#[test]
fn soundness() -> Result<()> {
    for seed in SEEDS {
        let csp = random_csp(seed)?;
        let solutions = brute_force(&csp);
        for &propagator in &Propagator::ALL {
            let mut root = csp.clone();
            let propagation = propagator.propagate(&mut root, None);
            if !propagation.is_consistent() {
                assert!(solutions.is_empty(), "seed {} {}", seed, propagator);
            }
            for p in &propagation.pruned {
                assert!(solutions.iter().all(|s| s[p.var] != p.value));
            }
            for_each_assignment(&csp, |mut csp, var, value| {
                let extensions = solutions.iter().filter(|s| s[var] == value).collect_vec();
                let propagation = propagator.propagate(&mut csp, Some(var));
                if !propagation.is_consistent() {
                    assert!(
                        extensions.is_empty(),
                        "seed {}: {} failed on a solvable assignment",
                        seed,
                        propagator
                    );
                }
                for p in &propagation.pruned {
                    assert!(
                        extensions.iter().all(|s| s[p.var] != p.value),
                        "seed {}: {} pruned {:?} from a solution",
                        seed,
                        propagator,
                        p
                    );
                }
            });
        }
    }
    Ok(())
}

#[test]
fn restoration_round_trip() -> Result<()> {
    for seed in SEEDS {
        let csp = random_csp(seed)?;
        for &propagator in &Propagator::ALL {
            let mut root = csp.clone();
            let before = cur_domains(&root);
            let propagation = propagator.propagate(&mut root, None);
            assert_eq!(propagation.pruned.len(), propagation.pruned.iter().unique().count());
            root.restore_all(&propagation.pruned);
            assert_eq!(before, cur_domains(&root));

            for_each_assignment(&csp, |mut csp, var, _| {
                let before = cur_domains(&csp);
                let propagation = propagator.propagate(&mut csp, Some(var));
                assert_eq!(propagation.pruned.len(), propagation.pruned.iter().unique().count());
                // restoring in any order gives the same domains
                for p in propagation.pruned.iter().rev() {
                    assert!(csp.restore(p.var, p.value));
                }
                assert_eq!(before, cur_domains(&csp));
            });
        }
    }
    Ok(())
}

#[test]
fn gac_is_idempotent() -> Result<()> {
    for seed in SEEDS {
        let mut csp = random_csp(seed)?;
        if !GeneralizedArcConsistency.propagate(&mut csp, None).is_consistent() {
            continue;
        }
        let again = GeneralizedArcConsistency.propagate(&mut csp, None);
        assert!(again.is_consistent());
        assert!(again.pruned.is_empty(), "seed {}", seed);
        for_each_assignment(&csp, |mut csp, var, _| {
            if GeneralizedArcConsistency
                .propagate(&mut csp, Some(var))
                .is_consistent()
            {
                let again = GeneralizedArcConsistency.propagate(&mut csp, None);
                assert!(again.pruned.is_empty(), "seed {}", seed);
            }
        });
    }
    Ok(())
}

#[test]
fn gac_prunes_at_least_forward_checking() -> Result<()> {
    for seed in SEEDS {
        let csp = random_csp(seed)?;
        for_each_assignment(&csp, |csp, var, _| {
            let mut fc = csp.clone();
            let mut gac = csp;
            let fc_propagation = ForwardChecking.propagate(&mut fc, Some(var));
            if !GeneralizedArcConsistency
                .propagate(&mut gac, Some(var))
                .is_consistent()
            {
                return;
            }
            assert!(fc_propagation.is_consistent(), "seed {}", seed);
            for other in gac.unassigned_vars() {
                assert!(
                    gac.variable(other).cur_domain().all(|v| fc.variable(other).in_cur_domain(v)),
                    "seed {}",
                    seed
                );
            }
        });
    }
    Ok(())
}

#[test]
fn gac_failure_restores_domains() -> Result<()> {
    for seed in SEEDS {
        let csp = random_csp(seed)?;
        for_each_assignment(&csp, |mut csp, var, _| {
            let before = cur_domains(&csp);
            let propagation = GeneralizedArcConsistency.propagate(&mut csp, Some(var));
            if let PropagateStatus::Wipeout(_) = propagation.status {
                assert!(propagation.pruned.is_empty());
                assert_eq!(before, cur_domains(&csp));
            }
        });
    }
    Ok(())
}

#[test]
fn empty_table() -> Result<()> {
    let mut builder = CspBuilder::new("empty");
    let scope = ["A", "B", "C"]
        .iter()
        .map(|name| builder.add_variable(*name, vec![0, 1]))
        .collect::<Result<Vec<_>, _>>()?;
    builder.add_constraint("none", scope, Vec::new())?;
    let csp = builder.build();

    let mut gac = csp.clone();
    let propagation = GeneralizedArcConsistency.propagate(&mut gac, None);
    assert!(matches!(propagation.status, PropagateStatus::Wipeout(_)));

    for &propagator in &Propagator::ALL {
        let mut csp = csp.clone();
        assert!(csp.assign(0, 0));
        assert!(csp.assign(1, 0));
        let near = propagator.propagate(&mut csp, Some(1));
        let failed = if near.is_consistent() {
            csp.restore_all(&near.pruned);
            assert!(csp.assign(2, 0));
            !propagator.propagate(&mut csp, Some(2)).is_consistent()
        } else {
            true
        };
        assert!(failed, "{}", propagator);
    }
    Ok(())
}
