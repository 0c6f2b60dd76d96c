#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_qualifications)]

use std::fs;

use anyhow::{Context, Result};
use csprop::generate::generate_csp;
use csprop::parse::write_csp;
use csprop::solve::Solution;
use csprop::{solve, Csp, SearchResult};
use itertools::Itertools;

use crate::options::{Options, Source};

mod options;

fn main() -> Result<()> {
    env_logger::init();
    let options = Options::from_args()?;
    let mut csp = source_csp(&options)?;
    println!(
        "Solving {} ({} variables, {} constraints) with {}",
        csp.name(),
        csp.variables().len(),
        csp.constraints().len(),
        options.search().propagator
    );
    let result = solve(&mut csp, options.search());
    print_result(&csp, &result);
    Ok(())
}

fn source_csp(options: &Options) -> Result<Csp> {
    match options.source() {
        Source::File(path) => {
            println!("Reading CSP from \"{}\"", path.display());
            let csp = Csp::from_file(path)
                .with_context(|| format!("failed to read \"{}\"", path.display()))?;
            Ok(csp)
        }
        Source::Generate(config) => {
            let csp = generate_csp(config)?;
            if let Some(path) = options.save_path() {
                fs::write(path, write_csp(&csp))
                    .with_context(|| format!("failed to save \"{}\"", path.display()))?;
                println!("Saved CSP to {}", path.display());
            }
            Ok(csp)
        }
    }
}

fn print_result(csp: &Csp, result: &SearchResult) {
    for (i, solution) in result.solutions.iter().enumerate() {
        println!("Solution {}: {}", i + 1, format_solution(csp, solution));
    }
    let msg = if result.is_unsatisfiable() {
        "CSP is not satisfiable"
    } else if result.exhausted {
        "All solutions found"
    } else if result.is_satisfiable() {
        "Stopped at the solution limit"
    } else {
        "Search stopped"
    };
    println!("{}", msg);
    let stats = &result.stats;
    println!(
        "decisions: {}, prunings: {}, failures: {}, time: {:?}",
        stats.decisions, stats.prunings, stats.failures, stats.elapsed
    );
}

fn format_solution(csp: &Csp, solution: &Solution) -> String {
    csp.variables()
        .iter()
        .zip(solution)
        .map(|(var, value)| format!("{}={}", var.name(), value))
        .join(" ")
}
