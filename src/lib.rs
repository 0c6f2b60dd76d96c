//! Solve finite-domain constraint satisfaction problems with backtracking search and constraint
//! propagation

#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_qualifications)]

#[macro_use]
extern crate log;

pub mod collections;
pub mod csp;
pub mod error;
pub mod generate;
pub mod parse;
pub mod propagate;
pub mod solve;

pub use crate::csp::{Csp, CspBuilder, Pruning};
pub use crate::propagate::{Propagate, PropagateStatus, Propagation, Propagator};
pub use crate::solve::{solve, SearchConfig, SearchResult};

type HashMap<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;
type HashSet<T> = std::collections::HashSet<T, ahash::RandomState>;
