//! Greedy Randomized Adaptive Search Procedure (GRASP).
//!
//! A multi-start metaheuristic: every trial builds a feasible selection
//! with a randomized greedy construction and polishes it with add / drop /
//! swap local search. Independent trials run in parallel batches.
//!
//! # References
//!
//! - Feo, T. A. & Resende, M. G. C. (1995). "Greedy randomized adaptive
//!   search procedures", *Journal of Global Optimization* 6, 109-133.
//! - Resende, M. G. C. & Ribeiro, C. C. (2016). *Optimization by GRASP*, Springer.

mod config;
mod runner;

pub use config::GraspConfig;
pub use runner::{construct, local_search, rank_candidates, GraspRunner, Move};
