//! Tabu Search (TS).
//!
//! A single-solution trajectory metaheuristic over the 1-flip neighborhood.
//! Recently flipped items are forbidden (tabu) for a number of iterations,
//! preventing cycling and pushing the search into new regions; the
//! aspiration criterion lifts the ban when a flip yields a new global best.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod runner;

pub use config::TabuConfig;
pub use runner::{choose_move, TabuRunner};
