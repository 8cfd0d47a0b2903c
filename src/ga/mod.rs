//! Genetic Algorithm (GA).
//!
//! A generational GA over bit-string selections. Every generation is
//! replaced wholesale by offspring of roulette-selected parents; the best
//! individual ever seen is tracked separately and returned.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, rates, stagnation)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`RouletteWheel`]: Fitness-proportionate parent selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Chu & Beasley (1998), "A genetic algorithm for the multidimensional
//!   knapsack problem", *Journal of Heuristics* 4, 63-86.

mod config;
mod runner;
mod selection;

pub use config::GaConfig;
pub use runner::{initial_population, GaRunner, Individual};
pub use selection::RouletteWheel;
