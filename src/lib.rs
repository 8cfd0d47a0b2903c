//! Metaheuristics for the Knapsack Problem with Forfeit Sets (KPFS).
//!
//! A KPFS instance is a 0/1 knapsack whose items are also grouped into
//! forfeit sets: packing more members of a set than its allowance costs a
//! penalty per excess member. The objective is total profit minus total
//! penalty, subject to the capacity constraint.
//!
//! Four search engines share one evaluator ([`objective::evaluate`]):
//!
//! - **GRASP**: Greedy randomized construction followed by add / drop /
//!   swap local search, with independent trials run in parallel batches.
//! - **Tabu Search (TS)**: Single-solution trajectory over 1-flip moves
//!   using short-term memory (tabu tenure) and aspiration.
//! - **Genetic Algorithm (GA)**: Generational evolution with roulette-wheel
//!   selection, single-point crossover and bit-flip mutation.
//! - **Variable Neighborhood Search (VNS)**: k-bit shaking followed by
//!   1-flip descent, with systematic neighborhood switching.
//!
//! [`Engine`] selects an engine by name, and [`run_batch`] solves every
//! instance file under a directory with one engine.
//!
//! Neighbor scans and trial batches run on the rayon pool. Reductions use
//! a total order (objective descending, index ascending), so a seeded run
//! gives the same result on any number of threads.
//!
//! # Example
//!
//! ```
//! use kpfs_metaheur::{Engine, Instance, NullTrace};
//!
//! // 2 items, 1 forfeit set, capacity 2; both items share a set with
//! // allowance 1 and cost 100.
//! let instance: Instance = "2 1 2  10 10  1 1  1 100 2 0 1".parse().unwrap();
//! let result = Engine::Tabu.run(&instance, None, &mut NullTrace);
//! assert_eq!(result.objective_value, 10);
//! ```

pub mod batch;
pub mod engine;
pub mod error;
pub mod ga;
pub mod grasp;
pub mod instance;
pub mod neighborhood;
pub mod objective;
pub mod random;
pub mod result;
pub mod selection;
pub mod stagnation;
pub mod tabu;
pub mod trace;
pub mod vns;

pub use batch::{run_batch, BatchEntry, BatchReport};
pub use engine::Engine;
pub use error::{Error, Result};
pub use instance::{ForfeitSet, Instance};
pub use neighborhood::ImprovementPolicy;
pub use objective::{evaluate, objective, Evaluation, INFEASIBLE};
pub use result::KpfsResult;
pub use selection::Selection;
pub use trace::{open_trace, CsvTrace, MemoryTrace, NullTrace, TraceSink};
