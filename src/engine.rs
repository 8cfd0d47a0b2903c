//! Engine selection by name.
//!
//! [`Engine`] is the invocation surface used by drivers: parse a name,
//! then run that engine with its default configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::ga::{GaConfig, GaRunner};
use crate::grasp::{GraspConfig, GraspRunner};
use crate::instance::Instance;
use crate::result::KpfsResult;
use crate::tabu::{TabuConfig, TabuRunner};
use crate::trace::TraceSink;
use crate::vns::{VnsConfig, VnsRunner};

/// The available search engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Engine {
    /// Greedy randomized construction + local search.
    Grasp,
    /// Tabu Search over 1-flip moves.
    Tabu,
    /// Generational genetic algorithm.
    Genetic,
    /// Variable Neighborhood Search.
    Vns,
}

impl Engine {
    /// All engines, in declaration order.
    pub const ALL: [Engine; 4] = [Engine::Grasp, Engine::Tabu, Engine::Genetic, Engine::Vns];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Engine::Grasp => "grasp",
            Engine::Tabu => "tabu",
            Engine::Genetic => "genetic",
            Engine::Vns => "vns",
        }
    }

    /// Runs the engine with its default configuration.
    ///
    /// `seed` makes the stochastic engines reproducible; Tabu Search is
    /// deterministic and ignores it.
    pub fn run(
        self,
        instance: &Instance,
        seed: Option<u64>,
        trace: &mut dyn TraceSink,
    ) -> KpfsResult {
        log::info!(
            "running {} on {} items, {} forfeit sets, capacity {}",
            self,
            instance.num_items(),
            instance.num_sets(),
            instance.capacity()
        );

        let result = match self {
            Engine::Grasp => {
                let config = GraspConfig {
                    seed,
                    ..GraspConfig::default()
                };
                GraspRunner::run_with_trace(instance, &config, trace)
            }
            Engine::Tabu => TabuRunner::run_with_trace(instance, &TabuConfig::default(), trace),
            Engine::Genetic => {
                let config = GaConfig {
                    seed,
                    ..GaConfig::default()
                };
                GaRunner::run_with_trace(instance, &config, trace)
            }
            Engine::Vns => {
                let config = VnsConfig {
                    seed,
                    ..VnsConfig::default()
                };
                VnsRunner::run_with_trace(instance, &config, trace)
            }
        };

        log::info!(
            "{} finished after {} iterations in {:?}: objective {}",
            self,
            result.iterations,
            result.elapsed,
            result.objective_value
        );
        result
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Engine {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "grasp" => Ok(Engine::Grasp),
            "tabu" | "ts" => Ok(Engine::Tabu),
            "genetic" | "ga" => Ok(Engine::Genetic),
            "vns" => Ok(Engine::Vns),
            _ => Err(Error::UnknownEngine { name: s.to_owned() }),
        }
    }
}
