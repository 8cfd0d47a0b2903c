//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation →
//! generational replacement → repeat.

use std::time::Instant;

use rand::Rng;
use rayon::prelude::*;

use super::config::GaConfig;
use super::selection::RouletteWheel;
use crate::instance::Instance;
use crate::objective::{evaluate, objective, INFEASIBLE};
use crate::random::{create_rng, resolve_seed};
use crate::result::KpfsResult;
use crate::selection::Selection;
use crate::stagnation::{is_significant, StagnationWindow};
use crate::trace::{NullTrace, TraceSink};

/// A member of the GA population: a selection and its objective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    /// Packed items.
    pub genes: Selection,
    /// Objective value ([`INFEASIBLE`] when overweight).
    pub fitness: i64,
}

impl Individual {
    fn unevaluated(genes: Selection) -> Self {
        Self {
            genes,
            fitness: INFEASIBLE,
        }
    }
}

/// Builds the starting population: `size` empty selections, evaluated.
///
/// The empty selection is always feasible, so every fitness is 0.
pub fn initial_population(instance: &Instance, size: usize, parallel: bool) -> Vec<Individual> {
    let mut population =
        vec![Individual::unevaluated(Selection::empty(instance.num_items())); size];
    evaluate_population(instance, &mut population, parallel);
    population
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use kpfs_metaheur::ga::{GaConfig, GaRunner};
/// use kpfs_metaheur::Instance;
///
/// let instance: Instance = "3 0 1  5 5 5  1 1 1".parse().unwrap();
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(50)
///     .with_seed(42);
/// let result = GaRunner::run(&instance, &config);
/// assert_eq!(result.objective_value, 5);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`GaConfig::validate`] first
    /// to get a descriptive error).
    pub fn run(instance: &Instance, config: &GaConfig) -> KpfsResult {
        Self::run_with_trace(instance, config, &mut NullTrace)
    }

    /// Runs the GA, reporting the best objective and weight after every
    /// generation to `trace`.
    pub fn run_with_trace(
        instance: &Instance,
        config: &GaConfig,
        trace: &mut dyn TraceSink,
    ) -> KpfsResult {
        config.validate().expect("invalid GaConfig");
        let start = Instant::now();

        if instance.is_degenerate() {
            log::warn!("genetic algorithm: instance has no items, returning sentinel result");
            return KpfsResult::degenerate().finish(start.elapsed(), 0);
        }

        let n = instance.num_items();
        let pop_size = config.population_size;
        let mut rng = create_rng(resolve_seed(config.seed));

        // 1. Initialize population with empty selections
        let mut population = initial_population(instance, pop_size, config.parallel);

        // 2. Track best
        let mut best = fittest(&population).clone();
        let mut best_weight = evaluate(&best.genes, instance).weight;
        let mut window = StagnationWindow::new(config.stagnation_ratio, config.max_generations);
        let mut generations = 0;

        // 3. Evolutionary loop
        for generation in 0..config.max_generations {
            generations = generation + 1;

            let fitness: Vec<i64> = population.iter().map(|ind| ind.fitness).collect();
            let wheel = RouletteWheel::new(&fitness);

            // Reproduction
            let mut next_gen: Vec<Individual> = Vec::with_capacity(pop_size);
            while next_gen.len() < pop_size {
                let mut child1 = population[wheel.spin(&mut rng)].genes.clone();
                let mut child2 = population[wheel.spin(&mut rng)].genes.clone();

                // Single-point crossover
                if rng.random_range(0.0..1.0) < config.crossover_rate {
                    let point = rng.random_range(0..n);
                    child1.swap_tail(&mut child2, point);
                }

                next_gen.push(Individual::unevaluated(child1));
                if next_gen.len() < pop_size {
                    next_gen.push(Individual::unevaluated(child2));
                }
            }

            // Mutation: flip one random bit
            for ind in &mut next_gen {
                if rng.random_range(0.0..1.0) < config.mutation_rate {
                    let idx = rng.random_range(0..n);
                    ind.genes.flip(idx);
                }
            }

            // Generational replacement
            evaluate_population(instance, &mut next_gen, config.parallel);
            population = next_gen;

            // Update best
            let gen_best = fittest(&population);
            if gen_best.fitness > best.fitness {
                if is_significant(best.fitness, gen_best.fitness, config.improvement_threshold) {
                    window.mark(generation);
                }
                best = gen_best.clone();
                best_weight = evaluate(&best.genes, instance).weight;
                log::debug!("genetic algorithm: generation {generations}, new best {}", best.fitness);
            }

            trace.record(generations, best.fitness, best_weight);

            // Stagnation check
            if window.is_stagnant(generation) {
                log::info!(
                    "genetic algorithm: stagnated after {generations} generations, best {}",
                    best.fitness
                );
                break;
            }
        }

        KpfsResult::from_selection(instance, best.genes).finish(start.elapsed(), generations)
    }
}

/// Evaluate all individuals in the population.
fn evaluate_population(instance: &Instance, population: &mut [Individual], parallel: bool) {
    if parallel {
        population.par_iter_mut().for_each(|ind| {
            ind.fitness = objective(&ind.genes, instance);
        });
    } else {
        for ind in population.iter_mut() {
            ind.fitness = objective(&ind.genes, instance);
        }
    }
}

/// Find the individual with the best (highest) fitness; ties go to the
/// lowest index.
fn fittest(population: &[Individual]) -> &Individual {
    let mut best = &population[0];
    for ind in &population[1..] {
        if ind.fitness > best.fitness {
            best = ind;
        }
    }
    best
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::ForfeitSet;
    use crate::trace::MemoryTrace;

    fn forfeit_pair() -> Instance {
        Instance::new(
            2,
            vec![10, 10],
            vec![1, 1],
            vec![ForfeitSet::new(1, 100, vec![0, 1])],
        )
        .unwrap()
    }

    fn small_config() -> GaConfig {
        GaConfig::default()
            .with_population_size(30)
            .with_max_generations(100)
            .with_seed(42)
    }

    #[test]
    fn test_initial_population_fitness_is_zero() {
        let inst = forfeit_pair();
        for parallel in [false, true] {
            let pop = initial_population(&inst, 25, parallel);
            assert_eq!(pop.len(), 25);
            assert!(pop.iter().all(|ind| ind.fitness == 0 && ind.genes.count() == 0));
        }
    }

    #[test]
    fn test_forfeit_pair_converges_to_single_item() {
        let result = GaRunner::run(&forfeit_pair(), &small_config());
        assert_eq!(result.objective_value, 10);
        assert_eq!(result.selection.count(), 1);
    }

    #[test]
    fn test_capacity_one_picks_one_item() {
        let inst = Instance::new(1, vec![5, 5, 5], vec![1, 1, 1], vec![]).unwrap();
        let result = GaRunner::run(&inst, &small_config());
        assert_eq!(result.objective_value, 5);
        assert_eq!(result.selection.count(), 1);
    }

    #[test]
    fn test_two_item_optimum_reached() {
        // Optimum {0, 3} = 15 needs two mutations on top of each other.
        let inst = Instance::new(
            10,
            vec![6, 5, 8, 9, 6, 7, 3],
            vec![2, 3, 6, 7, 5, 9, 4],
            vec![
                ForfeitSet::new(1, 4, vec![0, 2, 4]),
                ForfeitSet::new(0, 2, vec![1, 5]),
            ],
        )
        .unwrap();
        let config = small_config()
            .with_population_size(50)
            .with_max_generations(500);
        let result = GaRunner::run(&inst, &config);
        assert_eq!(result.objective_value, 15);
        assert_eq!(result.selected_items(), vec![0, 3]);
    }

    #[test]
    fn test_zero_generations_returns_empty() {
        let result = GaRunner::run(&forfeit_pair(), &small_config().with_max_generations(0));
        assert_eq!(result.objective_value, 0);
        assert_eq!(result.selection.count(), 0);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_degenerate_instance() {
        let inst: Instance = "0 0 10".parse().unwrap();
        let result = GaRunner::run(&inst, &small_config());
        assert_eq!(result.objective_value, INFEASIBLE);
        assert!(result.selection.is_empty());
    }

    #[test]
    fn test_stagnation_termination() {
        let config = small_config()
            .with_max_generations(1000)
            .with_stagnation_ratio(0.02);
        let result = GaRunner::run(&forfeit_pair(), &config);
        // The optimum is found early; 20 flat generations later the run stops.
        assert!(
            result.iterations < 1000,
            "expected stagnation stop, ran {} generations",
            result.iterations
        );
    }

    #[test]
    fn test_trace_one_record_per_generation() {
        let mut trace = MemoryTrace::default();
        let config = small_config().with_max_generations(40);
        let result = GaRunner::run_with_trace(&forfeit_pair(), &config, &mut trace);
        assert_eq!(result.iterations, 40);
        assert_eq!(trace.records.len(), 40);
        for window in trace.records.windows(2) {
            assert!(window[1].objective >= window[0].objective);
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let inst = forfeit_pair();
        let a = GaRunner::run(&inst, &small_config().with_parallel(true));
        let b = GaRunner::run(&inst, &small_config().with_parallel(false));
        assert_eq!(a.selection, b.selection);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn test_population_of_one() {
        let inst = Instance::new(1, vec![5, 5, 5], vec![1, 1, 1], vec![]).unwrap();
        let config = small_config().with_population_size(1).with_mutation_rate(1.0);
        let result = GaRunner::run(&inst, &config);
        assert!(result.is_feasible());
        assert!(result.objective_value >= 0);
    }
}
