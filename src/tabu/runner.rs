//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from the empty selection (always feasible)
//! 2. At each iteration:
//!    a. Evaluate the N 1-flip neighbors of the current selection
//!    b. Select the best non-tabu flip (or tabu flip satisfying aspiration)
//!    c. Apply the flip, make the item tabu for `tabu_tenure` iterations
//!    d. Update global best if improved
//! 3. Terminate after max iterations or stagnation
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

use std::time::Instant;

use super::config::TabuConfig;
use crate::instance::Instance;
use crate::neighborhood::{best_flip, FlipMove};
use crate::objective::{evaluate, objective};
use crate::result::KpfsResult;
use crate::selection::Selection;
use crate::trace::{NullTrace, TraceSink};

/// Picks the move to apply at `iteration`.
///
/// A flip of item `j` is admissible when `iteration >= tabu_until[j]`, or,
/// with `aspiration`, when its objective strictly exceeds `best_objective`
/// (the best value known *before* this iteration). Infeasible flips are
/// never chosen. Among admissible flips the highest objective wins, ties
/// going to the lowest item index.
pub fn choose_move(
    instance: &Instance,
    current: &Selection,
    tabu_until: &[usize],
    iteration: usize,
    best_objective: i64,
    aspiration: bool,
    parallel: bool,
) -> Option<FlipMove> {
    best_flip(instance, current, parallel, |j, value| {
        iteration >= tabu_until[j] || (aspiration && value > best_objective)
    })
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Executes Tabu Search on the given instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use kpfs_metaheur::tabu::{TabuConfig, TabuRunner};
    /// use kpfs_metaheur::Instance;
    ///
    /// let instance: Instance = "3 0 1  5 5 5  1 1 1".parse().unwrap();
    /// let result = TabuRunner::run(&instance, &TabuConfig::default());
    /// assert_eq!(result.objective_value, 5);
    /// ```
    pub fn run(instance: &Instance, config: &TabuConfig) -> KpfsResult {
        Self::run_with_trace(instance, config, &mut NullTrace)
    }

    /// Executes Tabu Search, reporting the best objective and weight after
    /// every iteration to `trace`.
    pub fn run_with_trace(
        instance: &Instance,
        config: &TabuConfig,
        trace: &mut dyn TraceSink,
    ) -> KpfsResult {
        config.validate().expect("invalid TabuConfig");
        let start = Instant::now();

        if instance.is_degenerate() {
            log::warn!("tabu search: instance has no items, returning sentinel result");
            return KpfsResult::degenerate().finish(start.elapsed(), 0);
        }

        let n = instance.num_items();

        // Initialize
        let mut current = Selection::empty(n);
        let mut best = current.clone();
        let mut best_objective = objective(&best, instance);
        let mut best_weight = 0u64;

        // tabu_until[j]: first iteration at which flipping j is allowed again
        let mut tabu_until = vec![0usize; n];

        let stagnation_limit = config.stagnation_limit();
        let mut no_improve_count = 0;
        let mut iterations = 0;

        for iteration in 0..config.max_iterations {
            iterations = iteration + 1;

            let chosen = choose_move(
                instance,
                &current,
                &tabu_until,
                iteration,
                best_objective,
                config.aspiration,
                config.parallel,
            );

            if let Some(mv) = chosen {
                current.flip(mv.item);
                tabu_until[mv.item] = iteration + config.tabu_tenure;

                // Update global best
                if mv.objective > best_objective {
                    best = current.clone();
                    best_objective = mv.objective;
                    best_weight = evaluate(&best, instance).weight;
                    no_improve_count = 0;
                    log::debug!("tabu search: iteration {iterations}, new best {best_objective}");
                } else {
                    no_improve_count += 1;
                }
            } else {
                no_improve_count += 1;
            }

            trace.record(iterations, best_objective, best_weight);

            // Stagnation check
            if no_improve_count >= stagnation_limit {
                log::info!(
                    "tabu search: stagnated after {iterations} iterations, best {best_objective}"
                );
                break;
            }
        }

        KpfsResult::from_selection(instance, best).finish(start.elapsed(), iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::ForfeitSet;
    use crate::objective::INFEASIBLE;
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

    fn mixed_instance() -> Instance {
        Instance::new(
            10,
            vec![6, 5, 8, 9, 6, 7, 3],
            vec![2, 3, 6, 7, 5, 9, 4],
            vec![
                ForfeitSet::new(1, 4, vec![0, 2, 4]),
                ForfeitSet::new(0, 2, vec![1, 5]),
            ],
        )
        .unwrap()
    }

    /// Exhaustive optimum for small instances.
    fn brute_force(instance: &Instance) -> i64 {
        let n = instance.num_items();
        (0u32..(1 << n))
            .map(|mask| {
                let bits = (0..n).map(|j| mask & (1 << j) != 0).collect::<Vec<_>>();
                objective(&Selection::from(bits), instance)
            })
            .max()
            .unwrap_or(INFEASIBLE)
    }

    #[test]
    fn test_tabu_forfeit_pair_picks_one_item() {
        let result = TabuRunner::run(&forfeit_pair(), &TabuConfig::default());
        assert_eq!(result.objective_value, 10);
        assert_eq!(result.selection.count(), 1);
        assert_eq!(result.total_penalty, 0);
    }

    #[test]
    fn test_tabu_finds_brute_force_optimum() {
        let inst = mixed_instance();
        let config = TabuConfig::default().with_max_iterations(300).with_tabu_tenure(3);
        let result = TabuRunner::run(&inst, &config);
        assert_eq!(result.objective_value, brute_force(&inst));
        assert!(result.total_weight <= inst.capacity());
    }

    #[test]
    fn test_tabu_zero_iterations_returns_empty() {
        let inst = mixed_instance();
        let result = TabuRunner::run(&inst, &TabuConfig::default().with_max_iterations(0));
        assert_eq!(result.objective_value, 0);
        assert_eq!(result.selection.count(), 0);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_tabu_degenerate_instance() {
        let inst: Instance = "0 0 5".parse().unwrap();
        let result = TabuRunner::run(&inst, &TabuConfig::default());
        assert_eq!(result.objective_value, INFEASIBLE);
        assert!(result.selection.is_empty());
    }

    #[test]
    fn test_tabu_stagnation_termination() {
        let config = TabuConfig::default()
            .with_max_iterations(10_000)
            .with_stagnation_ratio(0.001);
        let result = TabuRunner::run(&forfeit_pair(), &config);
        assert!(
            result.iterations < 10_000,
            "expected early termination, ran {} iterations",
            result.iterations
        );
    }

    #[test]
    fn test_tabu_trace_non_decreasing() {
        let inst = mixed_instance();
        let mut trace = MemoryTrace::default();
        let result = TabuRunner::run_with_trace(
            &inst,
            &TabuConfig::default().with_max_iterations(100),
            &mut trace,
        );
        assert_eq!(trace.records.len(), result.iterations);
        for (k, rec) in trace.records.iter().enumerate() {
            assert_eq!(rec.iteration, k + 1);
        }
        for window in trace.records.windows(2) {
            assert!(
                window[1].objective >= window[0].objective,
                "best objective should be non-decreasing: {:?}",
                window
            );
        }
        let last = trace.records.last().unwrap();
        assert_eq!(last.objective, result.objective_value);
        assert_eq!(last.weight, result.total_weight);
    }

    #[test]
    fn test_choose_move_rejects_tabu_without_aspiration() {
        let inst = forfeit_pair();
        let current = Selection::empty(2);
        // Item 0 is tabu until iteration 5; item 1 is free.
        let tabu_until = [5, 0];
        let mv = choose_move(&inst, &current, &tabu_until, 2, 10, true, false).unwrap();
        assert_eq!(mv.item, 1, "tabu item 0 does not beat the best of 10");
    }

    #[test]
    fn test_choose_move_aspiration_overrides_tabu() {
        let inst = Instance::new(10, vec![10, 4], vec![1, 1], vec![]).unwrap();
        let current = Selection::empty(2);
        let tabu_until = [5, 0];
        for parallel in [false, true] {
            let mv = choose_move(&inst, &current, &tabu_until, 2, 9, true, parallel).unwrap();
            assert_eq!(mv.item, 0, "10 > pre-iteration best 9 should aspirate");

            let mv = choose_move(&inst, &current, &tabu_until, 2, 9, false, parallel).unwrap();
            assert_eq!(mv.item, 1, "without aspiration the tabu item is skipped");
        }
    }

    #[test]
    fn test_choose_move_aspiration_requires_strict_gain() {
        let inst = Instance::new(10, vec![10, 4], vec![1, 1], vec![]).unwrap();
        let mv = choose_move(&inst, &Selection::empty(2), &[5, 0], 2, 10, true, true).unwrap();
        assert_eq!(mv.item, 1, "equal to the best is not enough");
    }

    #[test]
    fn test_choose_move_none_when_all_tabu() {
        let inst = forfeit_pair();
        let current = Selection::from_items(2, &[0, 1]);
        assert!(choose_move(&inst, &current, &[8, 8], 3, 10, true, true).is_none());
    }

    #[test]
    fn test_tabu_sequential_and_parallel_agree() {
        let inst = mixed_instance();
        let seq = TabuRunner::run(&inst, &TabuConfig::default().with_parallel(false));
        let par = TabuRunner::run(&inst, &TabuConfig::default().with_parallel(true));
        assert_eq!(seq.selection, par.selection);
        assert_eq!(seq.iterations, par.iterations);
    }
}
