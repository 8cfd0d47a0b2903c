//! Variable Neighborhood Search execution engine.
//!
//! # Algorithm (Basic VNS)
//!
//! 1. Start from the empty selection x
//! 2. For each generation, set k = 1 and while k <= k_max:
//!    a. **Shaking**: flip k random bits of x (positions may repeat) → x'
//!    b. **Local search**: 1-flip descent from x' → x''
//!    c. **Move or not**: if f(x'') > f(x), set x = x'' and k = 1;
//!    otherwise k = k + 1
//! 3. Stop after `max_generations` or when no significant improvement
//!    happened for `stagnation_ratio * max_generations` generations
//!
//! # Reference
//!
//! Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//! *Computers & Operations Research* 24(11), 1097-1100.

use std::time::Instant;

use rand::Rng;

use super::config::VnsConfig;
use crate::instance::Instance;
use crate::neighborhood::flip_descent;
use crate::objective::{objective, weight};
use crate::random::{create_rng, resolve_seed};
use crate::result::KpfsResult;
use crate::selection::Selection;
use crate::stagnation::{is_significant, StagnationWindow};
use crate::trace::{NullTrace, TraceSink};

/// Flips `k` uniformly drawn bits of `selection`. The same bit may be drawn
/// more than once, so fewer than `k` bits may end up changed.
pub fn shake<R: Rng>(selection: &Selection, k: usize, rng: &mut R) -> Selection {
    let mut shaken = selection.clone();
    for _ in 0..k {
        let j = rng.random_range(0..shaken.len());
        shaken.flip(j);
    }
    shaken
}

/// Variable Neighborhood Search runner.
pub struct VnsRunner;

impl VnsRunner {
    /// Executes Basic VNS on the given instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use kpfs_metaheur::vns::{VnsConfig, VnsRunner};
    /// use kpfs_metaheur::Instance;
    ///
    /// let instance: Instance = "3 0 1  5 5 5  1 1 1".parse().unwrap();
    /// let config = VnsConfig::default().with_max_generations(20).with_seed(42);
    /// let result = VnsRunner::run(&instance, &config);
    /// assert_eq!(result.objective_value, 5);
    /// ```
    pub fn run(instance: &Instance, config: &VnsConfig) -> KpfsResult {
        Self::run_with_trace(instance, config, &mut NullTrace)
    }

    /// Executes VNS, reporting the best objective and weight after every
    /// generation to `trace`.
    pub fn run_with_trace(
        instance: &Instance,
        config: &VnsConfig,
        trace: &mut dyn TraceSink,
    ) -> KpfsResult {
        config.validate().expect("invalid VnsConfig");
        let start = Instant::now();

        if instance.is_degenerate() {
            log::warn!("vns: instance has no items, returning sentinel result");
            return KpfsResult::degenerate().finish(start.elapsed(), 0);
        }

        let mut rng = create_rng(resolve_seed(config.seed));

        let mut current = Selection::empty(instance.num_items());
        let mut current_objective = objective(&current, instance);
        let mut best = current.clone();
        let mut best_objective = current_objective;
        let mut best_weight = 0;

        let mut window = StagnationWindow::new(config.stagnation_ratio, config.max_generations);
        let mut generations = 0;

        for generation in 0..config.max_generations {
            generations = generation + 1;

            let mut k = 1;
            while k <= config.k_max {
                // Shaking
                let shaken = shake(&current, k, &mut rng);

                // Local search on shaken solution
                let (candidate, candidate_objective) =
                    flip_descent(instance, &shaken, config.policy, config.parallel);

                if candidate_objective > current_objective {
                    // Improvement found: accept and reset to first neighborhood
                    current = candidate;
                    current_objective = candidate_objective;
                    k = 1;

                    if current_objective > best_objective {
                        if is_significant(
                            best_objective,
                            current_objective,
                            config.improvement_threshold,
                        ) {
                            window.mark(generation);
                        }
                        best = current.clone();
                        best_objective = current_objective;
                        best_weight = weight(&best, instance);
                        log::debug!("vns: generation {generations}, new best {best_objective}");
                    }
                } else {
                    k += 1;
                }
            }

            trace.record(generations, best_objective, best_weight);

            // Stagnation check
            if window.is_stagnant(generation) {
                log::info!("vns: stagnated after {generations} generations, best {best_objective}");
                break;
            }
        }

        KpfsResult::from_selection(instance, best).finish(start.elapsed(), generations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::ForfeitSet;
    use crate::neighborhood::ImprovementPolicy;
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

    fn small_config() -> VnsConfig {
        VnsConfig::default()
            .with_max_generations(100)
            .with_k_max(3)
            .with_stagnation_ratio(1.0)
            .with_seed(42)
    }

    #[test]
    fn test_shake_single_flip() {
        let mut rng = create_rng(42);
        let base = Selection::from_items(6, &[1, 4]);
        for _ in 0..20 {
            let shaken = shake(&base, 1, &mut rng);
            let changed = (0..6)
                .filter(|&j| shaken.is_selected(j) != base.is_selected(j))
                .count();
            assert_eq!(changed, 1);
        }
    }

    #[test]
    fn test_shake_changes_at_most_k_bits() {
        let mut rng = create_rng(7);
        let base = Selection::empty(5);
        for k in 0..8 {
            let shaken = shake(&base, k, &mut rng);
            assert!(shaken.count() <= k, "k = {k} changed {} bits", shaken.count());
            assert_eq!(shaken.count() % 2, k % 2, "parity of flips is preserved");
        }
    }

    #[test]
    fn test_vns_forfeit_pair() {
        let result = VnsRunner::run(&forfeit_pair(), &small_config());
        assert_eq!(result.objective_value, 10);
        assert_eq!(result.selection.count(), 1);
    }

    #[test]
    fn test_vns_capacity_one() {
        let inst = Instance::new(1, vec![5, 5, 5], vec![1, 1, 1], vec![]).unwrap();
        let result = VnsRunner::run(&inst, &small_config());
        assert_eq!(result.objective_value, 5);
        assert_eq!(result.selection.count(), 1);
    }

    #[test]
    fn test_vns_finds_optimum() {
        for policy in [
            ImprovementPolicy::BestImprovement,
            ImprovementPolicy::FirstImprovement,
        ] {
            let config = small_config()
                .with_max_generations(300)
                .with_policy(policy);
            let result = VnsRunner::run(&mixed_instance(), &config);
            assert_eq!(result.objective_value, 15, "{policy:?}");
            assert_eq!(result.selected_items(), vec![0, 3]);
        }
    }

    #[test]
    fn test_vns_zero_generations_returns_empty() {
        let config = small_config().with_max_generations(0);
        let result = VnsRunner::run(&mixed_instance(), &config);
        assert_eq!(result.objective_value, 0);
        assert_eq!(result.selection.count(), 0);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_vns_degenerate_instance() {
        let inst: Instance = "0 2 5  0 1 0  1 3 0".parse().unwrap();
        let result = VnsRunner::run(&inst, &small_config());
        assert_eq!(result.objective_value, INFEASIBLE);
        assert!(result.selection.is_empty());
    }

    #[test]
    fn test_vns_stagnation_termination() {
        let config = small_config()
            .with_max_generations(1000)
            .with_stagnation_ratio(0.01);
        let result = VnsRunner::run(&forfeit_pair(), &config);
        assert!(
            result.iterations < 1000,
            "expected early termination, got {} generations",
            result.iterations
        );
    }

    #[test]
    fn test_vns_trace_non_decreasing() {
        let mut trace = MemoryTrace::default();
        let config = small_config().with_max_generations(30);
        let result = VnsRunner::run_with_trace(&mixed_instance(), &config, &mut trace);
        assert_eq!(trace.records.len(), 30);
        assert_eq!(result.iterations, 30);
        for window in trace.records.windows(2) {
            assert!(
                window[1].objective >= window[0].objective,
                "best objective history should be non-decreasing: {:?}",
                window
            );
        }
        assert_eq!(trace.records.last().unwrap().weight, result.total_weight);
    }

    #[test]
    fn test_vns_parallel_matches_sequential() {
        let par = VnsRunner::run(&mixed_instance(), &small_config().with_parallel(true));
        let seq = VnsRunner::run(&mixed_instance(), &small_config().with_parallel(false));
        assert_eq!(par.selection, seq.selection);
        assert_eq!(par.iterations, seq.iterations);
    }
}
