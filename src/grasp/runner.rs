//! GRASP execution engine.
//!
//! # Algorithm
//!
//! 1. Rank items by profit/weight ratio, best first
//! 2. For each trial:
//!    a. **Construction**: repeatedly draw an item uniformly from the
//!    restricted candidate list (the top `max(1, alpha * remaining)` ranked
//!    candidates), pack it if it fits, and drop it from the candidates
//!    b. **Local search**: apply improving add / drop / swap moves until
//!    none is left
//! 3. Trials run in batches; each trial owns an RNG derived from the run
//!    seed and its trial index, and batch results are merged in trial order
//! 4. Keep the best selection; stop after `max_iterations` trials or when
//!    the trials since the last improvement reach the stagnation limit
//!
//! # Reference
//!
//! Feo, T. A. & Resende, M. G. C. (1995). "Greedy randomized adaptive search
//! procedures", *Journal of Global Optimization* 6, 109-133.

use std::time::Instant;

use rand::Rng;
use rayon::prelude::*;

use super::config::GraspConfig;
use crate::instance::Instance;
use crate::neighborhood::ImprovementPolicy;
use crate::objective::{objective, weight, INFEASIBLE};
use crate::random::{resolve_seed, worker_rng};
use crate::result::KpfsResult;
use crate::selection::Selection;
use crate::trace::{NullTrace, TraceSink};

/// A local search move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Pack an unselected item.
    Add(usize),
    /// Unpack a selected item.
    Drop(usize),
    /// Pack `add` and unpack `drop` in one step.
    Swap { add: usize, drop: usize },
}

impl Move {
    /// Applies the move. Applying it twice restores the selection.
    pub fn apply(self, selection: &mut Selection) {
        match self {
            Move::Add(j) | Move::Drop(j) => selection.flip(j),
            Move::Swap { add, drop } => {
                selection.flip(add);
                selection.flip(drop);
            }
        }
    }
}

/// Item indices sorted by profit/weight ratio, descending.
///
/// Zero-weight items rank first. Equal ratios keep index order.
pub fn rank_candidates(instance: &Instance) -> Vec<usize> {
    let ratio = |j: usize| {
        let w = instance.weights()[j];
        if w == 0 {
            f64::INFINITY
        } else {
            f64::from(instance.profits()[j]) / f64::from(w)
        }
    };

    let mut ranked: Vec<usize> = (0..instance.num_items()).collect();
    ranked.sort_by(|&a, &b| ratio(b).total_cmp(&ratio(a)));
    ranked
}

/// Greedy randomized construction over the `ranked` candidate list.
///
/// The result is always feasible.
pub fn construct<R: Rng>(
    instance: &Instance,
    ranked: &[usize],
    alpha: f64,
    rng: &mut R,
) -> Selection {
    let mut candidates = ranked.to_vec();
    let mut selection = Selection::empty(instance.num_items());
    let mut remaining = instance.capacity();

    while !candidates.is_empty() {
        let rcl_len = ((alpha * candidates.len() as f64) as usize).clamp(1, candidates.len());
        let item = candidates.remove(rng.random_range(0..rcl_len));

        let w = u64::from(instance.weights()[item]);
        if w <= remaining {
            selection.set(item, true);
            remaining -= w;
        }
    }

    selection
}

/// Moves in scan order: adds, then drops, then swaps (added item outer,
/// dropped item inner), each by ascending index.
fn candidate_moves(selection: &Selection) -> impl Iterator<Item = Move> + '_ {
    let n = selection.len();
    let unselected = move || (0..n).filter(move |&j| !selection.is_selected(j));
    let selected = move || (0..n).filter(move |&j| selection.is_selected(j));

    unselected()
        .map(Move::Add)
        .chain(selected().map(Move::Drop))
        .chain(
            unselected()
                .flat_map(move |add| selected().map(move |drop| Move::Swap { add, drop })),
        )
}

/// Finds the improving move `policy` asks for, with its objective.
fn find_move(
    instance: &Instance,
    current: &Selection,
    value: i64,
    policy: ImprovementPolicy,
) -> Option<(Move, i64)> {
    let mut scratch = current.clone();
    let mut improving = candidate_moves(current)
        .map(|mv| {
            mv.apply(&mut scratch);
            let v = objective(&scratch, instance);
            mv.apply(&mut scratch);
            (mv, v)
        })
        .filter(|&(_, v)| v != INFEASIBLE && v > value);

    match policy {
        ImprovementPolicy::FirstImprovement => improving.next(),
        ImprovementPolicy::BestImprovement => {
            improving.fold(None, |best, candidate| match best {
                Some((_, v)) if v >= candidate.1 => best,
                _ => Some(candidate),
            })
        }
    }
}

/// Add / drop / swap local search; returns the local optimum and its
/// objective.
pub fn local_search(
    instance: &Instance,
    start: Selection,
    policy: ImprovementPolicy,
) -> (Selection, i64) {
    let mut current = start;
    let mut value = objective(&current, instance);

    while let Some((mv, v)) = find_move(instance, &current, value, policy) {
        mv.apply(&mut current);
        value = v;
    }

    (current, value)
}

/// GRASP runner.
pub struct GraspRunner;

impl GraspRunner {
    /// Executes GRASP on the given instance.
    ///
    /// # Examples
    ///
    /// ```
    /// use kpfs_metaheur::grasp::{GraspConfig, GraspRunner};
    /// use kpfs_metaheur::Instance;
    ///
    /// let instance: Instance = "3 0 1  5 5 5  1 1 1".parse().unwrap();
    /// let config = GraspConfig::default().with_max_iterations(20).with_seed(1);
    /// let result = GraspRunner::run(&instance, &config);
    /// assert_eq!(result.objective_value, 5);
    /// ```
    pub fn run(instance: &Instance, config: &GraspConfig) -> KpfsResult {
        Self::run_with_trace(instance, config, &mut NullTrace)
    }

    /// Executes GRASP, reporting the best objective and weight after every
    /// trial to `trace`.
    pub fn run_with_trace(
        instance: &Instance,
        config: &GraspConfig,
        trace: &mut dyn TraceSink,
    ) -> KpfsResult {
        config.validate().expect("invalid GraspConfig");
        let start = Instant::now();

        if instance.is_degenerate() {
            log::warn!("grasp: instance has no items, returning sentinel result");
            return KpfsResult::degenerate().finish(start.elapsed(), 0);
        }

        let seed = resolve_seed(config.seed);
        let ranked = rank_candidates(instance);

        let mut best = Selection::empty(instance.num_items());
        let mut best_objective = 0;
        let mut best_weight = 0;

        let stagnation_limit = config.stagnation_limit();
        let mut no_improve_count = 0;
        let mut iterations = 0;

        let trial = |index: usize| {
            let mut rng = worker_rng(seed, index as u64);
            let built = construct(instance, &ranked, config.alpha, &mut rng);
            local_search(instance, built, config.policy)
        };

        while iterations < config.max_iterations && no_improve_count < stagnation_limit {
            let batch = iterations..(iterations + config.batch_size).min(config.max_iterations);

            let outcomes: Vec<(Selection, i64)> = if config.parallel {
                batch.into_par_iter().map(&trial).collect()
            } else {
                batch.map(&trial).collect()
            };

            for (selection, value) in outcomes {
                iterations += 1;
                if value > best_objective {
                    best_weight = weight(&selection, instance);
                    best = selection;
                    best_objective = value;
                    no_improve_count = 0;
                    log::debug!("grasp: trial {iterations}, new best {best_objective}");
                } else {
                    no_improve_count += 1;
                }
                trace.record(iterations, best_objective, best_weight);
            }
        }

        if no_improve_count >= stagnation_limit {
            log::info!("grasp: stagnated after {iterations} trials, best {best_objective}");
        }

        KpfsResult::from_selection(instance, best).finish(start.elapsed(), iterations)
    }
}
