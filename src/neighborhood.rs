//! The 1-flip neighborhood and its parallel scans.
//!
//! A 1-flip neighbor differs from a selection in exactly one bit. Scans run
//! on the rayon pool with one scratch copy of the selection per worker;
//! partial results are combined by an associative reduction whose order is
//! total (objective descending, then item ascending). The chosen move is
//! therefore the one a sequential left-to-right scan would pick, whatever
//! the thread scheduling.

use rayon::prelude::*;

use crate::instance::Instance;
use crate::objective::{objective, INFEASIBLE};
use crate::selection::Selection;

/// Which improving move a local search applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImprovementPolicy {
    /// Apply the first improving move in scan order.
    #[default]
    FirstImprovement,
    /// Apply the best improving move; ties go to the first in scan order.
    BestImprovement,
}

/// A feasible flip of one item and the objective it leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipMove {
    /// Item whose bit is flipped.
    pub item: usize,
    /// Objective of the neighbor.
    pub objective: i64,
}

/// Reduction step: higher objective wins, lower item index breaks ties.
fn better(a: FlipMove, b: FlipMove) -> FlipMove {
    if b.objective > a.objective || (b.objective == a.objective && b.item < a.item) {
        b
    } else {
        a
    }
}

/// Evaluates flipping `j` on a scratch copy and restores it.
fn flip_value(scratch: &mut Selection, j: usize, instance: &Instance) -> i64 {
    scratch.flip(j);
    let value = objective(scratch, instance);
    scratch.flip(j);
    value
}

/// Best feasible 1-flip neighbor among those `admissible` accepts.
///
/// `admissible(item, objective)` is called for every feasible neighbor; it
/// must not depend on state mutated during the scan.
pub fn best_flip<F>(
    instance: &Instance,
    selection: &Selection,
    parallel: bool,
    admissible: F,
) -> Option<FlipMove>
where
    F: Fn(usize, i64) -> bool + Sync,
{
    let candidate = |scratch: &mut Selection, j: usize| -> Option<FlipMove> {
        let value = flip_value(scratch, j, instance);
        (value != INFEASIBLE && admissible(j, value)).then_some(FlipMove {
            item: j,
            objective: value,
        })
    };

    if parallel {
        (0..selection.len())
            .into_par_iter()
            .map_init(|| selection.clone(), |scratch, j| candidate(scratch, j))
            .flatten()
            .reduce_with(better)
    } else {
        let mut scratch = selection.clone();
        (0..selection.len())
            .filter_map(|j| candidate(&mut scratch, j))
            .reduce(better)
    }
}

/// Lowest-index 1-flip neighbor whose objective exceeds `current`.
pub fn first_improving_flip(
    instance: &Instance,
    selection: &Selection,
    current: i64,
    parallel: bool,
) -> Option<FlipMove> {
    let candidate = |scratch: &mut Selection, j: usize| -> Option<FlipMove> {
        let value = flip_value(scratch, j, instance);
        (value != INFEASIBLE && value > current).then_some(FlipMove {
            item: j,
            objective: value,
        })
    };

    if parallel {
        (0..selection.len())
            .into_par_iter()
            .map_init(|| selection.clone(), |scratch, j| candidate(scratch, j))
            .flatten()
            .find_first(|_| true)
    } else {
        let mut scratch = selection.clone();
        (0..selection.len()).find_map(|j| candidate(&mut scratch, j))
    }
}

/// Repeats improving 1-flips until none exists.
///
/// Returns the local optimum and its objective. The start may be
/// infeasible; any feasible neighbor then counts as an improvement.
pub fn flip_descent(
    instance: &Instance,
    start: &Selection,
    policy: ImprovementPolicy,
    parallel: bool,
) -> (Selection, i64) {
    let mut current = start.clone();
    let mut value = objective(&current, instance);

    loop {
        let step = match policy {
            ImprovementPolicy::BestImprovement => {
                best_flip(instance, &current, parallel, |_, v| v > value)
            }
            ImprovementPolicy::FirstImprovement => {
                first_improving_flip(instance, &current, value, parallel)
            }
        };
        match step {
            Some(mv) => {
                current.flip(mv.item);
                value = mv.objective;
            }
            None => break,
        }
    }

    (current, value)
}
