//! Objective and feasibility evaluation.
//!
//! This is the only place that decides feasibility and computes penalties.
//! Every engine calls [`evaluate`] (or [`objective`]) instead of deriving
//! either on its own.

use crate::instance::Instance;
use crate::selection::Selection;

/// Objective assigned to selections whose weight exceeds the capacity.
///
/// Never a valid candidate for "best": any feasible selection beats it.
pub const INFEASIBLE: i64 = i64::MIN;

/// Derived metrics of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// Sum of profits of packed items.
    pub profit: u64,
    /// Sum of weights of packed items.
    pub weight: u64,
    /// Total forfeit penalty. Zero for infeasible selections, whose sets are
    /// not evaluated.
    pub penalty: u64,
    /// `profit - penalty`, or [`INFEASIBLE`].
    pub objective: i64,
}

impl Evaluation {
    /// `true` iff the weight fits in the capacity.
    pub fn is_feasible(&self) -> bool {
        self.objective != INFEASIBLE
    }
}

/// Evaluates a selection against an instance.
///
/// Sums profit and weight; if the weight exceeds the capacity the sentinel
/// is returned without looking at the forfeit sets. Otherwise each set
/// contributes `max(0, count - allowance) * forfeit_cost`.
///
/// # Examples
///
/// ```
/// use kpfs_metaheur::{evaluate, ForfeitSet, Instance, Selection};
///
/// let inst = Instance::new(2, vec![10, 10], vec![1, 1],
///     vec![ForfeitSet::new(1, 100, vec![0, 1])]).unwrap();
/// let both = Selection::from_items(2, &[0, 1]);
/// assert_eq!(evaluate(&both, &inst).objective, -80);
/// ```
pub fn evaluate(selection: &Selection, instance: &Instance) -> Evaluation {
    debug_assert_eq!(selection.len(), instance.num_items());

    let bits = selection.as_slice();
    let (profit, weight) = bits
        .iter()
        .zip(instance.profits().iter().zip(instance.weights()))
        .filter(|(b, _)| **b)
        .fold((0u64, 0u64), |(p, w), (_, (&pj, &wj))| {
            (p + u64::from(pj), w + u64::from(wj))
        });

    if weight > instance.capacity() {
        return Evaluation {
            profit,
            weight,
            penalty: 0,
            objective: INFEASIBLE,
        };
    }

    let penalty: u64 = instance
        .forfeit_sets()
        .iter()
        .map(|fs| {
            let count = fs.items.iter().filter(|&&j| bits[j]).count();
            count.saturating_sub(fs.allowance) as u64 * u64::from(fs.forfeit_cost)
        })
        .sum();

    Evaluation {
        profit,
        weight,
        penalty,
        objective: profit as i64 - penalty as i64,
    }
}

/// Shorthand for `evaluate(selection, instance).objective`.
pub fn objective(selection: &Selection, instance: &Instance) -> i64 {
    evaluate(selection, instance).objective
}

/// Total weight of a selection.
pub fn weight(selection: &Selection, instance: &Instance) -> u64 {
    selection
        .selected_items()
        .map(|j| u64::from(instance.weights()[j]))
        .sum()
}
