//! Final result of an engine run.

use std::fmt;
use std::time::Duration;

use crate::instance::Instance;
use crate::objective::{evaluate, INFEASIBLE};
use crate::selection::Selection;

/// Best solution found by a run, with its derived metrics.
///
/// Results are always derived from a selection through the evaluator, never
/// assembled by hand, so the metrics cannot disagree with the selection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KpfsResult {
    /// Packed items.
    pub selection: Selection,
    /// Sum of profits of packed items.
    pub total_profit: u64,
    /// Total forfeit penalty.
    pub total_penalty: u64,
    /// Sum of weights of packed items.
    pub total_weight: u64,
    /// `total_profit - total_penalty`, or [`INFEASIBLE`].
    pub objective_value: i64,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
    /// Iterations (or generations) executed.
    pub iterations: usize,
}

impl KpfsResult {
    /// Derives a result from a selection.
    pub fn from_selection(instance: &Instance, selection: Selection) -> Self {
        let eval = evaluate(&selection, instance);
        Self {
            selection,
            total_profit: eval.profit,
            total_penalty: eval.penalty,
            total_weight: eval.weight,
            objective_value: eval.objective,
            elapsed: Duration::ZERO,
            iterations: 0,
        }
    }

    /// Sentinel result for instances without items.
    pub fn degenerate() -> Self {
        Self {
            selection: Selection::empty(0),
            total_profit: 0,
            total_penalty: 0,
            total_weight: 0,
            objective_value: INFEASIBLE,
            elapsed: Duration::ZERO,
            iterations: 0,
        }
    }

    /// Whether the selection fits in the knapsack.
    pub fn is_feasible(&self) -> bool {
        self.objective_value != INFEASIBLE
    }

    /// Indices of packed items, ascending.
    pub fn selected_items(&self) -> Vec<usize> {
        self.selection.selected_items().collect()
    }

    pub(crate) fn finish(mut self, elapsed: Duration, iterations: usize) -> Self {
        self.elapsed = elapsed;
        self.iterations = iterations;
        self
    }
}

impl fmt::Display for KpfsResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total profit: {}", self.total_profit)?;
        writeln!(f, "Total penalty: {}", self.total_penalty)?;
        writeln!(f, "Objective value: {}", self.objective_value)?;
        writeln!(f, "Weight: {}", self.total_weight)?;
        writeln!(f, "Iterations: {}", self.iterations)?;
        writeln!(f, "Time (ms): {:.3}", self.elapsed.as_secs_f64() * 1000.0)?;
        write!(f, "Selected items:")?;
        for j in self.selection.selected_items() {
            write!(f, " {j}")?;
        }
        Ok(())
    }
}
