//! Fitness-proportionate (roulette wheel) parent selection.
//!
//! Objectives are maximized and may be negative (forfeit penalties) or the
//! infeasibility sentinel, so raw values cannot be used as wheel slices.
//! The wheel clamps them to non-negative weights first:
//!
//! - infeasible individuals get weight 0;
//! - if any feasible objective is negative, all feasible objectives are
//!   shifted by the minimum so the worst one gets weight 0;
//! - if the total weight is 0 (e.g. an all-empty population), selection is
//!   uniform.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::Rng;

use crate::objective::INFEASIBLE;

/// A roulette wheel built once per generation.
///
/// # Examples
///
/// ```
/// use kpfs_metaheur::ga::RouletteWheel;
///
/// let wheel = RouletteWheel::new(&[0, 10, 30]);
/// assert_eq!(wheel.weight(0), 0.0);
/// assert_eq!(wheel.weight(2), 30.0);
/// ```
#[derive(Debug, Clone)]
pub struct RouletteWheel {
    cumulative: Vec<f64>,
    total: f64,
}

impl RouletteWheel {
    /// Builds the wheel from population objectives.
    pub fn new(fitness: &[i64]) -> Self {
        let floor = fitness
            .iter()
            .copied()
            .filter(|&f| f != INFEASIBLE)
            .min()
            .map_or(0, |m| m.min(0));

        let mut total = 0.0;
        let cumulative = fitness
            .iter()
            .map(|&f| {
                if f != INFEASIBLE {
                    total += f as f64 - floor as f64;
                }
                total
            })
            .collect();

        Self { cumulative, total }
    }

    /// Number of slots on the wheel.
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    /// `true` if the wheel has no slots.
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Clamped weight of slot `i`.
    pub fn weight(&self, i: usize) -> f64 {
        let prev = if i == 0 { 0.0 } else { self.cumulative[i - 1] };
        self.cumulative[i] - prev
    }

    /// Spins the wheel and returns a population index.
    ///
    /// # Panics
    /// Panics if the wheel is empty.
    pub fn spin<R: Rng>(&self, rng: &mut R) -> usize {
        let n = self.cumulative.len();
        assert!(n > 0, "cannot select from empty population");

        if self.total <= 0.0 {
            return rng.random_range(0..n);
        }

        let threshold = rng.random_range(0.0..self.total);
        // First slot whose cumulative weight passes the threshold; slots of
        // zero weight can never be that slot.
        self.cumulative
            .partition_point(|&c| c <= threshold)
            .min(n - 1) // floating-point fallback
    }
}
