//! Stagnation detection based on relative improvement.

/// Whether moving the best objective from `old_best` to `new_best` is a
/// significant improvement.
///
/// The relative gain is `(new_best - old_best) / |new_best|`; it must
/// exceed `threshold`. When `new_best` is zero any strict gain counts.
pub fn is_significant(old_best: i64, new_best: i64, threshold: f64) -> bool {
    if new_best <= old_best {
        return false;
    }
    if new_best == 0 {
        return true;
    }
    let gain = (new_best as f64 - old_best as f64) / (new_best as f64).abs();
    gain > threshold
}

/// Tracks the generation of the last significant improvement and stops the
/// run once more than `ratio * max_generations` generations pass without one.
#[derive(Debug, Clone)]
pub struct StagnationWindow {
    window: f64,
    last_improvement: Option<usize>,
}

impl StagnationWindow {
    /// Creates a window of `ratio * max_generations` generations.
    pub fn new(ratio: f64, max_generations: usize) -> Self {
        Self {
            window: ratio * max_generations as f64,
            last_improvement: None,
        }
    }

    /// Records a significant improvement at `generation`.
    pub fn mark(&mut self, generation: usize) {
        self.last_improvement = Some(generation);
    }

    /// Generation of the last significant improvement, if any.
    pub fn last_improvement(&self) -> Option<usize> {
        self.last_improvement
    }

    /// `true` once `generation` is more than the window past the last
    /// significant improvement (counting from generation `-1` before any).
    pub fn is_stagnant(&self, generation: usize) -> bool {
        let since = match self.last_improvement {
            Some(g) => generation.saturating_sub(g),
            None => generation + 1,
        };
        since as f64 > self.window
    }
}
