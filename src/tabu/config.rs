//! Tabu Search configuration.

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use kpfs_metaheur::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_max_iterations(500)
///     .with_tabu_tenure(10)
///     .with_aspiration(true);
/// assert_eq!(config.max_iterations, 500);
/// assert_eq!(config.tabu_tenure, 10);
/// ```
#[derive(Debug, Clone)]
pub struct TabuConfig {
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// How many iterations a flipped item stays tabu.
    pub tabu_tenure: usize,
    /// Whether to use aspiration criterion (allow a tabu flip if it
    /// produces a new global best).
    pub aspiration: bool,
    /// Fraction of `max_iterations` without improvement before stopping.
    pub stagnation_ratio: f64,
    /// Whether to scan the neighborhood on the rayon pool.
    pub parallel: bool,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tabu_tenure: 7,
            aspiration: true,
            stagnation_ratio: 0.2,
            parallel: true,
        }
    }
}

impl TabuConfig {
    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the tabu tenure.
    pub fn with_tabu_tenure(mut self, tenure: usize) -> Self {
        self.tabu_tenure = tenure;
        self
    }

    /// Enables or disables aspiration criterion.
    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    /// Sets the stagnation ratio (clamped to `[0, 1]`).
    pub fn with_stagnation_ratio(mut self, ratio: f64) -> Self {
        self.stagnation_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables parallel neighborhood scans.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Iterations without improvement that end the run (at least 1).
    pub fn stagnation_limit(&self) -> usize {
        ((self.max_iterations as f64 * self.stagnation_ratio) as usize).max(1)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.stagnation_ratio) {
            return Err(format!(
                "stagnation_ratio must be in [0, 1], got {}",
                self.stagnation_ratio
            ));
        }
        Ok(())
    }
}
