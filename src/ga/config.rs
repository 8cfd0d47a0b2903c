//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

/// Configuration for the Genetic Algorithm.
///
/// Controls population size, operator rates, termination conditions,
/// and parallelism.
///
/// # Defaults
///
/// ```
/// use kpfs_metaheur::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 300);
/// assert_eq!(config.max_generations, 1000);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use kpfs_metaheur::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(100)
///     .with_crossover_rate(0.8)
///     .with_mutation_rate(0.1)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Probability of applying single-point crossover to a pair of
    /// parents (0.0–1.0). Otherwise both parents pass through unchanged.
    pub crossover_rate: f64,

    /// Probability that an individual of the new population gets one
    /// random bit flipped (0.0–1.0).
    pub mutation_rate: f64,

    /// Fraction of `max_generations` allowed without significant
    /// improvement before stopping.
    ///
    /// At 1.0 (the default) the run never stops early.
    pub stagnation_ratio: f64,

    /// Minimum relative gain `(new - old) / |new|` for an improvement to
    /// count as significant.
    pub improvement_threshold: f64,

    /// Whether to evaluate individuals in parallel using rayon.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 300,
            max_generations: 1000,
            crossover_rate: 0.9,
            mutation_rate: 0.35,
            stagnation_ratio: 1.0,
            improvement_threshold: 0.01,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the stagnation ratio.
    pub fn with_stagnation_ratio(mut self, ratio: f64) -> Self {
        self.stagnation_ratio = ratio.max(0.0);
        self
    }

    /// Sets the improvement threshold.
    pub fn with_improvement_threshold(mut self, threshold: f64) -> Self {
        self.improvement_threshold = threshold.max(0.0);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size == 0 {
            return Err("population_size must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(format!(
                "crossover_rate must be in [0, 1], got {}",
                self.crossover_rate
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            ));
        }
        if self.stagnation_ratio < 0.0 {
            return Err("stagnation_ratio must be non-negative".into());
        }
        if self.improvement_threshold < 0.0 {
            return Err("improvement_threshold must be non-negative".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 300);
        assert_eq!(config.max_generations, 1000);
        assert!((config.crossover_rate - 0.9).abs() < 1e-10);
        assert!((config.mutation_rate - 0.35).abs() < 1e-10);
        assert!((config.stagnation_ratio - 1.0).abs() < 1e-10);
        assert!((config.improvement_threshold - 0.01).abs() < 1e-10);
        assert!(config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(50)
            .with_max_generations(20)
            .with_crossover_rate(0.7)
            .with_mutation_rate(0.05)
            .with_stagnation_ratio(0.3)
            .with_improvement_threshold(0.001)
            .with_parallel(false)
            .with_seed(42);

        assert_eq!(config.population_size, 50);
        assert_eq!(config.max_generations, 20);
        assert!((config.crossover_rate - 0.7).abs() < 1e-10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert!((config.stagnation_ratio - 0.3).abs() < 1e-10);
        assert!((config.improvement_threshold - 0.001).abs() < 1e-10);
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_clamp_rates() {
        let config = GaConfig::default()
            .with_crossover_rate(-0.5)
            .with_mutation_rate(2.0)
            .with_improvement_threshold(-1.0);

        assert!((config.crossover_rate - 0.0).abs() < 1e-10);
        assert!((config.mutation_rate - 1.0).abs() < 1e-10);
        assert!((config.improvement_threshold - 0.0).abs() < 1e-15);
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_population() {
        let config = GaConfig::default().with_population_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_unclamped_rate() {
        let config = GaConfig {
            mutation_rate: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
