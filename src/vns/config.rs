//! Variable Neighborhood Search configuration.

use crate::neighborhood::ImprovementPolicy;

/// Configuration parameters for Variable Neighborhood Search.
///
/// # Examples
///
/// ```
/// use kpfs_metaheur::vns::VnsConfig;
///
/// let config = VnsConfig::default()
///     .with_max_generations(1000)
///     .with_k_max(5);
/// assert_eq!(config.max_generations, 1000);
/// assert_eq!(config.k_max, 5);
/// ```
#[derive(Debug, Clone)]
pub struct VnsConfig {
    /// Maximum number of generations (full sweeps from `k = 1` to `k_max`).
    pub max_generations: usize,
    /// Largest neighborhood: a shake in neighborhood `k` flips `k` random
    /// bits.
    pub k_max: usize,
    /// Fraction of `max_generations` allowed without significant
    /// improvement before stopping.
    pub stagnation_ratio: f64,
    /// Minimum relative gain for an improvement to count as significant.
    pub improvement_threshold: f64,
    /// Descent used after each shake.
    pub policy: ImprovementPolicy,
    /// Whether to scan the 1-flip neighborhood on the rayon pool.
    pub parallel: bool,
    /// Random seed (None for a random seed).
    pub seed: Option<u64>,
}

impl Default for VnsConfig {
    fn default() -> Self {
        Self {
            max_generations: 3000,
            k_max: 10,
            stagnation_ratio: 0.3,
            improvement_threshold: 0.01,
            policy: ImprovementPolicy::BestImprovement,
            parallel: true,
            seed: None,
        }
    }
}

impl VnsConfig {
    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the largest neighborhood.
    pub fn with_k_max(mut self, k: usize) -> Self {
        self.k_max = k;
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

    /// Sets the descent policy.
    pub fn with_policy(mut self, policy: ImprovementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enables or disables parallel neighborhood scans.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.k_max == 0 {
            return Err("k_max must be at least 1".into());
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
    fn test_vns_config_defaults() {
        let config = VnsConfig::default();
        assert_eq!(config.max_generations, 3000);
        assert_eq!(config.k_max, 10);
        assert!((config.stagnation_ratio - 0.3).abs() < 1e-12);
        assert!((config.improvement_threshold - 0.01).abs() < 1e-12);
        assert_eq!(config.policy, ImprovementPolicy::BestImprovement);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_vns_config_builder() {
        let config = VnsConfig::default()
            .with_max_generations(100)
            .with_k_max(3)
            .with_stagnation_ratio(-1.0)
            .with_policy(ImprovementPolicy::FirstImprovement)
            .with_parallel(false)
            .with_seed(123);

        assert_eq!(config.max_generations, 100);
        assert_eq!(config.k_max, 3);
        assert_eq!(config.stagnation_ratio, 0.0);
        assert_eq!(config.policy, ImprovementPolicy::FirstImprovement);
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(123));
    }

    #[test]
    fn test_validate_rejects_zero_k_max() {
        let config = VnsConfig::default().with_k_max(0);
        assert!(config.validate().is_err());
    }
}
