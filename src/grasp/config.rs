//! GRASP configuration.

use crate::neighborhood::ImprovementPolicy;

/// Configuration parameters for GRASP.
///
/// # Examples
///
/// ```
/// use kpfs_metaheur::grasp::GraspConfig;
/// use kpfs_metaheur::ImprovementPolicy;
///
/// let config = GraspConfig::default()
///     .with_max_iterations(200)
///     .with_alpha(0.3)
///     .with_policy(ImprovementPolicy::BestImprovement);
/// assert_eq!(config.max_iterations, 200);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GraspConfig {
    /// Maximum number of construction + local search trials.
    pub max_iterations: usize,
    /// Greediness of construction in `(0, 1]`: the RCL holds the top
    /// `max(1, floor(alpha * remaining))` candidates. Near 0 is greedy,
    /// 1 is uniformly random.
    pub alpha: f64,
    /// Fraction of `max_iterations` without improvement before stopping.
    pub stagnation_ratio: f64,
    /// Trials run concurrently per batch. Stagnation is checked between
    /// batches.
    pub batch_size: usize,
    /// Which improving add/drop/swap move local search applies.
    pub policy: ImprovementPolicy,
    /// Whether to run the trials of a batch on the rayon pool.
    pub parallel: bool,
    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GraspConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            alpha: 0.2,
            stagnation_ratio: 0.1,
            batch_size: 10,
            policy: ImprovementPolicy::FirstImprovement,
            parallel: true,
            seed: None,
        }
    }
}

impl GraspConfig {
    /// Sets the maximum number of trials.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the RCL greediness.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the stagnation ratio (clamped to `[0, 1]`).
    pub fn with_stagnation_ratio(mut self, ratio: f64) -> Self {
        self.stagnation_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of trials per batch (at least 1).
    pub fn with_batch_size(mut self, n: usize) -> Self {
        self.batch_size = n.max(1);
        self
    }

    /// Sets the local search policy.
    pub fn with_policy(mut self, policy: ImprovementPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enables or disables parallel batches.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Trials without improvement that end the run (at least 1).
    pub fn stagnation_limit(&self) -> usize {
        ((self.max_iterations as f64 * self.stagnation_ratio) as usize).max(1)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(format!("alpha must be in (0, 1], got {}", self.alpha));
        }
        if !(0.0..=1.0).contains(&self.stagnation_ratio) {
            return Err(format!(
                "stagnation_ratio must be in [0, 1], got {}",
                self.stagnation_ratio
            ));
        }
        if self.batch_size == 0 {
            return Err("batch_size must be at least 1".into());
        }
        Ok(())
    }
}
