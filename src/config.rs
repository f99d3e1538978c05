use serde::{Deserialize, Serialize};

use crate::error::{Result, ShareError};
use crate::modulus::ModulusPolicy;

/// Which threshold-sized subsets the round-trip check reconstructs from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SubsetStrategy {
    /// Every subset of `threshold` shares
    #[default]
    Exhaustive,
    /// The `total_shares` wrap-around windows of `threshold` consecutive shares
    Cyclic,
}

/// Configuration options for splitting and recovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// How the field modulus is derived from the entropy width
    pub modulus: ModulusPolicy,
    /// Whether fresh shares are round-trip checked before being returned
    pub self_check: bool,
    /// Subsets exercised by the round-trip check
    pub subset_strategy: SubsetStrategy,
    /// Upper bound on subsets the round-trip check may visit
    pub max_checked_subsets: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            modulus: ModulusPolicy::default(),
            self_check: true,
            subset_strategy: SubsetStrategy::default(),
            max_checked_subsets: 10_000,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the modulus policy
    pub fn with_modulus(mut self, modulus: ModulusPolicy) -> Self {
        self.modulus = modulus;
        self
    }

    /// Enables or disables the round-trip check on fresh shares
    pub fn with_self_check(mut self, enabled: bool) -> Self {
        self.self_check = enabled;
        self
    }

    /// Sets the subset strategy for the round-trip check
    pub fn with_subset_strategy(mut self, strategy: SubsetStrategy) -> Self {
        self.subset_strategy = strategy;
        self
    }

    /// Caps the number of subsets the round-trip check visits
    pub fn with_max_checked_subsets(mut self, max: usize) -> Result<Self> {
        if max == 0 {
            return Err(ShareError::InvalidConfig(
                "Subset limit cannot be zero".into(),
            ));
        }
        self.max_checked_subsets = max;
        Ok(self)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_checked_subsets == 0 {
            return Err(ShareError::InvalidConfig(
                "Subset limit cannot be zero".into(),
            ));
        }

        Ok(())
    }
}
