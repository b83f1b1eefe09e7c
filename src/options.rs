use crate::error::{Error, Result};

/// Upper bound accepted for `Options::max_level`.
pub const MAX_LEVEL_LIMIT: usize = 64;
pub const DEFAULT_MAX_LEVEL: usize = 16;
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// What `insert` does when an equal key is already present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep every copy (multiset). Each `delete` removes one of them.
    #[default]
    Allow,
    /// Refuse the insert and leave the list untouched.
    Reject,
}

#[derive(Clone, Debug)]
pub struct Options {
    pub max_level: usize,
    pub probability: f64,
    pub duplicates: DuplicatePolicy,

    /// Seed for the level generator. `None` draws the seed from OS entropy.
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_level: DEFAULT_MAX_LEVEL,
            probability: DEFAULT_PROBABILITY,
            duplicates: DuplicatePolicy::Allow,
            seed: None,
        }
    }
}

impl Options {
    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_level_params(self.max_level, self.probability)
    }
}

pub(crate) fn check_level_params(max_level: usize, probability: f64) -> Result<()> {
    if max_level == 0 || max_level > MAX_LEVEL_LIMIT {
        return Err(Error::InvalidArgument(format!(
            "max_level must be in 1..={}, got {}",
            MAX_LEVEL_LIMIT, max_level
        )));
    }
    if !probability.is_finite() || probability <= 0.0 || probability >= 1.0 {
        return Err(Error::InvalidArgument(format!(
            "probability must be in (0, 1), got {}",
            probability
        )));
    }
    Ok(())
}
