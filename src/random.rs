//! Tower heights for new nodes.
//!
//! Level 0 holds every node and each higher level holds a random subset of
//! the level below it. A `GeometricLevelGenerator` promotes a node one more
//! level with probability `p`, so heights follow a geometric distribution
//! truncated at the list's maximum level.
//!
//! Randomness is always handed in through a `UniformSource`. There is no
//! process-wide generator, which keeps list layouts reproducible under test.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    error::{Error, Result},
    options::{check_level_params, Options, DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY},
};

pub trait UniformSource {
    /// Returns a draw uniformly distributed in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

/// Adapts any `rand` generator into a `UniformSource`.
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        RngSource {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RngSource {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        RngSource { rng }
    }
}

impl<R: Rng> UniformSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        // Standard f64 sampling is half-open: [0, 1).
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed sequence of draws, wrapping around at the end.
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    draws: Vec<f64>,
    pos: usize,
}

impl ScriptedSource {
    pub fn new(draws: impl Into<Vec<f64>>) -> Result<Self> {
        let draws = draws.into();
        if draws.is_empty() {
            return Err(Error::InvalidArgument("scripted source needs a draw".into()));
        }
        if let Some(bad) = draws.iter().find(|d| !(0.0..1.0).contains(*d)) {
            return Err(Error::InvalidArgument(format!(
                "scripted draw {} is outside [0, 1)",
                bad
            )));
        }
        Ok(ScriptedSource { draws, pos: 0 })
    }
}

impl UniformSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        let draw = self.draws[self.pos];
        self.pos = (self.pos + 1) % self.draws.len();
        draw
    }
}

/// Picks the height of every node at the moment it is inserted.
pub trait LevelGenerator {
    fn max_level(&self) -> usize;

    /// Returns a height in `1..=self.max_level()`.
    fn random_level(&mut self) -> usize;
}

pub struct GeometricLevelGenerator<S = RngSource> {
    max_level: usize,
    probability: f64,
    source: S,
}

impl GeometricLevelGenerator<RngSource> {
    pub fn from_options(options: &Options) -> Result<Self> {
        let source = match options.seed {
            Some(seed) => RngSource::seeded(seed),
            None => RngSource::from_entropy(),
        };
        GeometricLevelGenerator::new(options.max_level, options.probability, source)
    }
}

impl Default for GeometricLevelGenerator<RngSource> {
    fn default() -> Self {
        GeometricLevelGenerator {
            max_level: DEFAULT_MAX_LEVEL,
            probability: DEFAULT_PROBABILITY,
            source: RngSource::from_entropy(),
        }
    }
}

impl<S: UniformSource> GeometricLevelGenerator<S> {
    pub fn new(max_level: usize, probability: f64, source: S) -> Result<Self> {
        check_level_params(max_level, probability)?;
        Ok(GeometricLevelGenerator {
            max_level,
            probability,
            source,
        })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl<S: UniformSource> LevelGenerator for GeometricLevelGenerator<S> {
    fn max_level(&self) -> usize {
        self.max_level
    }

    fn random_level(&mut self) -> usize {
        let mut level = 1;
        while level < self.max_level && self.source.next_unit() < self.probability {
            level += 1;
        }
        level
    }
}
