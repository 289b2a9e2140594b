use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for a deterministic GA run.
///
/// This is a 128-bit (16-byte) seed used to initialize the run's random
/// number generator. All stochastic draws of a run - the initial shuffles,
/// tournament sampling, crossover cut points, and mutation coin flips - come
/// from that single stream in a fixed order, so the same seed with the same
/// matrix and configuration reproduces the run exactly.
///
/// Serializes as a 32-character hex string, and parses from the same format.
///
/// # Example
///
/// ```
/// use evotour_engine::RunSeed;
/// use rand::Rng as _;
///
/// // Generate a random seed
/// let seed: RunSeed = rand::rng().random();
///
/// // Two generators from the same seed produce the same stream
/// let mut rng1 = seed.rng();
/// let mut rng2 = seed.rng();
/// assert_eq!(rng1.random::<u64>(), rng2.random::<u64>());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSeed([u8; 16]);

/// Error returned when parsing a [`RunSeed`] from text fails.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid seed '{input}': expected 32 hex characters")]
pub struct ParseRunSeedError {
    input: String,
}

impl RunSeed {
    /// Creates the run's random number generator.
    #[must_use]
    pub fn rng(&self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for RunSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for RunSeed {
    type Err = ParseRunSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseRunSeedError {
                input: s.to_owned(),
            });
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseRunSeedError {
            input: s.to_owned(),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for RunSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RunSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `RunSeed` values with `rng.random()`.
impl Distribution<RunSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> RunSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        RunSeed(seed)
    }
}
