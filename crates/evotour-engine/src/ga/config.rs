use serde::{Deserialize, Serialize};

/// Immutable parameters for one GA run.
///
/// Constructed once before a run, checked with [`GaConfig::validate`], and
/// read-only afterwards. The defaults match the baseline used by the
/// parameter studies this engine grew out of: population 50, 200
/// generations, 5% mutation, tournaments of 3, 5% elitism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaConfig {
    /// Number of individuals per generation. Must be at least 2.
    pub population_size: usize,
    /// Fixed generation budget; the loop never stops early. At least 1.
    pub generations: usize,
    /// Per-gene probability of a swap mutation, in `[0, 1]`.
    pub mutation_rate: f64,
    /// Individuals drawn per tournament, in `[2, population_size]`.
    pub tournament_size: usize,
    /// Fraction of the population carried over unchanged, in `[0, 1)`.
    pub elite_fraction: f64,
}

/// Error returned when a [`GaConfig`] has out-of-range parameters.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    /// Breeding needs at least two individuals to select parents from.
    #[display("population size {size} is too small, need at least 2")]
    PopulationTooSmall { size: usize },
    /// A run must advance at least one generation.
    #[display("generation budget must be at least 1")]
    NoGenerations,
    /// The mutation rate is a probability.
    #[display("mutation rate {rate} is outside [0, 1]")]
    MutationRateOutOfRange { rate: f64 },
    /// Tournaments sample without replacement, so the tournament must fit
    /// inside the population.
    #[display("tournament size {size} is outside [2, {population_size}]")]
    TournamentSizeOutOfRange {
        size: usize,
        population_size: usize,
    },
    /// An elite fraction of 1 would leave no room for offspring.
    #[display("elite fraction {fraction} is outside [0, 1)")]
    EliteFractionOutOfRange { fraction: f64 },
}

impl GaConfig {
    /// Checks every parameter range.
    ///
    /// Run this before starting a run; the engine itself assumes a valid
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first out-of-range parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall {
                size: self.population_size,
            });
        }
        if self.generations < 1 {
            return Err(ConfigError::NoGenerations);
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::MutationRateOutOfRange {
                rate: self.mutation_rate,
            });
        }
        if self.tournament_size < 2 || self.tournament_size > self.population_size {
            return Err(ConfigError::TournamentSizeOutOfRange {
                size: self.tournament_size,
                population_size: self.population_size,
            });
        }
        if !(0.0..1.0).contains(&self.elite_fraction) {
            return Err(ConfigError::EliteFractionOutOfRange {
                fraction: self.elite_fraction,
            });
        }
        Ok(())
    }

    /// Number of individuals preserved unchanged each generation:
    /// `floor(population_size * elite_fraction)`.
    ///
    /// With a valid configuration this is always strictly less than the
    /// population size, so the breeding loop has at least one slot.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    #[must_use]
    pub fn elite_count(&self) -> usize {
        (self.population_size as f64 * self.elite_fraction).floor() as usize
    }
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 200,
            mutation_rate: 0.05,
            tournament_size: 3,
            elite_fraction: 0.05,
        }
    }
}
