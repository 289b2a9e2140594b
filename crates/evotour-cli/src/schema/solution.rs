use chrono::{DateTime, Utc};
use evotour_engine::{GaConfig, GaResult, RunSeed};
use evotour_stats::descriptive::DescriptiveStats;
use serde::Serialize;

/// Serialized outcome of one `solve` run.
///
/// Carries everything needed to reproduce the run - the seed and the full
/// configuration - alongside the result and its traces.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SolutionReport {
    pub solved_at: DateTime<Utc>,
    pub seed: RunSeed,
    pub num_cities: usize,
    pub config: GaConfig,
    #[serde(flatten)]
    pub result: GaResult,
    /// Summary of the per-generation best tour lengths.
    pub convergence_summary: Option<TraceSummary>,
    /// Summary of the per-generation distinct-genotype counts.
    pub diversity_summary: Option<TraceSummary>,
}

impl SolutionReport {
    pub(crate) fn new(
        seed: RunSeed,
        num_cities: usize,
        config: GaConfig,
        result: GaResult,
    ) -> Self {
        let convergence_summary = TraceSummary::from_values(result.convergence.iter().copied());
        #[expect(clippy::cast_precision_loss)]
        let diversity_summary =
            TraceSummary::from_values(result.diversity.iter().map(|&d| d as f64));
        Self {
            solved_at: Utc::now(),
            seed,
            num_cities,
            config,
            result,
            convergence_summary,
            diversity_summary,
        }
    }
}

/// Compact summary of a per-generation trace.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct TraceSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl TraceSummary {
    fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        DescriptiveStats::new(values).map(|stats| Self {
            min: stats.min,
            max: stats.max,
            mean: stats.mean,
            median: stats.median,
            std_dev: stats.std_dev,
        })
    }
}
