use std::path::PathBuf;

use evotour_engine::{DistanceMatrix, GaConfig, GaRun, RunSeed};
use rand::Rng as _;

use crate::{
    schema::solution::SolutionReport,
    util::{self, Output},
};

/// The 5-city instance used when no matrix file is given.
///
/// Its optimal tour is `0 → 1 → 2 → 3 → 4 → 0` with length 96, which makes
/// quick sanity runs easy to read.
fn fallback_matrix() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 20.0, 42.0, 35.0, 10.0],
        vec![20.0, 0.0, 30.0, 34.0, 25.0],
        vec![42.0, 30.0, 0.0, 12.0, 42.0],
        vec![35.0, 34.0, 12.0, 0.0, 24.0],
        vec![10.0, 25.0, 42.0, 24.0, 0.0],
    ]
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SolveArg {
    /// Distance matrix JSON file (an array of rows); uses the built-in
    /// 5-city instance when omitted
    #[arg(long)]
    matrix: Option<PathBuf>,
    /// Number of individuals per generation
    #[arg(long, default_value_t = 50)]
    population_size: usize,
    /// Generation budget
    #[arg(long, default_value_t = 200)]
    generations: usize,
    /// Per-gene swap mutation probability
    #[arg(long, default_value_t = 0.05)]
    mutation_rate: f64,
    /// Individuals drawn per tournament
    #[arg(long, default_value_t = 3)]
    tournament_size: usize,
    /// Fraction of the population carried over unchanged
    #[arg(long, default_value_t = 0.05)]
    elite_fraction: f64,
    /// 32-character hex seed for a reproducible run; random when omitted
    #[arg(long)]
    seed: Option<RunSeed>,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SolveArg) -> anyhow::Result<()> {
    let SolveArg {
        matrix,
        population_size,
        generations,
        mutation_rate,
        tournament_size,
        elite_fraction,
        seed,
        output,
    } = arg;

    let rows = match matrix {
        Some(path) => util::read_json_file("distance matrix", path)?,
        None => {
            eprintln!("No matrix file given, using the built-in 5-city instance");
            fallback_matrix()
        }
    };
    let matrix = DistanceMatrix::from_rows(rows)?;

    let config = GaConfig {
        population_size: *population_size,
        generations: *generations,
        mutation_rate: *mutation_rate,
        tournament_size: *tournament_size,
        elite_fraction: *elite_fraction,
    };
    let seed = seed.unwrap_or_else(|| rand::rng().random());

    eprintln!("Solving a {}-city instance (seed {seed})", matrix.size());
    let mut rng = seed.rng();
    let mut ga = GaRun::new(&matrix, &config, &mut rng)?;
    while let Some(stats) = ga.step(&mut rng) {
        eprintln!(
            "Generation #{:3}: best {:.2}, {} distinct routes",
            stats.generation, stats.best_length, stats.diversity
        );
    }
    let result = ga.finish();

    eprintln!();
    eprintln!("Best tour length: {:.2}", result.best_length);
    eprintln!("Best route: {:?}", result.best_route.genes());

    let report = SolutionReport::new(seed, matrix.size(), config, result);
    Output::save_json(&report, output.clone())?;
    Ok(())
}
