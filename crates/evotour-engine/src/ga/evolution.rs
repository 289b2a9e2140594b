use rand::Rng;
use serde::Serialize;

use crate::{
    ga::{
        config::{ConfigError, GaConfig},
        operators,
        population::{Individual, Population},
    },
    problem::{DistanceMatrix, Route},
};

/// Advances a population by one generation.
///
/// The evolver carries the top `elite_count` individuals over unchanged,
/// then breeds the remaining slots: tournament-select two parents, recombine
/// them with order crossover, swap-mutate each child, and append. When only
/// one slot remains, the second child of the last pair is discarded rather
/// than overfilling.
#[derive(Debug, Clone)]
pub struct Evolver {
    /// Individuals carried over unchanged, by fitness rank.
    pub elite_count: usize,
    /// Individuals drawn per tournament.
    pub tournament_size: usize,
    /// Per-gene swap mutation probability.
    pub mutation_rate: f64,
}

impl Evolver {
    /// Derives the evolver from a validated configuration.
    #[must_use]
    pub fn from_config(config: &GaConfig) -> Self {
        Self {
            elite_count: config.elite_count(),
            tournament_size: config.tournament_size,
            mutation_rate: config.mutation_rate,
        }
    }

    /// Produces the next generation from an evaluated population.
    ///
    /// The population must have been evaluated; unevaluated individuals rank
    /// worst and would never be selected or carried over. The breeding loop
    /// appends at least one child per iteration, so it terminates after at
    /// most `population.len()` iterations.
    #[must_use]
    pub fn evolve<R>(&self, population: &Population, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        let size = population.len();
        let mut next = Vec::with_capacity(size);

        for i in population.elite_indices(self.elite_count) {
            next.push(population.individuals()[i].clone());
        }

        while next.len() < size {
            let parent1 =
                operators::tournament_select(population.individuals(), self.tournament_size, rng);
            let parent2 =
                operators::tournament_select(population.individuals(), self.tournament_size, rng);
            let (mut child1, mut child2) =
                operators::order_crossover(parent1.route(), parent2.route(), rng);

            operators::swap_mutate(&mut child1, self.mutation_rate, rng);
            next.push(Individual::new(child1));
            if next.len() < size {
                operators::swap_mutate(&mut child2, self.mutation_rate, rng);
                next.push(Individual::new(child2));
            }
        }

        Population::new(population.num_cities(), next)
    }
}

/// Measurements recorded for one completed generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationStats {
    /// Zero-based generation index.
    pub generation: usize,
    /// Best tour length in the generation's population.
    pub best_length: f64,
    /// Number of distinct gene sequences in the generation's population.
    pub diversity: usize,
}

/// Final report of a GA run.
#[derive(Debug, Clone, Serialize)]
pub struct GaResult {
    /// Best route in the final population.
    pub best_route: Route,
    /// Tour length of `best_route`.
    pub best_length: f64,
    /// Best tour length per generation, one entry per generation run.
    pub convergence: Vec<f64>,
    /// Distinct-genotype count per generation, one entry per generation run.
    pub diversity: Vec<usize>,
}

/// The generational loop, driven one generation at a time.
///
/// Each [`GaRun::step`] call evaluates the current population, records the
/// best tour length and the diversity count into the trace, and breeds the
/// next population. Generations are the natural preemption points: a driver
/// that wants to stop before the budget is exhausted simply stops calling
/// `step` and calls [`GaRun::finish`].
///
/// # Example
///
/// ```
/// use evotour_engine::{DistanceMatrix, GaConfig, GaRun, RunSeed};
///
/// let matrix = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.0, 1.0],
///     vec![2.0, 1.0, 0.0],
/// ])
/// .unwrap();
/// let config = GaConfig {
///     population_size: 10,
///     generations: 5,
///     ..GaConfig::default()
/// };
///
/// let seed: RunSeed = "00000000000000000000000000000000".parse().unwrap();
/// let mut rng = seed.rng();
/// let mut run = GaRun::new(&matrix, &config, &mut rng).unwrap();
/// while let Some(stats) = run.step(&mut rng) {
///     assert!(stats.diversity <= 10);
/// }
/// let result = run.finish();
/// assert_eq!(result.convergence.len(), 5);
/// ```
#[derive(Debug)]
pub struct GaRun<'m> {
    matrix: &'m DistanceMatrix,
    evolver: Evolver,
    generations: usize,
    completed: usize,
    population: Population,
    convergence: Vec<f64>,
    diversity: Vec<usize>,
}

impl<'m> GaRun<'m> {
    /// Validates the configuration and seeds the initial population.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is out of range; no
    /// generation runs in that case.
    pub fn new<R>(
        matrix: &'m DistanceMatrix,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigError>
    where
        R: Rng + ?Sized,
    {
        config.validate()?;
        let population = Population::random(matrix.size(), config.population_size, rng);
        Ok(Self {
            matrix,
            evolver: Evolver::from_config(config),
            generations: config.generations,
            completed: 0,
            population,
            convergence: Vec::with_capacity(config.generations),
            diversity: Vec::with_capacity(config.generations),
        })
    }

    /// Runs one generation and returns its measurements.
    ///
    /// Returns `None` once the generation budget is exhausted.
    pub fn step<R>(&mut self, rng: &mut R) -> Option<GenerationStats>
    where
        R: Rng + ?Sized,
    {
        if self.completed == self.generations {
            return None;
        }

        self.population.evaluate(self.matrix);
        let best_length = self.population.best().fitness().length_or_worst();
        let diversity = self.population.distinct_routes();
        self.convergence.push(best_length);
        self.diversity.push(diversity);

        self.population = self.evolver.evolve(&self.population, rng);

        let generation = self.completed;
        self.completed += 1;
        Some(GenerationStats {
            generation,
            best_length,
            diversity,
        })
    }

    /// Number of generations run so far.
    #[must_use]
    pub fn completed_generations(&self) -> usize {
        self.completed
    }

    /// Evaluates the final population once more and assembles the result.
    ///
    /// Usable after any number of steps; the traces cover exactly the
    /// generations that ran.
    #[must_use]
    pub fn finish(mut self) -> GaResult {
        self.population.evaluate(self.matrix);
        let best = self.population.best();
        GaResult {
            best_route: best.route().clone(),
            best_length: best.fitness().length_or_worst(),
            convergence: self.convergence,
            diversity: self.diversity,
        }
    }
}

/// Runs a full GA: seeds a population, advances it for the configured
/// generation budget, and reports the best individual with the convergence
/// and diversity traces.
///
/// # Errors
///
/// Returns [`ConfigError`] if `config` is out of range; no generation runs
/// in that case.
pub fn solve<R>(
    matrix: &DistanceMatrix,
    config: &GaConfig,
    rng: &mut R,
) -> Result<GaResult, ConfigError>
where
    R: Rng + ?Sized,
{
    let mut run = GaRun::new(matrix, config, rng)?;
    while run.step(rng).is_some() {}
    Ok(run.finish())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn five_cities() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 20.0, 42.0, 35.0, 10.0],
            vec![20.0, 0.0, 30.0, 34.0, 25.0],
            vec![42.0, 30.0, 0.0, 12.0, 42.0],
            vec![35.0, 34.0, 12.0, 0.0, 24.0],
            vec![10.0, 25.0, 42.0, 24.0, 0.0],
        ])
        .unwrap()
    }

    /// Cities on a ring, so the optimum is the ring order and random routes
    /// start far from it.
    fn ring(num_cities: usize) -> DistanceMatrix {
        #[expect(clippy::cast_precision_loss)]
        let rows = (0..num_cities)
            .map(|i| {
                (0..num_cities)
                    .map(|j| {
                        let d = i.abs_diff(j);
                        d.min(num_cities - d) as f64
                    })
                    .collect()
            })
            .collect();
        DistanceMatrix::from_rows(rows).unwrap()
    }

    mod evolver {
        use super::*;

        #[test]
        fn test_keeps_population_size() {
            let matrix = ring(9);
            let mut rng = Pcg32::seed_from_u64(21);
            let mut population = Population::random(9, 25, &mut rng);
            population.evaluate(&matrix);

            let evolver = Evolver {
                elite_count: 3,
                tournament_size: 3,
                mutation_rate: 0.1,
            };
            let next = evolver.evolve(&population, &mut rng);
            assert_eq!(next.len(), 25);
        }

        #[test]
        fn test_elites_carry_over_unchanged() {
            let matrix = five_cities();
            let mut rng = Pcg32::seed_from_u64(23);
            let mut population = Population::random(5, 20, &mut rng);
            population.evaluate(&matrix);

            let elite_routes: Vec<Route> = population
                .elite_indices(2)
                .into_iter()
                .map(|i| population.individuals()[i].route().clone())
                .collect();

            let evolver = Evolver {
                elite_count: 2,
                tournament_size: 3,
                mutation_rate: 0.2,
            };
            let next = evolver.evolve(&population, &mut rng);

            // elites land at the front of the next population, gene-identical
            assert_eq!(next.individuals()[0].route(), &elite_routes[0]);
            assert_eq!(next.individuals()[1].route(), &elite_routes[1]);
        }

        #[test]
        fn test_offspring_stay_valid_permutations() {
            let matrix = ring(11);
            let mut rng = Pcg32::seed_from_u64(29);
            let mut population = Population::random(11, 30, &mut rng);

            let evolver = Evolver {
                elite_count: 2,
                tournament_size: 4,
                mutation_rate: 0.3,
            };
            for _ in 0..10 {
                population.evaluate(&matrix);
                population = evolver.evolve(&population, &mut rng);
                for ind in population.individuals() {
                    ind.route().validate(11).unwrap();
                }
            }
        }

        #[test]
        fn test_odd_slot_count_discards_second_child() {
            let matrix = five_cities();
            let mut rng = Pcg32::seed_from_u64(31);
            // 2 elites + 5 slots: the last pair contributes only one child
            let mut population = Population::random(5, 7, &mut rng);
            population.evaluate(&matrix);

            let evolver = Evolver {
                elite_count: 2,
                tournament_size: 2,
                mutation_rate: 0.05,
            };
            let next = evolver.evolve(&population, &mut rng);
            assert_eq!(next.len(), 7);
        }

        #[test]
        fn test_zero_elites_still_fills() {
            let matrix = five_cities();
            let mut rng = Pcg32::seed_from_u64(37);
            let mut population = Population::random(5, 10, &mut rng);
            population.evaluate(&matrix);

            let evolver = Evolver {
                elite_count: 0,
                tournament_size: 2,
                mutation_rate: 0.05,
            };
            assert_eq!(evolver.evolve(&population, &mut rng).len(), 10);
        }
    }

    mod run {
        use super::*;

        fn test_config() -> GaConfig {
            GaConfig {
                population_size: 30,
                generations: 200,
                mutation_rate: 0.1,
                tournament_size: 3,
                elite_fraction: 0.1,
            }
        }

        #[test]
        fn test_invalid_config_fails_before_running() {
            let config = GaConfig {
                population_size: 0,
                ..GaConfig::default()
            };
            let mut rng = Pcg32::seed_from_u64(0);
            assert!(matches!(
                solve(&five_cities(), &config, &mut rng),
                Err(ConfigError::PopulationTooSmall { size: 0 })
            ));
        }

        #[test]
        fn test_trace_lengths_match_budget() {
            let config = test_config();
            let mut rng = Pcg32::seed_from_u64(41);
            let result = solve(&five_cities(), &config, &mut rng).unwrap();
            assert_eq!(result.convergence.len(), 200);
            assert_eq!(result.diversity.len(), 200);
        }

        #[test]
        fn test_diversity_never_exceeds_population_size() {
            let config = test_config();
            let mut rng = Pcg32::seed_from_u64(43);
            let result = solve(&ring(10), &config, &mut rng).unwrap();
            assert!(result.diversity.iter().all(|&d| (1..=30).contains(&d)));
        }

        #[test]
        fn test_convergence_is_monotone_with_elitism() {
            // with at least one elite the best individual survives, so the
            // per-generation best never regresses
            let config = test_config();
            let mut rng = Pcg32::seed_from_u64(47);
            let result = solve(&ring(10), &config, &mut rng).unwrap();
            for pair in result.convergence.windows(2) {
                assert!(pair[1] <= pair[0]);
            }
            assert!(result.best_length <= result.convergence[result.convergence.len() - 1]);
        }

        #[test]
        fn test_finds_known_optimum_on_five_cities() {
            // 0 → 1 → 2 → 3 → 4 → 0 = 96 is optimal; 24 permutations in
            // total, so a seeded run over 200 generations reaches it
            let config = test_config();
            let mut rng = Pcg32::seed_from_u64(53);
            let result = solve(&five_cities(), &config, &mut rng).unwrap();
            assert!(result.best_length >= 96.0);
            assert!((result.best_length - 96.0).abs() < f64::EPSILON);
            result.best_route.validate(5).unwrap();
        }

        #[test]
        fn test_same_seed_reproduces_run() {
            let config = test_config();
            let matrix = ring(10);
            let mut rng1 = Pcg32::seed_from_u64(59);
            let mut rng2 = Pcg32::seed_from_u64(59);
            let r1 = solve(&matrix, &config, &mut rng1).unwrap();
            let r2 = solve(&matrix, &config, &mut rng2).unwrap();
            assert_eq!(r1.best_route, r2.best_route);
            assert_eq!(r1.convergence, r2.convergence);
            assert_eq!(r1.diversity, r2.diversity);
        }

        #[test]
        fn test_diversity_trends_downward() {
            let config = GaConfig {
                population_size: 40,
                generations: 300,
                mutation_rate: 0.05,
                tournament_size: 3,
                elite_fraction: 0.05,
            };
            let mut rng = Pcg32::seed_from_u64(61);
            let result = solve(&ring(12), &config, &mut rng).unwrap();

            // statistical trend, not a per-step property: compare the first
            // and last quarter means
            #[expect(clippy::cast_precision_loss)]
            let mean = |values: &[usize]| {
                evotour_stats::descriptive::DescriptiveStats::new(
                    values.iter().map(|&d| d as f64),
                )
                .unwrap()
                .mean
            };
            let quarter = result.diversity.len() / 4;
            let early = mean(&result.diversity[..quarter]);
            let late = mean(&result.diversity[result.diversity.len() - quarter..]);
            assert!(late <= early);
        }

        #[test]
        fn test_stepping_can_stop_early() {
            let config = test_config();
            let matrix = five_cities();
            let mut rng = Pcg32::seed_from_u64(67);
            let mut run = GaRun::new(&matrix, &config, &mut rng).unwrap();
            for _ in 0..10 {
                run.step(&mut rng).unwrap();
            }
            assert_eq!(run.completed_generations(), 10);
            let result = run.finish();
            assert_eq!(result.convergence.len(), 10);
            result.best_route.validate(5).unwrap();
        }

        #[test]
        fn test_step_returns_none_after_budget() {
            let config = GaConfig {
                population_size: 10,
                generations: 3,
                mutation_rate: 0.05,
                tournament_size: 2,
                elite_fraction: 0.1,
            };
            let matrix = five_cities();
            let mut rng = Pcg32::seed_from_u64(71);
            let mut run = GaRun::new(&matrix, &config, &mut rng).unwrap();
            assert!(run.step(&mut rng).is_some());
            assert!(run.step(&mut rng).is_some());
            assert!(run.step(&mut rng).is_some());
            assert!(run.step(&mut rng).is_none());
            assert!(run.step(&mut rng).is_none());
        }

        #[test]
        fn test_two_city_instance() {
            // smallest allowed instance: a single possible route
            let matrix =
                DistanceMatrix::from_rows(vec![vec![0.0, 5.0], vec![5.0, 0.0]]).unwrap();
            let config = GaConfig {
                population_size: 4,
                generations: 5,
                mutation_rate: 0.5,
                tournament_size: 2,
                elite_fraction: 0.25,
            };
            let mut rng = Pcg32::seed_from_u64(73);
            let result = solve(&matrix, &config, &mut rng).unwrap();
            assert_eq!(result.best_route.genes(), &[1]);
            assert_eq!(result.best_length, 10.0);
        }
    }
}
