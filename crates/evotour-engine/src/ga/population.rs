use std::collections::HashSet;

use rand::Rng;

use crate::problem::{DistanceMatrix, Fitness, Route};

/// A single candidate solution: a route and its most recent evaluation.
///
/// Fitness starts as [`Fitness::Invalid`] (the worst value) and is cached by
/// [`Population::evaluate`], so an individual that was never evaluated can
/// never win a selection against an evaluated one.
#[derive(Debug, Clone)]
pub struct Individual {
    route: Route,
    fitness: Fitness,
}

impl Individual {
    /// Creates an unevaluated individual from a route.
    #[must_use]
    pub fn new(route: Route) -> Self {
        Self {
            route,
            fitness: Fitness::Invalid,
        }
    }

    /// Creates an individual with a uniformly random route.
    pub fn random<R>(num_cities: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(Route::random(num_cities, rng))
    }

    /// The individual's route.
    #[must_use]
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// The cached fitness from the last evaluation.
    #[must_use]
    pub fn fitness(&self) -> Fitness {
        self.fitness
    }

    #[cfg(test)]
    pub(crate) fn set_fitness(&mut self, fitness: Fitness) {
        self.fitness = fitness;
    }
}

/// An ordered collection of individuals of fixed size.
///
/// Order is meaningful: fitness ties - in elite ranking and in tournament
/// draws - resolve to the earlier position, so evaluation never reorders the
/// population. A new population is created each generation; only elites are
/// carried over.
#[derive(Debug, Clone)]
pub struct Population {
    num_cities: usize,
    individuals: Vec<Individual>,
}

impl Population {
    /// Seeds a population of `count` uniformly random routes.
    #[must_use]
    pub fn random<R>(num_cities: usize, count: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let individuals = (0..count)
            .map(|_| Individual::random(num_cities, rng))
            .collect();
        Self {
            num_cities,
            individuals,
        }
    }

    /// Wraps an existing set of individuals.
    #[must_use]
    pub fn new(num_cities: usize, individuals: Vec<Individual>) -> Self {
        Self {
            num_cities,
            individuals,
        }
    }

    /// All individuals, in population order.
    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Number of individuals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Returns `true` if the population has no individuals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Number of cities in the underlying instance.
    #[must_use]
    pub fn num_cities(&self) -> usize {
        self.num_cities
    }

    /// Evaluates and caches the fitness of every individual.
    ///
    /// Population order is preserved. Individuals with invalid routes are
    /// scored as [`Fitness::Invalid`] rather than raising.
    pub fn evaluate(&mut self, matrix: &DistanceMatrix) {
        for ind in &mut self.individuals {
            ind.fitness = Fitness::evaluate(&ind.route, matrix);
        }
    }

    /// The best individual by fitness; the first one on ties.
    ///
    /// # Panics
    ///
    /// Panics if the population is empty.
    #[must_use]
    pub fn best(&self) -> &Individual {
        self.individuals
            .iter()
            .min_by(|a, b| a.fitness.cmp(&b.fitness))
            .expect("population is never empty")
    }

    /// Number of distinct gene sequences in the population.
    ///
    /// Routes with equal content count once regardless of identity. This is
    /// the per-generation diversity measure in the convergence trace.
    #[must_use]
    pub fn distinct_routes(&self) -> usize {
        self.individuals
            .iter()
            .map(|ind| ind.route.genes())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Indices of the top `count` individuals by fitness rank.
    ///
    /// Uses a stable sort of indices, so equal fitnesses rank in population
    /// order.
    #[must_use]
    pub fn elite_indices(&self, count: usize) -> Vec<usize> {
        let mut ranked: Vec<usize> = (0..self.individuals.len()).collect();
        ranked.sort_by(|&a, &b| {
            self.individuals[a]
                .fitness
                .cmp(&self.individuals[b].fitness)
        });
        ranked.truncate(count);
        ranked
    }
}
