use std::cmp::Ordering;

use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use crate::problem::distance::DistanceMatrix;

/// A candidate tour: the visiting order of every city except city `0`.
///
/// City `0` is the fixed start and end of every tour, so a route over `n`
/// cities stores `n - 1` genes. A route is *valid* when its genes are
/// exactly the set `{1, …, n - 1}` - no repeats, no omissions, no foreign
/// values. Routes produced by the engine itself are valid by construction;
/// externally supplied routes should be checked with [`Route::validate`].
///
/// Serializes transparently as the plain gene sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route {
    genes: Vec<usize>,
}

/// Error returned when a route fails the validity check.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum RouteError {
    /// The route must visit every city except city `0` exactly once.
    #[display("route has {len} genes, expected {expected}")]
    WrongLength { len: usize, expected: usize },
    /// The gene is not a city of the instance, or is the fixed city `0`.
    #[display("gene {gene} is not a city in 1..{num_cities}")]
    GeneOutOfRange { gene: usize, num_cities: usize },
    /// Each city may appear only once.
    #[display("gene {gene} appears more than once")]
    DuplicateGene { gene: usize },
}

impl Route {
    /// Creates a uniformly random route over `num_cities` cities.
    ///
    /// The genes `{1, …, num_cities - 1}` are shuffled with a Fisher-Yates
    /// shuffle, so every permutation is equally likely.
    pub fn random<R>(num_cities: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut genes: Vec<usize> = (1..num_cities).collect();
        genes.shuffle(rng);
        Self { genes }
    }

    /// Wraps a gene sequence without checking validity.
    ///
    /// Pair with [`Route::validate`] when the genes come from an external
    /// source.
    #[must_use]
    pub fn from_genes(genes: Vec<usize>) -> Self {
        Self { genes }
    }

    /// The gene sequence, excluding the implicit city `0` at both ends.
    #[must_use]
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// Number of genes (`num_cities - 1` for a valid route).
    #[must_use]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if the route has no genes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Exchanges the genes at positions `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of range.
    pub fn swap_genes(&mut self, i: usize, j: usize) {
        self.genes.swap(i, j);
    }

    /// Checks that the route is a valid tour over `num_cities` cities.
    ///
    /// A valid route has exactly `num_cities - 1` genes whose set equals
    /// `{1, …, num_cities - 1}`. Correct length plus in-range genes plus no
    /// duplicates imply the full set, so omissions need no separate check.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError`] naming the first violated rule.
    pub fn validate(&self, num_cities: usize) -> Result<(), RouteError> {
        let expected = num_cities.saturating_sub(1);
        if self.genes.len() != expected {
            return Err(RouteError::WrongLength {
                len: self.genes.len(),
                expected,
            });
        }
        let mut seen = vec![false; num_cities];
        for &gene in &self.genes {
            if gene == 0 || gene >= num_cities {
                return Err(RouteError::GeneOutOfRange { gene, num_cities });
            }
            if seen[gene] {
                return Err(RouteError::DuplicateGene { gene });
            }
            seen[gene] = true;
        }
        Ok(())
    }

    /// Total length of the tour `0 → genes[0] → … → genes[last] → 0`.
    ///
    /// Assumes the route is valid for `matrix`; use [`Fitness::evaluate`]
    /// for untrusted routes.
    ///
    /// # Panics
    ///
    /// Panics if a gene is not a city of `matrix`.
    #[must_use]
    pub fn tour_length(&self, matrix: &DistanceMatrix) -> f64 {
        let mut prev = 0;
        let mut total = 0.0;
        for &gene in &self.genes {
            total += matrix.distance(prev, gene);
            prev = gene;
        }
        total + matrix.distance(prev, 0)
    }
}

/// Evaluated quality of a route, under the minimize-tour-length convention.
///
/// Shorter tours are better. [`Fitness::Invalid`] marks routes that failed
/// validation; it orders after every valid length, so ranking code treats a
/// bad individual as worst-case without branching on errors.
#[derive(Debug, Clone, Copy)]
pub enum Fitness {
    /// A valid route with the given tour length.
    Length(f64),
    /// A route that failed the validity check. Ranks worst.
    Invalid,
}

impl Fitness {
    /// Validates `route` against `matrix` and measures its tour length.
    ///
    /// Invalid routes yield [`Fitness::Invalid`] instead of an error, so a
    /// single bad individual cannot abort a generation.
    #[must_use]
    pub fn evaluate(route: &Route, matrix: &DistanceMatrix) -> Self {
        match route.validate(matrix.size()) {
            Ok(()) => Self::Length(route.tour_length(matrix)),
            Err(_) => Self::Invalid,
        }
    }

    /// The tour length, if the route was valid.
    #[must_use]
    pub fn length(&self) -> Option<f64> {
        match self {
            Self::Length(length) => Some(*length),
            Self::Invalid => None,
        }
    }

    /// The tour length, with invalid routes scored as infinite.
    #[must_use]
    pub fn length_or_worst(&self) -> f64 {
        self.length().unwrap_or(f64::INFINITY)
    }
}

impl PartialEq for Fitness {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Fitness {}

impl PartialOrd for Fitness {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fitness {
    /// Orders by quality: shorter tours sort first, `Invalid` sorts last.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Length(a), Self::Length(b)) => a.total_cmp(b),
            (Self::Length(_), Self::Invalid) => Ordering::Less,
            (Self::Invalid, Self::Length(_)) => Ordering::Greater,
            (Self::Invalid, Self::Invalid) => Ordering::Equal,
        }
    }
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

    mod route {
        use super::*;

        #[test]
        fn test_random_routes_are_valid() {
            let mut rng = Pcg32::seed_from_u64(7);
            for num_cities in 2..20 {
                let route = Route::random(num_cities, &mut rng);
                route.validate(num_cities).unwrap();
            }
        }

        #[test]
        fn test_random_reaches_multiple_permutations() {
            let mut rng = Pcg32::seed_from_u64(42);
            let distinct: std::collections::HashSet<_> =
                (0..50).map(|_| Route::random(5, &mut rng)).collect();
            // 4! = 24 permutations; 50 uniform draws hit well more than one
            assert!(distinct.len() > 5);
        }

        #[test]
        fn test_validate_wrong_length() {
            let err = Route::from_genes(vec![1, 2]).validate(5).unwrap_err();
            assert!(matches!(
                err,
                RouteError::WrongLength {
                    len: 2,
                    expected: 4,
                }
            ));
        }

        #[test]
        fn test_validate_gene_out_of_range() {
            let err = Route::from_genes(vec![1, 2, 3, 5]).validate(5).unwrap_err();
            assert!(matches!(
                err,
                RouteError::GeneOutOfRange {
                    gene: 5,
                    num_cities: 5,
                }
            ));

            // the fixed city 0 must not appear as a gene
            let err = Route::from_genes(vec![0, 1, 2, 3]).validate(5).unwrap_err();
            assert!(matches!(err, RouteError::GeneOutOfRange { gene: 0, .. }));
        }

        #[test]
        fn test_validate_duplicate_gene() {
            let err = Route::from_genes(vec![1, 2, 2, 4]).validate(5).unwrap_err();
            assert!(matches!(err, RouteError::DuplicateGene { gene: 2 }));
        }

        #[test]
        fn test_tour_length_known_optimum() {
            // 0 → 1 → 2 → 3 → 4 → 0 = 20 + 30 + 12 + 24 + 10 = 96
            let route = Route::from_genes(vec![1, 2, 3, 4]);
            assert_eq!(route.tour_length(&five_cities()), 96.0);
        }

        #[test]
        fn test_tour_length_single_gene() {
            let matrix =
                DistanceMatrix::from_rows(vec![vec![0.0, 7.0], vec![7.0, 0.0]]).unwrap();
            let route = Route::from_genes(vec![1]);
            assert_eq!(route.tour_length(&matrix), 14.0);
        }

        #[test]
        fn test_serde_is_transparent() {
            let route = Route::from_genes(vec![3, 1, 2]);
            let json = serde_json::to_string(&route).unwrap();
            assert_eq!(json, "[3,1,2]");
            let back: Route = serde_json::from_str(&json).unwrap();
            assert_eq!(back, route);
        }
    }

    mod fitness {
        use super::*;

        #[test]
        fn test_evaluate_valid_route() {
            let fitness = Fitness::evaluate(&Route::from_genes(vec![1, 2, 3, 4]), &five_cities());
            assert_eq!(fitness.length(), Some(96.0));
        }

        #[test]
        fn test_evaluate_invalid_route_is_worst() {
            let fitness = Fitness::evaluate(&Route::from_genes(vec![1, 1, 3, 4]), &five_cities());
            assert_eq!(fitness.length(), None);
            assert_eq!(fitness.length_or_worst(), f64::INFINITY);
        }

        #[test]
        fn test_ordering_prefers_shorter_tours() {
            assert!(Fitness::Length(96.0) < Fitness::Length(118.0));
            assert!(Fitness::Length(118.0) < Fitness::Invalid);
            assert_eq!(Fitness::Invalid.cmp(&Fitness::Invalid), Ordering::Equal);
        }

        #[test]
        fn test_min_of_mixed_fitnesses() {
            let best = [Fitness::Invalid, Fitness::Length(50.0), Fitness::Length(40.0)]
                .into_iter()
                .min()
                .unwrap();
            assert_eq!(best.length(), Some(40.0));
        }
    }
}
