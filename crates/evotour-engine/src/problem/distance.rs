/// Immutable square matrix of pairwise travel costs between cities.
///
/// City `0` is the fixed start and end of every tour; the remaining cities
/// are identified by their row/column index. The matrix is expected to be
/// symmetric with a zero diagonal, but neither property is enforced -
/// asymmetric input simply makes the tour direction matter.
///
/// The matrix is validated once at construction and read-only afterwards,
/// so it can be shared freely across independent runs.
///
/// # Example
///
/// ```
/// use evotour_engine::DistanceMatrix;
///
/// let matrix = DistanceMatrix::from_rows(vec![
///     vec![0.0, 3.0, 4.0],
///     vec![3.0, 0.0, 5.0],
///     vec![4.0, 5.0, 0.0],
/// ])
/// .unwrap();
///
/// assert_eq!(matrix.size(), 3);
/// assert_eq!(matrix.distance(1, 2), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    weights: Vec<f64>,
}

/// Error returned when a distance matrix fails construction-time validation.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum DistanceMatrixError {
    /// A tour needs at least two cities.
    #[display("matrix has {size} cities, need at least 2")]
    TooFewCities { size: usize },
    /// A row's length does not match the number of rows.
    #[display("row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    /// Edge weights are travel costs and must be non-negative.
    #[display("negative weight {weight} at ({row}, {col})")]
    NegativeWeight { row: usize, col: usize, weight: f64 },
}

impl DistanceMatrix {
    /// Builds a matrix from row vectors, validating shape and weights.
    ///
    /// # Errors
    ///
    /// Returns [`DistanceMatrixError`] if the input has fewer than two rows,
    /// is not square, or contains a negative weight.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, DistanceMatrixError> {
        let size = rows.len();
        if size < 2 {
            return Err(DistanceMatrixError::TooFewCities { size });
        }

        let mut weights = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(DistanceMatrixError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            for (col, &weight) in values.iter().enumerate() {
                if weight < 0.0 {
                    return Err(DistanceMatrixError::NegativeWeight { row, col, weight });
                }
                weights.push(weight);
            }
        }

        Ok(Self { size, weights })
    }

    /// Number of cities, including the fixed start city `0`.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Travel cost from city `from` to city `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[must_use]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        assert!(
            from < self.size && to < self.size,
            "city index out of range"
        );
        self.weights[from * self.size + to]
    }
}
