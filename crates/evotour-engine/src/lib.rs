//! Genetic-algorithm engine for the symmetric traveling salesman problem.
//!
//! The engine evolves populations of candidate tours over a fixed distance
//! matrix using tournament selection, order crossover (OX), swap mutation,
//! and elitism. It is purely in-process: callers supply a [`DistanceMatrix`]
//! and a [`GaConfig`], thread a random source through the run, and receive a
//! [`GaResult`] with the best tour and per-generation convergence and
//! diversity traces.
//!
//! # Example
//!
//! ```
//! use evotour_engine::{DistanceMatrix, GaConfig, RunSeed};
//!
//! let matrix = DistanceMatrix::from_rows(vec![
//!     vec![0.0, 20.0, 42.0, 35.0, 10.0],
//!     vec![20.0, 0.0, 30.0, 34.0, 25.0],
//!     vec![42.0, 30.0, 0.0, 12.0, 42.0],
//!     vec![35.0, 34.0, 12.0, 0.0, 24.0],
//!     vec![10.0, 25.0, 42.0, 24.0, 0.0],
//! ])
//! .unwrap();
//!
//! let config = GaConfig::default();
//! let seed: RunSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
//! let result = evotour_engine::solve(&matrix, &config, &mut seed.rng()).unwrap();
//! assert!(result.best_length >= 96.0);
//! ```

pub use self::{ga::*, problem::*};

pub mod ga;
pub mod problem;
