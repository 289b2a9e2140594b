//! The genetic algorithm: configuration, operators, and the generational loop.
//!
//! - [`GaConfig`] - immutable per-run parameters, validated before any
//!   generation runs
//! - [`RunSeed`] - seed for a fully reproducible run
//! - [`Population`] / [`Individual`] - candidate solutions and their cached
//!   fitness
//! - [`operators`] - tournament selection, order crossover, swap mutation
//! - [`Evolver`] - advances a population by one generation
//! - [`GaRun`] / [`solve`] - the generational loop, stepped or run to the
//!   budget in one call
//!
//! # Evolution cycle
//!
//! Each generation:
//!
//! 1. Evaluate the tour length of every individual
//! 2. Record the best length and the distinct-genotype count into the trace
//! 3. Carry the top individuals over unchanged (elitism)
//! 4. Breed the remainder: tournament-select two parents, recombine with
//!    order crossover, swap-mutate both children
//!
//! The loop runs for a fixed generation budget; there is no early-stopping
//! criterion. A driver that wants to stop early simply stops calling
//! [`GaRun::step`].

pub use self::{config::*, evolution::*, population::*, seed::*};

pub(crate) mod config;
pub(crate) mod evolution;
pub mod operators;
pub(crate) mod population;
pub(crate) mod seed;
