//! The problem model: distance data, candidate tours, and tour evaluation.
//!
//! - [`DistanceMatrix`] - immutable pairwise travel costs between cities
//! - [`Route`] - a candidate tour over every city except the fixed city `0`
//! - [`Fitness`] - a route's evaluated quality, with invalid routes ranked
//!   worst instead of rejected

pub use self::{distance::*, route::*};

pub(crate) mod distance;
pub(crate) mod route;
