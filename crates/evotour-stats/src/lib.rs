//! Statistical utilities for summarizing GA runs.
//!
//! Currently provides descriptive statistics, used to condense
//! per-generation convergence and diversity traces into a handful of
//! numbers.
//!
//! # Example
//!
//! ```
//! use evotour_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```

pub mod descriptive;
