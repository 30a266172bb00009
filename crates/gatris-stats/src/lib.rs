//! Summary statistics for fitness values.
//!
//! - [`descriptive`]: min, max, mean, median and spread of a dataset
//!
//! # Example
//!
//! ```
//! use gatris_stats::descriptive::DescriptiveStats;
//!
//! let fitness = [12.0, 3.5, 40.0, 7.5];
//! let stats = DescriptiveStats::new(fitness).unwrap();
//! assert_eq!(stats.max, 40.0);
//! assert_eq!(stats.mean, 15.75);
//! ```

pub mod descriptive;
