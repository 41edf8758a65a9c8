//! Statistics over simulation outcomes and dataset features.
//!
//! - [`descriptive`]: min, max, mean, median, variance and standard deviation
//! - [`percentiles`]: nearest-rank percentiles at chosen points
//!
//! # Examples
//!
//! ```
//! use aifield_stats::{descriptive::DescriptiveStats, percentiles::Percentiles};
//!
//! let accuracies = [0.62, 0.71, 0.68, 0.75, 0.66];
//! let stats = DescriptiveStats::new(accuracies).unwrap();
//! assert_eq!(stats.count, 5);
//! assert_eq!(stats.median, 0.68);
//!
//! let percentiles = Percentiles::new(&accuracies, &[50.0, 90.0]);
//! assert_eq!(percentiles.get(90.0), Some(0.75));
//! ```

pub mod descriptive;
pub mod percentiles;
