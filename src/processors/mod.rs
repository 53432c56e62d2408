//! Aggregations over a loaded [`RideTable`](crate::data_types::activity::RideTable).
//!
//! Every function here is a pure query: it borrows the table and returns a new result table.

use crate::util::NumberUtils;

pub mod metrics;
pub mod monthly;
pub mod pivot;
pub mod rankings;
pub mod recent;

pub use metrics::Metrics;
pub use monthly::MonthlyStatistics;
pub use pivot::PivotBuilder;
pub use rankings::Rankings;
pub use recent::RecentWindow;

/// Sum, count, mean, max of a distance group, each rounded to 3 decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DistanceStats {
    pub sum: f64,
    pub count: usize,
    pub mean: f64,
    pub max: f64,
}

impl DistanceStats {
    const DECIMALS: i32 = 3;

    /// `None` for an empty group.
    pub fn of(distances: &[f64]) -> Option<Self> {
        if distances.is_empty() {
            return None;
        }

        let sum: f64 = distances.iter().sum();
        let count = distances.len();
        let max = distances.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            sum: NumberUtils::round_to(sum, Self::DECIMALS),
            count,
            mean: NumberUtils::round_to(sum / count as f64, Self::DECIMALS),
            max: NumberUtils::round_to(max, Self::DECIMALS),
        })
    }
}
