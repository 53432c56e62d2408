use std::collections::BTreeMap;

use crate::{
    data_types::{activity::RideTable, common::Year, summary::MonthlySummaryRow},
    logvbln,
    util::DateTimeUtils,
};

use super::DistanceStats;

pub struct MonthlyStatistics {}

impl MonthlyStatistics {
    const CC: &'static str = "MonthlyStatistics";

    /// One row per month of `year` that has rides, in month order. Months without
    /// rides are left out, and a year without rides gives an empty vec.
    pub fn summary_by_year(table: &RideTable, year: Year) -> Vec<MonthlySummaryRow> {
        let mut months: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        table
            .iter()
            .filter(|ride| ride.year == year)
            .for_each(|ride| months.entry(ride.month_number()).or_default().push(ride.distance));

        logvbln!("{} months with rides in {}", months.len(), year);

        months
            .into_iter()
            .filter_map(|(month, distances)| {
                let stats = DistanceStats::of(&distances)?;

                Some(MonthlySummaryRow {
                    month_num: format!("{:02}", month),
                    month: DateTimeUtils::month_abbrev(month).unwrap_or_default().to_string(),
                    distance: stats.sum,
                    rides: stats.count,
                    avg_dist: stats.mean,
                    max: stats.max,
                })
            })
            .collect()
    }
}
