use std::collections::BTreeSet;

use crate::{
    data_types::{activity::Ride, summary::SummaryMetrics},
    util::{DateTimeUtils, NumberUtils},
};

pub struct Metrics {}

impl Metrics {
    pub const DISTANCE_SIGNIFICANT_DIGITS: usize = 5;

    /// Totals for any subset of rides.
    pub fn summarize<'a>(rides: impl IntoIterator<Item = &'a Ride>) -> SummaryMetrics {
        let mut total_distance_km = 0.0;
        let mut total_duration_sec = 0;
        let mut rides_count = 0;
        let mut dates = BTreeSet::new();

        for ride in rides {
            total_distance_km += ride.distance;
            total_duration_sec += ride.duration;
            rides_count += 1;
            dates.insert(ride.activity_date);
        }

        SummaryMetrics {
            total_distance_km,
            total_distance: NumberUtils::significant(
                total_distance_km,
                Self::DISTANCE_SIGNIFICANT_DIGITS,
            ),
            total_duration_sec,
            total_time: DateTimeUtils::format_hms(total_duration_sec),
            rides: rides_count,
            active_days: dates.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::activity::fixtures::table;

    #[test]
    fn two_ride_example() {
        let table = table(&[("2023-06-01", 20.0, 3600), ("2023-06-02", 10.0, 1800)]);
        let metrics = Metrics::summarize(table.iter());

        assert!((metrics.total_distance_km - 30.0).abs() < 1e-9);
        assert_eq!(metrics.total_distance, "30");
        assert_eq!(metrics.total_time, "01:30:00");
        assert_eq!(metrics.rides, 2);
        assert_eq!(metrics.active_days, 2);
        assert_eq!(
            metrics.to_string(),
            "Total Distance: 30 km | Total Time: 01:30:00 | Number of rides: 2 | Active days: 2"
        );
    }

    #[test]
    fn same_day_rides_count_once() {
        let table = table(&[
            ("2023-06-01", 1234.5, 40_000),
            ("2023-06-01", 100.07, 3_000),
            ("2023-06-03", 0.5, 61),
        ]);
        let metrics = Metrics::summarize(table.iter());

        assert_eq!(metrics.rides, 3);
        assert_eq!(metrics.active_days, 2);
        assert_eq!(metrics.total_distance, "1335.1");
        assert_eq!(metrics.total_time, "11:57:41");
    }

    #[test]
    fn empty_subset() {
        let metrics = Metrics::summarize(std::iter::empty());
        assert_eq!(metrics.total_distance, "0");
        assert_eq!(metrics.total_time, "00:00:00");
        assert_eq!(metrics.rides, 0);
        assert_eq!(metrics.active_days, 0);
    }
}
