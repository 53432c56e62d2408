use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::data_types::{
    activity::{Ride, RideTable},
    common::TopN,
    summary::{DaySummary, TopRide, TopSpeedRide},
};

use super::DistanceStats;

pub struct Rankings {}

impl Rankings {
    /// The `n` longest rides. Equal distances keep table order.
    pub fn longest_rides(table: &RideTable, n: TopN) -> Vec<TopRide> {
        Self::top_by(table, n, |ride| ride.distance)
            .into_iter()
            .map(TopRide::from)
            .collect()
    }

    /// The `n` rides with the highest peak speed. Equal speeds keep table order.
    pub fn fastest_rides(table: &RideTable, n: TopN) -> Vec<TopSpeedRide> {
        Self::top_by(table, n, |ride| ride.max_speed)
            .into_iter()
            .map(TopSpeedRide::from)
            .collect()
    }

    /// The `n` dates with the most total distance. Equal totals keep date order.
    pub fn busiest_days(table: &RideTable, n: TopN) -> Vec<DaySummary> {
        let mut days: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
        table
            .iter()
            .for_each(|ride| days.entry(ride.activity_date).or_default().push(ride.distance));

        let mut summaries: Vec<DaySummary> = days
            .into_iter()
            .filter_map(|(activity_date, distances)| {
                let stats = DistanceStats::of(&distances)?;

                Some(DaySummary {
                    activity_date,
                    sum: stats.sum,
                    count: stats.count,
                    mean: stats.mean,
                })
            })
            .collect();

        summaries.sort_by(|a, b| b.sum.total_cmp(&a.sum));
        summaries.truncate(n.get());

        summaries
    }

    fn top_by(table: &RideTable, n: TopN, key: impl Fn(&Ride) -> f64) -> Vec<&Ride> {
        let mut ranked: Vec<&Ride> = table.iter().collect();
        // sort_by is stable, so ties stay in table order
        ranked.sort_by(|a, b| key(b).total_cmp(&key(a)));
        ranked.truncate(n.get());

        ranked
    }
}
