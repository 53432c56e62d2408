use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::{
    data_types::{
        activity::{Ride, RideTable},
        summary::{DayRollup, RecentActivity, RecentRide},
    },
    logvbln,
    util::DateTimeUtils,
};

use super::Metrics;

/// Trailing window of recent rides. The result depends on the `now` passed in, so the
/// same table gives a different view as time moves on.
pub struct RecentWindow {}

impl RecentWindow {
    const CC: &'static str = "RecentWindow";

    pub const DEFAULT_WEEKS: u32 = 4;

    pub fn last_4_weeks(table: &RideTable, now: NaiveDateTime) -> RecentActivity {
        Self::last_weeks(table, now, Self::DEFAULT_WEEKS)
    }

    pub fn last_weeks(table: &RideTable, now: NaiveDateTime, weeks: u32) -> RecentActivity {
        // Clamped to the earliest representable instant instead of overflowing.
        let window_start = Duration::try_weeks(i64::from(weeks))
            .and_then(|span| now.checked_sub_signed(span))
            .unwrap_or(NaiveDateTime::MIN);
        let rides: Vec<&Ride> = table
            .iter()
            .filter(|ride| Self::in_window(ride.activity_date, window_start, now))
            .collect();

        logvbln!("{} rides since {}", rides.len(), window_start);

        RecentActivity {
            window_start,
            now,
            metrics: Metrics::summarize(rides.iter().copied()),
            by_ride: rides.iter().map(|ride| RecentRide::from(*ride)).collect(),
            by_day: Self::by_day(&rides),
        }
    }

    /// A ride counts from midnight of its date; the window is inclusive at both ends.
    pub fn in_window(date: NaiveDate, window_start: NaiveDateTime, now: NaiveDateTime) -> bool {
        let at = date.and_time(NaiveTime::MIN);

        at >= window_start && at <= now
    }

    // Speed and ride time come from the day's sums, not from the per-ride values.
    fn by_day(rides: &[&Ride]) -> Vec<DayRollup> {
        let mut days: BTreeMap<NaiveDate, (f64, u64)> = BTreeMap::new();
        for ride in rides {
            let day = days.entry(ride.activity_date).or_insert((0.0, 0));
            day.0 += ride.distance;
            day.1 += ride.duration;
        }

        days.into_iter()
            .map(|(activity_date, (distance, duration))| DayRollup {
                activity_date,
                date_label: DateTimeUtils::display_date(activity_date),
                distance,
                duration,
                ride_time: DateTimeUtils::format_hms(duration),
                avg_speed: Ride::average_speed(distance, duration),
            })
            .collect()
    }
}
