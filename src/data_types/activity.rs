use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde_derive::{Deserialize, Serialize};

use crate::{
    errors::{DashboardError, Result},
    util::{DateTimeUtils, NumberUtils},
};

use super::common::{Year, YearFilter};

/// One row of the activity export, as read from the file.
#[derive(Debug, Deserialize, Clone)]
pub struct RawActivity {
    #[serde(rename = "Recorded On")]
    pub recorded_on: String,
    #[serde(rename = "Activity Date")]
    pub activity_date: String,
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "Finish Time")]
    pub finish_time: String,
    #[serde(rename = "Distance")]
    pub distance: f64,
    #[serde(rename = "Duration")]
    pub duration: u64,
    #[serde(rename = "Max Speed")]
    pub max_speed: f64,
}

/// A normalized ride with its derived columns.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Ride {
    #[serde(rename = "Recorded On")]
    pub recorded_on: String,
    #[serde(rename = "Activity Date")]
    pub activity_date: NaiveDate,
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "Finish Time")]
    pub finish_time: String,
    #[serde(rename = "Distance")]
    pub distance: f64,
    #[serde(rename = "Duration")]
    pub duration: u64,
    #[serde(rename = "Max Speed")]
    pub max_speed: f64,

    #[serde(rename = "Ride Time")]
    pub ride_time: String,
    #[serde(rename = "Year")]
    pub year: Year,
    #[serde(rename = "MonthNum")]
    pub month_num: String,
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Avg Speed")]
    pub avg_speed: Option<f64>,
}

impl Ride {
    /// Average speed in km/h rounded to 2 decimals, `None` for zero-duration rides.
    pub fn average_speed(distance: f64, duration: u64) -> Option<f64> {
        if duration == 0 {
            return None;
        }

        Some(NumberUtils::round_to(distance / duration as f64 * 3600.0, 2))
    }

    pub fn from_raw(raw: RawActivity, line: Option<u64>) -> Result<Self> {
        let activity_date = DateTimeUtils::parse_activity_date(&raw.activity_date).ok_or_else(|| {
            DashboardError::data_format(
                line,
                format!("Activity Date '{}' is not YYYY-MM-DD", raw.activity_date),
            )
        })?;

        for (column, value) in [("Distance", raw.distance), ("Max Speed", raw.max_speed)] {
            if !value.is_finite() || value < 0.0 {
                return Err(DashboardError::data_format(
                    line,
                    format!("{column} must be a non-negative number, got {value}"),
                ));
            }
        }

        Ok(Self {
            ride_time: DateTimeUtils::format_hms(raw.duration),
            year: activity_date.year(),
            month_num: activity_date.format("%m").to_string(),
            month: activity_date.format("%b").to_string(),
            avg_speed: Ride::average_speed(raw.distance, raw.duration),
            recorded_on: raw.recorded_on,
            activity_date,
            start_time: raw.start_time,
            finish_time: raw.finish_time,
            distance: raw.distance,
            duration: raw.duration,
            max_speed: raw.max_speed,
        })
    }

    pub fn month_number(&self) -> u32 {
        self.activity_date.month()
    }
}

/// The loaded export, in file order. Never mutated after load.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RideTable {
    rides: Vec<Ride>,
}

impl RideTable {
    pub fn new(rides: Vec<Ride>) -> Self {
        Self { rides }
    }

    pub fn rides(&self) -> &[Ride] {
        &self.rides
    }

    pub fn len(&self) -> usize {
        self.rides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rides.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ride> {
        self.rides.iter()
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<Year> {
        self.rides
            .iter()
            .map(|ride| ride.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn latest_year(&self) -> Option<Year> {
        self.rides.iter().map(|ride| ride.year).max()
    }

    pub fn filter_year(&self, filter: YearFilter) -> RideTable {
        RideTable::new(
            self.rides
                .iter()
                .filter(|ride| filter.matches(ride.year))
                .cloned()
                .collect(),
        )
    }
}

impl FromIterator<Ride> for RideTable {
    fn from_iter<T: IntoIterator<Item = Ride>>(iter: T) -> Self {
        RideTable::new(iter.into_iter().collect())
    }
}
