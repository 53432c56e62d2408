use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde_derive::Serialize;

use crate::util::DateTimeUtils;

use super::{activity::Ride, common::Year};

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MonthlySummaryRow {
    #[serde(rename = "MonthNum")]
    pub month_num: String,
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Distance")]
    pub distance: f64,
    #[serde(rename = "Rides")]
    pub rides: usize,
    #[serde(rename = "Avg Dist")]
    pub avg_dist: f64,
    pub max: f64,
}

/// A ride as listed in the longest-rides table.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TopRide {
    #[serde(rename = "Activity Date")]
    pub activity_date: NaiveDate,
    #[serde(rename = "Date")]
    pub date_label: String,
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

impl From<&Ride> for TopRide {
    fn from(ride: &Ride) -> Self {
        Self {
            activity_date: ride.activity_date,
            date_label: DateTimeUtils::display_date(ride.activity_date),
            start_time: ride.start_time.clone(),
            finish_time: ride.finish_time.clone(),
            distance: ride.distance,
            duration: ride.duration,
            max_speed: ride.max_speed,
            ride_time: ride.ride_time.clone(),
            year: ride.year,
            month_num: ride.month_num.clone(),
            month: ride.month.clone(),
            avg_speed: ride.avg_speed,
        }
    }
}

/// A ride as listed in the peak-speed table.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TopSpeedRide {
    #[serde(rename = "Activity Date")]
    pub activity_date: NaiveDate,
    #[serde(rename = "Date")]
    pub date_label: String,
    #[serde(rename = "Start Time")]
    pub start_time: String,
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

impl From<&Ride> for TopSpeedRide {
    fn from(ride: &Ride) -> Self {
        Self {
            activity_date: ride.activity_date,
            date_label: DateTimeUtils::display_date(ride.activity_date),
            start_time: ride.start_time.clone(),
            distance: ride.distance,
            duration: ride.duration,
            max_speed: ride.max_speed,
            ride_time: ride.ride_time.clone(),
            year: ride.year,
            month_num: ride.month_num.clone(),
            month: ride.month.clone(),
            avg_speed: ride.avg_speed,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DaySummary {
    #[serde(rename = "Activity Date")]
    pub activity_date: NaiveDate,
    pub sum: f64,
    pub count: usize,
    pub mean: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PivotRow {
    // Chronological sort key, not displayed. `None` on the totals row.
    #[serde(skip)]
    pub month_num: Option<u32>,
    #[serde(rename = "Month")]
    pub label: String,
    /// One cell per year, in the pivot's year order.
    pub values: Vec<f64>,
    #[serde(rename = "Total")]
    pub total: f64,
}

/// Total distance per month (rows) and year (columns).
#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct MonthlyPivot {
    pub years: Vec<Year>,
    pub rows: Vec<PivotRow>,
}

impl MonthlyPivot {
    pub const TOTAL_COLUMN: &'static str = "Total";
    pub const TOTAL_ROW: &'static str = "Yearly Totals";

    /// Column headers: each year followed by the totals column.
    pub fn columns(&self) -> Vec<String> {
        self.years
            .iter()
            .map(|year| year.to_string())
            .chain(std::iter::once(Self::TOTAL_COLUMN.to_string()))
            .collect()
    }

    pub fn month_rows(&self) -> &[PivotRow] {
        match self.rows.split_last() {
            Some((_, months)) => months,
            None => &[],
        }
    }

    pub fn yearly_totals(&self) -> Option<&PivotRow> {
        self.rows.last().filter(|row| row.month_num.is_none())
    }

    pub fn cell(&self, label: &str, year: Year) -> Option<f64> {
        let column = self.years.iter().position(|y| *y == year)?;
        let row = self.rows.iter().find(|row| row.label == label)?;

        row.values.get(column).copied()
    }

    pub fn total_for_year(&self, year: Year) -> Option<f64> {
        self.cell(Self::TOTAL_ROW, year)
    }

    pub fn grand_total(&self) -> f64 {
        self.yearly_totals().map_or(0.0, |row| row.total)
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Default)]
pub struct SummaryMetrics {
    pub total_distance_km: f64,
    /// Total distance to 5 significant figures.
    pub total_distance: String,
    pub total_duration_sec: u64,
    pub total_time: String,
    pub rides: usize,
    pub active_days: usize,
}

impl fmt::Display for SummaryMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total Distance: {} km | Total Time: {} | Number of rides: {} | Active days: {}",
            self.total_distance, self.total_time, self.rides, self.active_days
        )
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RecentRide {
    #[serde(rename = "Activity Date")]
    pub activity_date: NaiveDate,
    #[serde(rename = "Date")]
    pub date_label: String,
    #[serde(rename = "Distance")]
    pub distance: f64,
    #[serde(rename = "Ride Time")]
    pub ride_time: String,
    #[serde(rename = "Avg Speed")]
    pub avg_speed: Option<f64>,
    #[serde(rename = "Duration")]
    pub duration: u64,
}

impl From<&Ride> for RecentRide {
    fn from(ride: &Ride) -> Self {
        Self {
            activity_date: ride.activity_date,
            date_label: DateTimeUtils::display_date(ride.activity_date),
            distance: ride.distance,
            ride_time: ride.ride_time.clone(),
            avg_speed: ride.avg_speed,
            duration: ride.duration,
        }
    }
}

/// Per-day totals; ride time and speed come from the summed distance and duration.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DayRollup {
    #[serde(rename = "Activity Date")]
    pub activity_date: NaiveDate,
    #[serde(rename = "Date")]
    pub date_label: String,
    #[serde(rename = "Distance")]
    pub distance: f64,
    #[serde(rename = "Duration")]
    pub duration: u64,
    #[serde(rename = "Ride Time")]
    pub ride_time: String,
    #[serde(rename = "Avg Speed")]
    pub avg_speed: Option<f64>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RecentActivity {
    pub window_start: NaiveDateTime,
    pub now: NaiveDateTime,
    pub metrics: SummaryMetrics,
    pub by_ride: Vec<RecentRide>,
    pub by_day: Vec<DayRollup>,
}

/// Every dashboard section computed for one set of selections.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Dashboard {
    pub years: Vec<Year>,
    pub selected_year: Option<Year>,
    pub recent: RecentActivity,
    pub year_metrics: SummaryMetrics,
    pub monthly_summary: Vec<MonthlySummaryRow>,
    pub monthly_totals: MonthlyPivot,
    pub year_filter: String,
    pub longest_rides: Vec<TopRide>,
}
