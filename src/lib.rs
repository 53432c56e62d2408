use std::{path::Path, sync::Arc};

use chrono::{Local, NaiveDateTime};

use data_types::{
    activity::RideTable,
    common::{TopN, Year, YearFilter},
    summary::{
        DaySummary, Dashboard, MonthlyPivot, MonthlySummaryRow, RecentActivity, SummaryMetrics,
        TopRide, TopSpeedRide,
    },
};
use loader::cache::TableCache;
use processors::{Metrics, MonthlyStatistics, PivotBuilder, Rankings, RecentWindow};

pub use errors::{DashboardError, Result};
pub use util::config::DashboardConfig;

use crate::util::logging;

pub mod data_types;
pub mod errors;
pub mod loader;
pub mod processors;
pub mod util;

/// Answers dashboard queries against the configured activity export.
///
/// The table is parsed on first use and served from the cache until the file changes
/// or [`App::reload`] is called.
pub struct App {
    config: DashboardConfig,
    cache: TableCache,
}

impl App {
    const CC: &'static str = "App";

    pub fn new(config: DashboardConfig) -> Self {
        logging::set_global_level(config.log_level);

        Self {
            config,
            cache: TableCache::new(),
        }
    }

    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(DashboardConfig::from_file(path)?))
    }

    /// Uses `dashboard.toml` from the current directory.
    pub fn from_current_dir() -> Result<Self> {
        Ok(Self::new(DashboardConfig::from_current_dir()?))
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn table(&self) -> Result<Arc<RideTable>> {
        self.cache.get_or_load(&self.config.csv_path)
    }

    pub fn reload(&self) -> Result<Arc<RideTable>> {
        logln!("Reloading {}", self.config.csv_path.display());
        self.cache.invalidate(&self.config.csv_path);

        self.table()
    }

    pub fn years(&self) -> Result<Vec<Year>> {
        Ok(self.table()?.years())
    }

    pub fn monthly_summary(&self, year: Year) -> Result<Vec<MonthlySummaryRow>> {
        let table = self.table()?;

        Ok(MonthlyStatistics::summary_by_year(&table, year))
    }

    /// The latest year in the data, or `All` for an empty table.
    pub fn default_filter(&self) -> Result<YearFilter> {
        Ok(self
            .table()?
            .latest_year()
            .map_or(YearFilter::All, YearFilter::Year))
    }

    pub fn top_rides(&self, n: TopN, filter: YearFilter) -> Result<Vec<TopRide>> {
        let table = self.table()?;

        Ok(Rankings::longest_rides(&table.filter_year(filter), n))
    }

    pub fn top_speeds(&self, n: TopN) -> Result<Vec<TopSpeedRide>> {
        let table = self.table()?;

        Ok(Rankings::fastest_rides(&table, n))
    }

    pub fn top_days(&self, n: TopN) -> Result<Vec<DaySummary>> {
        let table = self.table()?;

        Ok(Rankings::busiest_days(&table, n))
    }

    pub fn monthly_totals(&self) -> Result<MonthlyPivot> {
        let table = self.table()?;

        Ok(PivotBuilder::monthly_totals(&table))
    }

    /// Recent rides relative to the local wall clock.
    pub fn recent_activity(&self) -> Result<RecentActivity> {
        self.recent_activity_at(Self::now())
    }

    pub fn recent_activity_at(&self, now: NaiveDateTime) -> Result<RecentActivity> {
        let table = self.table()?;

        Ok(RecentWindow::last_weeks(&table, now, self.config.window_weeks))
    }

    pub fn summary_metrics(&self, filter: YearFilter) -> Result<SummaryMetrics> {
        let table = self.table()?;

        Ok(Metrics::summarize(
            table.iter().filter(|ride| filter.matches(ride.year)),
        ))
    }

    /// All sections at once. `year` defaults to the latest year in the data, `n` to the
    /// configured row count and `filter` to the selected year.
    pub fn dashboard(
        &self,
        year: Option<Year>,
        n: Option<TopN>,
        filter: Option<YearFilter>,
    ) -> Result<Dashboard> {
        self.dashboard_at(Self::now(), year, n, filter)
    }

    pub fn dashboard_at(
        &self,
        now: NaiveDateTime,
        year: Option<Year>,
        n: Option<TopN>,
        filter: Option<YearFilter>,
    ) -> Result<Dashboard> {
        let table = self.table()?;
        let selected_year = year.or_else(|| table.latest_year());
        let filter = filter.unwrap_or(selected_year.map_or(YearFilter::All, YearFilter::Year));
        let n = n.unwrap_or(TopN(self.config.top_n));

        logvbln!(
            "Dashboard for year {:?}, top {} rides filtered by {}",
            selected_year,
            n.get(),
            filter
        );

        let (monthly_summary, year_metrics) = match selected_year {
            Some(year) => (
                MonthlyStatistics::summary_by_year(&table, year),
                Metrics::summarize(table.iter().filter(|ride| ride.year == year)),
            ),
            None => (Vec::new(), Metrics::summarize(std::iter::empty())),
        };

        Ok(Dashboard {
            years: table.years(),
            selected_year,
            recent: RecentWindow::last_weeks(&table, now, self.config.window_weeks),
            year_metrics,
            monthly_summary,
            monthly_totals: PivotBuilder::monthly_totals(&table),
            year_filter: filter.to_string(),
            longest_rides: Rankings::longest_rides(&table.filter_year(filter), n),
        })
    }

    fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }
}
