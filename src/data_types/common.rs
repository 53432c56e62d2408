use std::{fmt, str::FromStr};

use crate::errors::DashboardError;

pub type Year = i32;

/// Year selection used by ride tables and summary metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearFilter {
    #[default]
    All,
    Year(Year),
}

impl YearFilter {
    pub fn matches(&self, year: Year) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Year(selected) => *selected == year,
        }
    }
}

impl FromStr for YearFilter {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("all") {
            return Ok(YearFilter::All);
        }

        value
            .parse::<Year>()
            .map(YearFilter::Year)
            .map_err(|_| DashboardError::InvalidParameter(format!("unknown year filter '{value}'")))
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearFilter::All => write!(f, "All"),
            YearFilter::Year(year) => write!(f, "{year}"),
        }
    }
}

/// Row count for top-N queries. Zero is allowed and selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TopN(pub usize);

impl TopN {
    pub fn get(self) -> usize {
        self.0
    }
}

impl From<usize> for TopN {
    fn from(n: usize) -> Self {
        TopN(n)
    }
}

impl TryFrom<i64> for TopN {
    type Error = DashboardError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        usize::try_from(n)
            .map(TopN)
            .map_err(|_| DashboardError::InvalidParameter(format!("row count must not be negative, got {n}")))
    }
}

impl FromStr for TopN {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let n = value
            .trim()
            .parse::<i64>()
            .map_err(|_| DashboardError::InvalidParameter(format!("row count '{value}' is not a number")))?;

        TopN::try_from(n)
    }
}
