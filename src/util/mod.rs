use chrono::{Month, NaiveDate};

pub mod config;
pub mod logging;
pub(crate) mod time;

pub struct DateTimeUtils {}

impl DateTimeUtils {
    pub const ACTIVITY_DATE_FORMAT: &'static str = "%Y-%m-%d";

    /// `HH:MM:SS` with zero-padded fields. Hours keep counting past 24.
    pub fn format_hms(seconds: u64) -> String {
        let hrs = seconds / 3600;
        let mins = (seconds % 3600) / 60;
        let secs = seconds % 60;

        format!("{:02}:{:02}:{:02}", hrs, mins, secs)
    }

    pub fn parse_activity_date(value: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(value.trim(), Self::ACTIVITY_DATE_FORMAT).ok()
    }

    /// Three-letter month name for a 1-based month number.
    pub fn month_abbrev(month: u32) -> Option<&'static str> {
        let month = Month::try_from(u8::try_from(month).ok()?).ok()?;

        month.name().get(..3)
    }

    /// Label used in ride tables, e.g. `Jun 01, 2023`.
    pub fn display_date(date: NaiveDate) -> String {
        date.format("%b %d, %Y").to_string()
    }
}

pub struct NumberUtils {}

impl NumberUtils {
    /// Rounds to `places` decimals, halves going to the even neighbour.
    pub fn round_to(value: f64, places: i32) -> f64 {
        let factor = 10f64.powi(places);

        (value * factor).round_ties_even() / factor
    }

    /// Formats like printf `%.<digits>g`: significant digits, trailing zeros dropped,
    /// scientific notation for very large or very small magnitudes.
    pub fn significant(value: f64, digits: usize) -> String {
        if value == 0.0 {
            return "0".to_string();
        }
        if !value.is_finite() {
            return value.to_string();
        }

        let digits = digits.max(1);
        let scientific = format!("{:.*e}", digits - 1, value);
        let Some((mantissa, exponent)) = scientific
            .split_once('e')
            .and_then(|(m, e)| e.parse::<i32>().ok().map(|e| (m.to_string(), e)))
        else {
            return scientific;
        };

        if exponent < -4 || exponent >= digits as i32 {
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", Self::strip_zeros(&mantissa), sign, exponent.abs())
        } else {
            let decimals = (digits as i32 - 1 - exponent) as usize;
            Self::strip_zeros(&format!("{:.*}", decimals, value))
        }
    }

    fn strip_zeros(value: &str) -> String {
        if value.contains('.') {
            value.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            value.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hms_is_zero_padded() {
        assert_eq!(DateTimeUtils::format_hms(0), "00:00:00");
        assert_eq!(DateTimeUtils::format_hms(5400), "01:30:00");
        assert_eq!(DateTimeUtils::format_hms(3661), "01:01:01");
        assert_eq!(DateTimeUtils::format_hms(90_061), "25:01:01");
    }

    #[test]
    fn month_names() {
        assert_eq!(DateTimeUtils::month_abbrev(1), Some("Jan"));
        assert_eq!(DateTimeUtils::month_abbrev(6), Some("Jun"));
        assert_eq!(DateTimeUtils::month_abbrev(12), Some("Dec"));
        assert_eq!(DateTimeUtils::month_abbrev(0), None);
        assert_eq!(DateTimeUtils::month_abbrev(13), None);
    }

    #[test]
    fn activity_dates() {
        let date = DateTimeUtils::parse_activity_date("2023-06-01").unwrap();
        assert_eq!(DateTimeUtils::display_date(date), "Jun 01, 2023");
        assert!(DateTimeUtils::parse_activity_date("01/06/2023").is_none());
    }

    #[test]
    fn rounding_uses_even_halves() {
        assert_eq!(NumberUtils::round_to(20.0, 2), 20.0);
        assert_eq!(NumberUtils::round_to(12.3456, 2), 12.35);
        assert_eq!(NumberUtils::round_to(0.125, 2), 0.12);
        assert_eq!(NumberUtils::round_to(1.0005, 3), 1.0);
    }

    #[test]
    fn significant_matches_g_format() {
        assert_eq!(NumberUtils::significant(30.0, 5), "30");
        assert_eq!(NumberUtils::significant(1234.567, 5), "1234.6");
        assert_eq!(NumberUtils::significant(12345.678, 5), "12346");
        assert_eq!(NumberUtils::significant(123456.7, 5), "1.2346e+05");
        assert_eq!(NumberUtils::significant(0.000_123_4, 5), "0.0001234");
        assert_eq!(NumberUtils::significant(0.0, 5), "0");
    }
}
