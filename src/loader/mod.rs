use std::path::Path;

use crate::{
    data_types::activity::{RawActivity, Ride, RideTable},
    errors::{DashboardError, Result},
    logln, logvbln,
    util::time::Benchmark,
};

pub mod cache;

pub struct RideLoader {}

impl RideLoader {
    const CC: &'static str = "RideLoader";

    pub const REQUIRED_COLUMNS: [&'static str; 7] = [
        "Recorded On",
        "Activity Date",
        "Start Time",
        "Finish Time",
        "Distance",
        "Duration",
        "Max Speed",
    ];

    pub fn load(path: impl AsRef<Path>) -> Result<RideTable> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| DashboardError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse_file(path, &bytes)
    }

    /// Parses bytes already read from `path`, timing the parse and logging the row count.
    pub fn parse_file(path: &Path, bytes: &[u8]) -> Result<RideTable> {
        let _benchmark = Benchmark::start(Self::CC, format!("load {}", path.display()));
        let table = Self::parse(bytes)?;
        logln!("Loaded {} rides from {}", table.len(), path.display());

        Ok(table)
    }

    /// Parses an activity export. The same bytes always give the same table.
    pub fn parse(bytes: &[u8]) -> Result<RideTable> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(bytes);

        let headers = reader.headers().map_err(Self::csv_error)?.clone();
        let missing: Vec<&str> = Self::REQUIRED_COLUMNS
            .iter()
            .filter(|column| !headers.iter().any(|header| header == **column))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(DashboardError::data_format(
                Some(1),
                format!("missing required columns: {}", missing.join(", ")),
            ));
        }

        let mut rides = Vec::new();
        let mut record = csv::StringRecord::new();
        while reader.read_record(&mut record).map_err(Self::csv_error)? {
            let line = record.position().map(|position| position.line());
            let raw: RawActivity = record
                .deserialize(Some(&headers))
                .map_err(|err| DashboardError::data_format(line, err.to_string()))?;

            rides.push(Ride::from_raw(raw, line)?);
        }

        logvbln!("Parsed {} records", rides.len());

        Ok(RideTable::new(rides))
    }

    fn csv_error(err: csv::Error) -> DashboardError {
        let line = err.position().map(|position| position.line());

        DashboardError::data_format(line, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Recorded On,Activity Date,Start Time,Finish Time,Distance,Duration,Max Speed\n";

    fn csv(rows: &[&str]) -> Vec<u8> {
        let mut content = HEADER.to_string();
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        content.into_bytes()
    }

    #[test]
    fn parses_rows_in_file_order() {
        let bytes = csv(&[
            "2023-06-01 19:00,2023-06-01,08:00,09:00,20.0,3600,38.2",
            "2023-06-02 19:00,2023-06-02,10:00,10:30,10.0,1800,31.0",
        ]);
        let table = RideLoader::parse(&bytes).unwrap();

        assert_eq!(table.len(), 2);
        let first = &table.rides()[0];
        assert_eq!(first.distance, 20.0);
        assert_eq!(first.duration, 3600);
        assert_eq!(first.max_speed, 38.2);
        assert_eq!(first.ride_time, "01:00:00");
        assert_eq!(first.avg_speed, Some(20.0));
        assert_eq!(table.rides()[1].month, "Jun");
    }

    #[test]
    fn ignores_extra_columns_and_whitespace() {
        let bytes = b"Recorded On, Activity Date ,Start Time,Finish Time,Distance,Duration,Max Speed,Notes\n\
            x, 2022-12-31 ,a,b, 5.5 , 600 ,22.0,windy\n";
        let table = RideLoader::parse(bytes).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.rides()[0].year, 2022);
        assert_eq!(table.rides()[0].month_num, "12");
    }

    #[test]
    fn missing_column_is_data_format_error() {
        let bytes = b"Recorded On,Activity Date,Start Time,Finish Time,Distance,Duration\n\
            x,2023-01-01,a,b,1.0,60\n";
        match RideLoader::parse(bytes) {
            Err(DashboardError::DataFormat { message, .. }) => assert!(message.contains("Max Speed")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn unparsable_values_report_their_line() {
        let bytes = csv(&[
            "x,2023-01-01,a,b,1.0,60,10.0",
            "x,2023-01-02,a,b,abc,60,10.0",
        ]);
        match RideLoader::parse(&bytes) {
            Err(DashboardError::DataFormat { line, .. }) => assert_eq!(line, Some(3)),
            other => panic!("unexpected result: {other:?}"),
        }

        let bad_date = csv(&["x,01.02.2023,a,b,1.0,60,10.0"]);
        assert!(matches!(
            RideLoader::parse(&bad_date),
            Err(DashboardError::DataFormat { line: Some(2), .. })
        ));
    }

    #[test]
    fn header_only_file_is_empty_table() {
        let table = RideLoader::parse(HEADER.as_bytes()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn load_matches_parse_of_same_bytes() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let bytes = csv(&["x,2023-04-01,a,b,12.5,1500,30.0"]);
        std::fs::write(file.path(), &bytes).unwrap();

        let loaded = RideLoader::load(file.path()).unwrap();
        assert_eq!(loaded, RideLoader::parse(&bytes).unwrap());
        assert_eq!(loaded, RideLoader::parse_file(file.path(), &bytes).unwrap());

        assert!(matches!(
            RideLoader::load(file.path().with_extension("missing")),
            Err(DashboardError::Io { .. })
        ));
    }

    #[test]
    fn parsing_is_deterministic() {
        let bytes = csv(&[
            "x,2023-01-01,a,b,1.25,61,10.0",
            "x,2023-03-09,a,b,40.0,5000,52.5",
        ]);
        assert_eq!(RideLoader::parse(&bytes).unwrap(), RideLoader::parse(&bytes).unwrap());
    }
}
