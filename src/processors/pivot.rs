use std::collections::BTreeMap;

use crate::{
    data_types::{
        activity::RideTable,
        summary::{MonthlyPivot, PivotRow},
    },
    logvbln,
    util::DateTimeUtils,
};

pub struct PivotBuilder {}

impl PivotBuilder {
    const CC: &'static str = "PivotBuilder";

    /// Total distance per month and year. Months run January to December (only months
    /// with at least one ride), years ascending, empty cells are zero. Each row ends
    /// with its total across years and the last row holds the yearly totals.
    pub fn monthly_totals(table: &RideTable) -> MonthlyPivot {
        let years = table.years();

        // keyed by month number so rows come out chronologically
        let mut cells: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for ride in table.iter() {
            if let Ok(column) = years.binary_search(&ride.year) {
                let row = cells
                    .entry(ride.month_number())
                    .or_insert_with(|| vec![0.0; years.len()]);
                row[column] += ride.distance;
            }
        }

        let mut yearly = vec![0.0; years.len()];
        let mut rows: Vec<PivotRow> = Vec::with_capacity(cells.len() + 1);
        for (month, values) in cells {
            yearly
                .iter_mut()
                .zip(&values)
                .for_each(|(total, value)| *total += value);

            rows.push(PivotRow {
                month_num: Some(month),
                label: DateTimeUtils::month_abbrev(month).unwrap_or_default().to_string(),
                total: values.iter().sum(),
                values,
            });
        }

        rows.push(PivotRow {
            month_num: None,
            label: MonthlyPivot::TOTAL_ROW.to_string(),
            total: yearly.iter().sum(),
            values: yearly,
        });

        logvbln!("Pivot with {} years and {} months", years.len(), rows.len() - 1);

        MonthlyPivot { years, rows }
    }
}
