//! Sparse dated records → dense date × time grid.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use serde_json::Value;

use super::dataset::{RawDataset, SourceValue};
use super::range::DateRange;

/// Rectangular snapshot: `matrix[date_index][time_index]`, `None` where no
/// numeric record exists. Rebuilt from scratch on every input change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DenseMatrix {
    pub dates: Vec<String>,
    pub times: Vec<String>,
    pub matrix: Vec<Vec<Option<SourceValue>>>,
}

impl DenseMatrix {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn cell(&self, date_index: usize, time_index: usize) -> Option<SourceValue> {
        self.matrix
            .get(date_index)
            .and_then(|row| row.get(time_index))
            .copied()
            .flatten()
    }

    pub fn non_null_count(&self) -> usize {
        self.matrix.iter().flatten().filter(|cell| cell.is_some()).count()
    }
}

/// Builds the grid for the dates `range` admits (all dates when `None` or
/// when both bounds are blank).
///
/// Columns are the sorted union of time labels over the admitted dates only.
/// When a date lists the same time twice the later record wins. Values that do
/// not coerce to a number become empty cells.
pub fn build(raw: &RawDataset, range: Option<&DateRange>) -> DenseMatrix {
    let window = range.filter(|range| range.is_bounded()).map(DateRange::window);

    let dates: Vec<&str> = raw
        .dates()
        .filter(|key| window.map_or(true, |window| window.admits(key)))
        .collect();

    let times: Vec<String> = dates
        .iter()
        .flat_map(|date| raw.records(date))
        .map(|record| record.time.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    let matrix = dates
        .iter()
        .map(|date| {
            let by_time: HashMap<&str, &Value> = raw
                .records(date)
                .iter()
                .map(|record| (record.time.as_str(), &record.source_value))
                .collect();
            times
                .iter()
                .map(|time| {
                    by_time
                        .get(time.as_str())
                        .and_then(|value| SourceValue::coerce(value))
                })
                .collect()
        })
        .collect();

    DenseMatrix {
        dates: dates.into_iter().map(str::to_string).collect(),
        times,
        matrix,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::Record;
    use serde_json::json;

    fn two_day_dataset() -> RawDataset {
        let mut raw = RawDataset::new();
        raw.push("2024-01-01", Record::new("09:00", 1));
        raw.push("2024-01-02", Record::new("09:00", 2));
        raw
    }

    fn values(matrix: &DenseMatrix) -> Vec<Vec<Option<f64>>> {
        matrix
            .matrix
            .iter()
            .map(|row| row.iter().map(|cell| cell.map(SourceValue::get)).collect())
            .collect()
    }

    #[test]
    fn builds_two_day_grid() {
        let matrix = build(&two_day_dataset(), None);
        assert_eq!(matrix.dates, vec!["2024-01-01", "2024-01-02"]);
        assert_eq!(matrix.times, vec!["09:00"]);
        assert_eq!(values(&matrix), vec![vec![Some(1.0)], vec![Some(2.0)]]);
    }

    #[test]
    fn start_bound_drops_earlier_dates() {
        let range = DateRange::starting("2024-01-02");
        let matrix = build(&two_day_dataset(), Some(&range));
        assert_eq!(matrix.dates, vec!["2024-01-02"]);
        assert_eq!(matrix.times, vec!["09:00"]);
        assert_eq!(values(&matrix), vec![vec![Some(2.0)]]);
    }

    #[test]
    fn end_bound_is_inclusive() {
        let range = DateRange::ending("2024-01-01");
        let matrix = build(&two_day_dataset(), Some(&range));
        assert_eq!(matrix.dates, vec!["2024-01-01"]);
    }

    #[test]
    fn empty_input_and_excluding_range_yield_empty_grid() {
        assert_eq!(build(&RawDataset::new(), None), DenseMatrix::default());

        let range = DateRange::starting("2030-01-01");
        assert_eq!(build(&two_day_dataset(), Some(&range)), DenseMatrix::default());
    }

    #[test]
    fn dates_sort_regardless_of_insertion_order() {
        let mut raw = RawDataset::new();
        raw.push("2024-03-01", Record::new("00:00", 1));
        raw.push("2024-01-15", Record::new("00:00", 1));
        raw.push("2024-02-10", Record::new("00:00", 1));
        let matrix = build(&raw, None);
        assert_eq!(matrix.dates, vec!["2024-01-15", "2024-02-10", "2024-03-01"]);
    }

    #[test]
    fn times_union_only_covers_admitted_dates() {
        let mut raw = two_day_dataset();
        raw.push("2024-01-01", Record::new("23:30", 5));
        raw.push("2024-01-02", Record::new("00:30", 3));

        let matrix = build(&raw, Some(&DateRange::starting("2024-01-02")));
        assert_eq!(matrix.times, vec!["00:30", "09:00"]);

        let matrix = build(&raw, None);
        assert_eq!(matrix.times, vec!["00:30", "09:00", "23:30"]);
        assert_eq!(
            values(&matrix),
            vec![
                vec![None, Some(1.0), Some(5.0)],
                vec![Some(3.0), Some(2.0), None],
            ]
        );
    }

    #[test]
    fn later_duplicate_time_wins() {
        let mut raw = RawDataset::new();
        raw.push("2024-01-01", Record::new("09:00", 1));
        raw.push("2024-01-01", Record::new("09:00", 4));
        assert_eq!(values(&build(&raw, None)), vec![vec![Some(4.0)]]);
    }

    #[test]
    fn malformed_values_become_empty_cells() {
        let mut raw = RawDataset::new();
        raw.push("2024-01-01", Record::new("01:00", json!(null)));
        raw.push("2024-01-01", Record::new("02:00", json!("oops")));
        raw.push("2024-01-01", Record::new("03:00", json!({ "nested": 1 })));
        raw.push("2024-01-01", Record::new("04:00", json!("6")));

        let matrix = build(&raw, None);
        assert_eq!(matrix.times.len(), 4);
        assert_eq!(values(&matrix), vec![vec![None, None, None, Some(6.0)]]);
        assert_eq!(matrix.non_null_count(), 1);
    }

    #[test]
    fn rows_are_always_full_width() {
        let mut raw = RawDataset::new();
        raw.push("2024-01-01", Record::new("01:00", 1));
        raw.push("2024-01-02", Record::new("02:00", 2));
        raw.push("2024-01-03", Record::new("03:00", 3));
        raw.insert("2024-01-04", Vec::new());

        let matrix = build(&raw, None);
        assert_eq!(matrix.matrix.len(), matrix.dates.len());
        assert!(matrix.matrix.iter().all(|row| row.len() == matrix.times.len()));
        assert_eq!(matrix.cell(3, 0), None);
        assert_eq!(matrix.cell(2, 2).map(SourceValue::get), Some(3.0));
    }
}
