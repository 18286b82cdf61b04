//! Series normalization: one uniform (year, value) series out of any of the
//! three dataset storage shapes, for a given filter selection.

use std::collections::BTreeMap;

use crate::dataset::{DataShape, DatasetDocument, Row};

/// Sentinel filter value meaning "aggregate / unfiltered view".
pub const GLOBAL_FILTER: &str = "global";

/// One normalized chart point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub year: i64,
    pub value: f64,
}

/// Ordered (year, value) sequence driving the chart.
pub type Series = Vec<SeriesPoint>;

/// Normalize a dataset into a series for the active filter.
///
/// `filter_field` is the tagging column derived by the filter registry and
/// only matters for flat data with a specific filter selected. Absent or
/// malformed inputs yield an empty series, never an error; rows missing a
/// year or a value are dropped silently, but a value of `0.0` is kept.
pub fn compute_series(doc: &DatasetDocument, filter: &str, filter_field: Option<&str>) -> Series {
    if filter == GLOBAL_FILTER {
        match &doc.shape {
            DataShape::SummaryOnly { summary }
            | DataShape::SummaryAndBreakdown { summary, .. } => project(summary.iter()),
            DataShape::FlatData { data } => aggregate_by_year(data),
        }
    } else {
        match &doc.shape {
            DataShape::SummaryAndBreakdown { breakdown, key, .. } => {
                project(breakdown.iter().filter(|row| row.tag(key) == Some(filter)))
            }
            DataShape::FlatData { data } => match filter_field {
                Some(field) => {
                    project(data.iter().filter(|row| row.tag(field) == Some(filter)))
                }
                None => Series::new(),
            },
            DataShape::SummaryOnly { .. } => Series::new(),
        }
    }
}

/// Keep rows with both a year and a defined value, projected in order.
fn project<'a>(rows: impl Iterator<Item = &'a Row>) -> Series {
    rows.filter_map(|row| match (row.year, row.value) {
        (Some(year), Some(value)) => Some(SeriesPoint { year, value }),
        _ => None,
    })
    .collect()
}

/// Sum flat rows per year, ascending by year. Rows with no value contribute
/// zero but still create the year; rows with no year are dropped.
fn aggregate_by_year(rows: &[Row]) -> Series {
    let mut totals: BTreeMap<i64, f64> = BTreeMap::new();
    for row in rows {
        if let Some(year) = row.year {
            *totals.entry(year).or_insert(0.0) += row.value.unwrap_or(0.0);
        }
    }
    totals
        .into_iter()
        .map(|(year, value)| SeriesPoint { year, value })
        .collect()
}
