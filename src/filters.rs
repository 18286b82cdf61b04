//! Filter registry: derive the selectable filter values from a dataset's
//! breakdown key or from the tagging column of its flat rows.

use crate::dataset::{DataShape, DatasetDocument, Row};
use crate::series::GLOBAL_FILTER;

/// Columns probed on flat data, in priority order.
const FILTERABLE_FIELDS: [&str; 4] = ["segment", "region", "continent", "country"];

/// The filterable column of a dataset and its selectable values.
///
/// `values` is empty when the dataset supports no filtering; otherwise
/// `"global"` is always the first entry and the rest are deduplicated and
/// sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub field: Option<String>,
    pub values: Vec<String>,
}

impl FilterSet {
    /// Whether a filter selection control should be shown at all.
    pub fn is_available(&self) -> bool {
        !self.values.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// Derive the filter set for a dataset. First match wins: an explicit
/// breakdown key beats column probing on flat rows.
pub fn derive_filters(doc: &DatasetDocument) -> FilterSet {
    match &doc.shape {
        DataShape::SummaryAndBreakdown { breakdown, key, .. } => FilterSet {
            field: Some(key.clone()),
            values: collect_values(breakdown, key),
        },
        DataShape::FlatData { data } => {
            let first = match data.first() {
                Some(row) => row,
                None => return FilterSet::default(),
            };
            for field in FILTERABLE_FIELDS {
                if first.tag(field).is_some() {
                    return FilterSet {
                        field: Some(field.to_string()),
                        values: collect_values(data, field),
                    };
                }
            }
            FilterSet::default()
        }
        DataShape::SummaryOnly { .. } => FilterSet::default(),
    }
}

/// `"global"` first, then the distinct tag values sorted ascending.
fn collect_values(rows: &[Row], field: &str) -> Vec<String> {
    let mut distinct: Vec<String> = rows
        .iter()
        .filter_map(|row| row.tag(field))
        .map(|s| s.to_string())
        .collect();
    distinct.sort();
    distinct.dedup();

    let mut values = Vec::with_capacity(distinct.len() + 1);
    values.push(GLOBAL_FILTER.to_string());
    values.extend(distinct);
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{DatasetDocument, DatasetFile};

    fn doc(json: &str) -> DatasetDocument {
        let file: DatasetFile = serde_json::from_str(json).unwrap();
        DatasetDocument::from_file(file).unwrap()
    }

    #[test]
    fn breakdown_key_wins() {
        let doc = doc(
            r#"{
                "metadata": {"breakdown_key": "continent"},
                "fields": [],
                "summary": [],
                "breakdown": [
                    {"year": 2000, "value": 1, "continent": "Europe"},
                    {"year": 2000, "value": 2, "continent": "Asia"},
                    {"year": 2001, "value": 3, "continent": "Europe"}
                ]
            }"#,
        );
        let filters = derive_filters(&doc);
        assert_eq!(filters.field.as_deref(), Some("continent"));
        assert_eq!(filters.values, vec!["global", "Asia", "Europe"]);
    }

    #[test]
    fn flat_data_probes_fields_in_priority_order() {
        // Both segment and region present: segment wins.
        let doc = doc(
            r#"{
                "metadata": {},
                "fields": [],
                "data": [
                    {"year": 2000, "value": 1, "segment": "Mobile", "region": "EU"},
                    {"year": 2000, "value": 2, "segment": "Desktop", "region": "US"}
                ]
            }"#,
        );
        let filters = derive_filters(&doc);
        assert_eq!(filters.field.as_deref(), Some("segment"));
        assert_eq!(filters.values, vec!["global", "Desktop", "Mobile"]);
    }

    #[test]
    fn global_is_first_and_values_deduplicated() {
        let doc = doc(
            r#"{
                "metadata": {},
                "fields": [],
                "data": [
                    {"year": 2000, "value": 1, "region": "Africa"},
                    {"year": 2001, "value": 2, "region": "Africa"},
                    {"year": 2000, "value": 3, "region": "Zambia"}
                ]
            }"#,
        );
        let filters = derive_filters(&doc);
        // "global" forced first even though it sorts after "Africa".
        assert_eq!(filters.values[0], "global");
        assert_eq!(filters.values, vec!["global", "Africa", "Zambia"]);
        let unique: std::collections::HashSet<_> = filters.values.iter().collect();
        assert_eq!(unique.len(), filters.values.len());
    }

    #[test]
    fn summary_only_has_no_filters() {
        let doc = doc(
            r#"{
                "metadata": {},
                "fields": [],
                "summary": [{"year": 2000, "value": 1}]
            }"#,
        );
        let filters = derive_filters(&doc);
        assert!(!filters.is_available());
        assert_eq!(filters.field, None);
        assert!(filters.values.is_empty());
    }

    #[test]
    fn untagged_flat_data_has_no_filters() {
        let doc = doc(
            r#"{
                "metadata": {},
                "fields": [],
                "data": [{"year": 2000, "value": 1}]
            }"#,
        );
        assert!(!derive_filters(&doc).is_available());
    }
}
