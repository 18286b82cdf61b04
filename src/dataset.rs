//! Dataset document model and structural validation.
//!
//! A dataset JSON file carries its values in one of three shapes: a
//! pre-aggregated `summary`, a `summary` plus a per-category `breakdown`,
//! or flat `data` rows optionally tagged with a filterable field. The raw
//! file is deserialized as-is and then classified into [`DataShape`] so
//! downstream code matches on the shape instead of probing for fields.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

/// Per-dataset metadata block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub temporal_coverage: String,
    #[serde(default)]
    pub spatial_coverage: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub updated: String,
    /// Name of the categorical column the `breakdown` rows are split by.
    #[serde(default)]
    pub breakdown_key: Option<String>,
}

/// One entry of the dataset's field glossary.
#[derive(Debug, Clone, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
}

/// A single observation row.
///
/// `year` and `value` may be absent in malformed rows; everything else the
/// row carries (region, segment, the breakdown column, ...) lands in `tags`.
/// `value: Some(0.0)` is real data and must never be treated as missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(flatten)]
    pub tags: BTreeMap<String, Value>,
}

impl Row {
    /// Look up a tag value as a string, if present and non-empty.
    pub fn tag(&self, key: &str) -> Option<&str> {
        match self.tags.get(key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Raw dataset file exactly as stored on the CDN.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetFile {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub fields: Option<Vec<Field>>,
    #[serde(default)]
    pub summary: Option<Vec<Row>>,
    #[serde(default)]
    pub breakdown: Option<Vec<Row>>,
    #[serde(default)]
    pub data: Option<Vec<Row>>,
}

/// Which of the three storage shapes a dataset uses.
#[derive(Debug, Clone)]
pub enum DataShape {
    /// Pre-aggregated global series only.
    SummaryOnly { summary: Vec<Row> },
    /// Global series plus rows split by `key`. `summary` may be empty when
    /// the file ships only a breakdown.
    SummaryAndBreakdown {
        summary: Vec<Row>,
        breakdown: Vec<Row>,
        key: String,
    },
    /// Flat observation rows, optionally tagged with a filterable column.
    FlatData { data: Vec<Row> },
}

/// Structural validation failure for a dataset file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    /// The file lacks the `fields` declaration.
    MissingFields,
    /// None of `summary`, `breakdown`, `data` is present.
    NoData,
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::MissingFields => {
                write!(f, "invalid dataset structure: missing \"fields\" declaration")
            }
            DatasetError::NoData => write!(f, "no data available in dataset"),
        }
    }
}

/// A validated dataset document.
#[derive(Debug, Clone)]
pub struct DatasetDocument {
    pub metadata: Metadata,
    pub fields: Vec<Field>,
    pub shape: DataShape,
}

impl DatasetDocument {
    /// Validate a raw file and classify its storage shape.
    ///
    /// Raised before any chart work is attempted, so a structurally broken
    /// file surfaces as a load error rather than an empty chart.
    pub fn from_file(file: DatasetFile) -> Result<Self, DatasetError> {
        let fields = file.fields.ok_or(DatasetError::MissingFields)?;

        let shape = match (file.summary, file.breakdown, file.data) {
            (summary, Some(breakdown), _) if file.metadata.breakdown_key.is_some() => {
                let key = file.metadata.breakdown_key.clone().unwrap_or_default();
                DataShape::SummaryAndBreakdown {
                    summary: summary.unwrap_or_default(),
                    breakdown,
                    key,
                }
            }
            (Some(summary), _, _) => DataShape::SummaryOnly { summary },
            (None, _, Some(data)) => DataShape::FlatData { data },
            // A breakdown without its key is unusable but still data: the
            // document loads with an empty global series and no filters.
            (None, Some(_), None) => DataShape::SummaryOnly { summary: Vec::new() },
            (None, None, None) => return Err(DatasetError::NoData),
        };

        Ok(DatasetDocument {
            metadata: file.metadata,
            fields,
            shape,
        })
    }

    /// Human-readable label for the value column: the first declared field
    /// that is not a year or geography column, preferring its description.
    pub fn value_field_label(&self) -> String {
        const SKIP: [&str; 5] = ["year", "country_code", "country_name", "region", "continent"];
        self.fields
            .iter()
            .find(|f| !SKIP.contains(&f.name.as_str()))
            .map(|f| {
                if f.description.is_empty() {
                    f.name.clone()
                } else {
                    f.description.clone()
                }
            })
            .unwrap_or_else(|| "Value".to_string())
    }
}
