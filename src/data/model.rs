use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors raised while building a dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("dataset contains no launch records")]
    Empty,
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("row {row}: payload mass {value} kg is not a finite non-negative number")]
    InvalidPayload { row: usize, value: f64 },
    #[error("row {row}: class must be 0 or 1, got {value}")]
    InvalidClass { row: usize, value: f64 },
}

// ---------------------------------------------------------------------------
// OutcomeClass – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch result as stored in the `class` column: 1 = success, 0 = failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutcomeClass {
    Failure,
    Success,
}

impl OutcomeClass {
    /// Interpret a numeric cell. Integral floats (`1.0`) are accepted.
    pub fn from_value(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(OutcomeClass::Failure)
        } else if value == 1.0 {
            Some(OutcomeClass::Success)
        } else {
            None
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            OutcomeClass::Failure => 0.0,
            OutcomeClass::Success => 1.0,
        }
    }

    /// Pie-chart label for this outcome.
    pub fn label(self) -> &'static str {
        match self {
            OutcomeClass::Failure => "Failed",
            OutcomeClass::Success => "Success",
        }
    }
}

impl fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// Serialized as the raw 0/1 value, like the source column.
impl Serialize for OutcomeClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(match self {
            OutcomeClass::Failure => 0,
            OutcomeClass::Success => 1,
        })
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the CSV
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    pub site: String,
    pub payload_kg: f64,
    pub booster_category: String,
    pub outcome: OutcomeClass,
}

impl LaunchRecord {
    pub fn new(
        site: impl Into<String>,
        payload_kg: f64,
        booster_category: impl Into<String>,
        outcome: OutcomeClass,
    ) -> Self {
        Self {
            site: site.into(),
            payload_kg,
            booster_category: booster_category.into(),
            outcome,
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full, immutable set of launch records with pre-computed column summaries.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct site names in order of first appearance.
    sites: Vec<String>,
    /// Distinct booster categories in order of first appearance.
    booster_categories: Vec<String>,
    min_payload: f64,
    max_payload: f64,
}

impl LaunchDataset {
    /// Validate the records and build the column summaries.
    ///
    /// Rejects an empty table and any payload that is negative or not finite;
    /// `row` in the error is the 1-based position of the offending record.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories: Vec<String> = Vec::new();
        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;

        for (i, rec) in records.iter().enumerate() {
            if !rec.payload_kg.is_finite() || rec.payload_kg < 0.0 {
                return Err(DatasetError::InvalidPayload {
                    row: i + 1,
                    value: rec.payload_kg,
                });
            }
            min_payload = min_payload.min(rec.payload_kg);
            max_payload = max_payload.max(rec.payload_kg);

            if !sites.contains(&rec.site) {
                sites.push(rec.site.clone());
            }
            if !booster_categories.contains(&rec.booster_category) {
                booster_categories.push(rec.booster_category.clone());
            }
        }

        Ok(LaunchDataset {
            records,
            sites,
            booster_categories,
            min_payload,
            max_payload,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    /// `(min, max)` payload over the whole table, used to seed the slider.
    pub fn payload_bounds(&self) -> (f64, f64) {
        (self.min_payload, self.max_payload)
    }
}
