//! Series records and their normalization
//!
//! Callers hand the adapters plain records (`{x, y}` for the ring chart,
//! `{yval}` for the sparkline). Normalization drops unusable records and
//! produces the display-shape copy the drawing code works from. Dropped
//! records are reported through `tracing` and counted, never raised.

use std::fmt;

use serde_json::Value;
use tracing::warn;

use crate::error::{ChartError, ChartResult};

/// Category label of a point
#[derive(Debug, Clone, PartialEq)]
pub enum Label {
    Text(String),
    Number(f64),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{}", number),
        }
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Label {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<f64> for Label {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

/// One ring chart record: category `x`, magnitude `y`
#[derive(Debug, Clone, PartialEq)]
pub struct RingDatum {
    pub x: Label,
    pub y: f64,
}

impl RingDatum {
    #[must_use]
    pub fn new(x: impl Into<Label>, y: f64) -> Self {
        Self { x: x.into(), y }
    }
}

/// One sparkline record; its x is its position in the series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkDatum {
    pub yval: f64,
}

impl SparkDatum {
    #[must_use]
    pub const fn new(yval: f64) -> Self {
        Self { yval }
    }
}

/// Records that survived normalization, and how many did not
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub points: Vec<T>,
    pub rejected: usize,
}

impl<T> Normalized<T> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn check_finite(index: usize, value: f64) -> ChartResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ChartError::MalformedEntry {
            index,
            reason: format!("value {} is not finite", value),
        })
    }
}

fn report(error: &ChartError) {
    warn!(%error, "dropping series entry");
}

/// Keep ring records with a finite `y`, in order
#[must_use]
pub fn normalize_ring(data: &[RingDatum]) -> Normalized<RingDatum> {
    let mut rejected = 0;
    let points = data
        .iter()
        .enumerate()
        .filter_map(|(index, datum)| match check_finite(index, datum.y) {
            Ok(_) => Some(datum.clone()),
            Err(error) => {
                report(&error);
                rejected += 1;
                None
            }
        })
        .collect();
    Normalized { points, rejected }
}

/// Assign each spark record its input position as x, dropping non-finite
/// values. Positions of dropped records are left as gaps.
#[must_use]
pub fn normalize_spark(data: &[SparkDatum]) -> Normalized<(usize, f64)> {
    let mut rejected = 0;
    let points = data
        .iter()
        .enumerate()
        .filter_map(|(index, datum)| match check_finite(index, datum.yval) {
            Ok(y) => Some((index, y)),
            Err(error) => {
                report(&error);
                rejected += 1;
                None
            }
        })
        .collect();
    Normalized { points, rejected }
}

fn records(value: &Value) -> ChartResult<&Vec<Value>> {
    value.as_array().ok_or_else(|| {
        let kind = match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        };
        ChartError::NotASequence(kind.to_string())
    })
}

fn numeric_field(index: usize, record: &Value, field: &str) -> ChartResult<f64> {
    let raw = record.get(field).ok_or_else(|| ChartError::MalformedEntry {
        index,
        reason: format!("missing `{}`", field),
    })?;
    let number = raw.as_f64().ok_or_else(|| ChartError::MalformedEntry {
        index,
        reason: format!("`{}` is not numeric", field),
    })?;
    check_finite(index, number)
}

fn ring_record(index: usize, record: &Value) -> ChartResult<RingDatum> {
    let x = match record.get("x") {
        Some(Value::String(text)) => Label::Text(text.clone()),
        Some(Value::Number(number)) => Label::Number(number.as_f64().unwrap_or_default()),
        Some(_) => {
            return Err(ChartError::MalformedEntry {
                index,
                reason: "`x` must be a string or number".to_string(),
            })
        }
        None => {
            return Err(ChartError::MalformedEntry {
                index,
                reason: "missing `x`".to_string(),
            })
        }
    };
    let y = numeric_field(index, record, "y")?;
    Ok(RingDatum { x, y })
}

/// Read `[{ "x": .., "y": .. }, ..]`, skipping malformed records
pub fn parse_ring_records(value: &Value) -> ChartResult<Normalized<RingDatum>> {
    let mut rejected = 0;
    let mut points = Vec::new();
    for (index, record) in records(value)?.iter().enumerate() {
        match ring_record(index, record) {
            Ok(datum) => points.push(datum),
            Err(error) => {
                report(&error);
                rejected += 1;
            }
        }
    }
    Ok(Normalized { points, rejected })
}

/// Read `[{ "yval": .. }, ..]` or a bare `[n, ..]`, skipping malformed
/// records.
///
/// A skipped record still occupies its position, so the records after it
/// keep their x. The gap is filled with `NaN`, which `normalize_spark` drops.
pub fn parse_spark_records(value: &Value) -> ChartResult<Normalized<SparkDatum>> {
    let mut rejected = 0;
    let mut points = Vec::new();
    for (index, record) in records(value)?.iter().enumerate() {
        let parsed = match record {
            Value::Number(number) => number
                .as_f64()
                .ok_or_else(|| ChartError::MalformedEntry {
                    index,
                    reason: "number out of range".to_string(),
                })
                .and_then(|n| check_finite(index, n)),
            _ => numeric_field(index, record, "yval"),
        };
        match parsed {
            Ok(yval) => points.push(SparkDatum { yval }),
            Err(error) => {
                report(&error);
                rejected += 1;
                points.push(SparkDatum { yval: f64::NAN });
            }
        }
    }
    Ok(Normalized { points, rejected })
}
