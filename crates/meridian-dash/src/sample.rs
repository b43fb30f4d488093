//! Demo data shown on the dashboard page
//!
//! The series ship as JSON records and go through the same record parsers a
//! live feed would use, so a malformed record is skipped the same way.

use std::sync::Arc;

use meridian_charts::{parse_ring_records, parse_spark_records, ChartError, Color, RingDatum, SparkDatum};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

const SAMPLES_JSON: &str = include_str!("../data/samples.json");

/// Errors reading a sample file
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("Invalid sample file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sample `{id}`: {source}")]
    Series {
        id: String,
        #[source]
        source: ChartError,
    },
}

/// A ring chart card
#[derive(Debug, Clone)]
pub struct RingSample {
    pub id: String,
    pub title: String,
    pub data: Vec<RingDatum>,
}

/// A sparkline card
#[derive(Debug, Clone)]
pub struct SparkSample {
    pub id: String,
    pub title: String,
    pub data: Arc<[SparkDatum]>,
    pub stroke: Option<Color>,
}

/// Every card on the dashboard page
#[derive(Debug, Clone, Default)]
pub struct Samples {
    pub rings: Vec<RingSample>,
    pub sparks: Vec<SparkSample>,
}

#[derive(Deserialize)]
struct RawCard {
    id: String,
    title: String,
    #[serde(default)]
    stroke: Option<Color>,
    data: serde_json::Value,
}

#[derive(Deserialize)]
struct RawSamples {
    #[serde(default)]
    rings: Vec<RawCard>,
    #[serde(default)]
    sparks: Vec<RawCard>,
}

/// Parse a sample file
pub fn parse(json: &str) -> Result<Samples, SampleError> {
    let raw: RawSamples = serde_json::from_str(json)?;
    let series_error = |id: &str| {
        let id = id.to_string();
        move |source: ChartError| SampleError::Series { id, source }
    };

    let rings = raw
        .rings
        .into_iter()
        .map(|card| {
            let parsed = parse_ring_records(&card.data).map_err(series_error(&card.id))?;
            Ok(RingSample {
                id: card.id,
                title: card.title,
                data: parsed.points,
            })
        })
        .collect::<Result<_, SampleError>>()?;

    let sparks = raw
        .sparks
        .into_iter()
        .map(|card| {
            let parsed = parse_spark_records(&card.data).map_err(series_error(&card.id))?;
            Ok(SparkSample {
                id: card.id,
                title: card.title,
                data: parsed.points.into(),
                stroke: card.stroke,
            })
        })
        .collect::<Result<_, SampleError>>()?;

    Ok(Samples { rings, sparks })
}

/// The built-in demo cards; an empty page if they fail to parse
pub fn load() -> Samples {
    parse(SAMPLES_JSON).unwrap_or_else(|error| {
        warn!(%error, "demo data unavailable");
        Samples::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_samples_parse() {
        let samples = parse(SAMPLES_JSON).unwrap();
        assert_eq!(samples.rings.len(), 3);
        assert_eq!(samples.sparks.len(), 6);

        let traffic = &samples.rings[0];
        assert_eq!(traffic.id, "traffic-sources");
        assert_eq!(traffic.data.len(), 5);
        assert_eq!(traffic.data[0], RingDatum::new("Direct", 420.0));

        let memory = &samples.sparks[1];
        assert_eq!(memory.stroke, Some(Color::rgb(0x00, 0xC4, 0x9F)));
        assert_eq!(memory.data.len(), 10);
        assert_eq!(samples.sparks[5].data.len(), 1);
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let json = r#"{
            "rings": [{ "id": "r", "title": "R", "data": [{ "x": "A", "y": 1 }, { "x": "B" }, { "x": "C", "y": "3" }] }],
            "sparks": [{ "id": "s", "title": "S", "data": [1, { "yval": null }, 3] }]
        }"#;
        let samples = parse(json).unwrap();
        assert_eq!(samples.rings[0].data, vec![RingDatum::new("A", 1.0)]);

        let spark = &samples.sparks[0].data;
        assert_eq!(spark.len(), 3);
        assert!(spark[1].yval.is_nan());
        assert_eq!(spark[2].yval, 3.0);
    }

    #[test]
    fn test_non_sequence_series_is_an_error() {
        let json = r#"{ "sparks": [{ "id": "s", "title": "S", "data": { "yval": 1 } }] }"#;
        assert!(matches!(
            parse(json),
            Err(SampleError::Series { id, source: ChartError::NotASequence(_) }) if id == "s"
        ));
        assert!(matches!(parse("not json"), Err(SampleError::Json(_))));
    }
}
