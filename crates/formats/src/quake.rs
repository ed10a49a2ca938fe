//! Typed decode of the USGS earthquake summary feed.

use foundation::{EventTime, GeoPosition};
use serde::Deserialize;
use serde_json::Value;

use crate::decode::{DecodePolicy, Decoded, FeedKind, decode_features};
use crate::geojson::{Feature, FeatureCollection, FormatError, Geometry};

/// One earthquake as reported by the feed.
#[derive(Debug, Clone, PartialEq)]
pub struct SeismicEvent {
    pub id: Option<String>,
    pub place: String,
    pub time: EventTime,
    pub magnitude: f64,
    pub position: GeoPosition,
}

#[derive(Debug, Deserialize)]
struct QuakeProperties {
    place: Option<String>,
    time: Option<FeedTime>,
    mag: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeedTime {
    EpochMillis(i64),
    Iso8601(String),
}

impl SeismicEvent {
    pub fn from_feature(feature: &Feature) -> Result<Self, FormatError> {
        let index = feature.index;
        let missing = |field| FormatError::MissingField { index, field };

        let props: QuakeProperties =
            serde_json::from_value(Value::Object(feature.properties.clone())).map_err(|e| {
                FormatError::InvalidField {
                    index,
                    field: "properties",
                    reason: e.to_string(),
                }
            })?;

        let place = props.place.ok_or_else(|| missing("place"))?;
        let magnitude = props.mag.ok_or_else(|| missing("mag"))?;
        let time = match props.time.ok_or_else(|| missing("time"))? {
            FeedTime::EpochMillis(ms) => EventTime::from_epoch_millis(ms),
            FeedTime::Iso8601(s) => EventTime::parse_iso8601(&s),
        }
        .ok_or_else(|| FormatError::InvalidField {
            index,
            field: "time",
            reason: "not a representable epoch-millis or ISO-8601 timestamp".to_string(),
        })?;

        let point = match &feature.geometry {
            None => return Err(missing("coordinates")),
            Some(Geometry::Point(p)) => *p,
            Some(other) => {
                return Err(FormatError::InvalidField {
                    index,
                    field: "geometry",
                    reason: format!("expected Point, got {}", other.type_name()),
                });
            }
        };
        let depth_km = point.z.ok_or_else(|| missing("depth"))?;

        Ok(Self {
            id: feature.id.clone(),
            place,
            time,
            magnitude,
            position: GeoPosition::new(point.lon_deg, point.lat_deg, depth_km),
        })
    }
}

pub fn decode_events(
    collection: &FeatureCollection,
    policy: DecodePolicy,
) -> Result<Decoded<SeismicEvent>, FormatError> {
    decode_features(collection, FeedKind::Earthquakes, policy, SeismicEvent::from_feature)
}
