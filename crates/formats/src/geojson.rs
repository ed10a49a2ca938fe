use serde_json::{Map, Value};

/// GeoJSON position. The optional third component is kept as-is; its meaning
/// depends on the feed (depth in km for seismic events).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Position {
    pub lon_deg: f64,
    pub lat_deg: f64,
    pub z: Option<f64>,
}

impl Position {
    pub fn new(lon_deg: f64, lat_deg: f64, z: Option<f64>) -> Self {
        Self {
            lon_deg,
            lat_deg,
            z,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Position),
    MultiPoint(Vec<Position>),
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

impl Geometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }
}

/// One decoded feature. `index` is its position in the source collection and
/// is carried into record errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub index: usize,
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    pub geometry: Option<Geometry>,
}

impl Feature {
    /// Property value, treating JSON `null` as absent.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key).filter(|v| !v.is_null())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    Json(String),
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
    MissingField { index: usize, field: &'static str },
    InvalidField {
        index: usize,
        field: &'static str,
        reason: String,
    },
}

impl FormatError {
    /// Index of the offending feature, if the error is record-scoped.
    pub fn record_index(&self) -> Option<usize> {
        match self {
            FormatError::Json(_) | FormatError::NotAFeatureCollection => None,
            FormatError::InvalidFeature { index, .. }
            | FormatError::MissingField { index, .. }
            | FormatError::InvalidField { index, .. } => Some(*index),
        }
    }
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::Json(msg) => write!(f, "JSON parse error: {msg}"),
            FormatError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            FormatError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
            FormatError::MissingField { index, field } => {
                write!(f, "feature at index {index} is missing `{field}`")
            }
            FormatError::InvalidField {
                index,
                field,
                reason,
            } => write!(f, "feature at index {index} has invalid `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// A validated FeatureCollection envelope.
///
/// Features are kept raw so a bad record can be reported (or skipped) on its
/// own without rejecting the whole payload.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection {
    raw: Vec<Value>,
}

impl FeatureCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, FormatError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| FormatError::Json(e.to_string()))?;
        Self::from_geojson_value(value)
    }

    pub fn from_geojson_value(value: Value) -> Result<Self, FormatError> {
        let Value::Object(mut obj) = value else {
            return Err(FormatError::NotAFeatureCollection);
        };
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(FormatError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(FormatError::NotAFeatureCollection);
        }

        match obj.remove("features") {
            Some(Value::Array(raw)) => Ok(Self { raw }),
            _ => Err(FormatError::NotAFeatureCollection),
        }
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Decodes each feature lazily, in source order.
    pub fn features(&self) -> impl Iterator<Item = Result<Feature, FormatError>> + '_ {
        self.raw
            .iter()
            .enumerate()
            .map(|(index, value)| parse_feature(index, value))
    }
}

fn parse_feature(index: usize, value: &Value) -> Result<Feature, FormatError> {
    let invalid = |reason: String| FormatError::InvalidFeature { index, reason };

    let feat_obj = value
        .as_object()
        .ok_or_else(|| invalid("feature must be an object".to_string()))?;

    let feat_type = feat_obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or_else(|| invalid("feature missing type".to_string()))?;
    if feat_type != "Feature" {
        return Err(invalid(format!("unexpected feature type: {feat_type}")));
    }

    let id = match feat_obj.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    let properties = feat_obj
        .get("properties")
        .and_then(|v| v.as_object())
        .cloned()
        .unwrap_or_default();

    let geometry = match feat_obj.get("geometry") {
        None | Some(Value::Null) => None,
        Some(geometry_val) => Some(parse_geometry(geometry_val).map_err(|reason| {
            FormatError::InvalidField {
                index,
                field: "geometry",
                reason,
            }
        })?),
    };

    Ok(Feature {
        index,
        id,
        properties,
        geometry,
    })
}

fn parse_geometry(value: &Value) -> Result<Geometry, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    match ty {
        "Point" => Ok(Geometry::Point(parse_position(coords)?)),
        "MultiPoint" => Ok(Geometry::MultiPoint(parse_positions(coords)?)),
        "LineString" => Ok(Geometry::LineString(parse_positions(coords)?)),
        "MultiLineString" => Ok(Geometry::MultiLineString(parse_nested(coords)?)),
        "Polygon" => Ok(Geometry::Polygon(parse_nested(coords)?)),
        "MultiPolygon" => {
            let polys = coords
                .as_array()
                .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
            let mut out = Vec::with_capacity(polys.len());
            for poly in polys {
                out.push(parse_nested(poly)?);
            }
            Ok(Geometry::MultiPolygon(out))
        }
        other => Err(format!("unsupported geometry type: {other}")),
    }
}

fn parse_position(coords: &Value) -> Result<Position, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0].as_f64().ok_or("lon must be a number".to_string())?;
    let lat = arr[1].as_f64().ok_or("lat must be a number".to_string())?;
    let z = match arr.get(2) {
        None | Some(Value::Null) => None,
        Some(v) => Some(v.as_f64().ok_or("third coordinate must be a number".to_string())?),
    };
    Ok(Position::new(lon, lat, z))
}

fn parse_positions(coords: &Value) -> Result<Vec<Position>, String> {
    let arr = coords
        .as_array()
        .ok_or("coordinates must be an array".to_string())?;
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        out.push(parse_position(item)?);
    }
    Ok(out)
}

fn parse_nested(coords: &Value) -> Result<Vec<Vec<Position>>, String> {
    let arr = coords
        .as_array()
        .ok_or("coordinates must be an array of position lists".to_string())?;
    let mut out = Vec::with_capacity(arr.len());
    for part in arr {
        out.push(parse_positions(part)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejects_non_collections() {
        assert_eq!(
            FeatureCollection::from_geojson_str(r#"{"type":"Feature"}"#),
            Err(FormatError::NotAFeatureCollection)
        );
        assert_eq!(
            FeatureCollection::from_geojson_str(r#"{"type":"FeatureCollection"}"#),
            Err(FormatError::NotAFeatureCollection)
        );
        assert!(matches!(
            FeatureCollection::from_geojson_str("<html>"),
            Err(FormatError::Json(_))
        ));
    }

    #[test]
    fn empty_collection_is_valid() {
        let fc =
            FeatureCollection::from_geojson_str(r#"{"type":"FeatureCollection","features":[]}"#)
                .unwrap();
        assert!(fc.is_empty());
        assert_eq!(fc.features().count(), 0);
    }

    #[test]
    fn keeps_depth_component() {
        let payload = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","id":"us7000","properties":{"mag":4.5},
             "geometry":{"type":"Point","coordinates":[142.1,38.3,35.0]}}
        ]}"#;
        let fc = FeatureCollection::from_geojson_str(payload).unwrap();
        let feature = fc.features().next().unwrap().unwrap();
        assert_eq!(feature.id.as_deref(), Some("us7000"));
        assert_eq!(
            feature.geometry,
            Some(Geometry::Point(Position::new(142.1, 38.3, Some(35.0))))
        );
    }

    #[test]
    fn bad_record_does_not_poison_neighbours() {
        let payload = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":["x",1]}},
            {"type":"Feature","properties":null,"geometry":null}
        ]}"#;
        let fc = FeatureCollection::from_geojson_str(payload).unwrap();
        let results: Vec<_> = fc.features().collect();
        assert_eq!(results[0].as_ref().unwrap_err().record_index(), Some(0));
        let second = results[1].as_ref().unwrap();
        assert!(second.properties.is_empty());
        assert!(second.geometry.is_none());
    }

    #[test]
    fn null_properties_read_as_absent() {
        let payload = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"mag":null},"geometry":null}
        ]}"#;
        let fc = FeatureCollection::from_geojson_str(payload).unwrap();
        let feature = fc.features().next().unwrap().unwrap();
        assert!(feature.property("mag").is_none());
    }
}
