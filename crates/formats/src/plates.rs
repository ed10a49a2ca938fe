//! Tectonic plate boundary feed (PB2002 line features).

use foundation::LonLat;

use crate::decode::{DecodePolicy, Decoded, FeedKind, decode_features};
use crate::geojson::{Feature, FeatureCollection, FormatError, Geometry, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySegment {
    pub name: Option<String>,
    pub lines: Vec<Vec<LonLat>>,
}

impl BoundarySegment {
    pub fn from_feature(feature: &Feature) -> Result<Self, FormatError> {
        let name = ["Name", "name"]
            .iter()
            .find_map(|key| feature.property(key).and_then(|v| v.as_str()))
            .map(str::to_string);

        let lines = match &feature.geometry {
            Some(Geometry::LineString(line)) => vec![to_lon_lat(line)],
            Some(Geometry::MultiLineString(lines)) => {
                lines.iter().map(|l| to_lon_lat(l)).collect()
            }
            Some(other) => {
                return Err(FormatError::InvalidField {
                    index: feature.index,
                    field: "geometry",
                    reason: format!(
                        "expected LineString or MultiLineString, got {}",
                        other.type_name()
                    ),
                });
            }
            None => {
                return Err(FormatError::MissingField {
                    index: feature.index,
                    field: "coordinates",
                });
            }
        };

        Ok(Self { name, lines })
    }

    pub fn vertex_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }
}

fn to_lon_lat(line: &[Position]) -> Vec<LonLat> {
    line.iter()
        .map(|p| LonLat::new(p.lon_deg, p.lat_deg))
        .collect()
}

pub fn decode_boundaries(
    collection: &FeatureCollection,
    policy: DecodePolicy,
) -> Result<Decoded<BoundarySegment>, FormatError> {
    decode_features(
        collection,
        FeedKind::PlateBoundaries,
        policy,
        BoundarySegment::from_feature,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"Name":"AF-AN","PlateA":"AF","PlateB":"AN","Type":""},
         "geometry":{"type":"LineString","coordinates":[[-0.4,-54.8],[0.0,-54.6],[1.2,-54.4]]}},
        {"type":"Feature","properties":{},
         "geometry":{"type":"MultiLineString","coordinates":[[[10,0],[11,1]],[[12,2],[13,3]]]}},
        {"type":"Feature","properties":{"Name":"bad"},
         "geometry":{"type":"Point","coordinates":[0,0]}}
    ]}"#;

    #[test]
    fn decodes_lines_and_skips_points() {
        let fc = FeatureCollection::from_geojson_str(PAYLOAD).unwrap();
        let decoded = decode_boundaries(&fc, DecodePolicy::Skip).unwrap();
        assert_eq!(decoded.items.len(), 2);
        assert_eq!(decoded.skipped.len(), 1);

        let first = &decoded.items[0];
        assert_eq!(first.name.as_deref(), Some("AF-AN"));
        assert_eq!(first.lines.len(), 1);
        assert_eq!(first.vertex_count(), 3);
        assert_eq!(first.lines[0][0], LonLat::new(-0.4, -54.8));

        let second = &decoded.items[1];
        assert_eq!(second.name, None);
        assert_eq!(second.lines.len(), 2);
    }

    #[test]
    fn strict_decode_rejects_point_geometry() {
        let fc = FeatureCollection::from_geojson_str(PAYLOAD).unwrap();
        let err = decode_boundaries(&fc, DecodePolicy::Abort).unwrap_err();
        assert_eq!(err.record_index(), Some(2));
    }
}
