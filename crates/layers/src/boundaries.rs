use formats::BoundarySegment;
use foundation::LatLng;
use serde::Serialize;

use crate::layer::{Layer, LayerId};
use crate::symbology::{Color, PathStyle};

/// Applied to every plate boundary, regardless of its properties.
pub const BOUNDARY_STYLE: PathStyle = PathStyle::stroke(Color::ORANGE, 2.0);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub paths: Vec<Vec<LatLng>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineLayer {
    id: LayerId,
    pub style: PathStyle,
    pub lines: Vec<BoundaryLine>,
}

impl LineLayer {
    pub fn from_segments(id: u64, segments: &[BoundarySegment]) -> Self {
        let lines = segments
            .iter()
            .map(|segment| BoundaryLine {
                name: segment.name.clone(),
                paths: segment
                    .lines
                    .iter()
                    .map(|line| line.iter().map(|p| p.to_lat_lng()).collect())
                    .collect(),
            })
            .collect();

        Self {
            id: LayerId(id),
            style: BOUNDARY_STYLE,
            lines,
        }
    }
}

impl Layer for LineLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn shape_count(&self) -> usize {
        self.lines.len()
    }
}
