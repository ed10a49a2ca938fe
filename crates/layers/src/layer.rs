use serde::Serialize;

use crate::boundaries::LineLayer;
use crate::markers::MarkerLayer;
use crate::raster::TileLayer;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LayerId(pub u64);

pub trait Layer {
    fn id(&self) -> LayerId;

    /// Number of drawable shapes; tile layers report zero.
    fn shape_count(&self) -> usize {
        0
    }
}

/// Any layer the map can hold, serialised for the renderer with a `kind` tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum VisualLayer {
    Tiles(TileLayer),
    Markers(MarkerLayer),
    Lines(LineLayer),
}

impl Layer for VisualLayer {
    fn id(&self) -> LayerId {
        match self {
            VisualLayer::Tiles(l) => l.id(),
            VisualLayer::Markers(l) => l.id(),
            VisualLayer::Lines(l) => l.id(),
        }
    }

    fn shape_count(&self) -> usize {
        match self {
            VisualLayer::Tiles(l) => l.shape_count(),
            VisualLayer::Markers(l) => l.shape_count(),
            VisualLayer::Lines(l) => l.shape_count(),
        }
    }
}

impl From<TileLayer> for VisualLayer {
    fn from(l: TileLayer) -> Self {
        VisualLayer::Tiles(l)
    }
}

impl From<MarkerLayer> for VisualLayer {
    fn from(l: MarkerLayer) -> Self {
        VisualLayer::Markers(l)
    }
}

impl From<LineLayer> for VisualLayer {
    fn from(l: LineLayer) -> Self {
        VisualLayer::Lines(l)
    }
}
