use formats::SeismicEvent;
use foundation::LatLng;
use serde::Serialize;

use crate::html::escape_html;
use crate::layer::{Layer, LayerId};
use crate::symbology::{PathStyle, depth_color};

/// Pixels of radius per unit of magnitude.
pub const RADIUS_PER_MAGNITUDE: f64 = 5.0;
/// Smallest radius a marker is drawn with; keeps zero/negative magnitudes visible.
pub const MIN_MARKER_RADIUS: f64 = 1.0;

pub const MARKER_WEIGHT: f64 = 1.0;
pub const MARKER_OPACITY: f64 = 0.8;
pub const MARKER_FILL_OPACITY: f64 = 0.35;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleMarker {
    pub position: LatLng,
    pub radius: f64,
    pub style: PathStyle,
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerLayer {
    id: LayerId,
    pub markers: Vec<CircleMarker>,
}

/// Non-decreasing in magnitude, never below [`MIN_MARKER_RADIUS`].
pub fn marker_radius(magnitude: f64) -> f64 {
    // f64::max ignores a NaN operand.
    (magnitude * RADIUS_PER_MAGNITUDE).max(MIN_MARKER_RADIUS)
}

pub fn event_popup(event: &SeismicEvent) -> String {
    format!(
        "<strong>Location: </strong>{}\n\
         <p><strong>Time: </strong>{}</p>\n\
         <p><strong>Magnitude: </strong>{}</p>\n\
         <p><strong>Depth: </strong>{} km</p>",
        escape_html(&event.place),
        event.time.to_human(),
        event.magnitude,
        event.position.depth_km,
    )
}

pub fn event_marker(event: &SeismicEvent) -> CircleMarker {
    let color = depth_color(event.position.depth_km);
    CircleMarker {
        position: event.position.surface().to_lat_lng(),
        radius: marker_radius(event.magnitude),
        style: PathStyle::filled(color, MARKER_WEIGHT, MARKER_OPACITY, MARKER_FILL_OPACITY),
        popup: event_popup(event),
    }
}

impl MarkerLayer {
    pub fn new(id: u64) -> Self {
        Self {
            id: LayerId(id),
            markers: Vec::new(),
        }
    }

    pub fn from_events(id: u64, events: &[SeismicEvent]) -> Self {
        Self {
            id: LayerId(id),
            markers: events.iter().map(event_marker).collect(),
        }
    }
}

impl Layer for MarkerLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn shape_count(&self) -> usize {
        self.markers.len()
    }
}
