use foundation::LatLng;
use layers::raster::TileLayer;
use layers::{FeedLayers, Layer, VisualLayer};
use serde::Serialize;
use tracing::debug;

use crate::controls::{ControlPosition, LayerControl, LegendControl};
use crate::tiles::{DEFAULT_BASE_LAYERS, SATELLITE, TileSource, find_base_layer};

pub const DEFAULT_CONTAINER_ID: &str = "map";
/// Geographic center of the contiguous United States.
pub const DEFAULT_CENTER: LatLng = LatLng::new(39.8282, -98.5795);
pub const DEFAULT_ZOOM: u8 = 4;

pub const EARTHQUAKES_OVERLAY: &str = "Earthquakes";
pub const PLATES_OVERLAY: &str = "Tectonic Plates";

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub container_id: String,
    pub view: MapView,
    pub base_layers: Vec<TileSource>,
    pub default_base: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            view: MapView::default(),
            base_layers: DEFAULT_BASE_LAYERS.to_vec(),
            default_base: SATELLITE.name.to_string(),
        }
    }
}

/// A layer registered under a user-facing name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedLayer {
    pub name: String,
    /// Whether the layer is on when the map first renders.
    pub visible: bool,
    pub layer: VisualLayer,
}

/// The one map of a page: layers, view, and controls.
///
/// Owned by whoever called [`compose_map`]; there is no global instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapInstance {
    pub container_id: String,
    pub view: MapView,
    pub base_layers: Vec<NamedLayer>,
    pub overlays: Vec<NamedLayer>,
    pub layer_control: LayerControl,
    pub legend: LegendControl,
}

impl MapInstance {
    pub fn active_base(&self) -> Option<&NamedLayer> {
        self.base_layers.iter().find(|l| l.visible)
    }

    pub fn overlay(&self, name: &str) -> Option<&NamedLayer> {
        self.overlays.iter().find(|l| l.name == name)
    }

    pub fn layers(&self) -> impl Iterator<Item = &NamedLayer> {
        self.base_layers.iter().chain(self.overlays.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    NoBaseLayers,
    UnknownBaseLayer(String),
}

impl std::fmt::Display for ComposeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComposeError::NoBaseLayers => write!(f, "map needs at least one base layer"),
            ComposeError::UnknownBaseLayer(name) => {
                write!(f, "default base layer `{name}` is not registered")
            }
        }
    }
}

impl std::error::Error for ComposeError {}

pub struct MapComposer {
    config: MapConfig,
}

impl MapComposer {
    pub fn new(config: MapConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn compose(&self, feeds: FeedLayers) -> Result<MapInstance, ComposeError> {
        let cfg = &self.config;
        if cfg.base_layers.is_empty() {
            return Err(ComposeError::NoBaseLayers);
        }
        let active = find_base_layer(&cfg.base_layers, &cfg.default_base)
            .ok_or_else(|| ComposeError::UnknownBaseLayer(cfg.default_base.clone()))?;

        let base_layers: Vec<NamedLayer> = cfg
            .base_layers
            .iter()
            .enumerate()
            .map(|(i, source)| NamedLayer {
                name: source.name.to_string(),
                visible: source.name == active.name,
                layer: TileLayer::new(
                    i as u64 + 1,
                    source.url_template,
                    source.max_zoom,
                    source.attribution,
                )
                .into(),
            })
            .collect();

        let overlays = vec![
            NamedLayer {
                name: EARTHQUAKES_OVERLAY.to_string(),
                visible: true,
                layer: feeds.earthquakes.into(),
            },
            NamedLayer {
                name: PLATES_OVERLAY.to_string(),
                visible: true,
                layer: feeds.plates.into(),
            },
        ];

        let layer_control = LayerControl {
            position: ControlPosition::TopRight,
            collapsed: false,
            base_layers: base_layers.iter().map(|l| l.name.clone()).collect(),
            overlays: overlays.iter().map(|l| l.name.clone()).collect(),
        };

        for named in base_layers.iter().chain(overlays.iter()) {
            debug!(
                name = %named.name,
                id = named.layer.id().0,
                shapes = named.layer.shape_count(),
                visible = named.visible,
                "registered layer"
            );
        }

        Ok(MapInstance {
            container_id: cfg.container_id.clone(),
            view: cfg.view,
            base_layers,
            overlays,
            layer_control,
            legend: LegendControl::depth(),
        })
    }
}

/// Builds the map for `feeds` in a single pass.
pub fn compose_map(config: MapConfig, feeds: FeedLayers) -> Result<MapInstance, ComposeError> {
    MapComposer::new(config).compose(feeds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::OUTDOORS;
    use formats::{BoundarySegment, SeismicEvent};
    use foundation::{EventTime, GeoPosition, LonLat};
    use layers::boundaries::LineLayer;
    use layers::markers::MarkerLayer;
    use pretty_assertions::assert_eq;

    fn feeds() -> FeedLayers {
        let event = SeismicEvent {
            id: None,
            place: "Fiji region".to_string(),
            time: EventTime::from_epoch_millis(0).unwrap(),
            magnitude: 4.8,
            position: GeoPosition::new(178.2, -17.9, 560.0),
        };
        let segment = BoundarySegment {
            name: Some("PA-AU".to_string()),
            lines: vec![vec![LonLat::new(178.0, -18.0), LonLat::new(179.0, -19.0)]],
        };
        FeedLayers {
            earthquakes: MarkerLayer::from_events(100, &[event]),
            plates: LineLayer::from_segments(101, &[segment]),
            skipped_events: 0,
            skipped_boundaries: 0,
        }
    }

    fn empty_feeds() -> FeedLayers {
        FeedLayers {
            earthquakes: MarkerLayer::new(100),
            plates: LineLayer::from_segments(101, &[]),
            skipped_events: 0,
            skipped_boundaries: 0,
        }
    }

    #[test]
    fn default_composition() {
        let map = compose_map(MapConfig::default(), feeds()).unwrap();

        assert_eq!(map.container_id, "map");
        assert_eq!(map.view.center, LatLng::new(39.8282, -98.5795));
        assert_eq!(map.view.zoom, 4);

        assert_eq!(map.base_layers.len(), 3);
        assert_eq!(map.active_base().map(|l| l.name.as_str()), Some("Satellite"));
        assert_eq!(map.base_layers.iter().filter(|l| l.visible).count(), 1);

        assert_eq!(map.overlays.len(), 2);
        assert!(map.overlays.iter().all(|l| l.visible));
        assert_eq!(map.overlay(EARTHQUAKES_OVERLAY).unwrap().layer.shape_count(), 1);
        assert_eq!(map.overlay(PLATES_OVERLAY).unwrap().layer.shape_count(), 1);

        assert!(!map.layer_control.collapsed);
        assert_eq!(
            map.layer_control.base_layers,
            vec!["Satellite", "Grayscale", "Outdoors"]
        );
        assert_eq!(
            map.layer_control.overlays,
            vec!["Earthquakes", "Tectonic Plates"]
        );
        assert_eq!(map.legend.position, ControlPosition::BottomRight);
    }

    #[test]
    fn layer_ids_are_unique() {
        let map = compose_map(MapConfig::default(), feeds()).unwrap();
        let mut ids: Vec<u64> = map.layers().map(|l| l.layer.id().0).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn empty_events_still_build_map_and_legend() {
        let map = compose_map(MapConfig::default(), empty_feeds()).unwrap();
        assert_eq!(map.overlay(EARTHQUAKES_OVERLAY).unwrap().layer.shape_count(), 0);
        assert_eq!(map.legend.html.matches("<i style=").count(), 6);
    }

    #[test]
    fn default_base_is_configurable() {
        let config = MapConfig {
            default_base: "outdoors".to_string(),
            ..MapConfig::default()
        };
        let map = compose_map(config, feeds()).unwrap();
        assert_eq!(map.active_base().unwrap().name, OUTDOORS.name);
    }

    #[test]
    fn rejects_unknown_or_missing_base_layers() {
        let unknown = MapConfig {
            default_base: "Night".to_string(),
            ..MapConfig::default()
        };
        assert_eq!(
            compose_map(unknown, feeds()).unwrap_err(),
            ComposeError::UnknownBaseLayer("Night".to_string())
        );

        let none = MapConfig {
            base_layers: Vec::new(),
            ..MapConfig::default()
        };
        assert_eq!(
            compose_map(none, feeds()).unwrap_err(),
            ComposeError::NoBaseLayers
        );
    }

    #[test]
    fn serializes_for_the_renderer() {
        let map = compose_map(MapConfig::default(), feeds()).unwrap();
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["containerId"], "map");
        assert_eq!(json["view"]["center"], serde_json::json!([39.8282, -98.5795]));
        assert_eq!(json["baseLayers"][0]["layer"]["kind"], "tiles");
        assert_eq!(json["baseLayers"][0]["layer"]["maxZoom"], 19);
        assert_eq!(json["overlays"][0]["layer"]["kind"], "markers");
        assert_eq!(json["overlays"][0]["layer"]["markers"][0]["radius"], 24.0);
        assert_eq!(json["overlays"][1]["layer"]["kind"], "lines");
        assert_eq!(json["layerControl"]["collapsed"], false);
        assert_eq!(json["legend"]["className"], "info legend");
    }
}
