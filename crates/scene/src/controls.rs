use serde::Serialize;

/// Corner a map control is anchored to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Switcher listing base layers (radio) and overlays (checkbox).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerControl {
    pub position: ControlPosition,
    pub collapsed: bool,
    #[serde(rename = "baseLayers")]
    pub base_layers: Vec<String>,
    pub overlays: Vec<String>,
}

/// Static HTML control; built once and never updated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendControl {
    pub position: ControlPosition,
    #[serde(rename = "className")]
    pub class_name: String,
    pub html: String,
}

impl LegendControl {
    pub fn depth() -> Self {
        Self {
            position: ControlPosition::BottomRight,
            class_name: "info legend".to_string(),
            html: layers::legend::depth_legend_html(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_use_leaflet_names() {
        let json = serde_json::to_string(&ControlPosition::BottomRight).unwrap();
        assert_eq!(json, "\"bottomright\"");
    }

    #[test]
    fn depth_legend_sits_bottom_right() {
        let legend = LegendControl::depth();
        assert_eq!(legend.position, ControlPosition::BottomRight);
        assert_eq!(legend.class_name, "info legend");
        assert!(legend.html.ends_with("90+"));
    }
}
