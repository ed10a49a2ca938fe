//! Host page rendering.
//!
//! The map is handed to Leaflet as a JSON document embedded in the page; a
//! fixed bootstrap script turns that document into Leaflet layers and
//! controls. Nothing here draws tiles or shapes itself.

use layers::html::escape_html;

use crate::map::MapInstance;

pub const LEAFLET_VERSION: &str = "1.9.4";
const DATA_ELEMENT_ID: &str = "quake-map-data";

const LEGEND_CSS: &str = r#"<style>
.info.legend { padding: 6px 8px; background: rgba(255, 255, 255, 0.9); box-shadow: 0 0 15px rgba(0, 0, 0, 0.2); border-radius: 5px; line-height: 18px; color: #555; }
.info.legend h3 { margin: 0 0 6px; }
.info.legend i { width: 18px; height: 18px; float: left; margin-right: 8px; opacity: 0.9; }
.quake-map-error { padding: 2em; font: 16px sans-serif; color: #8B0000; }
</style>"#;

const BOOTSTRAP_JS: &str = r#"(function () {
  var doc = JSON.parse(document.getElementById("quake-map-data").textContent);
  function build(layer) {
    switch (layer.kind) {
      case "tiles":
        return L.tileLayer(layer.urlTemplate, { maxZoom: layer.maxZoom, attribution: layer.attribution });
      case "markers":
        return L.layerGroup(layer.markers.map(function (m) {
          return L.circleMarker(m.position, Object.assign({ radius: m.radius }, m.style)).bindPopup(m.popup);
        }));
      case "lines":
        return L.layerGroup(layer.lines.map(function (l) {
          return L.polyline(l.paths, layer.style);
        }));
    }
  }
  var baseMaps = {}, overlayMaps = {}, initial = [];
  function register(target) {
    return function (entry) {
      var built = build(entry.layer);
      target[entry.name] = built;
      if (entry.visible) { initial.push(built); }
    };
  }
  doc.baseLayers.forEach(register(baseMaps));
  doc.overlays.forEach(register(overlayMaps));
  var map = L.map(doc.containerId, { center: doc.view.center, zoom: doc.view.zoom, layers: initial });
  L.control.layers(baseMaps, overlayMaps, {
    collapsed: doc.layerControl.collapsed,
    position: doc.layerControl.position
  }).addTo(map);
  var legend = L.control({ position: doc.legend.position });
  legend.onAdd = function () {
    var div = L.DomUtil.create("div", doc.legend.className);
    div.innerHTML = doc.legend.html;
    return div;
  };
  legend.addTo(map);
})();"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// The template has no element carrying the container id.
    TargetMissing { container_id: String },
    InvalidContainerId(String),
    Serialize(String),
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageError::TargetMissing { container_id } => {
                write!(f, "host page has no element with id `{container_id}`")
            }
            PageError::InvalidContainerId(id) => write!(f, "invalid container id `{id}`"),
            PageError::Serialize(msg) => write!(f, "failed to serialize map: {msg}"),
        }
    }
}

impl std::error::Error for PageError {}

/// HTML document the map is mounted into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPage {
    template: String,
}

impl HostPage {
    pub fn from_template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Minimal full-window page with a single container element.
    pub fn with_container(container_id: &str) -> Self {
        Self::from_template(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Earthquakes &amp; Tectonic Plates</title>
<style>html, body, #{id} {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="{id}"></div>
</body>
</html>
"#,
            id = escape_html(container_id)
        ))
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Byte offset just past the opening tag of the container element.
    ///
    /// The `id` attribute must start a new attribute, so `data-id="map"` or
    /// `grid="map"` do not count.
    fn container_open_end(&self, container_id: &str) -> Option<usize> {
        let attr = [
            format!("id=\"{container_id}\""),
            format!("id='{container_id}'"),
        ]
        .iter()
        .filter_map(|needle| {
            self.template
                .match_indices(needle.as_str())
                .map(|(at, _)| at)
                .find(|&at| {
                    self.template[..at]
                        .chars()
                        .next_back()
                        .is_some_and(|c| c.is_ascii_whitespace())
                })
        })
        .min()?;
        self.template[attr..].find('>').map(|i| attr + i + 1)
    }

    pub fn has_container(&self, container_id: &str) -> bool {
        self.container_open_end(container_id).is_some()
    }

    /// Fails unless `container_id` is usable and present in the template.
    pub fn check_target(&self, container_id: &str) -> Result<(), PageError> {
        validate_container_id(container_id)?;
        if !self.has_container(container_id) {
            return Err(PageError::TargetMissing {
                container_id: container_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn render(&self, map: &MapInstance) -> Result<String, PageError> {
        self.check_target(&map.container_id)?;

        let json = serde_json::to_string(map).map_err(|e| PageError::Serialize(e.to_string()))?;
        // '<' only occurs inside JSON strings, where \u003c decodes to the
        // same text but cannot close the script element.
        let json = json.replace('<', "\\u003c");

        let head = format!(
            "<link rel=\"stylesheet\" href=\"https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.css\">\n{LEGEND_CSS}\n"
        );
        let body = format!(
            "<script src=\"https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.js\"></script>\n\
             <script type=\"application/json\" id=\"{DATA_ELEMENT_ID}\">{json}</script>\n\
             <script>\n{BOOTSTRAP_JS}\n</script>\n"
        );

        let page = insert_before_tag(&self.template, "</head>", &head, Missing::Prepend);
        Ok(insert_before_tag(&page, "</body>", &body, Missing::Append))
    }

    /// Page showing `message` in place of the map.
    ///
    /// Never fails: without a usable container the message goes at the end
    /// of the body instead.
    pub fn render_fallback(&self, container_id: &str, message: &str) -> String {
        let notice = format!(
            "<div class=\"quake-map-error\" role=\"alert\">{}</div>",
            escape_html(message)
        );
        let page = insert_before_tag(
            &self.template,
            "</head>",
            &format!("{LEGEND_CSS}\n"),
            Missing::Prepend,
        );
        let page = HostPage::from_template(page);
        match page.container_open_end(container_id) {
            Some(at) => {
                let mut out = page.template.clone();
                out.insert_str(at, &notice);
                out
            }
            None => insert_before_tag(&page.template, "</body>", &notice, Missing::Append),
        }
    }
}

fn validate_container_id(id: &str) -> Result<(), PageError> {
    let ok = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'));
    if ok {
        Ok(())
    } else {
        Err(PageError::InvalidContainerId(id.to_string()))
    }
}

/// Where content goes when the anchor tag is absent.
#[derive(Copy, Clone)]
enum Missing {
    Prepend,
    Append,
}

/// Inserts `content` before the first case-insensitive `tag`.
fn insert_before_tag(html: &str, tag: &str, content: &str, missing: Missing) -> String {
    // ASCII lowercasing keeps byte offsets aligned with `html`.
    let at = html
        .to_ascii_lowercase()
        .find(tag)
        .unwrap_or(match missing {
            Missing::Prepend => 0,
            Missing::Append => html.len(),
        });
    let mut out = String::with_capacity(html.len() + content.len());
    out.push_str(&html[..at]);
    out.push_str(content);
    out.push_str(&html[at..]);
    out
}
