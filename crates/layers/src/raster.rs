use serde::Serialize;

use crate::layer::{Layer, LayerId};

/// Slippy-map tile layer backed by an `{s}/{z}/{x}/{y}` URL template.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayer {
    id: LayerId,
    pub url_template: String,
    pub max_zoom: u8,
    pub attribution: String,
}

impl TileLayer {
    pub fn new(
        id: u64,
        url_template: impl Into<String>,
        max_zoom: u8,
        attribution: impl Into<String>,
    ) -> Self {
        Self {
            id: LayerId(id),
            url_template: url_template.into(),
            max_zoom,
            attribution: attribution.into(),
        }
    }
}

impl Layer for TileLayer {
    fn id(&self) -> LayerId {
        self.id
    }
}
