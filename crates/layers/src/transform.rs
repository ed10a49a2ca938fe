use formats::{
    DecodePolicy, FeatureCollection, FeedKind, FormatError, decode_boundaries, decode_events,
};
use tracing::info;

use crate::boundaries::LineLayer;
use crate::markers::MarkerLayer;

pub const EARTHQUAKES_LAYER_ID: u64 = 100;
pub const PLATES_LAYER_ID: u64 = 101;

/// Both overlays, ready for composition.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedLayers {
    pub earthquakes: MarkerLayer,
    pub plates: LineLayer,
    pub skipped_events: usize,
    pub skipped_boundaries: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformError {
    pub feed: FeedKind,
    pub source: FormatError,
}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.feed, self.source)
    }
}

impl std::error::Error for TransformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Decodes both feeds under `policy` and styles them.
pub fn transform_feeds(
    earthquakes: &FeatureCollection,
    plates: &FeatureCollection,
    policy: DecodePolicy,
) -> Result<FeedLayers, TransformError> {
    let events = decode_events(earthquakes, policy).map_err(|source| TransformError {
        feed: FeedKind::Earthquakes,
        source,
    })?;
    let segments = decode_boundaries(plates, policy).map_err(|source| TransformError {
        feed: FeedKind::PlateBoundaries,
        source,
    })?;

    info!(
        events = events.items.len(),
        skipped_events = events.skipped.len(),
        segments = segments.items.len(),
        skipped_segments = segments.skipped.len(),
        "transformed feeds"
    );

    Ok(FeedLayers {
        earthquakes: MarkerLayer::from_events(EARTHQUAKES_LAYER_ID, &events.items),
        plates: LineLayer::from_segments(PLATES_LAYER_ID, &segments.items),
        skipped_events: events.skipped.len(),
        skipped_boundaries: segments.skipped.len(),
    })
}
