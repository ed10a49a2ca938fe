use tracing::warn;

use crate::geojson::{Feature, FeatureCollection, FormatError};

/// The two remote datasets the map is built from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Earthquakes,
    PlateBoundaries,
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedKind::Earthquakes => write!(f, "earthquake feed"),
            FeedKind::PlateBoundaries => write!(f, "plate boundary feed"),
        }
    }
}

/// What to do with a feature that fails its typed decode.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum DecodePolicy {
    /// Log a warning and drop the record; the rest of the batch survives.
    #[default]
    Skip,
    /// Fail the whole batch on the first bad record.
    Abort,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub items: Vec<T>,
    /// Record errors that were skipped under [`DecodePolicy::Skip`].
    pub skipped: Vec<FormatError>,
}

impl<T> Default for Decoded<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Runs `decode` over every feature of `collection` under `policy`.
///
/// `kind` only labels the warning emitted for skipped records.
pub fn decode_features<T>(
    collection: &FeatureCollection,
    kind: FeedKind,
    policy: DecodePolicy,
    decode: impl Fn(&Feature) -> Result<T, FormatError>,
) -> Result<Decoded<T>, FormatError> {
    let mut out = Decoded {
        items: Vec::with_capacity(collection.len()),
        skipped: Vec::new(),
    };

    for result in collection.features() {
        match result.and_then(|feature| decode(&feature)) {
            Ok(item) => out.items.push(item),
            Err(err) => match policy {
                DecodePolicy::Abort => return Err(err),
                DecodePolicy::Skip => {
                    warn!(feed = %kind, "skipping record: {err}");
                    out.skipped.push(err);
                }
            },
        }
    }

    Ok(out)
}
