use formats::{FeatureCollection, FeedKind, FormatError};
use tracing::info;

use crate::feeds::{EARTHQUAKES_URL, FeedClient, FetchError, PLATES_URL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedUrls {
    pub earthquakes: String,
    pub plates: String,
}

impl Default for FeedUrls {
    fn default() -> Self {
        Self {
            earthquakes: EARTHQUAKES_URL.to_string(),
            plates: PLATES_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedFeeds {
    pub earthquakes: FeatureCollection,
    pub plates: FeatureCollection,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    Fetch {
        feed: FeedKind,
        url: String,
        source: FetchError,
    },
    Malformed {
        feed: FeedKind,
        url: String,
        source: FormatError,
    },
}

impl LoadError {
    pub fn feed(&self) -> FeedKind {
        match self {
            LoadError::Fetch { feed, .. } | LoadError::Malformed { feed, .. } => *feed,
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Fetch { feed, url, source } => {
                write!(f, "failed to fetch {feed} from {url}: {source}")
            }
            LoadError::Malformed { feed, url, source } => {
                write!(f, "malformed {feed} from {url}: {source}")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Fetch { source, .. } => Some(source),
            LoadError::Malformed { source, .. } => Some(source),
        }
    }
}

async fn fetch_collection<C: FeedClient + ?Sized>(
    client: &C,
    feed: FeedKind,
    url: &str,
) -> Result<FeatureCollection, LoadError> {
    info!(%feed, url, "fetching");
    let text = client
        .get_text(url)
        .await
        .map_err(|source| LoadError::Fetch {
            feed,
            url: url.to_string(),
            source,
        })?;

    let collection =
        FeatureCollection::from_geojson_str(&text).map_err(|source| LoadError::Malformed {
            feed,
            url: url.to_string(),
            source,
        })?;

    info!(%feed, bytes = text.len(), features = collection.len(), "fetched");
    Ok(collection)
}

/// Fetches the earthquake feed, then the plate boundary feed.
///
/// The boundary request is only issued once the earthquake feed has been
/// fetched and its envelope decoded; the first failure is returned as-is.
pub async fn load_feeds<C: FeedClient + ?Sized>(
    client: &C,
    urls: &FeedUrls,
) -> Result<LoadedFeeds, LoadError> {
    let earthquakes = fetch_collection(client, FeedKind::Earthquakes, &urls.earthquakes).await?;
    let plates = fetch_collection(client, FeedKind::PlateBoundaries, &urls.plates).await?;
    Ok(LoadedFeeds {
        earthquakes,
        plates,
    })
}
