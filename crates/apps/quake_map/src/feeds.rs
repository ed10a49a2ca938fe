//! Remote feed access.
//!
//! `FeedClient` is the seam between the loader and the network; the HTTP
//! implementation is used by the binary, tests substitute an in-memory one.

use std::future::Future;
use std::pin::Pin;

pub const EARTHQUAKES_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";
pub const PLATES_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

/// Upper bound on a feed body. The weekly USGS feed is a few MiB.
pub const MAX_FEED_BYTES: usize = 64 * 1024 * 1024;

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    UnsupportedUrl(String),
    Client(String),
    Transport(String),
    Status(u16),
    TooLarge { limit: usize },
    Body(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::UnsupportedUrl(url) => write!(f, "only http(s) URLs are allowed: {url}"),
            FetchError::Client(msg) => write!(f, "failed to build HTTP client: {msg}"),
            FetchError::Transport(msg) => write!(f, "request failed: {msg}"),
            FetchError::Status(status) => write!(f, "upstream HTTP {status}"),
            FetchError::TooLarge { limit } => {
                write!(f, "feed payload too large (max {limit} bytes)")
            }
            FetchError::Body(msg) => write!(f, "failed to read response: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Fetches a remote document as text.
///
/// Implementations must be `Send + Sync`; methods return boxed futures for
/// dyn-compatibility.
pub trait FeedClient: Send + Sync {
    fn get_text<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>>;
}

/// `reqwest`-backed client. No retries and no timeout beyond reqwest's defaults.
pub struct HttpFeedClient {
    client: reqwest::Client,
    max_bytes: usize,
}

impl HttpFeedClient {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("quake_map/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self {
            client,
            max_bytes: MAX_FEED_BYTES,
        })
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

pub fn check_url(url: &str) -> Result<(), FetchError> {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(FetchError::UnsupportedUrl(url.to_string()))
    }
}

impl FeedClient for HttpFeedClient {
    fn get_text<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<String, FetchError>> {
        Box::pin(async move {
            check_url(url)?;

            let resp = self
                .client
                .get(url.trim())
                .send()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            if !resp.status().is_success() {
                return Err(FetchError::Status(resp.status().as_u16()));
            }

            if let Some(len) = resp.content_length() {
                if len > self.max_bytes as u64 {
                    return Err(FetchError::TooLarge {
                        limit: self.max_bytes,
                    });
                }
            }

            let bytes = resp
                .bytes()
                .await
                .map_err(|e| FetchError::Body(e.to_string()))?;

            if bytes.len() > self.max_bytes {
                return Err(FetchError::TooLarge {
                    limit: self.max_bytes,
                });
            }

            String::from_utf8(bytes.to_vec())
                .map_err(|_| FetchError::Body("response was not valid UTF-8".to_string()))
        })
    }
}
