use std::path::PathBuf;

use clap::Parser;
use formats::DecodePolicy;
use scene::tiles::SATELLITE;
use scene::{DEFAULT_CONTAINER_ID, MapConfig};

use crate::feeds::{EARTHQUAKES_URL, PLATES_URL};
use crate::loader::FeedUrls;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render recent earthquakes and tectonic plate boundaries on a Leaflet map"
)]
pub struct Args {
    /// Where to write the generated HTML page
    #[arg(long, default_value = "quake_map.html")]
    pub out: PathBuf,

    /// GeoJSON earthquake feed
    #[arg(long, default_value = EARTHQUAKES_URL)]
    pub events_url: String,

    /// GeoJSON plate boundary feed
    #[arg(long, default_value = PLATES_URL)]
    pub boundaries_url: String,

    /// HTML template to mount the map into (default: built-in full-window page)
    #[arg(long)]
    pub page: Option<PathBuf>,

    /// Id of the element the map renders into
    #[arg(long, default_value = DEFAULT_CONTAINER_ID)]
    pub container: String,

    /// Base layer shown first (Satellite, Grayscale, Outdoors)
    #[arg(long, default_value = SATELLITE.name)]
    pub base: String,

    /// Fail on the first malformed feature instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

/// Everything one run needs, resolved from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub out: PathBuf,
    pub urls: FeedUrls,
    pub page: Option<PathBuf>,
    pub map: MapConfig,
    pub policy: DecodePolicy,
}

impl From<Args> for RunConfig {
    fn from(args: Args) -> Self {
        Self {
            out: args.out,
            urls: FeedUrls {
                earthquakes: args.events_url,
                plates: args.boundaries_url,
            },
            page: args.page,
            map: MapConfig {
                container_id: args.container,
                default_base: args.base,
                ..MapConfig::default()
            },
            policy: if args.strict {
                DecodePolicy::Abort
            } else {
                DecodePolicy::Skip
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_the_built_in_constants() {
        let cfg = RunConfig::from(Args::try_parse_from(["quake_map"]).unwrap());
        assert_eq!(cfg.out, PathBuf::from("quake_map.html"));
        assert_eq!(cfg.urls, FeedUrls::default());
        assert_eq!(cfg.page, None);
        assert_eq!(cfg.map, MapConfig::default());
        assert_eq!(cfg.policy, DecodePolicy::Skip);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "quake_map",
            "--out",
            "site/index.html",
            "--events-url",
            "http://localhost:9000/quakes.geojson",
            "--container",
            "quakes",
            "--base",
            "Grayscale",
            "--strict",
        ])
        .unwrap();
        let cfg = RunConfig::from(args);
        assert_eq!(cfg.out, PathBuf::from("site/index.html"));
        assert_eq!(cfg.urls.earthquakes, "http://localhost:9000/quakes.geojson");
        assert_eq!(cfg.urls.plates, PLATES_URL);
        assert_eq!(cfg.map.container_id, "quakes");
        assert_eq!(cfg.map.default_base, "Grayscale");
        assert_eq!(cfg.policy, DecodePolicy::Abort);
    }
}
