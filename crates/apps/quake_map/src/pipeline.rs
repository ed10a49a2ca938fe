//! Fetch, transform, compose, render: the whole run, once.

use std::path::Path;

use formats::DecodePolicy;
use layers::transform_feeds;
use scene::page::HostPage;
use scene::{MapConfig, MapInstance, compose_map};
use tracing::{info, warn};

use crate::config::RunConfig;
use crate::error::AppError;
use crate::feeds::FeedClient;
use crate::loader::{FeedUrls, load_feeds};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub events: usize,
    pub skipped_events: usize,
    pub segments: usize,
    pub skipped_segments: usize,
}

/// Loads both feeds and builds the map instance from them.
pub async fn build_map<C: FeedClient + ?Sized>(
    client: &C,
    urls: &FeedUrls,
    policy: DecodePolicy,
    map_config: MapConfig,
) -> Result<(MapInstance, RunSummary), AppError> {
    let feeds = load_feeds(client, urls).await?;
    let layers = transform_feeds(&feeds.earthquakes, &feeds.plates, policy)?;

    let summary = RunSummary {
        events: layers.earthquakes.markers.len(),
        skipped_events: layers.skipped_events,
        segments: layers.plates.lines.len(),
        skipped_segments: layers.skipped_boundaries,
    };

    let map = compose_map(map_config, layers)?;
    Ok((map, summary))
}

/// Builds the map and renders it into `host`.
///
/// The container id and its element in `host` are checked before any
/// request is made.
pub async fn build_page<C: FeedClient + ?Sized>(
    client: &C,
    config: &RunConfig,
    host: &HostPage,
) -> Result<(String, RunSummary), AppError> {
    host.check_target(&config.map.container_id)?;

    let (map, summary) =
        build_map(client, &config.urls, config.policy, config.map.clone()).await?;
    let html = host.render(&map)?;
    Ok((html, summary))
}

pub async fn load_host_page(config: &RunConfig) -> Result<HostPage, AppError> {
    match &config.page {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .map(HostPage::from_template)
            .map_err(|source| AppError::ReadTemplate {
                path: path.clone(),
                source,
            }),
        None => Ok(HostPage::with_container(&config.map.container_id)),
    }
}

pub async fn write_output(path: &Path, html: &str) -> Result<(), AppError> {
    let write_err = |source| AppError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }
    tokio::fs::write(path, html).await.map_err(write_err)
}

/// Writes a page explaining why the map is missing. Best effort: a failure
/// here is logged and otherwise ignored.
pub async fn write_fallback(config: &RunConfig, host: Option<&HostPage>, err: &AppError) {
    let default_host;
    let host = match host {
        Some(h) => h,
        None => {
            default_host = HostPage::with_container(&config.map.container_id);
            &default_host
        }
    };
    let message = format!("The earthquake map could not be loaded: {err}");
    let html = host.render_fallback(&config.map.container_id, &message);
    match write_output(&config.out, &html).await {
        Ok(()) => warn!(path = %config.out.display(), "wrote fallback page"),
        Err(write_err) => warn!("could not write fallback page: {write_err}"),
    }
}

/// One complete run. On failure a fallback page is written before the error
/// is returned.
pub async fn run<C: FeedClient + ?Sized>(
    client: &C,
    config: &RunConfig,
) -> Result<RunSummary, AppError> {
    let host = match load_host_page(config).await {
        Ok(host) => host,
        Err(err) => {
            write_fallback(config, None, &err).await;
            return Err(err);
        }
    };

    let (html, summary) = match build_page(client, config, &host).await {
        Ok(built) => built,
        Err(err) => {
            write_fallback(config, Some(&host), &err).await;
            return Err(err);
        }
    };

    write_output(&config.out, &html).await?;
    info!(
        events = summary.events,
        skipped_events = summary.skipped_events,
        segments = summary.segments,
        skipped_segments = summary.skipped_segments,
        path = %config.out.display(),
        "wrote map"
    );
    Ok(summary)
}
