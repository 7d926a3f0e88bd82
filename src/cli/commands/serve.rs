//! Implementation of the `mission-relay serve` command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use super::load_config;
use crate::adapters::detection::HttpDetector;
use crate::adapters::http::{AppState, MissionHttpServer};
use crate::adapters::photos::FsPhotoStore;
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::LoggerImpl;
use crate::services::{MissionControl, PhotoIntakeService};

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Configuration file (defaults to mission-relay.yaml layering)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Interface to bind, overrides server.host
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overrides server.port
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

/// Wire the mission core, photo store and detector into an HTTP server.
pub fn build_server(config: &Config) -> Result<MissionHttpServer> {
    let control = Arc::new(MissionControl::new());
    let store = Arc::new(FsPhotoStore::new(config.photos.root_dir.clone()));

    let mut photos = PhotoIntakeService::new(control.clone(), store)
        .with_latest_limit(config.photos.latest_limit);
    if config.detection.enabled {
        let detector = HttpDetector::from_config(&config.detection)
            .context("Failed to build detection client")?;
        info!(endpoint = %detector.endpoint(), "object detection enabled");
        photos = photos.with_detector(Arc::new(detector), config.detection.min_confidence);
    } else {
        warn!("object detection disabled; photos are stored without predictions");
    }

    Ok(MissionHttpServer::new(
        AppState::new(control, photos),
        config.server.clone(),
    ))
}

pub async fn execute(args: ServeArgs, _json_mode: bool) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    args.apply_overrides(&mut config);
    ConfigLoader::validate(&config)?;

    let _logger = LoggerImpl::init(&config.logging)?;
    info!(
        host = %config.server.host,
        port = config.server.port,
        photo_root = %config.photos.root_dir.display(),
        "starting mission relay"
    );

    let server = build_server(&config)?;
    server
        .serve_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for shutdown signal");
            }
            info!("shutdown signal received");
        })
        .await
}
