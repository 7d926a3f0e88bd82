//! Mission HTTP server.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::domain::models::ServerConfig;
use crate::services::{MissionControl, PhotoIntakeService};

/// Largest accepted request body; photos arrive as multipart uploads.
pub const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Shared state for the mission HTTP server.
pub struct AppState {
    pub control: Arc<MissionControl>,
    pub photos: PhotoIntakeService,
}

impl AppState {
    pub fn new(control: Arc<MissionControl>, photos: PhotoIntakeService) -> Self {
        Self { control, photos }
    }
}

pub struct MissionHttpServer {
    state: Arc<AppState>,
    config: ServerConfig,
}

impl MissionHttpServer {
    pub fn new(state: AppState, config: ServerConfig) -> Self {
        Self {
            state: Arc::new(state),
            config,
        }
    }

    /// Build the router with all endpoints.
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/start_mission", post(handlers::start_mission))
            .route("/mission_state", get(handlers::mission_state))
            .route("/abort_mission", post(handlers::abort_mission))
            .route("/return_home", post(handlers::return_home))
            .route("/control_state", get(handlers::control_state))
            .route("/status_update", post(handlers::status_update))
            .route("/last_status", get(handlers::last_status))
            .route("/missions", get(handlers::list_missions))
            .route("/missions/{mission_id}", get(handlers::get_mission))
            .route("/latest_photos", get(handlers::latest_photos))
            .route("/latest_predictions", get(handlers::latest_predictions))
            .route(
                "/photo/{mission_id}/{wp_folder}/{filename}",
                get(handlers::serve_photo),
            )
            .route("/upload_photo", post(handlers::upload_photo))
            .with_state(self.state.clone())
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
            .layer(TraceLayer::new_for_http())
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = bind_addr(&self.config)?;
        let router = self.build_router();

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "mission HTTP server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

/// Socket address for `config`; IPv6 hosts are given bare, e.g. `::`.
pub fn bind_addr(config: &ServerConfig) -> anyhow::Result<SocketAddr> {
    let ip: IpAddr = config.host.parse()?;
    Ok(SocketAddr::new(ip, config.port))
}
