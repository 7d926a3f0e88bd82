//! Route handlers for the operator dashboard and the robot.
//!
//! Operator: start, abort, return home, status and photo views.
//! Robot: polls for the start trigger and control commands, posts telemetry
//! and uploads photos.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Json},
};
use serde::Serialize;

use super::error::ApiError;
use super::server::AppState;
use crate::domain::models::{
    ControlCommand, MissionId, MissionSummary, PhotoEntry, PhotoUpload, PredictionEntry,
};
use crate::services::StatusSnapshot;

#[derive(Debug, Serialize)]
pub struct StartMissionResponse {
    pub ok: bool,
    pub mission_id: MissionId,
}

#[derive(Debug, Serialize)]
pub struct MissionStateResponse {
    pub mission_state: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub ok: bool,
    pub command: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ControlStateResponse {
    pub command: &'static str,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct MissionsResponse {
    pub missions: Vec<MissionSummary>,
}

#[derive(Debug, Serialize)]
pub struct PhotosResponse<T> {
    pub photos: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub status: &'static str,
    pub filename: String,
    pub waypoint_folder: String,
    pub mission_id: MissionId,
}

pub async fn start_mission(State(state): State<Arc<AppState>>) -> Json<StartMissionResponse> {
    Json(StartMissionResponse {
        ok: true,
        mission_id: state.control.start_mission(),
    })
}

/// Robot poll; observing `start` consumes it.
pub async fn mission_state(State(state): State<Arc<AppState>>) -> Json<MissionStateResponse> {
    Json(MissionStateResponse {
        mission_state: state.control.poll_mission_start().as_str(),
    })
}

pub async fn abort_mission(State(state): State<Arc<AppState>>) -> Json<CommandResponse> {
    send_command(&state, ControlCommand::Abort)
}

pub async fn return_home(State(state): State<Arc<AppState>>) -> Json<CommandResponse> {
    send_command(&state, ControlCommand::GoHome)
}

fn send_command(state: &AppState, command: ControlCommand) -> Json<CommandResponse> {
    state.control.set_control_command(command);
    Json(CommandResponse {
        ok: true,
        command: command.as_str(),
    })
}

/// Robot poll; a returned command is consumed.
pub async fn control_state(State(state): State<Arc<AppState>>) -> Json<ControlStateResponse> {
    Json(ControlStateResponse {
        command: ControlCommand::wire_value(state.control.poll_control_command()),
    })
}

/// Telemetry is taken as raw bytes so malformed bodies still reach the core.
pub async fn status_update(State(state): State<Arc<AppState>>, body: Bytes) -> Json<OkResponse> {
    state.control.ingest_status_report(&body);
    Json(OkResponse { ok: true })
}

pub async fn last_status(State(state): State<Arc<AppState>>) -> Json<StatusSnapshot> {
    Json(state.control.current_status_snapshot())
}

pub async fn list_missions(State(state): State<Arc<AppState>>) -> Json<MissionsResponse> {
    Json(MissionsResponse {
        missions: state.control.list_missions(),
    })
}

pub async fn get_mission(
    State(state): State<Arc<AppState>>,
    Path(mission_id): Path<String>,
) -> Result<Json<MissionSummary>, ApiError> {
    state
        .control
        .summarize(&MissionId::from(mission_id.as_str()))
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Mission not found: {mission_id}")))
}

pub async fn latest_photos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PhotosResponse<PhotoEntry>>, ApiError> {
    let photos = state.photos.latest_photos().await?;
    Ok(Json(PhotosResponse { photos }))
}

pub async fn latest_predictions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PhotosResponse<PredictionEntry>>, ApiError> {
    let photos = state.photos.latest_predictions().await?;
    Ok(Json(PhotosResponse { photos }))
}

pub async fn serve_photo(
    State(state): State<Arc<AppState>>,
    Path((mission_id, waypoint_folder, filename)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = state
        .photos
        .read_photo(&mission_id, &waypoint_folder, &filename)
        .await?;
    Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes))
}

/// Multipart fields: `waypoint_index` (default `unknown`), `image_index`
/// (default `0`) and the file in `image`.
pub async fn upload_photo(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut waypoint_index = None;
    let mut image_index = None;
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("waypoint_index") => waypoint_index = Some(field.text().await?),
            Some("image_index") => image_index = Some(field.text().await?),
            Some("image") => image = Some(field.bytes().await?.to_vec()),
            _ => {}
        }
    }

    let Some(bytes) = image else {
        return Err(ApiError::bad_request("no image field"));
    };

    let receipt = state
        .photos
        .upload(PhotoUpload {
            waypoint_index: waypoint_index.unwrap_or_else(|| "unknown".to_string()),
            image_index: image_index.unwrap_or_else(|| "0".to_string()),
            bytes,
        })
        .await?;

    Ok(Json(UploadResponse {
        status: "ok",
        filename: receipt.filename,
        waypoint_folder: receipt.waypoint_folder,
        mission_id: receipt.mission_id,
    }))
}
