//! Tags API endpoints

use api_types::tag::{CreateTagRequest, TagResponse, UpdateTagRequest};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::{ServerError, mapping, server::ServerState};

fn not_found(tag_id: Uuid) -> ServerError {
    ServerError::NotFound(format!("tag {tag_id} not found"))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<TagResponse>>, ServerError> {
    let tags = state.engine.tags().await?;
    Ok(Json(tags.iter().map(mapping::tag).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    WithRejection(Path(tag_id), _): WithRejection<Path<Uuid>, ServerError>,
) -> Result<Json<TagResponse>, ServerError> {
    state
        .engine
        .tag(tag_id)
        .await?
        .map(|tag| Json(mapping::tag(&tag)))
        .ok_or_else(|| not_found(tag_id))
}

pub async fn create(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateTagRequest>, ServerError>,
) -> Result<(StatusCode, Json<TagResponse>), ServerError> {
    let tag = state.engine.create_tag(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(mapping::tag(&tag))))
}

pub async fn update(
    State(state): State<ServerState>,
    WithRejection(Path(tag_id), _): WithRejection<Path<Uuid>, ServerError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateTagRequest>, ServerError>,
) -> Result<Json<TagResponse>, ServerError> {
    state
        .engine
        .rename_tag(tag_id, &payload.name)
        .await?
        .map(|tag| Json(mapping::tag(&tag)))
        .ok_or_else(|| not_found(tag_id))
}

pub async fn delete(
    State(state): State<ServerState>,
    WithRejection(Path(tag_id), _): WithRejection<Path<Uuid>, ServerError>,
) -> Result<StatusCode, ServerError> {
    if state.engine.delete_tag(tag_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(tag_id))
    }
}
