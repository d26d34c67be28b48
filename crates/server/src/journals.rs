//! Journals API endpoints

use api_types::journal::{CreateJournalRequest, JournalResponse, UpdateJournalRequest};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;

use crate::{ServerError, mapping, server::ServerState};

fn not_found(journal_id: Uuid) -> ServerError {
    ServerError::NotFound(format!("journal {journal_id} not found"))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<JournalResponse>>, ServerError> {
    let journals = state.engine.journals().await?;
    Ok(Json(journals.iter().map(mapping::journal).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    WithRejection(Path(journal_id), _): WithRejection<Path<Uuid>, ServerError>,
) -> Result<Json<JournalResponse>, ServerError> {
    state
        .engine
        .journal(journal_id)
        .await?
        .map(|journal| Json(mapping::journal(&journal)))
        .ok_or_else(|| not_found(journal_id))
}

pub async fn create(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateJournalRequest>, ServerError>,
) -> Result<(StatusCode, Json<JournalResponse>), ServerError> {
    let journal = state
        .engine
        .create_journal(&payload.name, &payload.primary_currency)
        .await?;
    Ok((StatusCode::CREATED, Json(mapping::journal(&journal))))
}

pub async fn update(
    State(state): State<ServerState>,
    WithRejection(Path(journal_id), _): WithRejection<Path<Uuid>, ServerError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateJournalRequest>, ServerError>,
) -> Result<Json<JournalResponse>, ServerError> {
    state
        .engine
        .rename_journal(journal_id, &payload.name)
        .await?
        .map(|journal| Json(mapping::journal(&journal)))
        .ok_or_else(|| not_found(journal_id))
}

pub async fn delete(
    State(state): State<ServerState>,
    WithRejection(Path(journal_id), _): WithRejection<Path<Uuid>, ServerError>,
) -> Result<StatusCode, ServerError> {
    if state.engine.delete_journal(journal_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(journal_id))
    }
}

pub async fn close(
    State(state): State<ServerState>,
    WithRejection(Path(journal_id), _): WithRejection<Path<Uuid>, ServerError>,
) -> Result<Json<JournalResponse>, ServerError> {
    state
        .engine
        .close_journal(journal_id)
        .await?
        .map(|journal| Json(mapping::journal(&journal)))
        .ok_or_else(|| not_found(journal_id))
}

pub async fn reopen(
    State(state): State<ServerState>,
    WithRejection(Path(journal_id), _): WithRejection<Path<Uuid>, ServerError>,
) -> Result<Json<JournalResponse>, ServerError> {
    state
        .engine
        .reopen_journal(journal_id)
        .await?
        .map(|journal| Json(mapping::journal(&journal)))
        .ok_or_else(|| not_found(journal_id))
}
