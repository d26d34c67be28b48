//! Report and export endpoints over a journal's transactions

use api_types::{
    report::{
        SpendingByTagMonthlyResponse, SpendingByTagResponse, TransactionSummaryResponse,
        YearGroupResponse,
    },
    transaction::TransactionQuery,
};
use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Query, WithRejection};
use engine::ExportFormat;

use crate::{ServerError, mapping, server::ServerState};

pub async fn summary(
    State(state): State<ServerState>,
    WithRejection(Query(query), _): WithRejection<Query<TransactionQuery>, ServerError>,
) -> Result<Json<TransactionSummaryResponse>, ServerError> {
    let summary = state
        .engine
        .summary(query.journal_id, &mapping::filter(&query))
        .await?;
    Ok(Json(mapping::summary(summary)))
}

pub async fn grouped(
    State(state): State<ServerState>,
    WithRejection(Query(query), _): WithRejection<Query<TransactionQuery>, ServerError>,
) -> Result<Json<Vec<YearGroupResponse>>, ServerError> {
    let groups = state
        .engine
        .grouped(query.journal_id, &mapping::filter(&query))
        .await?;
    Ok(Json(groups.into_iter().map(mapping::year_group).collect()))
}

pub async fn spending_by_tag(
    State(state): State<ServerState>,
    WithRejection(Query(query), _): WithRejection<Query<TransactionQuery>, ServerError>,
) -> Result<Json<SpendingByTagResponse>, ServerError> {
    let report = state
        .engine
        .spending_by_tag(query.journal_id, &mapping::filter(&query))
        .await?;
    Ok(Json(mapping::spending_by_tag(report)))
}

pub async fn spending_by_tag_monthly(
    State(state): State<ServerState>,
    WithRejection(Query(query), _): WithRejection<Query<TransactionQuery>, ServerError>,
) -> Result<Json<SpendingByTagMonthlyResponse>, ServerError> {
    let report = state
        .engine
        .spending_by_tag_monthly(query.journal_id, &mapping::filter(&query))
        .await?;
    Ok(Json(mapping::spending_by_tag_monthly(report)))
}

/// Download the matching transactions as `json` (default) or `csv`.
pub async fn export(
    State(state): State<ServerState>,
    WithRejection(Query(query), _): WithRejection<Query<TransactionQuery>, ServerError>,
) -> Result<Response, ServerError> {
    let format = ExportFormat::try_from(query.format.as_deref().unwrap_or("json"))?;
    let export = state
        .engine
        .export(query.journal_id, &mapping::filter(&query), format)
        .await?;

    let disposition = format!("attachment; filename={}", export.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, export.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    )
        .into_response())
}
