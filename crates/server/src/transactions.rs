//! Transactions API endpoints

use api_types::transaction::{
    CreateTransactionRequest, TransactionQuery, TransactionResponse, UpdateTransactionRequest,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::{Query, WithRejection};
use engine::{Page, TransactionCmd};
use uuid::Uuid;

use crate::{ServerError, mapping, server::ServerState};

fn not_found(transaction_id: Uuid) -> ServerError {
    ServerError::NotFound(format!("transaction {transaction_id} not found"))
}

pub(crate) fn check_range(query: &TransactionQuery) -> Result<(), ServerError> {
    if let (Some(from), Some(to)) = (query.from, query.to)
        && from > to
    {
        return Err(ServerError::Generic(
            "The 'from' date must be earlier than or equal to 'to'.".to_string(),
        ));
    }
    Ok(())
}

pub async fn list(
    State(state): State<ServerState>,
    WithRejection(Query(query), _): WithRejection<Query<TransactionQuery>, ServerError>,
) -> Result<Json<Vec<TransactionResponse>>, ServerError> {
    check_range(&query)?;
    let page = Page::new(
        query.page.unwrap_or(1),
        query.page_size.unwrap_or(engine::DEFAULT_PAGE_SIZE as i64),
    );
    let paged = state
        .engine
        .list_transactions(query.journal_id, &mapping::filter(&query), page)
        .await?;
    Ok(Json(paged.items.iter().map(mapping::transaction).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    WithRejection(Path(transaction_id), _): WithRejection<Path<Uuid>, ServerError>,
) -> Result<Json<TransactionResponse>, ServerError> {
    state
        .engine
        .transaction(transaction_id)
        .await?
        .map(|record| Json(mapping::transaction(&record)))
        .ok_or_else(|| not_found(transaction_id))
}

pub async fn create(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateTransactionRequest>, ServerError>,
) -> Result<(StatusCode, Json<TransactionResponse>), ServerError> {
    let mut cmd = TransactionCmd::new(
        mapping::kind_from_api(payload.kind),
        payload.amount,
        payload.occurred_at,
    )
    .tag_ids(payload.tag_ids.unwrap_or_default());
    cmd.note = payload.note;

    let record = state
        .engine
        .create_transaction(payload.journal_id, cmd)
        .await?;
    Ok((StatusCode::CREATED, Json(mapping::transaction(&record))))
}

pub async fn update(
    State(state): State<ServerState>,
    WithRejection(Path(transaction_id), _): WithRejection<Path<Uuid>, ServerError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateTransactionRequest>, ServerError>,
) -> Result<Json<TransactionResponse>, ServerError> {
    let mut cmd = TransactionCmd::new(
        mapping::kind_from_api(payload.kind),
        payload.amount,
        payload.occurred_at,
    )
    .tag_ids(payload.tag_ids.unwrap_or_default());
    cmd.note = payload.note;

    state
        .engine
        .update_transaction(transaction_id, cmd)
        .await?
        .map(|record| Json(mapping::transaction(&record)))
        .ok_or_else(|| not_found(transaction_id))
}

pub async fn delete(
    State(state): State<ServerState>,
    WithRejection(Path(transaction_id), _): WithRejection<Path<Uuid>, ServerError>,
) -> Result<StatusCode, ServerError> {
    if state.engine.delete_transaction(transaction_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(transaction_id))
    }
}
