use api_types::problem::ProblemDetails;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::QueryRejection;
use engine::EngineError;

pub use server::{ServerState, router, run, run_with_listener};

mod journals;
mod mapping;
mod reports;
mod server;
mod tags;
mod transactions;

pub enum ServerError {
    Engine(EngineError),
    /// Malformed request rejected before reaching the engine.
    Generic(String),
    NotFound(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidName(_)
        | EngineError::InvalidCurrency(_)
        | EngineError::InvalidNote(_)
        | EngineError::InvalidAmount(_)
        | EngineError::InvalidFormat(_)
        | EngineError::InvalidRange(_)
        | EngineError::InvalidTags(_) => StatusCode::BAD_REQUEST,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_)
        | EngineError::JournalClosed(_)
        | EngineError::JournalOpen(_) => StatusCode::CONFLICT,
        EngineError::Export(_) | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn title_for_engine_error(err: &EngineError) -> &'static str {
    match err {
        EngineError::InvalidAmount(_) => "Bad Request - Out of Range",
        other => title_for_status(status_for_engine_error(other)),
    }
}

fn title_for_status(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "Bad Request",
        StatusCode::NOT_FOUND => "Not Found",
        StatusCode::CONFLICT => "Conflict",
        _ => "Internal Server Error",
    }
}

fn detail_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "An unexpected error occurred.".to_string()
        }
        EngineError::Export(msg) => {
            tracing::error!("export failed: {msg}");
            "An unexpected error occurred.".to_string()
        }
        other => {
            tracing::warn!("request failed: {other}");
            other.to_string()
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, title, detail) = match self {
            ServerError::Engine(err) => (
                status_for_engine_error(&err),
                title_for_engine_error(&err),
                detail_for_engine_error(err),
            ),
            ServerError::Generic(detail) => (
                StatusCode::BAD_REQUEST,
                title_for_status(StatusCode::BAD_REQUEST),
                detail,
            ),
            ServerError::NotFound(detail) => (
                StatusCode::NOT_FOUND,
                title_for_status(StatusCode::NOT_FOUND),
                detail,
            ),
        };

        let body = ProblemDetails {
            title: title.to_string(),
            status: status.as_u16(),
            detail,
        };
        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

// Extractor rejections are reported like any other malformed request.

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Generic(rejection.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Generic(rejection.to_string())
    }
}

impl From<PathRejection> for ServerError {
    fn from(rejection: PathRejection) -> Self {
        Self::Generic(rejection.body_text())
    }
}
