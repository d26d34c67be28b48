use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use std::{net::SocketAddr, sync::Arc};

use crate::{journals, reports, tags, transactions};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

impl ServerState {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

/// All endpoints, mounted under `/api`.
///
/// Any origin may call the API.
pub fn router(state: ServerState) -> Router {
    let api = Router::new()
        .route("/journals", get(journals::list).post(journals::create))
        .route(
            "/journals/{id}",
            get(journals::get)
                .put(journals::update)
                .delete(journals::delete),
        )
        .route("/journals/{id}/close", post(journals::close))
        .route("/journals/{id}/reopen", post(journals::reopen))
        .route("/tags", get(tags::list).post(tags::create))
        .route(
            "/tags/{id}",
            get(tags::get).put(tags::update).delete(tags::delete),
        )
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route("/transactions/summary", get(reports::summary))
        .route("/transactions/grouped", get(reports::grouped))
        .route("/transactions/spending-by-tag", get(reports::spending_by_tag))
        .route(
            "/transactions/spending-by-tag-monthly",
            get(reports::spending_by_tag_monthly),
        )
        .route("/transactions/export", get(reports::export))
        .route(
            "/transactions/{id}",
            get(transactions::get)
                .put(transactions::update)
                .delete(transactions::delete),
        );

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(engine: Engine, addr: SocketAddr) {
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(ServerState::new(engine))).await
}
