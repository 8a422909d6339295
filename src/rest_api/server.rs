//! # REST API HTTP Server
//!
//! Axum router over the DocumentStore. Handlers translate between HTTP
//! shapes and store operations; all behavior lives in the store.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::config::HttpConfig;
use crate::index::SearchQuery;
use crate::observability::{Event, Logger};
use crate::revision::{DocumentId, RevisionId};
use crate::store::{DocumentStore, DocumentSummary};

use super::errors::RestError;
use super::request::{
    CreateDocumentRequest, HistoryParams, ListParams, PromoteRequest, StateParam,
    UpdateDocumentRequest,
};
use super::response::{DocumentResponse, RevisionResponse, SearchHit};

/// Shared handler state
type ServerState = Arc<DocumentStore>;

/// Build the router over a store.
pub fn router(store: Arc<DocumentStore>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/documents", get(list_documents_handler))
        .route("/documents", post(create_document_handler))
        .route("/documents/{id}", get(get_document_handler))
        .route("/documents/{id}", put(update_document_handler))
        .route("/documents/{id}/promote", post(promote_handler))
        .route("/documents/{id}/revisions", get(list_revisions_handler))
        .route(
            "/documents/{id}/revisions/{revision_id}",
            get(get_revision_handler),
        )
        .route("/documents/{id}/history", get(history_handler))
        .route("/documents/{id}/states", get(states_handler))
        .route("/search", post(search_handler))
        .with_state(store)
}

/// REST server wrapping the router with bind configuration.
pub struct RestServer {
    config: HttpConfig,
    router: Router,
}

impl RestServer {
    pub fn new(store: Arc<DocumentStore>, config: HttpConfig) -> Self {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        let router = router(store).layer(cors);
        Self { config, router }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process exits.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        Logger::info(Event::Serving, &[("addr", &addr.to_string())]);
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

async fn health_handler() -> Json<Value> {
    Json(json!({"status": "ok", "service": "stratadb"}))
}

async fn list_documents_handler(
    State(store): State<ServerState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<DocumentSummary>>, RestError> {
    let summaries = store.list_documents(params.size, params.from)?;
    Ok(Json(summaries))
}

async fn create_document_handler(
    State(store): State<ServerState>,
    Json(body): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentResponse>), RestError> {
    let revision = store.create_document(body.content, body.author, &body.message)?;
    Ok((
        StatusCode::CREATED,
        Json(DocumentResponse::from_revision(&revision)),
    ))
}

async fn get_document_handler(
    State(store): State<ServerState>,
    Path(id): Path<DocumentId>,
    Query(params): Query<StateParam>,
) -> Result<Json<DocumentResponse>, RestError> {
    let revision = store.get_document(&id, params.state.as_deref())?;
    Ok(Json(DocumentResponse::from_revision(&revision)))
}

async fn update_document_handler(
    State(store): State<ServerState>,
    Path(id): Path<DocumentId>,
    Query(params): Query<StateParam>,
    Json(body): Json<UpdateDocumentRequest>,
) -> Result<Json<DocumentResponse>, RestError> {
    let revision = store.update_document(
        &id,
        params.state.as_deref(),
        body.content,
        body.author,
        &body.message,
    )?;
    Ok(Json(DocumentResponse::from_revision(&revision)))
}

async fn promote_handler(
    State(store): State<ServerState>,
    Path(id): Path<DocumentId>,
    Json(body): Json<PromoteRequest>,
) -> Result<Json<DocumentResponse>, RestError> {
    let revision = store.promote(&id, &body.from, &body.to, body.author, &body.message)?;
    Ok(Json(DocumentResponse::from_revision(&revision)))
}

async fn list_revisions_handler(
    State(store): State<ServerState>,
    Path(id): Path<DocumentId>,
    Query(params): Query<StateParam>,
) -> Result<Json<Vec<RevisionResponse>>, RestError> {
    let revisions = store.list_revisions(&id, params.state.as_deref())?;
    Ok(Json(
        revisions
            .iter()
            .map(|r| RevisionResponse::from_revision(r))
            .collect(),
    ))
}

async fn get_revision_handler(
    State(store): State<ServerState>,
    Path((id, revision_id)): Path<(DocumentId, RevisionId)>,
) -> Result<Json<RevisionResponse>, RestError> {
    let revision = store.get_revision(&id, &revision_id)?;
    Ok(Json(RevisionResponse::from_revision(&revision)))
}

async fn history_handler(
    State(store): State<ServerState>,
    Path(id): Path<DocumentId>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<RevisionResponse>>, RestError> {
    let states = params.state_names();
    if states.is_empty() {
        return Err(RestError::MissingParam("states"));
    }
    let revisions = store.history_across(&id, &states)?;
    Ok(Json(
        revisions
            .iter()
            .map(|r| RevisionResponse::from_revision(r))
            .collect(),
    ))
}

async fn states_handler(
    State(store): State<ServerState>,
    Path(id): Path<DocumentId>,
) -> Result<Json<Vec<String>>, RestError> {
    Ok(Json(store.states(&id)?))
}

async fn search_handler(
    State(store): State<ServerState>,
    Json(query): Json<SearchQuery>,
) -> Result<Json<Vec<SearchHit>>, RestError> {
    let hits = store.search(&query)?;
    Ok(Json(hits.iter().map(SearchHit::from_entry).collect()))
}
