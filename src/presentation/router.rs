use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{FileLoader, LlmClient, VectorStore};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{chat_handler, health_handler, process_claim_handler};
use crate::presentation::state::AppState;

pub fn create_router<F, L, V>(state: AppState<F, L, V>) -> Router
where
    F: FileLoader + 'static,
    L: LlmClient + 'static,
    V: VectorStore + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let upload_limit = state.settings.server.max_upload_mb * 1024 * 1024;

    Router::new()
        .route("/health", get(health_handler))
        .route("/process_claim", post(process_claim_handler::<F, L, V>))
        .route("/process_claim/", post(process_claim_handler::<F, L, V>))
        .route("/chat", post(chat_handler::<F, L, V>))
        .route("/chat/", post(chat_handler::<F, L, V>))
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
