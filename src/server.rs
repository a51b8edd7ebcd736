use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::analyze::analyze_text;
use crate::api::types::AnalyzeRequest;
use crate::config::{AnalyzerConfig, ServerConfig};
use crate::providers::groq::GroqProvider;
use crate::providers::CompletionProvider;
use crate::types::AnalysisResult;

pub struct AppState {
    pub provider: Arc<dyn CompletionProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Always answers 200; failures are carried in the body's `error` field.
pub async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<AnalysisResult> {
    tracing::debug!(text_len = request.text.len(), "Received analysis request");

    let result = analyze_text(request, state.provider.as_ref()).await;

    Json(result)
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health_handler))
        .route("/api/analyze/", post(analyze_handler))
        .route("/api/analyze", post(analyze_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(
    server_config: ServerConfig,
    analyzer_config: AnalyzerConfig,
) -> anyhow::Result<()> {
    if analyzer_config.api_key.is_none() {
        tracing::warn!("GROQ_API_KEY is not set; analysis requests will be rejected");
    }

    let provider = GroqProvider::new(analyzer_config)?;
    let upstream = provider.config();
    tracing::info!(
        model = %upstream.model,
        connect_timeout_secs = upstream.connect_timeout.as_secs(),
        read_timeout_secs = upstream.read_timeout.as_secs(),
        "Configured upstream model API"
    );

    let state = Arc::new(AppState::new(Arc::new(provider)));
    let app = router(state);

    let addr = server_config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
