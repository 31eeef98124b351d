use axum::{
    routing::{get, post},
    Router,
    extract::{rejection::JsonRejection, Json, State},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_http::cors::{CorsLayer, Any};

use crate::api::models::{SummarizeRequest, SummarizeResponse};
use crate::api::response;
use crate::error::{AppError, Result};
use crate::llm::Credential;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/summarize", post(summarize_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

async fn summarize_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SummarizeRequest>, JsonRejection>,
) -> Response {
    let start_time = std::time::Instant::now();

    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "rejected request body");
            return response::error::<()>(rejection.status(), rejection.body_text())
                .into_response();
        }
    };

    match process_summarize_request(&state, req).await {
        Ok(data) => {
            tracing::info!(
                url = %data.url,
                elapsed = ?start_time.elapsed(),
                "summary produced"
            );
            response::success(data).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, elapsed = ?start_time.elapsed(), "request failed");
            err.into_response()
        }
    }
}

async fn process_summarize_request(
    state: &AppState,
    req: SummarizeRequest,
) -> Result<SummarizeResponse> {
    let credential = Credential::new(req.api_key.unwrap_or_default());
    let url = req.url.unwrap_or_default();

    let summary = tokio::time::timeout(
        state.config.request_timeout,
        state.dispatcher.dispatch(&credential, &url),
    )
    .await
    .map_err(|_| AppError::Timeout)??;

    Ok(summary.into())
}
