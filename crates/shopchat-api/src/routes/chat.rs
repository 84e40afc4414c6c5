use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use shopchat_catalog::ProductSummary;

use crate::{error::ApiResult, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "sessionId")]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
    pub products: Vec<ProductSummary>,
    #[serde(rename = "type")]
    pub response_type: &'static str,
}

/// Chat endpoint: one full recommendation pipeline run per call
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let session_id = request
        .session_id
        .unwrap_or_else(|| "anonymous".to_string());

    let outcome = state
        .recommender
        .chat(&session_id, &request.message)
        .await?;

    let response_type = if outcome.products.is_empty() {
        "text"
    } else {
        "product_recommendation"
    };

    Ok(Json(ChatResponse {
        message: outcome.message,
        products: outcome.products,
        response_type,
    }))
}
