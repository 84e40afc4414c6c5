use axum::{extract::State, Json};
use serde_json::Value;
use std::sync::Arc;

use crate::{error::ApiResult, state::AppState};

/// Catalog listing: the upstream's raw product records, unfiltered.
pub async fn list_products(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Value>>> {
    let products = state.catalog.fetch_products().await?;
    Ok(Json(products))
}
