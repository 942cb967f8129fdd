// Sweep endpoints: manual trigger and audit trail.

use axum::extract::State;
use axum::response::Json;
use chrono::Utc;
use serde_json::{json, Value};

use super::common::{internal_error, ApiResponse, ApiResult};
use crate::constants::limits;
use crate::web::AppState;

/// Run a sweep immediately instead of waiting for the next scheduled tick.
pub async fn run_sweep(State(state): State<AppState>) -> ApiResult<Value> {
    let report = state
        .publish_service
        .run_sweep(Utc::now())
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success(json!({ "report": report }))))
}

pub async fn recent_actions(State(state): State<AppState>) -> ApiResult<Value> {
    let actions = state
        .database
        .recent_schedule_actions(limits::MAX_AUDIT_RECORDS)
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success(json!({ "actions": actions }))))
}
