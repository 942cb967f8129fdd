// Service status endpoint.

use axum::extract::State;
use axum::response::Json;

use super::common::{internal_error, ApiResponse, ApiResult};
use crate::config::SweepInterval;
use crate::web::{AppState, StatusSummary};

pub async fn get_status(State(state): State<AppState>) -> ApiResult<StatusSummary> {
    let items = state.database.count_items().await.map_err(internal_error)?;
    let scheduling_templates = state
        .publish_service
        .applicable_templates()
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success(StatusSummary {
        items,
        templates: state.config.templates.len(),
        scheduling_templates,
        sweep_interval: SweepInterval::from_config(state.config.sweep_interval.as_deref())
            .as_str()
            .to_string(),
        timezone: state.config.timezone.clone(),
    })))
}
