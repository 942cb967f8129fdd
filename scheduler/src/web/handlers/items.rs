// Content item endpoints: the editor save path lives here.

use axum::extract::{Path, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::common::{convert_item_to_summary, error_response, internal_error, ApiResponse, ApiResult};
use crate::errors::{ItemError, SchedulerError};
use crate::services::{ItemEdit, NewItem};
use crate::web::AppState;

#[derive(Deserialize)]
pub struct CreateItemRequest {
    pub title: String,
    pub path: String,
    pub template: String,
    #[serde(default)]
    pub unpublished: bool,
    pub publish_from: Option<String>,
    pub publish_until: Option<String>,
}

#[derive(Deserialize)]
pub struct SaveItemRequest {
    pub title: Option<String>,
    pub unpublished: Option<bool>,
    pub publish_from: Option<String>,
    pub publish_until: Option<String>,
}

pub async fn list_items(State(state): State<AppState>) -> ApiResult<Value> {
    let items = state.database.list_items().await.map_err(internal_error)?;
    let summaries: Vec<_> = items.iter().map(convert_item_to_summary).collect();

    Ok(Json(ApiResponse::success(json!({ "items": summaries }))))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> ApiResult<Value> {
    let item = state
        .database
        .get_item(&item_id)
        .await
        .map_err(internal_error)?
        .ok_or_else(|| error_response(SchedulerError::Item(ItemError::NotFound { item_id })))?;

    Ok(Json(ApiResponse::success(json!({
        "item": convert_item_to_summary(&item)
    }))))
}

/// Create an item. The before-save hooks run against the fresh record, so
/// the response may already carry scheduling warnings.
pub async fn create_item(
    State(state): State<AppState>,
    Json(request): Json<CreateItemRequest>,
) -> ApiResult<Value> {
    let outcome = state
        .publish_service
        .create_item(NewItem {
            title: request.title,
            path: request.path,
            template: request.template,
            unpublished: request.unpublished,
            publish_from: request.publish_from,
            publish_until: request.publish_until,
        })
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(json!({
        "item": convert_item_to_summary(&outcome.item),
        "warnings": outcome.warnings,
    }))))
}

/// The editor save path: window validation, before-save interception, then
/// the write. Warnings explain any automatic status correction.
pub async fn save_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    Json(request): Json<SaveItemRequest>,
) -> ApiResult<Value> {
    let outcome = state
        .publish_service
        .save_item(
            &item_id,
            ItemEdit {
                title: request.title,
                unpublished: request.unpublished,
                publish_from: request.publish_from,
                publish_until: request.publish_until,
            },
        )
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(json!({
        "item": convert_item_to_summary(&outcome.item),
        "warnings": outcome.warnings,
    }))))
}

/// Audit history for one item.
pub async fn item_actions(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> ApiResult<Value> {
    let actions = state
        .database
        .schedule_actions_for_item(&item_id)
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success(json!({ "actions": actions }))))
}
