// Common types and utilities for API handlers

use axum::{http::StatusCode, response::Json};
use chrono::Utc;
use serde::Serialize;

use crate::database::ItemRecord;
use crate::errors::SchedulerError;
use crate::web::ItemSummary;

// Helper type for API responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<()>>)>;

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Map a service error to the HTTP status it deserves.
pub fn error_response(error: SchedulerError) -> (StatusCode, Json<ApiResponse<()>>) {
    let status = match &error {
        SchedulerError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SchedulerError::Item(crate::errors::ItemError::NotFound { .. }) => StatusCode::NOT_FOUND,
        SchedulerError::Item(crate::errors::ItemError::UnknownTemplate { .. }) => {
            StatusCode::BAD_REQUEST
        }
        SchedulerError::Schema(crate::errors::SchemaError::FieldsInUse { .. }) => {
            StatusCode::CONFLICT
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(ApiResponse::error(error.to_string())))
}

pub fn internal_error(error: anyhow::Error) -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(error.to_string())),
    )
}

// Conversion helpers

pub fn convert_item_to_summary(item: &ItemRecord) -> ItemSummary {
    ItemSummary {
        id: item.id.clone(),
        title: item.title.clone(),
        path: item.path.clone(),
        template: item.template.clone(),
        status: if item.unpublished {
            "Unpublished".to_string()
        } else {
            "Published".to_string()
        },
        publish_from: item.publish_from.map(|t| t.to_rfc3339()),
        publish_until: item.publish_until.map(|t| t.to_rfc3339()),
        updated_at: item.updated_at.to_rfc3339(),
    }
}
