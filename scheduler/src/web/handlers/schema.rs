// Schema administration endpoints: template field sync and teardown.

use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::common::{error_response, internal_error, ApiResponse, ApiResult};
use crate::constants::{fields, settings};
use crate::web::{AppState, TemplateSummary};

#[derive(Deserialize)]
pub struct SchedulingTemplatesRequest {
    pub templates: Vec<String>,
}

pub async fn get_templates(State(state): State<AppState>) -> ApiResult<Value> {
    let templates = state
        .database
        .list_templates()
        .await
        .map_err(internal_error)?;

    let mut summaries = Vec::with_capacity(templates.len());
    for template in &templates {
        let template_fields = state
            .database
            .template_fields(&template.name)
            .await
            .map_err(internal_error)?;
        let scheduling_enabled = template_fields
            .iter()
            .any(|field| field == fields::PUBLISH_FROM);

        summaries.push(TemplateSummary {
            name: template.name.clone(),
            label: template.label.clone(),
            fields: template_fields,
            scheduling_enabled,
        });
    }

    Ok(Json(ApiResponse::success(json!({ "templates": summaries }))))
}

/// Module-configuration save: persist the new selection and re-sync the
/// scheduling fields across all templates.
pub async fn update_scheduling_templates(
    State(state): State<AppState>,
    Json(request): Json<SchedulingTemplatesRequest>,
) -> ApiResult<Value> {
    let encoded = serde_json::to_string(&request.templates)
        .map_err(|e| internal_error(anyhow::anyhow!("selection not encodable: {}", e)))?;
    state
        .database
        .set_setting(settings::SCHEDULING_TEMPLATES, &encoded)
        .await
        .map_err(internal_error)?;

    let report = state
        .schema_service
        .apply_template_selection(&request.templates)
        .await
        .map_err(internal_error)?;

    Ok(Json(ApiResponse::success(json!({
        "templates": request.templates,
        "fields_added": report.fields_added,
        "fields_removed": report.fields_removed,
    }))))
}

/// Teardown attempt. Refused with 409 while any template still carries the
/// scheduling fields.
pub async fn uninstall_scheduling_fields(State(state): State<AppState>) -> ApiResult<Value> {
    state
        .schema_service
        .uninstall()
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(json!({
        "removed_fields": fields::ALL,
    }))))
}
