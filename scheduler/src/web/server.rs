// File: scheduler/src/web/server.rs
use crate::config::Config;
use crate::database::Database;
use crate::services::{PublishService, SchemaService};
use crate::web::{handlers, AppState};
use anyhow::Result;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub async fn start_web_server(
    config: Arc<Config>,
    database: Arc<Database>,
    publish_service: Arc<PublishService>,
    schema_service: Arc<SchemaService>,
) -> Result<()> {
    let state = AppState::new(config, database, publish_service, schema_service);

    let app = create_router(state.clone());
    let addr = format!("{}:{}", state.config.host, state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

fn create_router(state: AppState) -> Router {
    Router::new()
        // === CONTENT ROUTES ===
        .route(
            "/api/items",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route(
            "/api/items/{item_id}",
            get(handlers::get_item).put(handlers::save_item),
        )
        .route(
            "/api/items/{item_id}/actions",
            get(handlers::item_actions),
        )
        // === SCHEMA / MODULE CONFIGURATION ROUTES ===
        .route("/api/schema/templates", get(handlers::get_templates))
        .route(
            "/api/scheduling/templates",
            put(handlers::update_scheduling_templates),
        )
        .route(
            "/api/scheduling/uninstall",
            post(handlers::uninstall_scheduling_fields),
        )
        // === SWEEP ROUTES ===
        .route("/api/sweep/run", post(handlers::run_sweep))
        .route("/api/sweep/actions", get(handlers::recent_actions))
        // === STATUS ===
        .route("/api/status", get(handlers::get_status))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
