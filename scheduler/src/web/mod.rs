// File: scheduler/src/web/mod.rs
pub mod handlers;
pub mod server;

pub use server::start_web_server;

use serde::Serialize;
use std::sync::Arc;

use crate::config::Config;
use crate::database::Database;
use crate::services::{PublishService, SchemaService};

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub database: Arc<Database>,
    pub publish_service: Arc<PublishService>,
    pub schema_service: Arc<SchemaService>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        database: Arc<Database>,
        publish_service: Arc<PublishService>,
        schema_service: Arc<SchemaService>,
    ) -> Self {
        Self {
            config,
            database,
            publish_service,
            schema_service,
        }
    }
}

// API response types

#[derive(Debug, Clone, Serialize)]
pub struct ItemSummary {
    pub id: String,
    pub title: String,
    pub path: String,
    pub template: String,
    pub status: String, // "Published" | "Unpublished"
    pub publish_from: Option<String>,
    pub publish_until: Option<String>,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateSummary {
    pub name: String,
    pub label: String,
    pub fields: Vec<String>,
    pub scheduling_enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusSummary {
    pub items: i64,
    pub templates: usize,
    pub scheduling_templates: Vec<String>,
    pub sweep_interval: String,
    pub timezone: String,
}
