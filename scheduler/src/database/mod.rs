//! Database layer for the publish scheduler.
//!
//! This module provides SQLite persistence for:
//! - Content items (the schedulable entities)
//! - Templates and field attachments (schema administration)
//! - Schedule actions (audit trail of automatic publish/unpublish flips)
//! - Global settings (the stored scheduling selection)
//!
//! The module is organized into submodules:
//! - `records` - All record types (entities)
//! - `items` - Content item queries and saves
//! - `templates` - Template and field administration
//! - `settings` - Key-value settings
//! - `audit` - Schedule action history

mod audit;
mod items;
mod records;
mod settings;
mod templates;

pub use items::SaveOptions;
pub use records::*;

use anyhow::Result;
use chrono::Utc;
use sqlx::{Pool, Sqlite, SqlitePool};
use std::path::Path;
use tracing::{error, info};
use uuid::Uuid;

pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Expose pool for integration test queries
    #[allow(dead_code)]
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn new(database_path: &str) -> Result<Self> {
        info!("Database path: {}", database_path);

        if let Some(parent) = Path::new(database_path).parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                error!("Failed to create parent directory {:?}: {}", parent, e);
                return Err(e.into());
            }
        }

        let database_url = format!("sqlite:{}?mode=rwc", database_path);
        let pool = match SqlitePool::connect(&database_url).await {
            Ok(pool) => pool,
            Err(e) => {
                error!(
                    "Failed to connect to database at {}: {}",
                    database_path, e
                );
                return Err(e.into());
            }
        };

        let database = Self { pool };

        match database.initialize_tables().await {
            Ok(_) => info!("Database tables initialized"),
            Err(e) => {
                error!("Database table initialization failed: {}", e);
                return Err(e);
            }
        }

        match database.test_database().await {
            Ok(_) => info!("Database connectivity test successful"),
            Err(e) => {
                error!("Database connectivity test failed: {}", e);
                return Err(e);
            }
        }

        Ok(database)
    }

    async fn initialize_tables(&self) -> Result<()> {
        let items_table_sql = r#"
            CREATE TABLE IF NOT EXISTS items (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                path TEXT UNIQUE NOT NULL,
                template TEXT NOT NULL,
                unpublished BOOLEAN NOT NULL DEFAULT 0,
                trashed BOOLEAN NOT NULL DEFAULT 0,
                publish_from DATETIME,
                publish_until DATETIME,
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL
            )
        "#;
        if let Err(e) = sqlx::query(items_table_sql).execute(&self.pool).await {
            error!("Failed to create items table: {}", e);
            return Err(e.into());
        }

        let items_template_idx =
            "CREATE INDEX IF NOT EXISTS idx_items_template ON items(template)";
        if let Err(e) = sqlx::query(items_template_idx).execute(&self.pool).await {
            error!("Failed to create items template index: {}", e);
            return Err(e.into());
        }

        let items_window_idx =
            "CREATE INDEX IF NOT EXISTS idx_items_window ON items(publish_from, publish_until)";
        if let Err(e) = sqlx::query(items_window_idx).execute(&self.pool).await {
            error!("Failed to create items window index: {}", e);
            return Err(e.into());
        }

        let templates_table_sql = r#"
            CREATE TABLE IF NOT EXISTS templates (
                name TEXT PRIMARY KEY,
                label TEXT NOT NULL,
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL
            )
        "#;
        if let Err(e) = sqlx::query(templates_table_sql).execute(&self.pool).await {
            error!("Failed to create templates table: {}", e);
            return Err(e.into());
        }

        let fields_table_sql = r#"
            CREATE TABLE IF NOT EXISTS fields (
                name TEXT PRIMARY KEY,
                kind TEXT NOT NULL,
                label TEXT NOT NULL,
                description TEXT,
                created_at DATETIME NOT NULL
            )
        "#;
        if let Err(e) = sqlx::query(fields_table_sql).execute(&self.pool).await {
            error!("Failed to create fields table: {}", e);
            return Err(e.into());
        }

        let template_fields_table_sql = r#"
            CREATE TABLE IF NOT EXISTS template_fields (
                template TEXT NOT NULL REFERENCES templates(name),
                field TEXT NOT NULL REFERENCES fields(name),
                added_at DATETIME NOT NULL,
                PRIMARY KEY (template, field)
            )
        "#;
        if let Err(e) = sqlx::query(template_fields_table_sql)
            .execute(&self.pool)
            .await
        {
            error!("Failed to create template_fields table: {}", e);
            return Err(e.into());
        }

        let template_fields_idx =
            "CREATE INDEX IF NOT EXISTS idx_template_fields_field ON template_fields(field)";
        if let Err(e) = sqlx::query(template_fields_idx).execute(&self.pool).await {
            error!("Failed to create template_fields field index: {}", e);
            return Err(e.into());
        }

        let actions_table_sql = r#"
            CREATE TABLE IF NOT EXISTS schedule_actions (
                id TEXT PRIMARY KEY,
                item_id TEXT NOT NULL,
                item_title TEXT NOT NULL,
                template TEXT NOT NULL,
                path TEXT NOT NULL,
                action TEXT NOT NULL,
                triggered_by TEXT NOT NULL,
                occurred_at DATETIME NOT NULL
            )
        "#;
        if let Err(e) = sqlx::query(actions_table_sql).execute(&self.pool).await {
            error!("Failed to create schedule_actions table: {}", e);
            return Err(e.into());
        }

        let actions_item_idx = "CREATE INDEX IF NOT EXISTS idx_actions_item ON schedule_actions(item_id, occurred_at DESC)";
        if let Err(e) = sqlx::query(actions_item_idx).execute(&self.pool).await {
            error!("Failed to create schedule_actions item index: {}", e);
            return Err(e.into());
        }

        let actions_time_idx =
            "CREATE INDEX IF NOT EXISTS idx_actions_time ON schedule_actions(occurred_at DESC)";
        if let Err(e) = sqlx::query(actions_time_idx).execute(&self.pool).await {
            error!("Failed to create schedule_actions time index: {}", e);
            return Err(e.into());
        }

        let settings_table_sql = r#"
            CREATE TABLE IF NOT EXISTS global_settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at DATETIME NOT NULL
            )
        "#;
        if let Err(e) = sqlx::query(settings_table_sql).execute(&self.pool).await {
            error!("Failed to create global_settings table: {}", e);
            return Err(e.into());
        }

        Ok(())
    }

    /// Round-trip a throwaway audit record to prove the database is writable.
    async fn test_database(&self) -> Result<()> {
        let probe = ScheduleActionRecord {
            id: Uuid::new_v4().to_string(),
            item_id: "connectivity-probe".to_string(),
            item_title: "connectivity probe".to_string(),
            template: "none".to_string(),
            path: "/".to_string(),
            action: "unchanged".to_string(),
            triggered_by: "startup_check".to_string(),
            occurred_at: Utc::now(),
        };

        self.store_schedule_action(&probe).await?;

        let found = self.get_schedule_action_by_id(&probe.id).await?;
        if found.is_none() {
            return Err(anyhow::anyhow!("test record not readable after insert"));
        }

        sqlx::query("DELETE FROM schedule_actions WHERE id = ?")
            .bind(&probe.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
