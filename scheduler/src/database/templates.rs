//! Template and field administration queries.
//!
//! Schema administration is a set-membership exercise: attach or detach the
//! scheduling fields per template, and count references before teardown.
//! All operations here are idempotent.

use anyhow::Result;
use chrono::Utc;
use sqlx::Row;
use tracing::debug;

use super::records::{FieldRecord, TemplateRecord};
use super::Database;

impl Database {
    pub async fn upsert_template(&self, name: &str, label: &str) -> Result<()> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO templates (name, label, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(name) DO UPDATE SET label = excluded.label, updated_at = excluded.updated_at
            "#,
        )
        .bind(name)
        .bind(label)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn list_templates(&self) -> Result<Vec<TemplateRecord>> {
        let rows = sqlx::query(
            "SELECT name, label, created_at, updated_at FROM templates ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(TemplateRecord {
                    name: row.try_get("name")?,
                    label: row.try_get("label")?,
                    created_at: row.try_get("created_at")?,
                    updated_at: row.try_get("updated_at")?,
                })
            })
            .collect()
    }

    pub async fn template_exists(&self, name: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM templates WHERE name = ?")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    /// Create a field definition if it does not exist yet.
    pub async fn upsert_field(&self, field: &FieldRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO fields (name, kind, label, description, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&field.name)
        .bind(&field.kind)
        .bind(&field.label)
        .bind(&field.description)
        .bind(field.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete_field(&self, name: &str) -> Result<()> {
        sqlx::query("DELETE FROM fields WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Attach a field to a template. Returns true when the attachment was
    /// newly created, false when it already existed.
    pub async fn add_field_to_template(&self, template: &str, field: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO template_fields (template, field, added_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(template)
        .bind(field)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        let added = result.rows_affected() > 0;
        if added {
            debug!("Attached field '{}' to template '{}'", field, template);
        }
        Ok(added)
    }

    /// Detach a field from a template. Returns true when an attachment was
    /// actually removed.
    pub async fn remove_field_from_template(&self, template: &str, field: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM template_fields WHERE template = ? AND field = ?")
            .bind(template)
            .bind(field)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            debug!("Detached field '{}' from template '{}'", field, template);
        }
        Ok(removed)
    }

    pub async fn template_fields(&self, template: &str) -> Result<Vec<String>> {
        let fields: Vec<String> = sqlx::query_scalar(
            "SELECT field FROM template_fields WHERE template = ? ORDER BY field ASC",
        )
        .bind(template)
        .fetch_all(&self.pool)
        .await?;
        Ok(fields)
    }

    /// Number of templates a field is still attached to. Teardown is refused
    /// while this is non-zero.
    pub async fn field_template_count(&self, field: &str) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM template_fields WHERE field = ?")
                .bind(field)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
