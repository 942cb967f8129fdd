//! Schedule action audit trail.

use anyhow::Result;
use sqlx::Row;
use tracing::debug;

use super::records::ScheduleActionRecord;
use super::Database;

impl Database {
    pub async fn store_schedule_action(&self, action: &ScheduleActionRecord) -> Result<()> {
        debug!("Storing schedule action: {}", action.id);

        match sqlx::query(
            r#"
            INSERT INTO schedule_actions (
                id, item_id, item_title, template, path,
                action, triggered_by, occurred_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&action.id)
        .bind(&action.item_id)
        .bind(&action.item_title)
        .bind(&action.template)
        .bind(&action.path)
        .bind(&action.action)
        .bind(&action.triggered_by)
        .bind(action.occurred_at)
        .execute(&self.pool)
        .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::error!("Failed to store schedule action {}: {}", action.id, e);
                Err(e.into())
            }
        }
    }

    pub async fn get_schedule_action_by_id(
        &self,
        action_id: &str,
    ) -> Result<Option<ScheduleActionRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, item_id, item_title, template, path,
                   action, triggered_by, occurred_at
            FROM schedule_actions
            WHERE id = ?
            "#,
        )
        .bind(action_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(row_to_action(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn recent_schedule_actions(&self, limit: i64) -> Result<Vec<ScheduleActionRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, item_id, item_title, template, path,
                   action, triggered_by, occurred_at
            FROM schedule_actions
            ORDER BY occurred_at DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_action).collect()
    }

    pub async fn schedule_actions_for_item(
        &self,
        item_id: &str,
    ) -> Result<Vec<ScheduleActionRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, item_id, item_title, template, path,
                   action, triggered_by, occurred_at
            FROM schedule_actions
            WHERE item_id = ?
            ORDER BY occurred_at DESC
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_action).collect()
    }

    /// Drop audit records older than the retention window. Returns the number
    /// of rows removed.
    pub async fn cleanup_old_schedule_actions(&self, retention_days: i64) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM schedule_actions WHERE occurred_at < datetime('now', ?)",
        )
        .bind(format!("-{} days", retention_days))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

fn row_to_action(row: &sqlx::sqlite::SqliteRow) -> Result<ScheduleActionRecord> {
    Ok(ScheduleActionRecord {
        id: row.try_get("id")?,
        item_id: row.try_get("item_id")?,
        item_title: row.try_get("item_title")?,
        template: row.try_get("template")?,
        path: row.try_get("path")?,
        action: row.try_get("action")?,
        triggered_by: row.try_get("triggered_by")?,
        occurred_at: row.try_get("occurred_at")?,
    })
}
