//! Content item queries and saves.

use anyhow::Result;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::debug;

use super::records::ItemRecord;
use super::Database;
use crate::constants::paths;

/// Options for persisting an item.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveOptions {
    /// A quiet save leaves `updated_at` untouched and is reserved for
    /// automatic corrections; editor saves bump the timestamp.
    pub quiet: bool,
}

impl Database {
    pub async fn insert_item(&self, item: &ItemRecord) -> Result<()> {
        debug!("Inserting item: {} ({})", item.title, item.id);

        sqlx::query(
            r#"
            INSERT INTO items (
                id, title, path, template, unpublished, trashed,
                publish_from, publish_until, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&item.id)
        .bind(&item.title)
        .bind(&item.path)
        .bind(&item.template)
        .bind(item.unpublished)
        .bind(item.trashed)
        .bind(item.publish_from)
        .bind(item.publish_until)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_item(&self, item_id: &str) -> Result<Option<ItemRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, path, template, unpublished, trashed,
                   publish_from, publish_until, created_at, updated_at
            FROM items
            WHERE id = ?
            "#,
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| row_to_item(&row)).transpose()
    }

    pub async fn list_items(&self) -> Result<Vec<ItemRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, path, template, unpublished, trashed,
                   publish_from, publish_until, created_at, updated_at
            FROM items
            WHERE trashed = 0
            ORDER BY path ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_item).collect()
    }

    /// Persist an item's current state. Quiet saves keep `updated_at` as is
    /// so automatic corrections do not masquerade as edits.
    pub async fn save_item(&self, item: &ItemRecord, options: &SaveOptions) -> Result<()> {
        debug!(
            "Saving item {} (quiet: {})",
            item.id, options.quiet
        );

        let updated_at = if options.quiet {
            item.updated_at
        } else {
            Utc::now()
        };

        let result = sqlx::query(
            r#"
            UPDATE items
            SET title = ?, path = ?, template = ?, unpublished = ?, trashed = ?,
                publish_from = ?, publish_until = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&item.title)
        .bind(&item.path)
        .bind(&item.template)
        .bind(item.unpublished)
        .bind(item.trashed)
        .bind(item.publish_from)
        .bind(item.publish_until)
        .bind(updated_at)
        .bind(&item.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(anyhow::anyhow!("item {} does not exist", item.id));
        }

        Ok(())
    }

    /// Items that can possibly need a status flip: live, outside the
    /// administrative subtree, of an applicable template, and carrying at
    /// least one window bound. The caller applies the window evaluation;
    /// this query only narrows the scan.
    pub async fn sweep_candidates(&self, templates: &[String]) -> Result<Vec<ItemRecord>> {
        if templates.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; templates.len()].join(", ");
        let sql = format!(
            r#"
            SELECT id, title, path, template, unpublished, trashed,
                   publish_from, publish_until, created_at, updated_at
            FROM items
            WHERE trashed = 0
              AND path NOT LIKE ?
              AND (publish_from IS NOT NULL OR publish_until IS NOT NULL)
              AND template IN ({})
            ORDER BY path ASC
            "#,
            placeholders
        );

        let mut query = sqlx::query(&sql).bind(format!("{}%", paths::ADMIN_PREFIX));
        for template in templates {
            query = query.bind(template);
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(row_to_item).collect()
    }

    pub async fn count_items(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE trashed = 0")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn row_to_item(row: &SqliteRow) -> Result<ItemRecord> {
    Ok(ItemRecord {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        path: row.try_get("path")?,
        template: row.try_get("template")?,
        unpublished: row.try_get("unpublished")?,
        trashed: row.try_get("trashed")?,
        publish_from: row.try_get("publish_from")?,
        publish_until: row.try_get("publish_until")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
