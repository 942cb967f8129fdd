//! Database record types (entities).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A content item carrying an optional publish window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: String,
    pub title: String,
    pub path: String,
    pub template: String,
    /// Mutually exclusive with published: an item is one or the other.
    pub unpublished: bool,
    pub trashed: bool,
    pub publish_from: Option<DateTime<Utc>>,
    pub publish_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ItemRecord {
    /// True when at least one window bound is set. Items without a window
    /// are never touched by scheduling.
    pub fn has_window(&self) -> bool {
        self.publish_from.is_some() || self.publish_until.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub name: String,
    pub label: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A field definition. Attachment to templates lives in template_fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldRecord {
    pub name: String,
    pub kind: String,
    pub label: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Audit trail entry for one automatic status flip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleActionRecord {
    pub id: String,
    pub item_id: String,
    pub item_title: String,
    pub template: String,
    pub path: String,
    /// "published" or "unpublished"
    pub action: String,
    /// "sweep", "pre_save" or "startup_check"
    pub triggered_by: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalSettingRecord {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}
