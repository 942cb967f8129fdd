use chrono::{DateTime, TimeZone, Utc};
use scheduler::database::ItemRecord;
use uuid::Uuid;

pub mod templates {
    pub const ARTICLE: &str = "article";
    pub const NEWS: &str = "news";
    pub const LANDING: &str = "landing";
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

/// Fixed creation instant so tests can detect timestamp bumps.
pub fn creation_instant() -> DateTime<Utc> {
    utc(2023, 12, 1, 8, 0)
}

pub fn test_item(title: &str, template: &str, unpublished: bool) -> ItemRecord {
    let slug = title.to_lowercase().replace(' ', "-");
    ItemRecord {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        path: format!("/{}/{}/", template, slug),
        template: template.to_string(),
        unpublished,
        trashed: false,
        publish_from: None,
        publish_until: None,
        created_at: creation_instant(),
        updated_at: creation_instant(),
    }
}

pub fn windowed_item(
    title: &str,
    template: &str,
    unpublished: bool,
    publish_from: Option<DateTime<Utc>>,
    publish_until: Option<DateTime<Utc>>,
) -> ItemRecord {
    let mut item = test_item(title, template, unpublished);
    item.publish_from = publish_from;
    item.publish_until = publish_until;
    item
}
