//! Lifecycle callbacks around item persistence.
//!
//! The set of lifecycle points is small and fixed, so hooks are plain trait
//! objects handed to the publish service at construction time; there is no
//! dynamic event bus. Today the only point is before-save.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::fields;
use crate::database::ItemRecord;
use crate::window::{self, WindowAction};

/// Warning surfaced to the acting user when a hook corrects an item.
#[derive(Debug, Clone, Serialize)]
pub struct SaveWarning {
    pub item_id: String,
    pub action: WindowAction,
    pub message: String,
}

/// Runs synchronously immediately before an item row is written. May mutate
/// the in-memory item so the change lands in the same write.
pub trait BeforeSaveHook: Send + Sync {
    fn name(&self) -> &'static str;

    fn before_save(&self, item: &mut ItemRecord, now: DateTime<Utc>) -> Option<SaveWarning>;
}

/// Corrects an item's published status from its window on every save, so an
/// editor can never persist a status that contradicts the schedule.
pub struct PublishWindowHook;

impl BeforeSaveHook for PublishWindowHook {
    fn name(&self) -> &'static str {
        "publish_window"
    }

    fn before_save(&self, item: &mut ItemRecord, now: DateTime<Utc>) -> Option<SaveWarning> {
        let action = window::evaluate(now, item.publish_from, item.publish_until, item.unpublished);

        match action {
            WindowAction::NoChange => None,
            WindowAction::Publish => {
                item.unpublished = false;
                Some(SaveWarning {
                    item_id: item.id.clone(),
                    action,
                    message: format!(
                        "'{}' was published automatically: the current time is inside its publish window. Adjust the '{}' and '{}' fields to change when it is live.",
                        item.title,
                        fields::PUBLISH_FROM,
                        fields::PUBLISH_UNTIL
                    ),
                })
            }
            WindowAction::Unpublish => {
                item.unpublished = true;
                Some(SaveWarning {
                    item_id: item.id.clone(),
                    action,
                    message: format!(
                        "'{}' was unpublished automatically: the current time is outside its publish window. Adjust the '{}' and '{}' fields to change when it is live.",
                        item.title,
                        fields::PUBLISH_FROM,
                        fields::PUBLISH_UNTIL
                    ),
                })
            }
        }
    }
}
