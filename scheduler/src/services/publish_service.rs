// File: scheduler/src/services/publish_service.rs
use crate::config::Config;
use crate::constants::settings;
use crate::database::{Database, ItemRecord, SaveOptions, ScheduleActionRecord};
use crate::errors::{ItemError, SchedulerError};
use crate::hooks::{BeforeSaveHook, PublishWindowHook, SaveWarning};
use crate::sweep::SweepReport;
use crate::validation;
use crate::window::{self, WindowAction};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

/// The publish side of the scheduler: the editor save path with its
/// before-save interception, and the periodic sweep.
pub struct PublishService {
    config: Arc<Config>,
    database: Arc<Database>,
    before_save_hooks: Vec<Arc<dyn BeforeSaveHook>>,
}

/// A new item submitted for creation.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub title: String,
    pub path: String,
    pub template: String,
    pub unpublished: bool,
    pub publish_from: Option<String>,
    pub publish_until: Option<String>,
}

/// An editor submission against an existing item. `None` fields keep the
/// stored value; the window pair is always authoritative as submitted.
#[derive(Debug, Clone, Default)]
pub struct ItemEdit {
    pub title: Option<String>,
    pub unpublished: Option<bool>,
    pub publish_from: Option<String>,
    pub publish_until: Option<String>,
}

/// Result of a save: the persisted item plus any hook warnings to surface
/// to the acting user.
#[derive(Debug)]
pub struct SaveOutcome {
    pub item: ItemRecord,
    pub warnings: Vec<SaveWarning>,
}

impl PublishService {
    pub fn new(config: Arc<Config>, database: Arc<Database>) -> Self {
        Self {
            config,
            database,
            before_save_hooks: vec![Arc::new(PublishWindowHook)],
        }
    }

    /// Create and persist a new item. The before-save hooks run against the
    /// fresh record so a window that is already closed (or open) is applied
    /// in the very first write.
    pub async fn create_item(&self, new: NewItem) -> Result<SaveOutcome, SchedulerError> {
        let validated = validation::validate_window(
            new.publish_from.as_deref(),
            new.publish_until.as_deref(),
            self.config.tz(),
        );
        if !validated.is_valid() {
            return Err(SchedulerError::Validation(crate::errors::ValidationError {
                errors: validated.errors,
            }));
        }

        if !self
            .database
            .template_exists(&new.template)
            .await
            .map_err(SchedulerError::from)?
        {
            return Err(ItemError::UnknownTemplate {
                template: new.template,
            }
            .into());
        }

        let now = Utc::now();
        let mut item = ItemRecord {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            path: new.path,
            template: new.template,
            unpublished: new.unpublished,
            trashed: false,
            publish_from: validated.publish_from,
            publish_until: validated.publish_until,
            created_at: now,
            updated_at: now,
        };

        let warnings = self.run_before_save_hooks(&mut item, now);

        self.database
            .insert_item(&item)
            .await
            .map_err(SchedulerError::from)?;

        self.record_warnings(&item, &warnings).await;

        Ok(SaveOutcome { item, warnings })
    }

    /// Persist an editor submission. Window validation runs first and rejects
    /// the whole save; then the before-save hooks correct the status so the
    /// correction lands in the same write as the edit.
    pub async fn save_item(
        &self,
        item_id: &str,
        edit: ItemEdit,
    ) -> Result<SaveOutcome, SchedulerError> {
        let mut item = self
            .database
            .get_item(item_id)
            .await
            .map_err(SchedulerError::from)?
            .ok_or_else(|| ItemError::NotFound {
                item_id: item_id.to_string(),
            })?;

        let validated = validation::validate_window(
            edit.publish_from.as_deref(),
            edit.publish_until.as_deref(),
            self.config.tz(),
        );
        if !validated.is_valid() {
            return Err(SchedulerError::Validation(crate::errors::ValidationError {
                errors: validated.errors,
            }));
        }

        if let Some(title) = edit.title {
            item.title = title;
        }
        if let Some(unpublished) = edit.unpublished {
            item.unpublished = unpublished;
        }
        item.publish_from = validated.publish_from;
        item.publish_until = validated.publish_until;

        let now = Utc::now();
        let warnings = self.run_before_save_hooks(&mut item, now);

        self.database
            .save_item(&item, &SaveOptions::default())
            .await
            .map_err(SchedulerError::from)?;

        self.record_warnings(&item, &warnings).await;

        Ok(SaveOutcome { item, warnings })
    }

    /// Evaluate every candidate item against its window and flip the ones
    /// whose status contradicts it. Flips are saved quietly and audited.
    #[instrument(skip(self))]
    pub async fn run_sweep(&self, now: DateTime<Utc>) -> Result<SweepReport> {
        let applicable = self.applicable_templates().await?;
        if applicable.is_empty() {
            info!("No templates selected for scheduling, sweep skipped");
            return Ok(SweepReport::default());
        }

        let candidates = self.database.sweep_candidates(&applicable).await?;
        let mut report = SweepReport {
            evaluated: candidates.len(),
            ..Default::default()
        };

        for mut item in candidates {
            let action =
                window::evaluate(now, item.publish_from, item.publish_until, item.unpublished);

            match action {
                WindowAction::NoChange => continue,
                WindowAction::Publish => item.unpublished = false,
                WindowAction::Unpublish => item.unpublished = true,
            }

            if let Err(e) = self
                .database
                .save_item(&item, &SaveOptions { quiet: true })
                .await
            {
                error!(
                    "Failed to save status flip for '{}' ({}): {}",
                    item.title, item.id, e
                );
                report.failed += 1;
                continue;
            }

            match action {
                WindowAction::Publish => report.published += 1,
                WindowAction::Unpublish => report.unpublished += 1,
                WindowAction::NoChange => {}
            }

            info!(
                "Sweep {} '{}' (template: {}, id: {}, link: {})",
                action.audit_label(),
                item.title,
                item.template,
                item.id,
                item.path
            );
            self.record_action(&item, action, "sweep").await;
        }

        info!(
            "Sweep completed: {} evaluated, {} published, {} unpublished, {} failed",
            report.evaluated, report.published, report.unpublished, report.failed
        );

        Ok(report)
    }

    /// The stored template selection, falling back to the file configuration
    /// until a selection has been saved.
    pub async fn applicable_templates(&self) -> Result<Vec<String>> {
        match self
            .database
            .get_setting(settings::SCHEDULING_TEMPLATES)
            .await?
        {
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(templates) => Ok(templates),
                Err(e) => {
                    warn!(
                        "Stored scheduling selection is unreadable ({}), using file configuration",
                        e
                    );
                    Ok(self.config.scheduling.templates.clone())
                }
            },
            None => Ok(self.config.scheduling.templates.clone()),
        }
    }

    fn run_before_save_hooks(&self, item: &mut ItemRecord, now: DateTime<Utc>) -> Vec<SaveWarning> {
        let mut warnings = Vec::new();
        for hook in &self.before_save_hooks {
            if let Some(warning) = hook.before_save(item, now) {
                info!(
                    "Hook '{}' adjusted '{}' before save: {}",
                    hook.name(),
                    item.title,
                    warning.message
                );
                warnings.push(warning);
            }
        }
        warnings
    }

    async fn record_warnings(&self, item: &ItemRecord, warnings: &[SaveWarning]) {
        for warning in warnings {
            self.record_action(item, warning.action, "pre_save").await;
        }
    }

    /// Audit failures must not undo a status flip that is already persisted,
    /// so they are logged and swallowed here.
    async fn record_action(&self, item: &ItemRecord, action: WindowAction, triggered_by: &str) {
        let record = ScheduleActionRecord {
            id: Uuid::new_v4().to_string(),
            item_id: item.id.clone(),
            item_title: item.title.clone(),
            template: item.template.clone(),
            path: item.path.clone(),
            action: action.audit_label().to_string(),
            triggered_by: triggered_by.to_string(),
            occurred_at: Utc::now(),
        };

        if let Err(e) = self.database.store_schedule_action(&record).await {
            error!(
                "Failed to store audit record for '{}' ({}): {}",
                item.title, item.id, e
            );
        }
    }
}
