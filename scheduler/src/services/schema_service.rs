// File: scheduler/src/services/schema_service.rs
use crate::config::Config;
use crate::constants::fields;
use crate::database::{Database, FieldRecord};
use crate::errors::{SchedulerError, SchemaError};
use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Schema administration: keeps each template's field set in line with the
/// scheduling selection, and tears the scheduling fields down on removal.
pub struct SchemaService {
    database: Arc<Database>,
}

/// Changes made by one selection sync.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SchemaSyncReport {
    pub fields_added: usize,
    pub fields_removed: usize,
}

impl SchemaService {
    pub fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Create the scheduling field definitions. Idempotent.
    pub async fn install(&self) -> Result<()> {
        let now = Utc::now();
        let definitions = [
            FieldRecord {
                name: fields::PUBLISH_FROM.to_string(),
                kind: "datetime".to_string(),
                label: "Publish from".to_string(),
                description: Some("Leave empty to publish immediately.".to_string()),
                created_at: now,
            },
            FieldRecord {
                name: fields::PUBLISH_UNTIL.to_string(),
                kind: "datetime".to_string(),
                label: "Publish until".to_string(),
                description: Some("Leave empty to never unpublish.".to_string()),
                created_at: now,
            },
            FieldRecord {
                name: fields::SCHEDULE_FIELDSET.to_string(),
                kind: "fieldset".to_string(),
                label: "Schedule".to_string(),
                description: None,
                created_at: now,
            },
        ];

        for definition in &definitions {
            self.database.upsert_field(definition).await?;
        }

        Ok(())
    }

    /// Mirror the file-configured templates and their base fields into the
    /// store so schema administration has something to attach to.
    pub async fn sync_templates(&self, config: &Config) -> Result<()> {
        let now = Utc::now();

        for template in config.templates.values() {
            let label = template.label.clone().unwrap_or_else(|| template.name.clone());
            self.database.upsert_template(&template.name, &label).await?;

            for field_name in &template.fields {
                self.database
                    .upsert_field(&FieldRecord {
                        name: field_name.clone(),
                        kind: "text".to_string(),
                        label: field_name.clone(),
                        description: None,
                        created_at: now,
                    })
                    .await?;
                self.database
                    .add_field_to_template(&template.name, field_name)
                    .await?;
            }
        }

        info!("Synchronized {} template definitions", config.templates.len());
        Ok(())
    }

    /// Attach the scheduling fields to every selected template and detach
    /// them everywhere else. Idempotent: re-applying an unchanged selection
    /// reports zero changes.
    ///
    /// Detaching never clears stored per-item window values; re-attaching
    /// makes them effective again.
    pub async fn apply_template_selection(
        &self,
        selected: &[String],
    ) -> Result<SchemaSyncReport> {
        let mut report = SchemaSyncReport::default();

        for name in selected {
            if !self.database.template_exists(name).await? {
                warn!("Scheduling selection lists unknown template '{}', skipped", name);
            }
        }

        for template in self.database.list_templates().await? {
            let wanted = selected.contains(&template.name);

            for field in fields::ALL {
                if wanted {
                    if self
                        .database
                        .add_field_to_template(&template.name, field)
                        .await?
                    {
                        report.fields_added += 1;
                    }
                } else if self
                    .database
                    .remove_field_from_template(&template.name, field)
                    .await?
                {
                    report.fields_removed += 1;
                }
            }
        }

        if report.fields_added > 0 || report.fields_removed > 0 {
            info!(
                "Scheduling fields synchronized: {} added, {} removed",
                report.fields_added, report.fields_removed
            );
        }

        Ok(report)
    }

    /// Remove the scheduling field definitions. Refused while any template
    /// still references one of them; nothing is deleted in that case.
    pub async fn uninstall(&self) -> Result<(), SchedulerError> {
        for field in fields::ALL {
            let count = self
                .database
                .field_template_count(field)
                .await
                .map_err(SchedulerError::from)?;
            if count > 0 {
                return Err(SchemaError::FieldsInUse {
                    field: field.to_string(),
                    template_count: count,
                }
                .into());
            }
        }

        for field in fields::ALL {
            self.database
                .delete_field(field)
                .await
                .map_err(SchedulerError::from)?;
        }

        info!("Scheduling fields removed");
        Ok(())
    }
}
