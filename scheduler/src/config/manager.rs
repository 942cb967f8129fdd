// File: scheduler/src/config/manager.rs
use super::{Config, TemplateConfig};
use crate::errors::ConfigError;
use anyhow::{anyhow, Result};
use chrono_tz::Tz;
use glob::glob;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    pub async fn new(config_dir: String) -> Result<Self> {
        let config = Self::load_configuration(&config_dir).await?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_configuration(config_dir: &str) -> Result<Config> {
        let main_config_path = format!("{}/main.toml", config_dir);
        let main_config_content = fs::read_to_string(&main_config_path)
            .await
            .map_err(|e| ConfigError::LoadFailed {
                path: main_config_path.clone(),
                reason: e.to_string(),
            })?;

        let mut config: Config =
            toml::from_str(&main_config_content).map_err(|e| ConfigError::ParseError {
                path: main_config_path.clone(),
                reason: e.to_string(),
            })?;

        if config.timezone.parse::<Tz>().is_err() {
            return Err(ConfigError::InvalidValue {
                field: "timezone".to_string(),
                reason: format!("'{}' is not an IANA timezone name", config.timezone),
            }
            .into());
        }

        // Load template definitions
        let pattern = format!("{}/templates/*.toml", config_dir);
        let mut templates = HashMap::new();

        for entry in glob(&pattern).map_err(|e| anyhow!("Glob pattern error: {}", e))? {
            let path = entry.map_err(|e| anyhow!("Glob entry error: {}", e))?;
            debug!("Loading template definition: {}", path.display());

            let content = fs::read_to_string(&path)
                .await
                .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))?;

            let template: TemplateConfig =
                toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;

            if templates.insert(template.name.clone(), template).is_some() {
                warn!(
                    "Duplicate template definition in {}, keeping the later file",
                    path.display()
                );
            }
        }

        config.templates = templates;

        // The applicable selection is editor-facing; unknown names are
        // skipped by schema administration, so only warn here.
        for name in &config.scheduling.templates {
            if !config.templates.contains_key(name) {
                warn!(
                    "scheduling.templates lists '{}' but no template file defines it",
                    name
                );
            }
        }

        info!(
            "Loaded {} templates, {} selected for scheduling",
            config.templates.len(),
            config.scheduling.templates.len()
        );

        Ok(config)
    }
}
