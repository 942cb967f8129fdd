// File: scheduler/src/main.rs
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use scheduler::config::{ConfigManager, SweepInterval};
use scheduler::constants::{cleanup, settings};
use scheduler::database::Database;
use scheduler::services::{PublishService, SchemaService};
use scheduler::sweep::SweepScheduler;
use scheduler::web::start_web_server;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging with reduced verbosity
    let env_filter = EnvFilter::from_default_env()
        .add_directive("scheduler=info".parse()?)
        .add_directive("tower_http=warn".parse()?)
        .add_directive("tokio_cron_scheduler=warn".parse()?)
        .add_directive("sqlx=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    info!("Starting content publish scheduler");

    // Load configuration
    let config_manager = ConfigManager::new("config".to_string()).await?;
    let config = config_manager.get_current_config();
    info!(
        "Configuration loaded: {} templates, sweep interval {}",
        config.templates.len(),
        SweepInterval::from_config(config.sweep_interval.as_deref()).as_str()
    );

    // Initialize database
    let database = Arc::new(Database::new(&config.database_path).await?);
    info!("Database initialized");

    // Drop audit records past retention before anything else writes new ones
    match database
        .cleanup_old_schedule_actions(config.audit_retention_days)
        .await
    {
        Ok(0) => info!("No expired audit records found"),
        Ok(removed) => warn!(
            "Removed {} audit records older than {} days",
            removed, config.audit_retention_days
        ),
        Err(e) => warn!("Audit cleanup failed on startup: {}", e),
    }

    // Mirror templates into the store and make sure the scheduling fields
    // match the selection
    let schema_service = Arc::new(SchemaService::new(database.clone()));
    schema_service.install().await?;
    schema_service.sync_templates(&config).await?;

    let selection = match database.get_setting(settings::SCHEDULING_TEMPLATES).await? {
        Some(raw) => serde_json::from_str::<Vec<String>>(&raw).unwrap_or_else(|e| {
            warn!(
                "Stored scheduling selection is unreadable ({}), reseeding from configuration",
                e
            );
            config.scheduling.templates.clone()
        }),
        None => {
            let seed = config.scheduling.templates.clone();
            database
                .set_setting(
                    settings::SCHEDULING_TEMPLATES,
                    &serde_json::to_string(&seed)?,
                )
                .await?;
            info!("Seeded scheduling selection from configuration: {:?}", seed);
            seed
        }
    };

    let report = schema_service.apply_template_selection(&selection).await?;
    info!(
        "Schema synchronized: {} fields added, {} removed",
        report.fields_added, report.fields_removed
    );

    // Publish service carries the save path and the sweep
    let publish_service = Arc::new(PublishService::new(config.clone(), database.clone()));
    info!("Publish service initialized");

    // Register the periodic sweep
    let sweep_scheduler =
        SweepScheduler::new(config.clone(), publish_service.clone()).await?;
    sweep_scheduler.start().await?;

    // Periodic audit retention cleanup
    let database_clone = database.clone();
    let retention_days = config.audit_retention_days;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(
            cleanup::CLEANUP_INTERVAL_SECONDS,
        ));
        loop {
            interval.tick().await;
            match database_clone
                .cleanup_old_schedule_actions(retention_days)
                .await
            {
                Ok(removed) if removed > 0 => {
                    warn!("Removed {} expired audit records", removed)
                }
                Ok(_) => {}
                Err(e) => warn!("Periodic audit cleanup failed: {}", e),
            }
        }
    });

    // Serve the editor-facing API; blocks until shutdown
    start_web_server(config, database, publish_service, schema_service).await?;

    Ok(())
}
