// File: scheduler/src/sweep/operations.rs
use crate::config::{Config, SweepInterval};
use crate::services::PublishService;
use anyhow::{anyhow, Result};
use chrono::Utc;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info, instrument};

pub struct SweepScheduler {
    config: Arc<Config>,
    publish_service: Arc<PublishService>,
    scheduler: JobScheduler,
}

impl SweepScheduler {
    pub async fn new(config: Arc<Config>, publish_service: Arc<PublishService>) -> Result<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| anyhow!("Failed to create JobScheduler: {}", e))?;

        Ok(Self {
            config,
            publish_service,
            scheduler,
        })
    }

    #[instrument(skip(self))]
    pub async fn start(&self) -> Result<()> {
        let interval = SweepInterval::from_config(self.config.sweep_interval.as_deref());
        let schedule = interval.cron_expression();

        validate_6_field_cron(schedule)
            .map_err(|e| anyhow!("Invalid sweep schedule '{}': {}", schedule, e))?;

        let publish_service = self.publish_service.clone();

        let job = Job::new_async(schedule, move |_uuid, _scheduler| {
            let publish_service = publish_service.clone();

            Box::pin(async move {
                info!("Executing scheduled publish sweep");

                if let Err(e) = publish_service.run_sweep(Utc::now()).await {
                    error!("Scheduled publish sweep failed: {}", e);
                }
            })
        })
        .map_err(|e| anyhow!("Failed to create sweep job for '{}': {}", schedule, e))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| anyhow!("Failed to add sweep job to scheduler: {}", e))?;

        self.scheduler.start().await?;
        info!(
            "✓ Publish sweep scheduled: {} ({})",
            interval.as_str(),
            schedule
        );

        Ok(())
    }
}

/// Sanity-check a 6-field cron expression before handing it to the job
/// scheduler. The interval table only emits `*`, `*/step` and plain numbers.
fn validate_6_field_cron(schedule: &str) -> Result<()> {
    let parts: Vec<&str> = schedule.split_whitespace().collect();

    if parts.len() != 6 {
        return Err(anyhow!(
            "expected 6 fields (second minute hour day month dayofweek), got {}",
            parts.len()
        ));
    }

    let names = ["second", "minute", "hour", "day", "month", "dayofweek"];
    let ranges: [(u32, u32); 6] = [(0, 59), (0, 59), (0, 23), (1, 31), (1, 12), (0, 7)];

    for (i, field) in parts.iter().enumerate() {
        validate_cron_field(field, names[i], ranges[i].0, ranges[i].1)?;
    }

    Ok(())
}

fn validate_cron_field(field: &str, name: &str, min: u32, max: u32) -> Result<()> {
    if field == "*" {
        return Ok(());
    }

    if let Some(step_str) = field.strip_prefix("*/") {
        let step = step_str
            .parse::<u32>()
            .map_err(|_| anyhow!("invalid {} step value: {}", name, step_str))?;
        if step == 0 {
            return Err(anyhow!("{} step value cannot be 0", name));
        }
        return Ok(());
    }

    let value = field
        .parse::<u32>()
        .map_err(|_| anyhow!("invalid {} value: {}", name, field))?;

    if value < min || value > max {
        return Err(anyhow!(
            "{} value {} is outside valid range {}-{}",
            name,
            value,
            min,
            max
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_interval_expression_validates() {
        let intervals = [
            SweepInterval::EveryMinute,
            SweepInterval::EveryFiveMinutes,
            SweepInterval::EveryFifteenMinutes,
            SweepInterval::EveryThirtyMinutes,
            SweepInterval::Hourly,
            SweepInterval::EverySixHours,
            SweepInterval::Daily,
        ];

        for interval in intervals {
            assert!(
                validate_6_field_cron(interval.cron_expression()).is_ok(),
                "{} must produce a valid expression",
                interval.as_str()
            );
        }
    }

    #[test]
    fn malformed_expressions_are_rejected() {
        assert!(validate_6_field_cron("0 * * * *").is_err());
        assert!(validate_6_field_cron("0 * * * * * *").is_err());
        assert!(validate_6_field_cron("60 * * * * *").is_err());
        assert!(validate_6_field_cron("0 */0 * * * *").is_err());
        assert!(validate_6_field_cron("0 abc * * * *").is_err());
    }
}
