// File: scheduler/src/config/mod.rs
pub mod manager;
pub use manager::ConfigManager;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

use crate::constants::defaults;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Recurrence of the scheduled sweep; absent falls back to hourly.
    pub sweep_interval: Option<String>,
    #[serde(default = "default_audit_retention_days")]
    pub audit_retention_days: i64,
    #[serde(default)]
    pub scheduling: SchedulingConfig,
    // Populated from individual template definition files
    #[serde(skip)]
    pub templates: HashMap<String, TemplateConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// Templates whose items participate in scheduled publishing. Seeds the
    /// stored selection on first start.
    #[serde(default)]
    pub templates: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub name: String,
    pub label: Option<String>,
    #[serde(default)]
    pub fields: Vec<String>,
}

impl Config {
    /// Parsed timezone. Validated at load time, so the fallback only guards
    /// hand-built configs.
    pub fn tz(&self) -> chrono_tz::Tz {
        self.timezone.parse().unwrap_or(chrono_tz::UTC)
    }
}

fn default_host() -> String {
    defaults::HOST.to_string()
}

fn default_port() -> u16 {
    defaults::PORT
}

fn default_database_path() -> String {
    defaults::DATABASE_PATH.to_string()
}

fn default_timezone() -> String {
    defaults::TIMEZONE.to_string()
}

fn default_audit_retention_days() -> i64 {
    defaults::AUDIT_RETENTION_DAYS
}

/// Recurrence of the scheduled sweep, from a fixed enumerated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepInterval {
    EveryMinute,
    EveryFiveMinutes,
    EveryFifteenMinutes,
    EveryThirtyMinutes,
    Hourly,
    EverySixHours,
    Daily,
}

impl SweepInterval {
    /// Resolve the configured value. Absent or unrecognized values fall back
    /// to hourly rather than failing startup.
    pub fn from_config(value: Option<&str>) -> Self {
        match value {
            None => SweepInterval::Hourly,
            Some("every_minute") => SweepInterval::EveryMinute,
            Some("every_five_minutes") => SweepInterval::EveryFiveMinutes,
            Some("every_fifteen_minutes") => SweepInterval::EveryFifteenMinutes,
            Some("every_thirty_minutes") => SweepInterval::EveryThirtyMinutes,
            Some("hourly") => SweepInterval::Hourly,
            Some("every_six_hours") => SweepInterval::EverySixHours,
            Some("daily") => SweepInterval::Daily,
            Some(other) => {
                warn!(
                    "Unrecognized sweep_interval '{}', falling back to hourly",
                    other
                );
                SweepInterval::Hourly
            }
        }
    }

    /// 6-field cron expression (sec min hour day month dow) understood by the
    /// job scheduler.
    pub fn cron_expression(&self) -> &'static str {
        match self {
            SweepInterval::EveryMinute => "0 * * * * *",
            SweepInterval::EveryFiveMinutes => "0 */5 * * * *",
            SweepInterval::EveryFifteenMinutes => "0 */15 * * * *",
            SweepInterval::EveryThirtyMinutes => "0 */30 * * * *",
            SweepInterval::Hourly => "0 0 * * * *",
            SweepInterval::EverySixHours => "0 0 */6 * * *",
            SweepInterval::Daily => "0 0 0 * * *",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SweepInterval::EveryMinute => "every_minute",
            SweepInterval::EveryFiveMinutes => "every_five_minutes",
            SweepInterval::EveryFifteenMinutes => "every_fifteen_minutes",
            SweepInterval::EveryThirtyMinutes => "every_thirty_minutes",
            SweepInterval::Hourly => "hourly",
            SweepInterval::EverySixHours => "every_six_hours",
            SweepInterval::Daily => "daily",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Some("every_minute"), SweepInterval::EveryMinute)]
    #[test_case(Some("every_five_minutes"), SweepInterval::EveryFiveMinutes)]
    #[test_case(Some("every_fifteen_minutes"), SweepInterval::EveryFifteenMinutes)]
    #[test_case(Some("every_thirty_minutes"), SweepInterval::EveryThirtyMinutes)]
    #[test_case(Some("hourly"), SweepInterval::Hourly)]
    #[test_case(Some("every_six_hours"), SweepInterval::EverySixHours)]
    #[test_case(Some("daily"), SweepInterval::Daily)]
    #[test_case(None, SweepInterval::Hourly; "absent defaults to hourly")]
    #[test_case(Some("fortnightly"), SweepInterval::Hourly; "unknown defaults to hourly")]
    fn interval_resolution(value: Option<&str>, expected: SweepInterval) {
        assert_eq!(SweepInterval::from_config(value), expected);
    }

    #[test]
    fn every_interval_has_a_six_field_expression() {
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
            let fields: Vec<&str> = interval.cron_expression().split_whitespace().collect();
            assert_eq!(fields.len(), 6, "{}", interval.as_str());
        }
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8098);
        assert_eq!(config.timezone, "UTC");
        assert_eq!(config.sweep_interval, None);
        assert_eq!(config.audit_retention_days, 90);
        assert!(config.scheduling.templates.is_empty());
    }
}
