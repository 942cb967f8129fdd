use scheduler::config::{Config, SchedulingConfig, TemplateConfig};
use std::collections::HashMap;

/// Configuration used by integration tests: three templates, two of them
/// selected for scheduling.
pub fn test_config() -> Config {
    let mut templates = HashMap::new();
    for (name, label) in [
        ("article", "Article"),
        ("news", "News item"),
        ("landing", "Landing page"),
    ] {
        templates.insert(
            name.to_string(),
            TemplateConfig {
                name: name.to_string(),
                label: Some(label.to_string()),
                fields: vec!["title".to_string(), "body".to_string()],
            },
        );
    }

    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_path: "unused-in-tests".to_string(),
        timezone: "UTC".to_string(),
        sweep_interval: Some("hourly".to_string()),
        audit_retention_days: 30,
        scheduling: SchedulingConfig {
            templates: vec!["article".to_string(), "news".to_string()],
        },
        templates,
    }
}
