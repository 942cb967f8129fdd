//! Application-wide constants: field names, defaults, retention values.

/// Names of the schema fields owned by the scheduling module.
pub mod fields {
    /// Lower bound of the publish window. Empty means "publish immediately".
    pub const PUBLISH_FROM: &str = "publish_from";

    /// Upper bound of the publish window. Empty means "never unpublish".
    pub const PUBLISH_UNTIL: &str = "publish_until";

    /// Fieldset marker grouping the two date fields in edit forms.
    pub const SCHEDULE_FIELDSET: &str = "schedule";

    /// All fields added to (and removed from) templates as a unit.
    pub const ALL: [&str; 3] = [PUBLISH_FROM, PUBLISH_UNTIL, SCHEDULE_FIELDSET];
}

/// Content tree layout.
pub mod paths {
    /// Items below this path are administrative and never swept.
    pub const ADMIN_PREFIX: &str = "/admin/";
}

/// Keys in the global_settings table.
pub mod settings {
    /// JSON array of template names currently selected for scheduling.
    pub const SCHEDULING_TEMPLATES: &str = "scheduling_templates";
}

/// Default configuration values.
pub mod defaults {
    /// Bind host when none is configured.
    pub const HOST: &str = "127.0.0.1";

    /// Bind port when none is configured.
    pub const PORT: u16 = 8098;

    /// SQLite database location.
    pub const DATABASE_PATH: &str = "data/content.db";

    /// Timezone for editor-submitted dates without an explicit offset.
    pub const TIMEZONE: &str = "UTC";

    /// Days of audit history kept by the retention cleanup.
    pub const AUDIT_RETENTION_DAYS: i64 = 90;
}

/// Cleanup and retention constants.
pub mod cleanup {
    /// Interval between audit-retention cleanup passes, in seconds.
    pub const CLEANUP_INTERVAL_SECONDS: u64 = 3600;
}

/// Limits and constraints.
pub mod limits {
    /// Maximum audit records returned by the actions endpoint.
    pub const MAX_AUDIT_RECORDS: i64 = 100;
}
