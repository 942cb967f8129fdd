//! Custom error types for the publish scheduler.
//!
//! Provides structured error handling with context for different failure scenarios.

use std::fmt;

/// Main error type for the publish scheduler
#[derive(Debug)]
pub enum SchedulerError {
    /// Configuration-related errors
    Config(ConfigError),

    /// Database operation errors
    Database(DatabaseError),

    /// Form-level validation errors (rejects the save)
    Validation(ValidationError),

    /// Schema administration errors (field add/remove, teardown)
    Schema(SchemaError),

    /// Content item errors
    Item(ItemError),

    /// Other errors with context
    Other(String),
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },

    /// Configuration parsing error
    ParseError { path: String, reason: String },
}

/// Database error variants
#[derive(Debug)]
pub enum DatabaseError {
    /// Connection failed
    ConnectionFailed { reason: String },

    /// Query execution failed
    QueryFailed { query: String, reason: String },
}

/// A validation message attached to a single form field.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// One or more field-level validation failures for a submission.
#[derive(Debug)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

/// Schema administration error variants
#[derive(Debug)]
pub enum SchemaError {
    /// Referenced template does not exist in the store
    TemplateNotFound { template: String },

    /// Teardown refused: a scheduling field is still attached to templates
    FieldsInUse { field: String, template_count: i64 },
}

/// Content item error variants
#[derive(Debug)]
pub enum ItemError {
    /// Item not found in the store
    NotFound { item_id: String },

    /// Item references a template the store does not know
    UnknownTemplate { template: String },
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerError::Config(e) => write!(f, "Configuration error: {}", e),
            SchedulerError::Database(e) => write!(f, "Database error: {}", e),
            SchedulerError::Validation(e) => write!(f, "Validation error: {}", e),
            SchedulerError::Schema(e) => write!(f, "Schema error: {}", e),
            SchedulerError::Item(e) => write!(f, "Item error: {}", e),
            SchedulerError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
            ConfigError::ParseError { path, reason } => {
                write!(f, "Failed to parse '{}': {}", path, reason)
            }
        }
    }
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseError::ConnectionFailed { reason } => {
                write!(f, "Database connection failed: {}", reason)
            }
            DatabaseError::QueryFailed { query, reason } => {
                write!(f, "Query '{}' failed: {}", query, reason)
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::TemplateNotFound { template } => {
                write!(f, "Template '{}' not found", template)
            }
            SchemaError::FieldsInUse {
                field,
                template_count,
            } => {
                write!(
                    f,
                    "Field '{}' is still attached to {} template(s); detach it from all templates before removing the scheduling fields",
                    field, template_count
                )
            }
        }
    }
}

impl fmt::Display for ItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemError::NotFound { item_id } => {
                write!(f, "Item '{}' not found", item_id)
            }
            ItemError::UnknownTemplate { template } => {
                write!(f, "Unknown template '{}'", template)
            }
        }
    }
}

impl std::error::Error for SchedulerError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for DatabaseError {}
impl std::error::Error for ValidationError {}
impl std::error::Error for SchemaError {}
impl std::error::Error for ItemError {}

// Conversion from anyhow::Error for code that crosses an anyhow seam
impl From<anyhow::Error> for SchedulerError {
    fn from(err: anyhow::Error) -> Self {
        SchedulerError::Other(err.to_string())
    }
}

// Conversion helpers for sub-errors
impl From<ConfigError> for SchedulerError {
    fn from(err: ConfigError) -> Self {
        SchedulerError::Config(err)
    }
}

impl From<DatabaseError> for SchedulerError {
    fn from(err: DatabaseError) -> Self {
        SchedulerError::Database(err)
    }
}

impl From<ValidationError> for SchedulerError {
    fn from(err: ValidationError) -> Self {
        SchedulerError::Validation(err)
    }
}

impl From<SchemaError> for SchedulerError {
    fn from(err: SchemaError) -> Self {
        SchedulerError::Schema(err)
    }
}

impl From<ItemError> for SchedulerError {
    fn from(err: ItemError) -> Self {
        SchedulerError::Item(err)
    }
}
