// File: scheduler/src/services/mod.rs

pub mod publish_service;
pub mod schema_service;

pub use publish_service::{ItemEdit, NewItem, PublishService, SaveOutcome};
pub use schema_service::{SchemaService, SchemaSyncReport};
