use scheduler::config::Config;
use scheduler::database::Database;
use scheduler::services::SchemaService;
use std::sync::Arc;
use tempfile::TempDir;

/// Temporary SQLite database living for the duration of one test.
pub struct TestDatabase {
    pub database: Arc<Database>,
    _dir: TempDir,
}

pub async fn test_database() -> TestDatabase {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("content.db");
    let database = Database::new(path.to_str().expect("utf-8 path"))
        .await
        .expect("database init");

    TestDatabase {
        database: Arc::new(database),
        _dir: dir,
    }
}

/// Install the scheduling fields and mirror the configuration's templates
/// into the store, the same way startup does.
pub async fn seed_schema(database: Arc<Database>, config: &Config) -> SchemaService {
    let schema = SchemaService::new(database);
    schema.install().await.expect("install scheduling fields");
    schema.sync_templates(config).await.expect("sync templates");
    schema
}
