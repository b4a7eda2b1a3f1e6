use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

/// Fresh in-memory database with the schema applied.
pub async fn setup_db() -> anyhow::Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
