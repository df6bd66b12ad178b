use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tracing::{info, debug, trace, error};

/// Connects to the database and applies every pending migration.
pub async fn init_database(database_url: &str) -> Result<()> {
    trace!("Entering init_database function");
    info!("Initializing database");
    debug!("Database URL: {}", database_url);

    trace!("Attempting to connect to database");
    let db: DatabaseConnection = match Database::connect(database_url).await {
        Ok(connection) => {
            info!("Successfully connected to database");
            connection
        }
        Err(e) => {
            error!("Failed to connect to database '{}': {}", database_url, e);
            return Err(e.into());
        }
    };

    run_migrations(&db).await?;

    info!("Database initialization completed successfully!");
    Ok(())
}

/// Applies pending migrations on an open connection.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<()> {
    info!("Running database migrations");
    trace!("Executing migration up command");
    match Migrator::up(db, None).await {
        Ok(_) => {
            info!("Database migrations completed successfully");
            debug!("All pending migrations have been applied");
            Ok(())
        }
        Err(e) => {
            error!("Failed to run database migrations: {}", e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::entities::{asset, depreciation_record, disposal, production_usage};
    use sea_orm::{EntityTrait, PaginatorTrait};

    #[tokio::test]
    async fn test_run_migrations_creates_schema() {
        let db = Database::connect("sqlite::memory:").await.unwrap();

        run_migrations(&db).await.unwrap();
        // Applying twice is a no-op
        run_migrations(&db).await.unwrap();

        assert_eq!(asset::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(depreciation_record::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(disposal::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(production_usage::Entity::find().count(&db).await.unwrap(), 0);
    }
}
