//! Migrate command - schema migration management.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    // Open without auto-migrating; the action below decides what runs.
    let db = Database::open(&config)
        .await
        .map_err(|e| AppError::internal(format!("Database connection failed: {}", e)))?;

    let outcome = match args.action {
        MigrateAction::Up => db
            .run_migrations()
            .await
            .map(|_| "pending migrations applied"),
        MigrateAction::Down => db
            .rollback_migration()
            .await
            .map(|_| "last migration rolled back"),
        MigrateAction::Fresh => {
            tracing::warn!("Dropping all tables before re-running every migration");
            db.fresh_migrations().await.map(|_| "schema rebuilt")
        }
        MigrateAction::Status => {
            let rows = db
                .migration_status()
                .await
                .map_err(|e| AppError::internal(e.to_string()))?;
            for (name, applied) in rows {
                println!("{} {}", if applied { "[x]" } else { "[ ]" }, name);
            }
            return Ok(());
        }
    };

    let message = outcome.map_err(|e| AppError::internal(e.to_string()))?;
    tracing::info!("{}", message);
    Ok(())
}
