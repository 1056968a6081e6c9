//! User Service Library
//!
//! The write-path core of the user-management system: primary-store
//! repositories, the secondary-store sync strategies, the write
//! coordinator and the bulk creation scheduler.

pub mod bootstrap;
pub mod config;
pub mod events;
pub mod infra;
pub mod repository;
pub mod service;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use tracing::info;

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Fresh,
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = UserServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database.url).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}
