//! User service operational CLI: migrations, secondary-store
//! reconciliation and admin bootstrap.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use common::config::AdminConfig;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use user_service_lib::bootstrap::{initialize_admin, reconcile_search_index};
use user_service_lib::config::UserServiceConfig;
use user_service_lib::events::LogEventPublisher;
use user_service_lib::infra::Database;
use user_service_lib::repository::{RoleRepository, RoleStore, UserRepository, UserStore};
use user_service_lib::service::{UserWriteCoordinator, WriteCoordinator};
use user_service_lib::sync::{ProfileStoreSync, SearchIndexSync, SecondaryStoreSync};
use user_service_lib::{run_migrations, MigrateAction};

#[derive(Parser)]
#[command(name = "user-service", about = "User management write-path service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateCommand,
    },
    /// Rebuild all secondary stores from the primary store
    Reconcile,
    /// Create the configured admin account if absent
    InitAdmin,
    /// Run the startup sequence: admin account plus search index rebuild
    Bootstrap,
}

#[derive(Subcommand)]
enum MigrateCommand {
    /// Apply pending migrations
    Up,
    /// Roll back the last migration
    Down,
    /// Drop everything and re-apply all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Migrate { action } => {
            let action = match action {
                MigrateCommand::Up => MigrateAction::Up,
                MigrateCommand::Down => MigrateAction::Down,
                MigrateCommand::Fresh => MigrateAction::Fresh,
            };
            run_migrations(action).await?;
        }
        Command::Reconcile => {
            let config = UserServiceConfig::from_env();
            let db = Database::connect(&config.database.url).await?;
            let connection = db.get_connection();

            let users: Arc<dyn UserRepository> = Arc::new(UserStore::new(connection.clone()));
            let roles: Arc<dyn RoleRepository> = Arc::new(RoleStore::new(connection.clone()));
            let sync_targets: Vec<Arc<dyn SecondaryStoreSync>> = vec![
                Arc::new(ProfileStoreSync::connect(&config.cache.url).await?),
                Arc::new(SearchIndexSync::new(connection)),
            ];

            let coordinator =
                WriteCoordinator::new(users, roles, sync_targets, Arc::new(LogEventPublisher));
            let count = coordinator.reconcile_all().await?;
            info!(count, "Secondary stores reconciled");
        }
        Command::InitAdmin => {
            let config = UserServiceConfig::from_env();
            let admin_config = AdminConfig::from_env();
            let db = Database::connect(&config.database.url).await?;
            let connection = db.get_connection();

            let users: Arc<dyn UserRepository> = Arc::new(UserStore::new(connection.clone()));
            let roles: Arc<dyn RoleRepository> = Arc::new(RoleStore::new(connection));

            let id = initialize_admin(&users, &roles, &admin_config).await?;
            info!(user_id = %id, "Admin account ready");
        }
        Command::Bootstrap => {
            let config = UserServiceConfig::from_env();
            let admin_config = AdminConfig::from_env();
            let db = Database::connect(&config.database.url).await?;
            let connection = db.get_connection();

            let users: Arc<dyn UserRepository> = Arc::new(UserStore::new(connection.clone()));
            let roles: Arc<dyn RoleRepository> = Arc::new(RoleStore::new(connection.clone()));
            let id = initialize_admin(&users, &roles, &admin_config).await?;
            info!(user_id = %id, "Admin account ready");

            let search: Arc<dyn SecondaryStoreSync> =
                Arc::new(SearchIndexSync::new(connection));
            let count = reconcile_search_index(&users, &search).await;
            info!(count, "Search index rebuilt");
        }
    }

    Ok(())
}
