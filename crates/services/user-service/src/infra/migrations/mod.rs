//! Database migrations.

use sea_orm_migration::prelude::*;

mod m20250901_000001_create_users;
mod m20250901_000002_create_roles;
mod m20250901_000003_create_search_documents;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_users::Migration),
            Box::new(m20250901_000002_create_roles::Migration),
            Box::new(m20250901_000003_create_search_documents::Migration),
        ]
    }
}
