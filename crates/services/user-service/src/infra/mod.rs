//! Infrastructure layer: database connection and migrations.

pub mod db;
pub mod migrations;

pub use db::Database;
