//! SeaORM entity definitions.

pub mod role;
pub mod search_document;
pub mod user;
pub mod user_role;
