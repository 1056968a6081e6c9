//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure
//! dependencies. All types here are shared between the user and auth
//! service crates.

pub mod constants;
pub mod context;
pub mod error;
pub mod event;
pub mod password;
pub mod user;

pub use constants::*;
pub use context::RequestContext;
pub use error::{DomainError, DomainResult};
pub use event::{UserEvent, UserEventKind};
pub use password::Password;
pub use user::{
    CreateUserRequest, NewUser, Role, UpdateUserRequest, User, UserProjection, UserWithRoles,
};
