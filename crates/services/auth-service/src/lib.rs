//! Auth Service Library
//!
//! Session-backed authentication on top of the user service: JWT issuance
//! and verification, the Redis session cache, and the authentication gate
//! combining both.

pub mod cache;
pub mod directory;
pub mod service;
pub mod token;

pub use cache::{RedisSessionCache, SessionCache};
pub use directory::{RepositoryDirectory, UserDirectory};
pub use service::{AuthGate, Authenticator, TokenResponse};
pub use token::{Claims, IssuedToken, JwtCodec, TokenCodec};
