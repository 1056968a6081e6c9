//! Authentication services.

pub mod auth_gate;

pub use auth_gate::{AuthGate, Authenticator, TokenResponse};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_gate::MockAuthGate;
