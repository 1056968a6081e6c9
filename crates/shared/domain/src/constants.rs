//! Domain-level constants.
//!
//! These constants define business rules shared across services.

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_USER: &str = "user";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Redis key prefix for session entries backing issued tokens
pub const SESSION_KEY_PREFIX: &str = "jwt:";

// =============================================================================
// Bulk creation
// =============================================================================

/// Chunks at or below this size are processed sequentially by the bulk
/// creation scheduler; larger chunks are split and forked.
pub const BULK_CHUNK_THRESHOLD: usize = 5;
