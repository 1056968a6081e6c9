//! Password value object.
//!
//! Wraps an argon2 hash so plaintext passwords never travel further than
//! the seam where they are hashed or verified.

use argon2::{
    password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use rand::rngs::OsRng;

use crate::constants::MIN_PASSWORD_LENGTH;
use crate::error::{DomainError, DomainResult};

/// A hashed password.
#[derive(Debug, Clone)]
pub struct Password(String);

impl Password {
    /// Hash a plaintext password. Fails when the password is shorter than
    /// the domain minimum or hashing itself fails.
    pub fn new(plain: &str) -> DomainResult<Self> {
        if plain.len() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::password(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| DomainError::password(e.to_string()))?
            .to_string();
        Ok(Self(hash))
    }

    /// Wrap an already-stored hash.
    pub fn from_hash(hash: &str) -> Self {
        Self(hash.to_string())
    }

    /// Verify a plaintext candidate against this hash. A malformed stored
    /// hash verifies as false rather than erroring; callers treat it as a
    /// credential mismatch.
    pub fn verify(&self, plain: &str) -> bool {
        match PasswordHash::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = Password::new("Secur3P@ssw0rd!").expect("hashing should succeed");
        assert!(password.verify("Secur3P@ssw0rd!"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = Password::new("correct-horse-battery").expect("hashing should succeed");
        assert!(!password.verify("wrong-password"));
    }

    #[test]
    fn rejects_short_password() {
        let err = Password::new("short").unwrap_err();
        assert!(matches!(err, DomainError::Password(_)));
    }

    #[test]
    fn malformed_stored_hash_verifies_false() {
        let password = Password::from_hash("not-a-valid-hash");
        assert!(!password.verify("anything"));
    }
}
