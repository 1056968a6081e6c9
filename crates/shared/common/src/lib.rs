//! Common utilities shared across the service crates.
//!
//! This crate provides:
//! - The unified `AppError` taxonomy and `AppResult` alias
//! - Shared configuration structures loaded from the environment

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
