//! Shared utilities for mongo-init components
//!
//! This crate provides common functionality used by the bootstrap binaries:
//! - Structured logging initialization
//! - Environment variable and secret parsing helpers

pub mod config;
pub mod logging;

pub use config::{env_secret, ConfigExt};
pub use logging::init_logging;
