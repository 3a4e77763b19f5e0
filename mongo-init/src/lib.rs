//! Bootstrap jobs for MongoDB clusters
//!
//! This crate provides the application user provisioning run during cluster
//! initialization:
//! - Resolving the target database, user and secret from configuration
//! - The administrative session used to reach the engine
//! - The create-user action and its status output

pub mod bootstrap;

pub use bootstrap::{
    create_app_user, AdminError, AdminSession, BootstrapError, Config, CreateUserRequest,
    MongoSession, RoleGrant,
};
