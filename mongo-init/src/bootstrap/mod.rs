//! Application user bootstrap
//!
//! This module provides the one-shot provisioning run during cluster init:
//! - Resolving configuration (target database, user, secret, roles)
//! - The administrative session used to reach the engine
//! - The create-user action with its start/completion status lines

mod config;
mod error;
mod request;
mod session;

pub use config::{Config, RootCredential, CONFIG_PATH_ENV};
pub use error::{AdminError, BootstrapError, DUPLICATE_USER_CODE};
pub use request::{CreateUserRequest, RoleGrant};
pub use session::{AdminSession, MongoSession};

use std::io::Write;
use tracing::info;

/// Status line written before the administrative call
pub fn start_line(user: &str, database: &str) -> String {
    format!("=== Creating user {} in database {} ===", user, database)
}

/// Status line written once the administrative call succeeded
pub fn done_line(user: &str, database: &str) -> String {
    format!("=== Created user {} in database {} ===", user, database)
}

/// Create the application user in `database` and report progress on `out`.
///
/// The start line is flushed before the call is issued. The completion line
/// is written only if the engine accepted the call; any rejection is returned
/// as is, with no retry.
pub async fn create_app_user<S, W>(
    session: &S,
    database: &str,
    request: &CreateUserRequest,
    out: &mut W,
) -> Result<(), BootstrapError>
where
    S: AdminSession + ?Sized,
    W: Write,
{
    writeln!(out, "{}", start_line(&request.user, database))?;
    out.flush()?;

    session.create_user(database, request).await?;

    writeln!(out, "{}", done_line(&request.user, database))?;
    out.flush()?;

    info!(
        user = %request.user,
        database = %database,
        roles = ?request.role_names(),
        "Application user created"
    );

    Ok(())
}
