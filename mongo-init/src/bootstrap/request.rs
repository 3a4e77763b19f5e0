//! Create-user payload
//!
//! Field order and names follow the engine's `createUser` contract:
//! `{ user, pwd, roles: [{ role, db }] }`.

use serde::Serialize;
use std::fmt;

/// A role granted on a single database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleGrant {
    pub role: String,
    pub db: String,
}

/// The credential to create in the target database.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct CreateUserRequest {
    pub user: String,
    pub pwd: String,
    pub roles: Vec<RoleGrant>,
}

impl CreateUserRequest {
    /// Build a request whose every role is granted on `database`.
    pub fn new<I, S>(user: &str, pwd: &str, database: &str, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user: user.to_string(),
            pwd: pwd.to_string(),
            roles: roles
                .into_iter()
                .map(|role| RoleGrant {
                    role: role.into(),
                    db: database.to_string(),
                })
                .collect(),
        }
    }

    /// Names of the granted roles, for logging.
    pub fn role_names(&self) -> Vec<&str> {
        self.roles.iter().map(|r| r.role.as_str()).collect()
    }
}

impl fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("user", &self.user)
            .field("pwd", &"<redacted>")
            .field("roles", &self.roles)
            .finish()
    }
}
