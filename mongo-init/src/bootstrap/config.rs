//! Configuration for the application user bootstrap
//!
//! Values come from environment variables, optionally layered over a YAML
//! file named by `MONGO_INIT_CONFIG`. Environment wins over the file, the
//! file wins over defaults. The application password has no default.

use anyhow::{bail, Context, Result};
use common::{env_secret, ConfigExt};
use serde::Deserialize;
use std::fs;

use super::request::CreateUserRequest;

/// Env var naming an optional YAML config file
pub const CONFIG_PATH_ENV: &str = "MONGO_INIT_CONFIG";

pub const DEFAULT_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "raffles_db";
pub const DEFAULT_USER: &str = "application_user";
pub const DEFAULT_ROLE: &str = "readWrite";

/// Partial config file - every field is optional
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    uri: Option<String>,
    #[serde(default)]
    app_user: AppUser,
}

#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
struct AppUser {
    username: Option<String>,
    password: Option<String>,
    database: Option<String>,
    roles: Option<Vec<String>>,
}

impl FileConfig {
    fn read(path: &str) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path))
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Administrative login used to open the session
#[derive(Clone)]
pub struct RootCredential {
    pub username: String,
    pub password: String,
}

/// Configuration for the create-user bootstrap
pub struct Config {
    pub uri: String,
    pub root: Option<RootCredential>,
    pub database: String,
    pub user: String,
    pub password: String,
    pub roles: Vec<String>,
}

impl Config {
    /// Load configuration from `MONGO_INIT_CONFIG` (if set) and the environment
    pub fn load() -> Result<Self> {
        let file = match String::env_opt(CONFIG_PATH_ENV) {
            Some(path) => FileConfig::read(&path)?,
            None => FileConfig::default(),
        };
        Self::from_env(file)
    }

    fn from_env(file: FileConfig) -> Result<Self> {
        let app = file.app_user;

        let config = Self {
            uri: String::env_opt("MONGO_URI")
                .or(file.uri)
                .unwrap_or_else(|| DEFAULT_URI.to_string()),
            root: root_credential()?,
            database: String::env_opt("MONGO_APP_DATABASE")
                .or(app.database)
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            user: String::env_opt("MONGO_APP_USER")
                .or(app.username)
                .unwrap_or_else(|| DEFAULT_USER.to_string()),
            password: env_secret("MONGO_APP_PASSWORD")?
                .or(app.password)
                .context("MONGO_APP_PASSWORD or MONGO_APP_PASSWORD_FILE must be set")?,
            roles: String::env_list("MONGO_APP_ROLES")
                .or(app.roles)
                .unwrap_or_else(|| vec![DEFAULT_ROLE.to_string()]),
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine would refuse or that make no sense to send
    pub fn validate(&self) -> Result<()> {
        if self.uri.trim().is_empty() {
            bail!("MongoDB URI is empty");
        }
        if self.database.trim().is_empty() {
            bail!("Target database name is empty");
        }
        if self.user.trim().is_empty() {
            bail!("Application username is empty");
        }
        if self.password.is_empty() {
            bail!("Application password is empty");
        }
        if self.roles.is_empty() {
            bail!("At least one role must be granted");
        }
        if self.roles.iter().any(|r| r.trim().is_empty()) {
            bail!("Role names must not be empty");
        }
        Ok(())
    }

    /// The create-user payload; every role is granted on the target database
    pub fn create_user_request(&self) -> CreateUserRequest {
        CreateUserRequest::new(&self.user, &self.password, &self.database, &self.roles)
    }
}

/// Root login from the variables the official MongoDB image uses
fn root_credential() -> Result<Option<RootCredential>> {
    let username = String::env_opt("MONGO_INITDB_ROOT_USERNAME");
    let password = env_secret("MONGO_INITDB_ROOT_PASSWORD")?;

    match (username, password) {
        (Some(username), Some(password)) => Ok(Some(RootCredential { username, password })),
        (None, None) => Ok(None),
        _ => bail!("MONGO_INITDB_ROOT_USERNAME and MONGO_INITDB_ROOT_PASSWORD must be set together"),
    }
}
