//! Administrative session against the database engine
//!
//! The bootstrap action only sees [`AdminSession`]; the binary hands it a
//! [`MongoSession`], tests hand it an in-memory engine.

use async_trait::async_trait;
use mongodb::bson::{self, doc};
use mongodb::options::{ClientOptions, Credential};
use mongodb::Client;
use tracing::{debug, info, instrument};

use super::config::Config;
use super::error::AdminError;
use super::request::CreateUserRequest;

const APP_NAME: &str = "mongo-init";
const ROOT_AUTH_SOURCE: &str = "admin";

/// A privileged connection able to modify the authentication namespace.
#[async_trait]
pub trait AdminSession: Send + Sync {
    /// Create `request.user` in `database`.
    ///
    /// Fails if the user already exists; no existence check is made.
    async fn create_user(&self, database: &str, request: &CreateUserRequest)
        -> Result<(), AdminError>;
}

/// Session backed by the MongoDB driver.
pub struct MongoSession {
    client: Client,
}

impl MongoSession {
    /// Build a client for the configured deployment.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first administrative call.
    pub async fn connect(config: &Config) -> Result<Self, AdminError> {
        let mut options = ClientOptions::parse(&config.uri).await?;
        options.app_name = Some(APP_NAME.to_string());

        if let Some(root) = &config.root {
            let mut credential = Credential::default();
            credential.username = Some(root.username.clone());
            credential.password = Some(root.password.clone());
            credential.source = Some(ROOT_AUTH_SOURCE.to_string());
            options.credential = Some(credential);
        }

        let hosts: Vec<String> = options.hosts.iter().map(|h| h.to_string()).collect();
        info!(hosts = ?hosts, root_auth = config.root.is_some(), "Connecting to MongoDB");

        let client = Client::with_options(options)?;
        Ok(Self { client })
    }

    /// Release the client and its connection pools.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

#[async_trait]
impl AdminSession for MongoSession {
    #[instrument(skip_all, fields(database = %database, user = %request.user))]
    async fn create_user(
        &self,
        database: &str,
        request: &CreateUserRequest,
    ) -> Result<(), AdminError> {
        let command = doc! {
            "createUser": request.user.as_str(),
            "pwd": request.pwd.as_str(),
            "roles": bson::to_bson(&request.roles)?,
        };
        debug!(roles = ?request.role_names(), "Running createUser");

        let reply = self.client.database(database).run_command(command).await?;
        debug!(ok = ?reply.get("ok"), "createUser acknowledged");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::config::RootCredential;

    fn live_config(uri: String) -> Config {
        Config {
            uri,
            root: None,
            database: format!("mongo_init_test_{}", std::process::id()),
            user: "application_user".to_string(),
            password: "securepassword123".to_string(),
            roles: vec!["readWrite".to_string()],
        }
    }

    #[tokio::test]
    async fn test_connect_applies_root_credential() {
        let mut config = live_config("mongodb://localhost:27017".to_string());
        config.root = Some(RootCredential {
            username: "root".to_string(),
            password: "example".to_string(),
        });

        // Building the client does not touch the network.
        let session = MongoSession::connect(&config).await.unwrap();
        session.shutdown().await;
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_uri() {
        let config = live_config("not-a-mongo-uri".to_string());
        let err = MongoSession::connect(&config).await.err().unwrap();
        assert!(matches!(err, AdminError::Driver(_)));
    }

    #[tokio::test]
    #[ignore = "requires a running mongod at MONGO_TEST_URI"]
    async fn test_second_create_user_is_rejected() {
        let uri = std::env::var("MONGO_TEST_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let config = live_config(uri);
        let session = MongoSession::connect(&config).await.unwrap();
        let request = config.create_user_request();

        session.create_user(&config.database, &request).await.unwrap();
        let err = session
            .create_user(&config.database, &request)
            .await
            .unwrap_err();
        assert!(err.is_duplicate_user(), "unexpected error: {err}");

        session
            .client
            .database(&config.database)
            .run_command(doc! { "dropUser": request.user.as_str() })
            .await
            .unwrap();
        session.shutdown().await;
    }
}
