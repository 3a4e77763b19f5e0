//! Application user bootstrap job
//!
//! Runs ONCE during cluster initialization, after mongod accepts connections.
//! Creates the application user with its role on the target database and
//! prints a start and a completion line on stdout. Logs go to stderr.
//!
//! Not idempotent: a second run fails because the user already exists.

use anyhow::Result;
use common::init_logging;
use mongo_init::{create_app_user, Config, MongoSession};
use std::io;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = init_logging("create-app-user");

    let config = Config::load()?;
    info!(
        database = %config.database,
        user = %config.user,
        roles = ?config.roles,
        "Application user bootstrap starting"
    );

    let session = MongoSession::connect(&config).await?;
    let request = config.create_user_request();

    create_app_user(&session, &config.database, &request, &mut io::stdout()).await?;

    session.shutdown().await;
    Ok(())
}
