//! Error types for the bootstrap action

use mongodb::bson;
use mongodb::error::ErrorKind;
use std::io;

/// Engine error code for "User ... already exists".
pub const DUPLICATE_USER_CODE: i32 = 51003;

/// Failure of an administrative call.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// The engine executed the command and rejected it.
    #[error("{message}")]
    Rejected {
        code: i32,
        code_name: String,
        message: String,
    },

    /// Connection, authentication, selection or protocol failure.
    #[error(transparent)]
    Driver(mongodb::error::Error),

    #[error(transparent)]
    Encode(#[from] bson::ser::Error),
}

impl AdminError {
    /// Whether the engine refused the call because the user already exists.
    pub fn is_duplicate_user(&self) -> bool {
        matches!(self, Self::Rejected { code, .. } if *code == DUPLICATE_USER_CODE)
    }
}

impl From<mongodb::error::Error> for AdminError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Command(command) => Self::Rejected {
                code: command.code,
                code_name: command.code_name.clone(),
                message: command.message.clone(),
            },
            _ => Self::Driver(err),
        }
    }
}

/// Failure of the bootstrap action as a whole.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Admin(#[from] AdminError),

    #[error("Failed to write status line: {0}")]
    Output(#[from] io::Error),
}

impl BootstrapError {
    /// The administrative failure, if that is what stopped the action.
    pub fn admin(&self) -> Option<&AdminError> {
        match self {
            Self::Admin(err) => Some(err),
            Self::Output(_) => None,
        }
    }
}
