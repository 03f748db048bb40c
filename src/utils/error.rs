use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::UserResponse;

pub const DUPLICATE_NAME_MESSAGE: &str = "User with the same name already exists";
pub const NOT_FOUND_MESSAGE: &str = "User with specified ID not found!";

/// Every way a user request can fail. The display text is what clients see
/// inside the error envelope.
#[derive(Debug, Error)]
pub enum UserError {
    /// Body did not parse as the expected JSON shape.
    #[error("{0}")]
    InvalidBody(String),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid user ID: {0}")]
    InvalidId(String),

    #[error("{}", DUPLICATE_NAME_MESSAGE)]
    DuplicateName,

    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,

    /// Raw driver error text.
    #[error("{0}")]
    Database(String),

    #[error("Database operation timed out")]
    Timeout,
}

impl UserError {
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Database(err.to_string())
    }
}

impl ResponseError for UserError {
    fn status_code(&self) -> StatusCode {
        match self {
            UserError::InvalidBody(_)
            | UserError::Validation(_)
            | UserError::InvalidId(_)
            | UserError::DuplicateName => StatusCode::BAD_REQUEST,
            UserError::NotFound => StatusCode::NOT_FOUND,
            UserError::Database(_) | UserError::Timeout => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        UserResponse::error(self.status_code(), self.to_string()).into_http()
    }
}
