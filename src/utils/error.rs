use mongodb::error::{ErrorKind, WriteFailure};
use std::fmt;
use thiserror::Error;

/// MongoDB server code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid credential: {0}")]
    InvalidCredential(CredentialFault),
    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Upstream unavailable: {0}")]
    Unavailable(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Why a token or password was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFault {
    Malformed,
    Expired,
    Revoked,
    Disabled,
    WrongTokenKind,
    WrongPassword,
}

impl fmt::Display for CredentialFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CredentialFault::Malformed => "token is malformed or has a bad signature",
            CredentialFault::Expired => "token has expired",
            CredentialFault::Revoked => "session has been revoked",
            CredentialFault::Disabled => "account is disabled",
            CredentialFault::WrongTokenKind => "token is not valid for this use",
            CredentialFault::WrongPassword => "email or password is incorrect",
        };
        f.write_str(text)
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_error))
                if write_error.code == DUPLICATE_KEY =>
            {
                AppError::Conflict(write_error.message.clone())
            }
            ErrorKind::Io(_)
            | ErrorKind::ServerSelection { .. }
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::DnsResolve { .. } => AppError::Unavailable(err.to_string()),
            _ => AppError::DatabaseError(err.to_string()),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind as JwtErrorKind;

        match err.kind() {
            JwtErrorKind::ExpiredSignature => AppError::InvalidCredential(CredentialFault::Expired),
            _ => AppError::InvalidCredential(CredentialFault::Malformed),
        }
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::Internal(format!("Password hashing failed: {}", err))
    }
}
