use serde::Serialize;

use crate::utils::AppError;

/// Coarse failure class of an [`ActionOutcome`], used to pick an HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Conflict,
    NotFound,
    InvalidCredential,
    InvalidRequest,
    Unavailable,
    Internal,
}

impl From<&AppError> for FailureKind {
    fn from(err: &AppError) -> Self {
        match err {
            AppError::Conflict(_) | AppError::EmailAlreadyExists(_) => FailureKind::Conflict,
            AppError::NotFound(_) => FailureKind::NotFound,
            AppError::InvalidCredential(_) => FailureKind::InvalidCredential,
            AppError::InvalidRequest(_) => FailureKind::InvalidRequest,
            AppError::Unavailable(_) => FailureKind::Unavailable,
            AppError::DatabaseError(_) | AppError::Internal(_) => FailureKind::Internal,
        }
    }
}

/// `{success, message}` result returned by every account lifecycle operation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, utoipa::ToSchema)]
pub struct ActionOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip)]
    pub failure: Option<FailureKind>,
}

impl ActionOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            failure: None,
        }
    }

    pub fn fail(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            failure: Some(kind),
        }
    }
}
