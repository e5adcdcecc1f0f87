use serde::Serialize;
use thiserror::Error;

/// Caller-facing error classification.
///
/// Every public operation fails with exactly one of these kinds. Storage and
/// gateway failures collapse onto `Internal` or `Unavailable`; the business
/// kinds are only produced by the subscription service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    AlreadyExists,
    NotFound,
    Cancelled,
    Internal,
    Unavailable,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Internal => "internal",
            ErrorKind::Unavailable => "unavailable",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Cancelled: {0}")]
    Cancelled(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            AppError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Cancelled(_) => ErrorKind::Cancelled,
            AppError::ServiceUnavailable(_) => ErrorKind::Unavailable,
            AppError::DatabaseError(_)
            | AppError::ExternalServiceError(_)
            | AppError::InternalError(_)
            | AppError::SerializationError(_) => ErrorKind::Internal,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::InvalidArgument(msg)
            | AppError::AlreadyExists(msg)
            | AppError::NotFound(msg)
            | AppError::Cancelled(msg)
            | AppError::DatabaseError(msg)
            | AppError::ExternalServiceError(msg)
            | AppError::ServiceUnavailable(msg)
            | AppError::InternalError(msg)
            | AppError::SerializationError(msg) => msg,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppError::Cancelled(_))
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};

        match err {
            Error::NotFound => AppError::NotFound("Record not found in database".to_string()),
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                AppError::AlreadyExists(info.message().to_string())
            }
            _ => AppError::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::r2d2::PoolError> for AppError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        AppError::ServiceUnavailable(format!("Database pool error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::ServiceUnavailable("Request timeout".to_string())
        } else if err.is_connect() {
            AppError::ServiceUnavailable("Failed to connect to external service".to_string())
        } else if err.is_decode() {
            AppError::SerializationError(format!("Failed to decode response: {}", err))
        } else {
            AppError::ExternalServiceError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(format!("Background task failed: {}", err))
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_and_downstream_failures_are_internal() {
        assert_eq!(
            AppError::DatabaseError("boom".into()).kind(),
            ErrorKind::Internal
        );
        assert_eq!(
            AppError::ExternalServiceError("boom".into()).kind(),
            ErrorKind::Internal
        );
        assert_eq!(
            AppError::SerializationError("boom".into()).kind(),
            ErrorKind::Internal
        );
        assert_eq!(
            AppError::ServiceUnavailable("down".into()).kind(),
            ErrorKind::Unavailable
        );
    }

    #[test]
    fn diesel_not_found_maps_to_not_found() {
        let err: AppError = diesel::result::Error::NotFound.into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn message_strips_variant_prefix() {
        let err = AppError::AlreadyExists("Subscription already exists".into());
        assert_eq!(err.message(), "Subscription already exists");
        assert_eq!(err.to_string(), "Already exists: Subscription already exists");
    }

    #[test]
    fn kind_renders_snake_case() {
        assert_eq!(ErrorKind::InvalidArgument.as_str(), "invalid_argument");
        assert_eq!(
            serde_json::to_string(&ErrorKind::Unavailable).unwrap(),
            "\"unavailable\""
        );
    }
}
