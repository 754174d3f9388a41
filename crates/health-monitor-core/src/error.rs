//! Error types for Health Monitor
//!
//! Storage failures are kept apart from service-level failures so callers can
//! tell "the record does not exist" from "the store could not be reached".

use thiserror::Error;

use crate::model::RecordId;

/// Errors raised by repository implementations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The requested record does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A uniqueness constraint would be violated
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The underlying store could not be reached or failed mid-operation
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Create a not-found error for a numeric record id
    pub fn not_found(entity: &'static str, id: RecordId) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Create an unavailable error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        StoreError::Unavailable(msg.into())
    }

    /// Check if this error means the record is absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type alias for repository operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised by the service layer
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Caller supplied unusable input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Email/password pair did not match an account
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The session is not allowed to perform the operation
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Nothing to operate on
    #[error("Not found: {0}")]
    NotFound(String),

    /// Password hashing failed
    #[error("Credential error: {0}")]
    Credential(String),

    /// Storage failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        ServiceError::InvalidInput(msg.into())
    }

    /// Create an access denied error
    pub fn access_denied(msg: impl Into<String>) -> Self {
        ServiceError::AccessDenied(msg.into())
    }

    /// Check if this error means something was missing, at either layer
    pub fn is_not_found(&self) -> bool {
        match self {
            ServiceError::NotFound(_) => true,
            ServiceError::Store(e) => e.is_not_found(),
            _ => false,
        }
    }

    /// Check if this is a user-facing error (vs an infrastructure failure)
    pub fn is_user_error(&self) -> bool {
        match self {
            ServiceError::InvalidInput(_)
            | ServiceError::InvalidCredentials
            | ServiceError::AccessDenied(_)
            | ServiceError::NotFound(_) => true,
            ServiceError::Store(e) => matches!(e, StoreError::NotFound { .. } | StoreError::Conflict(_)),
            ServiceError::Credential(_) => false,
        }
    }
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::not_found("user", 7);
        assert_eq!(err.to_string(), "user not found: 7");

        let err = ServiceError::invalid_input("email is required");
        assert_eq!(err.to_string(), "Invalid input: email is required");
    }

    #[test]
    fn test_not_found_is_distinct_from_unavailable() {
        assert!(StoreError::not_found("reminder", 1).is_not_found());
        assert!(!StoreError::unavailable("disk gone").is_not_found());

        let wrapped: ServiceError = StoreError::not_found("reminder", 1).into();
        assert!(wrapped.is_not_found());
        let wrapped: ServiceError = StoreError::unavailable("disk gone").into();
        assert!(!wrapped.is_not_found());
    }

    #[test]
    fn test_is_user_error() {
        assert!(ServiceError::InvalidCredentials.is_user_error());
        assert!(ServiceError::access_denied("not a doctor").is_user_error());
        assert!(ServiceError::from(StoreError::Conflict("email".into())).is_user_error());
        assert!(!ServiceError::from(StoreError::unavailable("io")).is_user_error());
        assert!(!ServiceError::Credential("bad salt".into()).is_user_error());
    }
}
