use serde::Serialize;
use std::fmt::{Display, Formatter};
use thiserror::Error;
use uuid::Uuid;

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a draft transaction is rejected before anything is written to the store.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("title empty")]
    TitleEmpty,
    #[error("amount must be positive")]
    AmountNotPositive,
    #[error("category/type mismatch")]
    CategoryTypeMismatch,
}

/// Failures reported by a `TransactionStore`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("transaction not found: {0}")]
    NotFound(Uuid),
    #[error("write failed: {0}")]
    WriteFailed(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Coarse classification of errors returned from command handlers, so the CLI can tell the user
/// which part of the program failed.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorType {
    Config,
    Store,
    Request,
}

impl Display for ErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorType::Config => f.write_str("Configuration error"),
            ErrorType::Store => f.write_str("Storage error"),
            ErrorType::Request => f.write_str("Invalid request"),
        }
    }
}

/// Attaches an `ErrorType` to any result whose error converts into `anyhow::Error`.
pub trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| e.into().context(error_type.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::TitleEmpty.to_string(), "title empty");
        assert_eq!(
            ValidationError::AmountNotPositive.to_string(),
            "amount must be positive"
        );
        assert_eq!(
            ValidationError::CategoryTypeMismatch.to_string(),
            "category/type mismatch"
        );
    }

    #[test]
    fn test_pub_result_adds_context() {
        let r: std::result::Result<(), StoreError> =
            Err(StoreError::WriteFailed("disk full".into()));
        let err = r.pub_result(ErrorType::Store).unwrap_err();
        assert_eq!(err.to_string(), "Storage error");
        assert_eq!(err.root_cause().to_string(), "write failed: disk full");
    }
}
