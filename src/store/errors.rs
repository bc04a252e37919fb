//! # Store Errors

use thiserror::Error;

use crate::employee::InvalidEmployeeId;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Identifier could not be parsed into the store's format
    #[error("invalid employee ID format: {0}")]
    InvalidId(#[from] InvalidEmployeeId),

    /// Delete matched no record
    #[error("no employee found with ID: {0}")]
    NotFound(String),

    /// Could not reach the store
    #[error("MongoDB connection error: {0}")]
    Connection(String),

    /// A query or cursor failed
    #[error("{context}: {message}")]
    Query {
        context: &'static str,
        message: String,
    },

    /// In-memory store lock was poisoned
    #[error("Lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    pub fn query(context: &'static str, err: impl std::fmt::Display) -> Self {
        StoreError::Query {
            context,
            message: err.to_string(),
        }
    }

    /// Whether the caller, not the store, caused this error
    pub fn is_client_error(&self) -> bool {
        matches!(self, StoreError::InvalidId(_))
    }
}
