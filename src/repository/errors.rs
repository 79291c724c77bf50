use thiserror::Error;

/// Failures reported by repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The referenced record is absent or soft-deleted.
    #[error("record not found")]
    NotFound,
    /// Another active product already uses this code.
    #[error("product code {0} is already in use")]
    DuplicateCode(String),
    /// The store or aggregate is at its configured maximum.
    #[error("{entity} limit of {limit} reached")]
    CapacityExceeded { entity: &'static str, limit: usize },
    /// A merged record violated a domain invariant.
    #[error("validation failed: {0}")]
    ValidationError(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
