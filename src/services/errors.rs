use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested resource was not found or has been deleted.
    #[error("not found")]
    NotFound,
    /// A product code collided with another active product.
    #[error("{0}")]
    DuplicateCode(String),
    /// A store or gallery is already at its configured maximum.
    #[error("{0}")]
    CapacityExceeded(String),
    /// Input violated a domain invariant.
    #[error("{0}")]
    TypeConstraint(String),
    /// A submitted form failed validation.
    #[error("{0}")]
    Form(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

impl ServiceError {
    /// Stable tag identifying the error kind, independent of transport.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::DuplicateCode(_) => "duplicate_code",
            Self::CapacityExceeded(_) => "capacity_exceeded",
            Self::TypeConstraint(_) => "type_constraint",
            Self::Form(_) => "form",
            Self::Internal => "internal",
        }
    }
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
