use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Rejected input: missing units data, unknown method, or financial
    /// parameters that would produce a meaningless schedule.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The asset (or a row it owns) does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The asset changed while a regeneration was in flight
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Runtime error for unexpected situations
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl ComputeError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        let err = ComputeError::InvalidArgument(message.into());
        tracing::debug!(?err, "Rejected depreciation input");
        err
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
