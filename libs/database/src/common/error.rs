/// Database error type for connection management and health probing.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Initial connection could not be established
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
