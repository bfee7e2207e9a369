use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Error taxonomy for the users backend. Every failure a request can hit maps
/// to exactly one variant, and the HTTP classification switches on the variant
/// tag, never on free-text messages.
#[derive(Error, Debug, Clone)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Credentials not found: {0}")]
    CredentialsNotFound(String),

    #[error("Invalid credentials payload: {0}")]
    InvalidCredentials(String),

    #[error("Database unavailable: {0}")]
    ConnectionUnavailable(String),

    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Query execution error: {0}")]
    Query(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// HTTP status code for this failure.
    ///
    /// Credential failures are classified 500 rather than 403: a missing or
    /// malformed secret is a deployment defect, not a caller authorization
    /// problem.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Configuration(_) => 500,
            ServiceError::CredentialsNotFound(_) => 500,
            ServiceError::InvalidCredentials(_) => 500,
            ServiceError::ConnectionUnavailable(_) => 503,
            ServiceError::Connection(_) => 500,
            ServiceError::Query(_) => 500,
            ServiceError::BadRequest(_) => 400,
            ServiceError::UnsupportedMethod(_) => 405,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Stable machine-readable label included in error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Configuration(_) => "CONFIGURATION_ERROR",
            ServiceError::CredentialsNotFound(_) | ServiceError::InvalidCredentials(_) => {
                "CREDENTIALS_ERROR"
            }
            ServiceError::ConnectionUnavailable(_) => "CONNECTION_UNAVAILABLE",
            ServiceError::Connection(_) => "CONNECTION_ERROR",
            ServiceError::Query(_) => "QUERY_ERROR",
            ServiceError::BadRequest(_) => "BAD_REQUEST",
            ServiceError::UnsupportedMethod(_) => "METHOD_NOT_ALLOWED",
            ServiceError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Safe user-facing message. Raw error detail stays in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            ServiceError::Configuration(_) => "Server configuration error",
            ServiceError::CredentialsNotFound(_) | ServiceError::InvalidCredentials(_) => {
                "Could not resolve database credentials"
            }
            ServiceError::ConnectionUnavailable(_) | ServiceError::Connection(_) => {
                "Database connection failed"
            }
            ServiceError::Query(_) | ServiceError::Internal(_) => "Internal server error",
            ServiceError::BadRequest(_) => "Invalid request body",
            ServiceError::UnsupportedMethod(_) => "Method not allowed",
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Internal(format!("JSON serialization error: {}", err))
    }
}

impl From<tokio_postgres::Error> for ServiceError {
    fn from(err: tokio_postgres::Error) -> Self {
        ServiceError::Query(err.to_string())
    }
}
