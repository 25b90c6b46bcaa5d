//! Error types for the document store manager.
//!
//! All errors are defined with `thiserror` and surfaced to the caller as-is;
//! nothing is retried internally. Connection errors carry an actionable
//! suggestion alongside the message.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unknown server: '{name}' is not registered")]
    UnknownServer { name: String },

    #[error("No default server configured. Specify a server name explicitly.")]
    NoDefaultServer,

    #[error("Store manager has been disposed")]
    Disposed,

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Connection failed: {message}")]
    Connection { message: String, suggestion: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl StoreError {
    /// Create an unknown server error.
    pub fn unknown_server(name: impl Into<String>) -> Self {
        Self::UnknownServer { name: name.into() }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a connection error with a helpful suggestion.
    pub fn connection(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the suggestion for this error, if available.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Connection { suggestion, .. } => Some(suggestion),
            _ => None,
        }
    }
}

/// Convert driver errors to StoreError.
impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        match err.kind.as_ref() {
            ErrorKind::InvalidArgument { message, .. } => StoreError::invalid_input(message.clone()),
            ErrorKind::Authentication { message, .. } => StoreError::connection(
                message.clone(),
                "Verify the username and password in the connection URL",
            ),
            ErrorKind::ServerSelection { message, .. } => StoreError::connection(
                message.clone(),
                "Check that the server is running and reachable",
            ),
            ErrorKind::Io(io_err) => StoreError::connection(
                format!("I/O error: {}", io_err),
                "Check network connectivity and server status",
            ),
            _ => StoreError::internal(err.to_string()),
        }
    }
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
