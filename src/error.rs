//! Error types for tomcat-glance.
//!
//! Defines the main error enum used throughout the crate.

use thiserror::Error;

/// Main error type for registry and manager operations.
#[derive(Error, Debug)]
pub enum ManagerError {
    /// Switch or lookup target does not resolve to a live connection.
    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    /// An operation needing a current connection ran while none is active.
    #[error("No active connection")]
    NoActiveConnection,

    /// The alias is already bound to a live connection.
    #[error("Alias '{0}' is already in use")]
    AliasInUse(String),

    /// Transport failure, or a non-2xx answer to `list`/`serverinfo`.
    #[error("HTTP error: {message}")]
    Http {
        /// Response status, when the server answered at all.
        status: Option<u16>,
        /// Description of the failure.
        message: String,
    },

    /// `start`/`stop`/`reload` did not return the expected success line.
    #[error("Command '{command}' failed:\n{body}")]
    CommandFailed {
        /// Manager command that was sent.
        command: String,
        /// Raw response body.
        body: String,
    },

    /// No application with the given context path is deployed.
    #[error("Application with path \"{0}\" not found")]
    ApplicationNotFound(String),

    /// The response body did not follow the manager text format.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Configuration errors (invalid config file, missing required fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ManagerError {
    /// Creates a connection-not-found error for the given identifier.
    pub fn connection_not_found(id: impl Into<String>) -> Self {
        Self::ConnectionNotFound(id.into())
    }

    /// Creates a transport-level HTTP error (no status received).
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Http {
            status: None,
            message: msg.into(),
        }
    }

    /// Creates an HTTP error for an unsuccessful status code.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        let body: String = body.into();
        Self::Http {
            status: Some(status),
            message: format!("server returned {status}: {}", body.trim_end()),
        }
    }

    /// Creates a command failure carrying the raw response body.
    pub fn command_failed(command: impl Into<String>, body: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            body: body.into(),
        }
    }

    /// Creates a protocol error with the given message.
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::ConnectionNotFound(_) | Self::NoActiveConnection | Self::AliasInUse(_) => {
                "Connection Error"
            }
            Self::Http { .. } => "HTTP Error",
            Self::CommandFailed { .. } => "Command Error",
            Self::ApplicationNotFound(_) => "Application Error",
            Self::Protocol(_) => "Protocol Error",
            Self::Config(_) => "Configuration Error",
        }
    }
}

/// Result type alias using ManagerError.
pub type Result<T> = std::result::Result<T, ManagerError>;
