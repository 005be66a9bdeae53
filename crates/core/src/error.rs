//! Error types for Larder
//!
//! Every failure in the workspace is a `SyncError`. Service methods never
//! swallow errors; they hand a `SyncError` back to the caller, and view
//! components route its `user_message()` to the alert channel.

use thiserror::Error;

/// The main error type for Larder
#[derive(Debug, Error)]
pub enum SyncError {
    // ========================================================================
    // Remote Errors
    // ========================================================================
    /// The request never produced an HTTP response (DNS, connect, reset, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status
    #[error("Server error ({status}): {message}")]
    Server {
        status: u16,
        message: String,
        error_key: Option<String>,
    },

    /// A single-entity fetch named an id the server does not know
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Parse(String),

    // ========================================================================
    // Local Errors
    // ========================================================================
    /// An operation that needs a persisted entity got a draft
    #[error("{entity} has no id")]
    MissingId { entity: String },

    /// A save is already in flight, or a modal is already open
    #[error("Busy: {0}")]
    Busy(String),

    /// Invalid or unreadable configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Coarse classification of a `SyncError`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Transport,
    Server,
    NotFound,
    Parse,
    MissingId,
    Busy,
    Config,
    Io,
    Other,
}

impl SyncError {
    /// Create a server error from a status code and message
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        SyncError::Server {
            status,
            message: message.into(),
            error_key: None,
        }
    }

    /// Create a not-found error for an entity id
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        SyncError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create a missing-id error
    pub fn missing_id(entity: impl Into<String>) -> Self {
        SyncError::MissingId {
            entity: entity.into(),
        }
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        SyncError::Transport(msg.into())
    }

    /// Create a busy error
    pub fn busy(msg: impl Into<String>) -> Self {
        SyncError::Busy(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        SyncError::Config(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        SyncError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// The tag of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::Transport(_) => ErrorKind::Transport,
            SyncError::Server { .. } => ErrorKind::Server,
            SyncError::NotFound { .. } => ErrorKind::NotFound,
            SyncError::Parse(_) | SyncError::Json(_) => ErrorKind::Parse,
            SyncError::MissingId { .. } => ErrorKind::MissingId,
            SyncError::Busy(_) => ErrorKind::Busy,
            SyncError::Config(_) => ErrorKind::Config,
            SyncError::Io(_) => ErrorKind::Io,
            SyncError::WithContext { .. } => ErrorKind::Other,
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::Server { status, .. } => Some(*status),
            SyncError::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// Check if this error is a not-found error
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check if the request never reached the server
    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    /// The message shown to the user on the alert channel
    ///
    /// Server errors show the server's own message; everything else shows
    /// the display form of the error.
    pub fn user_message(&self) -> String {
        match self {
            SyncError::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias using SyncError
pub type SyncResult<T> = Result<T, SyncError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> SyncResult<T>;
}

impl<T, E: Into<SyncError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> SyncResult<T> {
        self.map_err(|e| {
            let err: SyncError = e.into();
            SyncError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
