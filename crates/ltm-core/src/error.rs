//! Error types for LTM node management
//!
//! This module defines all error types used throughout the crate.

use std::fmt;
use thiserror::Error;

/// Result type alias for LTM operations
pub type Result<T> = std::result::Result<T, Error>;

/// Remote operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Adding a new object
    Create,
    /// Fetching an object
    Read,
    /// Modifying an existing object
    Modify,
    /// Removing an object
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Operation::Create => "creating",
            Operation::Read => "retrieving",
            Operation::Modify => "modifying",
            Operation::Delete => "deleting",
        };
        f.write_str(verb)
    }
}

/// Core error type for LTM node management
#[derive(Error, Debug)]
pub enum Error {
    /// A call to the remote device failed
    ///
    /// Always carries the operation and the object name so the host can
    /// report which lifecycle step broke.
    #[error("error {operation} node {name}: {source}")]
    RemoteCall {
        /// Operation that was attempted
        operation: Operation,
        /// Name of the node object
        name: String,
        /// Error reported by the remote client
        #[source]
        source: Box<Error>,
    },

    /// Error raised by a node store implementation
    #[error("Node store error ({store}): {message}")]
    Store {
        /// Store name
        store: String,
        /// Error message
        message: String,
    },

    /// Reading or writing a resource attribute failed
    #[error("Attribute error ({key}): {message}")]
    Attribute {
        /// Attribute path
        key: String,
        /// Error message
        message: String,
    },

    /// Schema validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// State store-related errors
    #[error("State store error: {0}")]
    StateStore(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap a remote client failure with the operation and object name
    pub fn remote_call(operation: Operation, name: impl Into<String>, source: Error) -> Self {
        Self::RemoteCall {
            operation,
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// Create a node store error
    pub fn store(store: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Store {
            store: store.into(),
            message: message.into(),
        }
    }

    /// Create an attribute error
    pub fn attribute(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Attribute {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a state store error
    pub fn state_store(msg: impl Into<String>) -> Self {
        Self::StateStore(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the operation if this is a remote call failure
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::RemoteCall { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
