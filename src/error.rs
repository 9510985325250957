//! Error types for the fieldbridge library.
//!
//! Bridges themselves never fail. Errors only come from the layers around
//! them: loading configuration, reading input records and the CLI. All of
//! them are represented by the [`FieldBridgeError`] enum.
//!
//! # Examples
//!
//! ```
//! use fieldbridge::error::{FieldBridgeError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(FieldBridgeError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::fmt;
use std::io;

use thiserror::Error;

/// The main error type for fieldbridge operations.
#[derive(Error, Debug)]
pub enum FieldBridgeError {
    /// I/O errors (file operations, stdout, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Input parsing errors (malformed records, bad JSON lines)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Errors carrying context from the CLI layer
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with FieldBridgeError.
pub type Result<T> = std::result::Result<T, FieldBridgeError>;

impl FieldBridgeError {
    /// Create a new config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        FieldBridgeError::Config(msg.into())
    }

    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        FieldBridgeError::Parse(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        FieldBridgeError::InvalidArgument(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        FieldBridgeError::Other(msg.into())
    }
}

impl serde::ser::Error for FieldBridgeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        FieldBridgeError::other(msg.to_string())
    }
}
