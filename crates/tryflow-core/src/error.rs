//! Error types for Tryflow.

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Shared handle to an error captured from a wrapped computation.
pub type CapturedError = Arc<dyn StdError + Send + Sync + 'static>;

/// Failure payload carried by a [`Try`](crate::Try).
#[derive(Error, Debug, Clone)]
pub enum TryError {
    /// An error returned by a wrapped computation.
    #[error(transparent)]
    Captured(CapturedError),

    /// A panic raised inside a wrapped closure.
    #[error("Computation panicked: {message}")]
    Panicked { message: String },

    /// A fail-fast guard rejected its input.
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// No switch case accepted the input.
    #[error("No case matched and no default provided")]
    NoMatch,

    /// An optional value was absent.
    #[error("Value is missing")]
    MissingValue,

    /// A success value was rejected by `filter`.
    #[error("Predicate rejected value: {message}")]
    Filtered { message: String },

    /// The wait between retry attempts was interrupted.
    #[error("Interrupted while waiting between attempts")]
    Interrupted,

    /// A background task was cancelled before completing.
    #[error("Task was cancelled")]
    Cancelled,

    /// A background task could not be joined.
    #[error("Task failed: {message}")]
    TaskFailed { message: String },

    /// Ad-hoc error.
    #[error("{0}")]
    Message(String),
}

impl TryError {
    /// Capture an arbitrary error, keeping its identity.
    ///
    /// A `TryError` passed in is returned as is rather than nested.
    pub fn capture<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let boxed: Box<dyn StdError + Send + Sync + 'static> = Box::new(err);
        match boxed.downcast::<TryError>() {
            Ok(inner) => *inner,
            Err(other) => TryError::Captured(Arc::from(other)),
        }
    }

    /// Capture an `anyhow::Error`.
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        match err.downcast::<TryError>() {
            Ok(inner) => inner,
            Err(other) => TryError::Captured(Arc::new(AnyhowError(other))),
        }
    }

    /// Build a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        TryError::Validation {
            message: message.into(),
        }
    }

    /// Build a filter rejection error.
    pub fn filtered(message: impl Into<String>) -> Self {
        TryError::Filtered {
            message: message.into(),
        }
    }

    /// Convert a panic payload into an error.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        TryError::Panicked { message }
    }

    /// Returns the captured error if it is of type `E`.
    ///
    /// Errors captured through [`TryError::from_anyhow`] are looked up in
    /// the `anyhow::Error`, including any context layers.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + Send + Sync + 'static,
    {
        match self {
            TryError::Captured(inner) => match inner.downcast_ref::<AnyhowError>() {
                Some(AnyhowError(err)) => err.downcast_ref::<E>(),
                None => inner.downcast_ref::<E>(),
            },
            _ => None,
        }
    }

    /// Returns true if the captured error is of type `E`.
    pub fn is<E>(&self) -> bool
    where
        E: StdError + Send + Sync + 'static,
    {
        self.downcast_ref::<E>().is_some()
    }

    /// Returns true if this failure came from an interrupted or cancelled wait.
    pub fn is_interruption(&self) -> bool {
        matches!(self, TryError::Interrupted | TryError::Cancelled)
    }
}

/// `anyhow::Error` kept whole so its inner error stays reachable.
#[derive(Debug)]
struct AnyhowError(anyhow::Error);

impl fmt::Display for AnyhowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for AnyhowError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl PartialEq for TryError {
    fn eq(&self, other: &Self) -> bool {
        use TryError::*;
        match (self, other) {
            (Captured(a), Captured(b)) => Arc::ptr_eq(a, b),
            (Panicked { message: a }, Panicked { message: b }) => a == b,
            (Validation { message: a }, Validation { message: b }) => a == b,
            (Filtered { message: a }, Filtered { message: b }) => a == b,
            (TaskFailed { message: a }, TaskFailed { message: b }) => a == b,
            (Message(a), Message(b)) => a == b,
            (NoMatch, NoMatch)
            | (MissingValue, MissingValue)
            | (Interrupted, Interrupted)
            | (Cancelled, Cancelled) => true,
            _ => false,
        }
    }
}

impl From<&str> for TryError {
    fn from(message: &str) -> Self {
        TryError::Message(message.to_string())
    }
}

impl From<String> for TryError {
    fn from(message: String) -> Self {
        TryError::Message(message)
    }
}

impl From<serde_json::Error> for TryError {
    fn from(err: serde_json::Error) -> Self {
        TryError::capture(err)
    }
}

impl From<std::io::Error> for TryError {
    fn from(err: std::io::Error) -> Self {
        TryError::capture(err)
    }
}

/// Convenience Result type for Tryflow operations.
pub type Result<T> = std::result::Result<T, TryError>;
