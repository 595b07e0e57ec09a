//! Normalized error for the scanner boundary.
//!
//! Scanners collect failures from many sources (this catalog included) and
//! report them through one type. A `ScanError` carries an optional message
//! and an optional underlying cause; the three constructors cover the
//! combinations callers need.

use crate::error::LoadError;
use std::error::Error;
use std::fmt;

type BoxedCause = Box<dyn Error + Send + Sync + 'static>;

#[derive(Debug)]
pub struct ScanError {
    message: Option<String>,
    cause: Option<BoxedCause>,
}

impl ScanError {
    /// Wrap an underlying failure without adding a message.
    pub fn from_cause(cause: impl Into<BoxedCause>) -> Self {
        Self {
            message: None,
            cause: Some(cause.into()),
        }
    }

    /// A failure described only by a message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            cause: None,
        }
    }

    /// A message plus an optional underlying failure.
    pub fn with_message_and_cause(message: impl Into<String>, cause: Option<BoxedCause>) -> Self {
        Self {
            message: Some(message.into()),
            cause,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.message, &self.cause) {
            (Some(message), _) => f.write_str(message),
            (None, Some(cause)) => write!(f, "{cause}"),
            (None, None) => f.write_str("scan failed"),
        }
    }
}

impl Error for ScanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}

impl From<LoadError> for ScanError {
    fn from(err: LoadError) -> Self {
        ScanError::from_cause(err)
    }
}
