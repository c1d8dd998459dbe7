//! The public error type.
//!
//! Internally the crate uses `anyhow` for context chains. At public boundaries an `anyhow::Error`
//! is tagged with an `ErrorType` so that callers can decide how to recover without inspecting
//! message strings.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// The kind of failure that occurred.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// A position did not refer to an activity in the store.
    NotFound,
    /// A duration or date could not be parsed.
    Parse,
    /// Reading or writing a file failed.
    Io,
    /// The configuration file could not be read or understood.
    Config,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// An error with an `ErrorType` attached.
pub struct Error {
    error_type: ErrorType,
    inner: anyhow::Error,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn new(error_type: ErrorType, inner: impl Into<anyhow::Error>) -> Self {
        Self {
            error_type,
            inner: inner.into(),
        }
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    pub fn is_not_found(&self) -> bool {
        self.error_type == ErrorType::NotFound
    }

    pub fn is_parse(&self) -> bool {
        self.error_type == ErrorType::Parse
    }

    /// Wraps the error with additional context, keeping its `ErrorType`.
    pub(crate) fn context<C>(self, context: C) -> Self
    where
        C: Display + Send + Sync + 'static,
    {
        Self {
            error_type: self.error_type,
            inner: self.inner.context(context),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // The alternate form prints the whole context chain.
        write!(f, "{:#}", self.inner)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {:?}", self.error_type, self.inner)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner.source()
    }
}

/// Converts a private `anyhow` result into a public `Result` by tagging it with an `ErrorType`.
pub(crate) trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| Error::new(error_type, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};
    use std::str::FromStr;

    #[test]
    fn test_error_type_display_and_parse() {
        assert_eq!(ErrorType::NotFound.to_string(), "not_found");
        assert_eq!(ErrorType::from_str("io").unwrap(), ErrorType::Io);
    }

    #[test]
    fn test_pub_result_keeps_context_chain() {
        let r: std::result::Result<(), anyhow::Error> =
            Err(anyhow!("disk on fire")).context("Unable to save activities");
        let err = r.pub_result(ErrorType::Io).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Io);
        let message = err.to_string();
        assert!(message.contains("Unable to save activities"));
        assert!(message.contains("disk on fire"));
    }
}
