//! Errors that leave the library through the public command functions.
//!
//! Inside the crate everything is an `anyhow::Error` with context attached along the way. At the
//! command boundary the error is tagged with an `ErrorType` so that callers (the CLI, or anything
//! else driving the library) can tell a missing workbook from an unreadable one without parsing
//! messages.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The result type used internally and by the workbook and renderer traits.
pub type Res<T> = anyhow::Result<T>;

/// The result type returned by public command functions.
pub type Result<T> = std::result::Result<T, Error>;

/// The broad category of a failure.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The workbook file does not exist.
    NotFound,
    /// The input file is not an `.xlsx` workbook.
    WrongExtension,
    /// The workbook exists but could not be opened or parsed.
    Unreadable,
    /// The configuration file is missing, malformed or invalid.
    Config,
    /// A filesystem operation outside of the workbook itself failed.
    Io,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// An error carrying its `ErrorType` along with the underlying cause.
#[derive(Debug)]
pub struct Error {
    error_type: ErrorType,
    source: anyhow::Error,
}

impl Error {
    pub fn new(error_type: ErrorType, source: impl Into<anyhow::Error>) -> Self {
        Self {
            error_type,
            source: source.into(),
        }
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // The alternate form prints the whole context chain on one line.
        write!(f, "{:#}", self.source)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

/// Converts an internal `anyhow` result into a public `Result` tagged with an `ErrorType`.
pub(crate) trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T> IntoResult<T> for Res<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| Error::new(error_type, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};

    #[test]
    fn test_pub_result_tags_error() {
        let res: Res<()> = Err(anyhow!("zip header missing")).context("Unable to open workbook");
        let err = res.pub_result(ErrorType::Unreadable).unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Unreadable);
        assert_eq!(
            err.to_string(),
            "Unable to open workbook: zip header missing"
        );
    }

    #[test]
    fn test_pub_result_passes_ok_through() {
        let res: Res<u8> = Ok(7);
        assert_eq!(res.pub_result(ErrorType::Io).unwrap(), 7);
    }

    #[test]
    fn test_error_type_display() {
        assert_eq!(ErrorType::WrongExtension.to_string(), "wrong_extension");
        assert_eq!(
            "not_found".parse::<ErrorType>().unwrap(),
            ErrorType::NotFound
        );
    }
}
