//! Command handlers for the budget-charts CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod chart;
mod list;

use crate::error::{ErrorType, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::{debug, info};

pub use chart::{chart, ChartRun};
pub use list::list;

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// The single summary of a run, as reported to the user.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    NotFound,
    WrongExtension,
    Unreadable,
    /// Anything else, e.g. a bad config file or an output directory that cannot be created.
    Failed,
}

serde_plain::derive_display_from_serialize!(Outcome);
serde_plain::derive_fromstr_from_deserialize!(Outcome);

impl Outcome {
    pub fn of<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Outcome::Success,
            Err(e) => match e.error_type() {
                ErrorType::NotFound => Outcome::NotFound,
                ErrorType::WrongExtension => Outcome::WrongExtension,
                ErrorType::Unreadable => Outcome::Unreadable,
                ErrorType::Config | ErrorType::Io => Outcome::Failed,
            },
        }
    }

    /// The process exit code for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::Failed => 1,
            Outcome::NotFound => 2,
            Outcome::WrongExtension => 3,
            Outcome::Unreadable => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use anyhow::anyhow;

    #[test]
    fn test_outcome_of() {
        let ok: Result<()> = Ok(());
        assert_eq!(Outcome::of(&ok), Outcome::Success);

        let cases = [
            (ErrorType::NotFound, Outcome::NotFound),
            (ErrorType::WrongExtension, Outcome::WrongExtension),
            (ErrorType::Unreadable, Outcome::Unreadable),
            (ErrorType::Config, Outcome::Failed),
            (ErrorType::Io, Outcome::Failed),
        ];
        for (error_type, expected) in cases {
            let res: Result<()> = Err(Error::new(error_type, anyhow!("boom")));
            assert_eq!(Outcome::of(&res), expected);
        }
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            Outcome::Success,
            Outcome::Failed,
            Outcome::NotFound,
            Outcome::WrongExtension,
            Outcome::Unreadable,
        ]
        .map(|o| o.exit_code());
        let mut deduped = codes.to_vec();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), codes.len());
        assert_eq!(Outcome::Success.exit_code(), 0);
    }

    #[test]
    fn test_out_from_message() {
        let out: Out<()> = "done".into();
        assert_eq!(out.message(), "done");
        assert!(out.structure().is_none());
    }
}
