//! Tagged result of the message operations.

use crate::Error;

/// Result of a message operation.
///
/// The terminal shows `Empty` and `Failed` the same way; keeping them apart
/// lets callers log the real cause.
#[derive(Debug)]
pub enum Outcome<T> {
    /// The server returned data.
    Found(T),
    /// The server answered but had nothing to show.
    Empty,
    /// The request could not be made or its response was unusable.
    Failed(Error),
}

impl<T> Outcome<T> {
    /// Collapse into an `Option`, dropping the failure cause.
    pub fn found(self) -> Option<T> {
        match self {
            Outcome::Found(value) => Some(value),
            Outcome::Empty | Outcome::Failed(_) => None,
        }
    }

    /// The failure cause, if any.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> From<crate::Result<Outcome<T>>> for Outcome<T> {
    fn from(result: crate::Result<Outcome<T>>) -> Self {
        result.unwrap_or_else(Outcome::Failed)
    }
}
