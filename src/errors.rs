use std::fmt;

use thiserror::Error;

/// Field-level format failures collected for a single wizard step.
///
/// The message list is never empty and never contains duplicates; it keeps
/// the order in which the checks produced the messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct FormatValidationError {
    messages: Vec<String>,
}

impl FormatValidationError {
    /// Builds an error from the collected messages.
    ///
    /// Returns `None` when `messages` is empty, since an error without a
    /// message would be indistinguishable from a valid result.
    pub fn from_messages<I, S>(messages: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for message in messages {
            let message = message.into();
            if !unique.contains(&message) {
                unique.push(message);
            }
        }
        if unique.is_empty() {
            None
        } else {
            Some(Self { messages: unique })
        }
    }

    pub fn single(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }

    /// Joins the messages with bullet separators, one per line.
    pub fn bulleted(&self) -> String {
        self.messages
            .iter()
            .map(|message| format!("• {message}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for FormatValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages.join("; "))
    }
}

/// Error type covering catalog lookups, configuration and field parsing.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Flight not found: {0}")]
    FlightNotFound(String),
    #[error("Seat {0} does not exist on this aircraft")]
    UnknownSeat(String),
    #[error("Seat {0} is not available")]
    SeatUnavailable(String),
    #[error("Unknown flight filter: {0}")]
    UnknownFilter(String),
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Invalid configuration value: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Validation(#[from] FormatValidationError),
}
