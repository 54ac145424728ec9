use std::fmt;

use thiserror::Error;

/// Message used when a failed response carries no usable detail.
pub const GENERIC_FETCH_MESSAGE: &str = "Failed to fetch comparison.";

/// Which limit ended a comparison early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutKind {
    /// All poll attempts were used without reaching a terminal status.
    PollBudget,
    /// The overall wall-clock deadline elapsed.
    Deadline,
}

impl fmt::Display for TimeoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PollBudget => write!(f, "poll budget exhausted"),
            Self::Deadline => write!(f, "deadline elapsed"),
        }
    }
}

/// Failures surfaced to the caller of a comparison.
///
/// Malformed diagrams are not errors; they degrade to the fallback graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Timeout: {0}")]
    Timeout(TimeoutKind),
}

impl CompareError {
    /// Builds a fetch error, substituting the generic message for blank details.
    pub fn fetch(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        if detail.trim().is_empty() {
            Self::Fetch(GENERIC_FETCH_MESSAGE.to_string())
        } else {
            Self::Fetch(detail)
        }
    }

    /// The text to show an end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) | Self::Fetch(message) => message.clone(),
            Self::Timeout(TimeoutKind::PollBudget) => {
                "Comparison is taking longer than expected. Please try again.".to_string()
            }
            Self::Timeout(TimeoutKind::Deadline) => {
                "Comparison timed out. Please try again.".to_string()
            }
        }
    }
}
