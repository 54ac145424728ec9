//! Wire types and the client-side job state machine.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::CompareError;

/// Body of the start call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartRequest {
    pub set: String,
    pub left_id: String,
    pub right_id: String,
}

impl StartRequest {
    pub fn new(
        set: impl Into<String>,
        left_id: impl Into<String>,
        right_id: impl Into<String>,
    ) -> Self {
        Self {
            set: set.into(),
            left_id: left_id.into(),
            right_id: right_id.into(),
        }
    }

    /// Rejects a request with a missing selection. Runs before any network call.
    pub fn validate(&self) -> Result<(), CompareError> {
        if self.set.trim().is_empty() {
            return Err(CompareError::Validation(
                "Select a painting set first.".to_string(),
            ));
        }
        if self.left_id.trim().is_empty() || self.right_id.trim().is_empty() {
            return Err(CompareError::Validation(
                "Select two artworks to compare.".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StartResponse {
    pub compare_id: String,
}

/// Job status as reported by a poll.
///
/// Anything that is not `done` or `error` (including `summary_ready`) is
/// still processing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Done,
    Error,
    #[default]
    #[serde(other)]
    Processing,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }
}

/// One poll snapshot. The diagram stays raw until normalized.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PollResponse {
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub summary_markdown: Option<String>,
    #[serde(default)]
    pub diagram: Option<Value>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl PollResponse {
    pub fn processing() -> Self {
        Self::default()
    }

    pub fn done() -> Self {
        Self {
            status: JobStatus::Done,
            ..Self::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: JobStatus::Error,
            error_message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary_markdown = Some(summary.into());
        self
    }

    pub fn with_diagram(mut self, diagram: Value) -> Self {
        self.diagram = Some(diagram);
        self
    }
}

/// Client-side record of one comparison job.
///
/// Created by the start call and mutated only by poll responses. Once the
/// status is terminal, later responses are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareJob {
    id: String,
    status: JobStatus,
    summary: Option<String>,
    diagram: Option<Value>,
    error_message: Option<String>,
}

impl CompareJob {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: JobStatus::Processing,
            summary: None,
            diagram: None,
            error_message: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Raw summary markdown, if any poll has carried one.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// The last raw diagram received.
    pub fn diagram(&self) -> Option<&Value> {
        self.diagram.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Folds a poll response into the job. Returns false if the job was
    /// already terminal and the response was dropped.
    pub fn apply(&mut self, response: PollResponse) -> bool {
        if self.is_terminal() {
            debug!(job = self.id.as_str(); "Ignoring poll response for finished job");
            return false;
        }
        self.status = response.status;
        if response.summary_markdown.is_some() {
            self.summary = response.summary_markdown;
        }
        if response.diagram.is_some() {
            self.diagram = response.diagram;
        }
        if response.error_message.is_some() {
            self.error_message = response.error_message;
        }
        true
    }
}
