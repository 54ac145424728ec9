//! Comparison job client.
//!
//! A comparison is an asynchronous job on the generation service: it is
//! started once and then polled until it reaches a terminal status. The
//! [`Orchestrator`] drives that loop over a [`CompareTransport`] and
//! publishes every intermediate summary and diagram through a
//! [`CompareContext`].

mod error;
mod job;
mod orchestrator;
mod transport;

pub use error::{CompareError, TimeoutKind};
pub use job::{CompareJob, JobStatus, PollResponse, StartRequest, StartResponse};
pub use orchestrator::{
    CompareContext, CompareOutcome, ComparePhase, CompareResult, CompareView, Orchestrator,
};
pub use transport::{CompareTransport, HttpTransport};
