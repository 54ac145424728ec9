//! Start-and-poll driver for comparison jobs.
//!
//! Each call to [`Orchestrator::start`] opens a new epoch on the caller's
//! [`CompareContext`]. Starting again cancels the previous epoch's token; a
//! superseded run drops whatever its in-flight request returns and never
//! touches the published view again.

use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicU64, Ordering},
};

use log::{debug, info, warn};
use tokio::{sync::watch, time};
use tokio_util::sync::CancellationToken;

use artweave_core::{anchor::ArtworkAnchors, diagram::DiagramPayload};

use super::{CompareError, CompareJob, CompareTransport, JobStatus, StartRequest, TimeoutKind};
use crate::{
    DiagramBuilder,
    config::{AppConfig, ClientConfig},
    fallback,
    summary::{SUMMARY_PLACEHOLDER, process_summary},
};

/// Message used when the service reports an error without details.
const GENERIC_JOB_ERROR: &str = "Comparison failed.";

/// Lifecycle of the published comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ComparePhase {
    #[default]
    Idle,
    Running,
    Done,
    Failed,
    TimedOut,
}

/// Latest known state of the active comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompareView {
    pub epoch: u64,
    pub job_id: Option<String>,
    pub phase: ComparePhase,
    /// Number of poll responses applied so far.
    pub attempts: u32,
    pub summary: Option<String>,
    /// Laid-out diagram, or the fallback graph if the last payload was unusable.
    pub diagram: Option<DiagramPayload>,
    pub error: Option<CompareError>,
}

impl CompareView {
    /// Returns the published diagram or, if none arrived, the fallback graph.
    pub fn renderable_diagram(&self, anchors: &ArtworkAnchors) -> DiagramPayload {
        self.diagram
            .clone()
            .unwrap_or_else(|| fallback::fallback_diagram(anchors))
    }
}

/// Result of a comparison that reached `done`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareResult {
    pub job_id: String,
    pub summary: Option<String>,
    pub diagram: DiagramPayload,
    /// True when `diagram` is the fallback graph.
    pub is_fallback: bool,
}

/// How a started comparison ended, short of an error.
#[derive(Debug, Clone, PartialEq)]
pub enum CompareOutcome {
    Finished(CompareResult),
    /// A newer comparison was started on the same context.
    Superseded,
}

/// Caller-owned state shared by all comparisons of one session.
pub struct CompareContext {
    epoch: AtomicU64,
    active: Mutex<CancellationToken>,
    view: watch::Sender<CompareView>,
}

impl Default for CompareContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CompareContext {
    pub fn new() -> Self {
        let (view, _) = watch::channel(CompareView::default());
        Self {
            epoch: AtomicU64::new(0),
            active: Mutex::new(CancellationToken::new()),
            view,
        }
    }

    /// Subscribes to view updates.
    pub fn subscribe(&self) -> watch::Receiver<CompareView> {
        self.view.subscribe()
    }

    /// Snapshot of the current view.
    pub fn view(&self) -> CompareView {
        self.view.borrow().clone()
    }

    pub fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.current_epoch() == epoch
    }

    /// Opens a new epoch, cancelling the previous one.
    fn begin(&self) -> (u64, CancellationToken) {
        let token = CancellationToken::new();
        let epoch = {
            let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
            let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
            let previous = std::mem::replace(&mut *active, token.clone());
            previous.cancel();
            epoch
        };
        self.view.send_replace(CompareView {
            epoch,
            phase: ComparePhase::Running,
            ..CompareView::default()
        });
        (epoch, token)
    }

    /// Cancels the active comparison, if any, and resets the view.
    pub fn cancel(&self) {
        let (epoch, token) = self.begin();
        token.cancel();
        self.view.send_replace(CompareView {
            epoch,
            ..CompareView::default()
        });
    }

    /// Applies `update` to the view if `epoch` is still the active one.
    fn update(&self, epoch: u64, update: impl FnOnce(&mut CompareView)) -> bool {
        self.view.send_if_modified(|view| {
            if view.epoch != epoch || !self.is_current(epoch) {
                return false;
            }
            update(view);
            true
        })
    }
}

/// Drives comparison jobs over a transport.
pub struct Orchestrator<T> {
    transport: T,
    client: ClientConfig,
    builder: DiagramBuilder,
}

impl<T: CompareTransport> Orchestrator<T> {
    pub fn new(transport: T, config: &AppConfig) -> Self {
        Self {
            transport,
            client: config.client().clone(),
            builder: DiagramBuilder::new(config.layout().clone()),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Runs one comparison to completion, publishing progress to `context`.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::Validation`] before any network call when the
    /// selection is incomplete, [`CompareError::Fetch`] on service failures
    /// or an `error` status, and [`CompareError::Timeout`] when the poll
    /// budget or the overall deadline runs out.
    pub async fn start(
        &self,
        context: &CompareContext,
        request: StartRequest,
        anchors: &ArtworkAnchors,
    ) -> Result<CompareOutcome, CompareError> {
        request.validate()?;

        let (epoch, token) = context.begin();
        info!(epoch, set = request.set.as_str(); "Starting comparison");

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(epoch; "Comparison superseded");
                return Ok(CompareOutcome::Superseded);
            }
            result = time::timeout(
                self.client.overall_timeout(),
                self.run(context, epoch, &request, anchors),
            ) => result,
        };

        match result {
            Ok(outcome) => outcome,
            Err(_) if !context.is_current(epoch) => Ok(CompareOutcome::Superseded),
            Err(_) => {
                warn!(epoch; "Comparison deadline elapsed");
                let err = CompareError::Timeout(TimeoutKind::Deadline);
                self.finish_timed_out(context, epoch, &err);
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        context: &CompareContext,
        epoch: u64,
        request: &StartRequest,
        anchors: &ArtworkAnchors,
    ) -> Result<CompareOutcome, CompareError> {
        let started = self.transport.start(request).await;
        if !context.is_current(epoch) {
            debug!(epoch; "Discarding start response of superseded comparison");
            return Ok(CompareOutcome::Superseded);
        }
        let started = started.inspect_err(|err| self.fail(context, epoch, err))?;

        let mut job = CompareJob::new(started.compare_id);
        info!(epoch, job = job.id(); "Comparison job started");
        context.update(epoch, |view| view.job_id = Some(job.id().to_string()));

        let mut summary = None;
        let mut diagram = None;
        let max_attempts = self.client.max_attempts();
        for attempt in 1..=max_attempts {
            debug!(job = job.id(), attempt; "Polling comparison");
            let response = self.transport.poll(job.id()).await;
            if !context.is_current(epoch) {
                debug!(epoch, attempt; "Discarding poll response of superseded comparison");
                return Ok(CompareOutcome::Superseded);
            }
            let response = response.inspect_err(|err| self.fail(context, epoch, err))?;

            if let Some(text) = response.summary_markdown.as_deref() {
                summary = Some(process_summary(text, anchors));
            }
            if let Some(raw) = response.diagram.as_ref() {
                diagram = Some(match self.builder.build(Some(raw)) {
                    Some(built) => {
                        debug!(job = job.id(), nodes = built.nodes.len(); "Diagram received");
                        (built, false)
                    }
                    None => {
                        warn!(job = job.id(); "Diagram payload unusable, using fallback graph");
                        let layout = self.builder.layout_config();
                        (fallback::fallback_diagram_with(anchors, layout), true)
                    }
                });
            }
            let fresh = response.diagram.is_some();
            job.apply(response);

            context.update(epoch, |view| {
                view.attempts = attempt;
                view.summary.clone_from(&summary);
                if fresh {
                    view.diagram = diagram.as_ref().map(|(built, _)| built.clone());
                }
            });

            match job.status() {
                JobStatus::Done => {
                    info!(job = job.id(), attempt; "Comparison finished");
                    context.update(epoch, |view| view.phase = ComparePhase::Done);
                    let (diagram, is_fallback) = diagram.unwrap_or_else(|| {
                        let layout = self.builder.layout_config();
                        (fallback::fallback_diagram_with(anchors, layout), true)
                    });
                    return Ok(CompareOutcome::Finished(CompareResult {
                        job_id: job.id().to_string(),
                        summary,
                        diagram,
                        is_fallback,
                    }));
                }
                JobStatus::Error => {
                    let message = job
                        .error_message()
                        .filter(|message| !message.trim().is_empty())
                        .unwrap_or(GENERIC_JOB_ERROR);
                    let err = CompareError::Fetch(message.to_string());
                    warn!(job = job.id(), err:err; "Comparison job failed");
                    self.fail(context, epoch, &err);
                    return Err(err);
                }
                JobStatus::Processing if attempt < max_attempts => {
                    time::sleep(self.client.poll_interval()).await;
                }
                JobStatus::Processing => {}
            }
        }

        warn!(job = job.id(), attempts = max_attempts; "Comparison poll budget exhausted");
        let err = CompareError::Timeout(TimeoutKind::PollBudget);
        self.finish_timed_out(context, epoch, &err);
        Err(err)
    }

    fn fail(&self, context: &CompareContext, epoch: u64, err: &CompareError) {
        context.update(epoch, |view| {
            view.phase = ComparePhase::Failed;
            view.error = Some(err.clone());
        });
    }

    fn finish_timed_out(&self, context: &CompareContext, epoch: u64, err: &CompareError) {
        context.update(epoch, |view| {
            view.phase = ComparePhase::TimedOut;
            view.error = Some(err.clone());
            if view.summary.is_none() {
                view.summary = Some(SUMMARY_PLACEHOLDER.to_string());
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_bumps_epoch_and_cancels_previous() {
        let context = CompareContext::new();
        let (first, first_token) = context.begin();
        let (second, second_token) = context.begin();

        assert_eq!(first + 1, second);
        assert!(first_token.is_cancelled());
        assert!(!second_token.is_cancelled());
        assert_eq!(context.view().phase, ComparePhase::Running);
        assert_eq!(context.view().epoch, second);
    }

    #[test]
    fn test_stale_update_is_dropped() {
        let context = CompareContext::new();
        let (first, _) = context.begin();
        let (second, _) = context.begin();

        assert!(!context.update(first, |view| view.attempts = 7));
        assert!(context.update(second, |view| view.attempts = 1));
        assert_eq!(context.view().attempts, 1);
    }

    #[test]
    fn test_cancel_resets_view() {
        let context = CompareContext::new();
        let (epoch, token) = context.begin();
        context.update(epoch, |view| view.summary = Some("partial".to_string()));
        context.cancel();

        assert!(token.is_cancelled());
        assert_eq!(context.view().phase, ComparePhase::Idle);
        assert_eq!(context.view().summary, None);
    }

    #[test]
    fn test_renderable_diagram_falls_back() {
        let view = CompareView::default();
        let diagram = view.renderable_diagram(&ArtworkAnchors::default());
        assert_eq!(diagram.nodes.len(), 3);
    }
}
