//! Submission lifecycle.
//!
//! A [`SubmissionController`] drives one asynchronous submit call at a
//! time through `Idle -> Submitting -> Succeeded | Idle`, and hands the
//! outcome to a [`SubmitEffects`] handler. In-flight calls can be aborted,
//! in which case no effects fire.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{AbortHandle, Abortable, BoxFuture};
use tracing::{debug, info, warn};

use crate::error::{SubmissionError, ValidationErrors};
use crate::model::FormModel;
use crate::state::FormState;

/// The operation a form submits to.
pub trait Submitter: Send + Sync {
    /// Submits the values. Called at most once per submission.
    fn submit<'a>(&'a self, values: &'a FormState) -> BoxFuture<'a, Result<(), SubmissionError>>;
}

/// Side effects of a settled submission.
///
/// Both callbacks are fire-and-forget.
pub trait SubmitEffects: Send + Sync {
    /// Called after the submitter succeeded.
    fn on_success(&self);

    /// Called with the submitter's error, unchanged.
    fn on_failure(&self, error: &SubmissionError);
}

/// Current state of the submission lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    /// Nothing in flight. The last attempt, if any, failed or was
    /// cancelled.
    #[default]
    Idle,
    /// A submission is in flight; submit is disabled.
    Submitting,
    /// The last attempt succeeded.
    Succeeded,
}

impl SubmissionStatus {
    /// Returns whether a submission is in flight.
    pub const fn is_submitting(self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Returns whether a new submission may start.
    pub const fn accepts_submit(self) -> bool {
        !self.is_submitting()
    }
}

/// Result of a call to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The submitter succeeded and success effects fired.
    Succeeded,
    /// The submitter failed and failure effects fired.
    Failed(SubmissionError),
    /// Validation failed; the submitter was not called.
    Invalid(ValidationErrors),
    /// Another submission was in flight; nothing happened.
    AlreadySubmitting,
    /// The submission was aborted or the controller shut down; no effects
    /// fired.
    Cancelled,
}

#[derive(Debug, Default)]
struct Inner {
    status: SubmissionStatus,
    in_flight: Option<(u64, AbortHandle)>,
    attempts: u64,
    closed: bool,
}

impl Inner {
    fn is_current(&self, attempt: u64) -> bool {
        matches!(self.in_flight, Some((id, _)) if id == attempt)
    }

    fn abort_in_flight(&mut self) -> bool {
        match self.in_flight.take() {
            Some((_, handle)) => {
                handle.abort();
                self.status = SubmissionStatus::Idle;
                true
            }
            None => false,
        }
    }
}

/// Returns an attempt to `Idle` when its submit future is dropped before
/// settling.
struct AttemptGuard<'a> {
    inner: &'a Mutex<Inner>,
    attempt: u64,
    armed: bool,
}

impl AttemptGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.is_current(self.attempt) {
            inner.in_flight = None;
            inner.status = SubmissionStatus::Idle;
            debug!(attempt = self.attempt, "submission dropped before settling");
        }
    }
}

/// Drives submissions for one form.
///
/// Cloning yields another handle to the same lifecycle.
#[derive(Clone)]
pub struct SubmissionController {
    submitter: Arc<dyn Submitter>,
    effects: Arc<dyn SubmitEffects>,
    inner: Arc<Mutex<Inner>>,
}

impl std::fmt::Debug for SubmissionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionController")
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

impl SubmissionController {
    /// Creates a controller with injected submitter and effects.
    pub fn new(submitter: Arc<dyn Submitter>, effects: Arc<dyn SubmitEffects>) -> Self {
        Self {
            submitter,
            effects,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the current status.
    pub fn status(&self) -> SubmissionStatus {
        self.lock().status
    }

    /// Returns whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.lock().status.is_submitting()
    }

    /// Validates the form and submits it when valid.
    ///
    /// Every field is marked touched first, so blocking errors become
    /// visible.
    pub async fn submit_form(&self, form: &mut FormModel) -> SubmitOutcome {
        if self.is_submitting() {
            debug!("submit ignored, submission in flight");
            return SubmitOutcome::AlreadySubmitting;
        }
        match form.prepare_submit() {
            Ok(values) => self.submit(values).await,
            Err(errors) => SubmitOutcome::Invalid(errors),
        }
    }

    /// Submits already validated values.
    ///
    /// A call made while another submission is in flight is a no-op.
    pub async fn submit(&self, values: FormState) -> SubmitOutcome {
        let (attempt, registration) = {
            let mut inner = self.lock();
            if inner.closed {
                debug!("submit ignored, controller shut down");
                return SubmitOutcome::Cancelled;
            }
            if inner.status.is_submitting() {
                debug!("submit ignored, submission in flight");
                return SubmitOutcome::AlreadySubmitting;
            }
            inner.attempts += 1;
            let attempt = inner.attempts;
            let (handle, registration) = AbortHandle::new_pair();
            inner.in_flight = Some((attempt, handle));
            inner.status = SubmissionStatus::Submitting;
            (attempt, registration)
        };

        let guard = AttemptGuard {
            inner: &self.inner,
            attempt,
            armed: true,
        };
        debug!(attempt, "submission started");
        let result = Abortable::new(self.submitter.submit(&values), registration).await;
        guard.disarm();

        {
            let mut inner = self.lock();
            if !inner.is_current(attempt) {
                info!(attempt, "submission cancelled");
                return SubmitOutcome::Cancelled;
            }
            inner.in_flight = None;
            inner.status = match &result {
                Ok(Ok(())) => SubmissionStatus::Succeeded,
                Ok(Err(_)) | Err(_) => SubmissionStatus::Idle,
            };
        }

        match result {
            Ok(Ok(())) => {
                info!(attempt, "submission succeeded");
                self.effects.on_success();
                SubmitOutcome::Succeeded
            }
            Ok(Err(err)) => {
                warn!(attempt, error = %err, "submission failed");
                self.effects.on_failure(&err);
                SubmitOutcome::Failed(err)
            }
            Err(_) => {
                info!(attempt, "submission cancelled");
                SubmitOutcome::Cancelled
            }
        }
    }

    /// Aborts the in-flight submission, if any.
    ///
    /// The aborted call settles as [`SubmitOutcome::Cancelled`] and fires
    /// no effects. Returns whether something was aborted.
    pub fn cancel(&self) -> bool {
        self.lock().abort_in_flight()
    }

    /// Cancels the in-flight submission and refuses all later ones.
    pub fn shutdown(&self) {
        let mut inner = self.lock();
        inner.closed = true;
        if inner.abort_in_flight() {
            debug!("in-flight submission aborted on shutdown");
        }
    }

    /// Returns whether the controller has been shut down.
    pub fn is_shut_down(&self) -> bool {
        self.lock().closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldKind, FormFieldDef, Schema};
    use crate::validation::RequiredValidator;
    use futures::FutureExt;
    use tokio::sync::oneshot;

    type Reply = Result<(), SubmissionError>;

    /// Submitter that settles when the test sends a reply.
    #[derive(Default)]
    struct GatedSubmitter {
        replies: Mutex<Vec<oneshot::Receiver<Reply>>>,
        calls: Mutex<Vec<FormState>>,
    }

    impl GatedSubmitter {
        fn gate(&self) -> oneshot::Sender<Reply> {
            let (tx, rx) = oneshot::channel();
            self.replies.lock().unwrap().push(rx);
            tx
        }

        fn calls(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl Submitter for GatedSubmitter {
        fn submit<'a>(&'a self, values: &'a FormState) -> BoxFuture<'a, Reply> {
            self.calls.lock().unwrap().push(values.clone());
            let rx = self.replies.lock().unwrap().remove(0);
            Box::pin(async move {
                rx.await
                    .unwrap_or_else(|_| Err(SubmissionError::message("dropped")))
            })
        }
    }

    #[derive(Default)]
    struct RecordingEffects {
        events: Mutex<Vec<String>>,
    }

    impl RecordingEffects {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl SubmitEffects for RecordingEffects {
        fn on_success(&self) {
            self.events.lock().unwrap().push("success".to_string());
        }

        fn on_failure(&self, error: &SubmissionError) {
            self.events.lock().unwrap().push(format!("failure: {error}"));
        }
    }

    fn setup() -> (
        SubmissionController,
        Arc<GatedSubmitter>,
        Arc<RecordingEffects>,
    ) {
        let submitter = Arc::new(GatedSubmitter::default());
        let effects = Arc::new(RecordingEffects::default());
        let controller = SubmissionController::new(submitter.clone(), effects.clone());
        (controller, submitter, effects)
    }

    #[tokio::test]
    async fn test_success_lifecycle() {
        let (controller, submitter, effects) = setup();
        let tx = submitter.gate();
        assert_eq!(controller.status(), SubmissionStatus::Idle);

        let (outcome, ()) = tokio::join!(controller.submit(FormState::new()), async {
            assert_eq!(controller.status(), SubmissionStatus::Submitting);
            tx.send(Ok(())).unwrap();
        });

        assert_eq!(outcome, SubmitOutcome::Succeeded);
        assert_eq!(controller.status(), SubmissionStatus::Succeeded);
        assert_eq!(submitter.calls(), 1);
        assert_eq!(effects.events(), vec!["success"]);
    }

    #[tokio::test]
    async fn test_failure_reenables_submit() {
        let (controller, submitter, effects) = setup();
        submitter
            .gate()
            .send(Err(SubmissionError::message("Email taken")))
            .unwrap();

        let outcome = controller.submit(FormState::new()).await;
        assert_eq!(
            outcome,
            SubmitOutcome::Failed(SubmissionError::message("Email taken"))
        );
        assert_eq!(controller.status(), SubmissionStatus::Idle);
        assert!(controller.status().accepts_submit());
        assert_eq!(effects.events(), vec!["failure: Email taken"]);

        submitter.gate().send(Ok(())).unwrap();
        assert_eq!(
            controller.submit(FormState::new()).await,
            SubmitOutcome::Succeeded
        );
        assert_eq!(submitter.calls(), 2);
    }

    #[tokio::test]
    async fn test_second_submit_while_submitting_is_noop() {
        let (controller, submitter, effects) = setup();
        let tx = submitter.gate();

        let (first, second) = tokio::join!(controller.submit(FormState::new()), async {
            let second = controller.submit(FormState::new()).await;
            tx.send(Ok(())).unwrap();
            second
        });

        assert_eq!(first, SubmitOutcome::Succeeded);
        assert_eq!(second, SubmitOutcome::AlreadySubmitting);
        assert_eq!(submitter.calls(), 1);
        assert_eq!(effects.events(), vec!["success"]);
    }

    #[tokio::test]
    async fn test_cancel_suppresses_effects() {
        let (controller, submitter, effects) = setup();
        let _tx = submitter.gate();

        let (outcome, cancelled) = tokio::join!(controller.submit(FormState::new()), async {
            controller.cancel()
        });

        assert!(cancelled);
        assert_eq!(outcome, SubmitOutcome::Cancelled);
        assert_eq!(controller.status(), SubmissionStatus::Idle);
        assert!(effects.events().is_empty());
        assert!(!controller.cancel());
    }

    #[tokio::test]
    async fn test_dropped_submit_returns_to_idle() {
        let (controller, submitter, effects) = setup();
        let _tx = submitter.gate();

        assert_eq!(controller.submit(FormState::new()).now_or_never(), None);
        assert_eq!(controller.status(), SubmissionStatus::Idle);
        assert!(!controller.cancel());

        submitter.gate().send(Ok(())).unwrap();
        assert_eq!(
            controller.submit(FormState::new()).await,
            SubmitOutcome::Succeeded
        );
        assert_eq!(submitter.calls(), 2);
        assert_eq!(effects.events(), vec!["success"]);
    }

    #[tokio::test]
    async fn test_timed_out_submit_can_be_retried() {
        let (controller, submitter, _effects) = setup();
        let _tx = submitter.gate();

        let timed_out = tokio::time::timeout(
            std::time::Duration::from_millis(10),
            controller.submit(FormState::new()),
        )
        .await;
        assert!(timed_out.is_err());
        assert!(!controller.is_submitting());

        submitter.gate().send(Err(SubmissionError::message("offline"))).unwrap();
        assert!(matches!(
            controller.submit(FormState::new()).await,
            SubmitOutcome::Failed(_)
        ));
    }

    #[tokio::test]
    async fn test_shutdown_refuses_later_submits() {
        let (controller, submitter, effects) = setup();
        controller.shutdown();
        assert!(controller.is_shut_down());
        assert_eq!(
            controller.submit(FormState::new()).await,
            SubmitOutcome::Cancelled
        );
        assert_eq!(submitter.calls(), 0);
        assert!(effects.events().is_empty());
    }

    #[tokio::test]
    async fn test_submit_form_blocks_invalid() {
        let (controller, submitter, _effects) = setup();
        let mut form = FormModel::new(
            Schema::builder()
                .field(
                    FormFieldDef::new("firstName", "First Name", FieldKind::Text)
                        .required()
                        .validator(RequiredValidator::with_message("First Name is required")),
                )
                .build(),
        );

        let SubmitOutcome::Invalid(errors) = controller.submit_form(&mut form).await else {
            panic!("expected validation to block submission");
        };
        assert_eq!(errors.get("firstName"), Some("First Name is required"));
        assert_eq!(form.visible_error("firstName"), Some("First Name is required"));
        assert_eq!(submitter.calls(), 0);
        assert_eq!(controller.status(), SubmissionStatus::Idle);

        form.set_value("firstName", "Amani");
        submitter.gate().send(Ok(())).unwrap();
        assert_eq!(
            controller.submit_form(&mut form).await,
            SubmitOutcome::Succeeded
        );
    }
}
