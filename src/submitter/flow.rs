use super::fsm::{SubmissionEvent, SubmissionState, SubmissionStateMachine};
use crate::{
    Error, Result,
    analysis::{AnalysisRequest, AnalysisResponse, HttpSentimentClient, SentimentService},
    config::ServiceConfig,
    display::{DisplayState, Notice, Notifier},
};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// How a single submit action ended.
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Blank input; nothing was sent.
    Rejected,
    /// The response was rendered and the result panel revealed.
    Rendered(AnalysisResponse),
    /// The request failed and the user was notified.
    Failed(Error),
    /// A newer submission was issued while this one was in flight.
    Discarded,
}

impl SubmissionOutcome {
    pub fn state(&self) -> Option<SubmissionState> {
        match self {
            Self::Rejected => None,
            Self::Rendered(_) => Some(SubmissionState::Rendered),
            Self::Failed(_) => Some(SubmissionState::Failed),
            Self::Discarded => Some(SubmissionState::Discarded),
        }
    }
}

/// Sends feedback to the sentiment service and maps the result onto the
/// shared display.
///
/// `submit` takes `&self`, so several submissions may be in flight at once.
/// The display lock is never held across the network call. By default the
/// last response to settle wins; with the stale guard enabled only the most
/// recently issued submission may touch the result panel.
pub struct FeedbackSubmitter {
    service: Arc<dyn SentimentService>,
    notifier: Arc<dyn Notifier>,
    display: Arc<Mutex<DisplayState>>,
    latest_sequence: AtomicU64,
    discard_stale: bool,
}

impl FeedbackSubmitter {
    pub fn new(
        service: Arc<dyn SentimentService>,
        notifier: Arc<dyn Notifier>,
        display: Arc<Mutex<DisplayState>>,
    ) -> Self {
        Self {
            service,
            notifier,
            display,
            latest_sequence: AtomicU64::new(0),
            discard_stale: false,
        }
    }

    pub fn from_config(
        config: &ServiceConfig,
        notifier: Arc<dyn Notifier>,
        display: Arc<Mutex<DisplayState>>,
    ) -> Result<Self> {
        let client = HttpSentimentClient::new(config)?;
        info!(
            "Feedback submitter ready for {} (stale guard: {})",
            client.endpoint(),
            config.discard_stale_responses
        );

        Ok(Self::new(Arc::new(client), notifier, display)
            .with_stale_guard(config.discard_stale_responses))
    }

    pub fn with_stale_guard(mut self, enabled: bool) -> Self {
        self.discard_stale = enabled;
        self
    }

    pub fn display(&self) -> Arc<Mutex<DisplayState>> {
        Arc::clone(&self.display)
    }

    /// Runs one submit action for `raw` input.
    ///
    /// Service, transport and decoding failures are reported through the
    /// notifier and returned as [`SubmissionOutcome::Failed`]. The `Err`
    /// path is reserved for lifecycle violations.
    pub async fn submit(&self, raw: &str) -> Result<SubmissionOutcome> {
        let request = match AnalysisRequest::from_input(raw) {
            Ok(request) => request,
            Err(e) => {
                info!("Rejected blank feedback");
                self.notifier.notify(&Notice::validation(e.user_message()));
                return Ok(SubmissionOutcome::Rejected);
            }
        };

        let sequence = self.latest_sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let submission_id = Uuid::new_v4();
        let mut fsm = SubmissionStateMachine::new(sequence);

        info!(
            "Submitting feedback {} (seq {}, {} chars)",
            submission_id,
            sequence,
            request.text().chars().count()
        );

        self.display.lock().await.begin_loading();
        fsm.transition(SubmissionEvent::Submit)?;

        let result = self.service.analyze(request).await;

        let superseded =
            self.discard_stale && self.latest_sequence.load(Ordering::SeqCst) != sequence;

        let (event, outcome) = if superseded {
            warn!(
                "Discarding response for {} (seq {}): a newer submission was issued",
                submission_id, sequence
            );
            (
                SubmissionEvent::ResponseSuperseded,
                SubmissionOutcome::Discarded,
            )
        } else {
            match result {
                Ok(response) => {
                    debug!("Analysis response for {}: {:?}", submission_id, response);
                    (
                        SubmissionEvent::ResponseRendered,
                        SubmissionOutcome::Rendered(response),
                    )
                }
                Err(e) => {
                    error!("Analysis failed for {}: {}", submission_id, e);
                    (SubmissionEvent::RequestFailed, SubmissionOutcome::Failed(e))
                }
            }
        };

        {
            let mut display = self.display.lock().await;
            if let SubmissionOutcome::Rendered(ref response) = outcome {
                display.show_result(response);
            }
            display.finish_loading();
        }

        if let SubmissionOutcome::Failed(ref e) = outcome {
            self.notifier.notify(&Notice::failure(e.user_message()));
        }

        fsm.transition(event)?;
        info!(
            "Submission {} (seq {}) finished in state {:?}",
            submission_id,
            fsm.sequence(),
            fsm.current_state()
        );

        Ok(outcome)
    }
}
