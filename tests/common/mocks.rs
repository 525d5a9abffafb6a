use async_trait::async_trait;
use feedback_sentiment::{
    Error, Result,
    analysis::{AnalysisRequest, AnalysisResponse, SentimentService},
    display::{DisplayState, Notice, Notifier},
};
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;

/// Mock sentiment service that replays queued results in order
#[derive(Debug)]
pub struct MockSentimentService {
    pub responses: Arc<Mutex<Vec<Result<AnalysisResponse>>>>,
    pub requests: Arc<Mutex<Vec<AnalysisRequest>>>,
}

impl MockSentimentService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, response: AnalysisResponse) -> Self {
        self.responses.lock().unwrap().push(Ok(response));
        self
    }

    pub fn with_error(self, error: Error) -> Self {
        self.responses.lock().unwrap().push(Err(error));
        self
    }

    pub fn get_requests(&self) -> Vec<AnalysisRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SentimentService for MockSentimentService {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        self.requests.lock().unwrap().push(request);

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(Error::internal("No more mock responses available"));
        }

        responses.remove(0)
    }
}

impl Default for MockSentimentService {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the display taken while a request is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlightSnapshot {
    pub loading: bool,
    pub result_visible: bool,
}

/// Wraps another service and records what the display looked like at the
/// moment the request was issued
pub struct DisplayProbeService<S> {
    pub inner: S,
    pub display: Arc<AsyncMutex<DisplayState>>,
    pub snapshots: Arc<Mutex<Vec<InFlightSnapshot>>>,
}

impl<S> DisplayProbeService<S> {
    pub fn new(inner: S, display: Arc<AsyncMutex<DisplayState>>) -> Self {
        Self {
            inner,
            display,
            snapshots: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn snapshots(&self) -> Vec<InFlightSnapshot> {
        self.snapshots.lock().unwrap().clone()
    }
}

#[async_trait]
impl<S: SentimentService> SentimentService for DisplayProbeService<S> {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse> {
        let snapshot = {
            let display = self.display.lock().await;
            InFlightSnapshot {
                loading: display.is_loading(),
                result_visible: display.is_result_visible(),
            }
        };
        self.snapshots.lock().unwrap().push(snapshot);
        self.inner.analyze(request).await
    }
}

/// Notifier that keeps every notice it receives
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}
