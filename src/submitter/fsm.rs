use crate::{Error, Result};
use tracing::{debug, warn};

// Submission states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Loading,
    Rendered,
    Failed,
    Discarded,
}

// Submission events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEvent {
    Submit,
    ResponseRendered,
    RequestFailed,
    ResponseSuperseded,
}

/// Lifecycle of a single submission, from the submit action until its
/// response has been rendered, reported or dropped.
#[derive(Debug)]
pub struct SubmissionStateMachine {
    state: SubmissionState,
    sequence: u64,
}

impl SubmissionStateMachine {
    pub fn new(sequence: u64) -> Self {
        Self {
            state: SubmissionState::Idle,
            sequence,
        }
    }

    pub fn current_state(&self) -> SubmissionState {
        self.state
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn transition(&mut self, event: SubmissionEvent) -> Result<()> {
        let new_state = match (self.state, event) {
            (SubmissionState::Idle, SubmissionEvent::Submit) => SubmissionState::Loading,
            (SubmissionState::Loading, SubmissionEvent::ResponseRendered) => {
                SubmissionState::Rendered
            }
            (SubmissionState::Loading, SubmissionEvent::RequestFailed) => SubmissionState::Failed,
            (SubmissionState::Loading, SubmissionEvent::ResponseSuperseded) => {
                SubmissionState::Discarded
            }
            _ => {
                warn!(
                    "Invalid submission transition from {:?} with event {:?} (seq {})",
                    self.state, event, self.sequence
                );
                return Err(Error::submission(format!(
                    "Invalid transition from {:?} with event {:?}",
                    self.state, event
                )));
            }
        };

        debug!(
            "Submission {} state transition: {:?} -> {:?} (event: {:?})",
            self.sequence, self.state, new_state, event
        );

        self.state = new_state;
        Ok(())
    }
}
