use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Shown when the service fails without a usable `message`, and for
/// success bodies that cannot be decoded.
pub const GENERIC_ANALYSIS_FAILURE: &str = "An error occurred during analysis.";

pub const EMPTY_INPUT_NOTICE: &str = "Please enter some text to analyze.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Submission error: {0}")]
    Submission(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn service(status: u16, msg: impl Into<String>) -> Self {
        Self::Service {
            status,
            message: msg.into(),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn submission(msg: impl Into<String>) -> Self {
        Self::Submission(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Text surfaced to the person who submitted the feedback.
    ///
    /// Service errors carry the message extracted from the response body,
    /// transport errors the underlying failure, and undecodable success
    /// bodies the generic fallback. Everything else uses its display form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Service { message, .. } => message.clone(),
            Self::Transport(e) => e.to_string(),
            Self::Parse(_) => GENERIC_ANALYSIS_FAILURE.to_string(),
            other => other.to_string(),
        }
    }
}
