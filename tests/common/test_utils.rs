use feedback_sentiment::{
    Result,
    analysis::{AnalysisResponse, ConfidenceScores},
    config::ServiceConfig,
    display::DisplayState,
    submitter::FeedbackSubmitter,
};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::{fs, sync::Mutex};
use wiremock::{MockServer, ResponseTemplate};

use super::mocks::RecordingNotifier;

pub const ANALYZE_PATH: &str = "/prod/analyze";

/// Service config pointing at a mock server
pub fn create_service_config(server: &MockServer) -> ServiceConfig {
    ServiceConfig {
        endpoint_url: format!("{}{}", server.uri(), ANALYZE_PATH),
        timeout_secs: None,
        discard_stale_responses: false,
    }
}

/// Submitter wired to a mock server, a recording notifier and a fresh display
pub fn create_http_submitter(
    server: &MockServer,
) -> (FeedbackSubmitter, Arc<RecordingNotifier>) {
    create_http_submitter_with(create_service_config(server))
}

pub fn create_http_submitter_with(
    config: ServiceConfig,
) -> (FeedbackSubmitter, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let submitter = FeedbackSubmitter::from_config(
        &config,
        notifier.clone(),
        Arc::new(Mutex::new(DisplayState::new())),
    )
    .expect("Failed to build submitter");
    (submitter, notifier)
}

/// JSON response whose body is sent byte for byte, so object keys reach the
/// client in the order they are written here
pub fn json_response(status: u16, body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body.into(), "application/json")
}

/// Body the service returns for "Great product!"
pub const GREAT_PRODUCT_BODY: &str = r#"{"text":"Great product!","sentiment":"Positive","confidence_scores":{"Positive":0.95,"Neutral":0.04,"Negative":0.01}}"#;

/// Success body with scores serialized in the given order
pub fn analysis_body(text: &str, sentiment: &str, scores: &[(&str, f64)]) -> String {
    let scores = scores
        .iter()
        .map(|(name, value)| format!("{}:{}", json!(name), json!(value)))
        .collect::<Vec<_>>()
        .join(",");
    format!(
        r#"{{"text":{},"sentiment":{},"confidence_scores":{{{}}}}}"#,
        json!(text),
        json!(sentiment),
        scores
    )
}

pub fn create_response(text: &str, sentiment: &str, scores: &[(&str, f64)]) -> AnalysisResponse {
    AnalysisResponse {
        text: text.to_string(),
        sentiment: sentiment.to_string(),
        confidence_scores: ConfidenceScores::new(
            scores
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
        ),
        id: None,
        message: None,
    }
}

/// Endpoint on localhost that nothing listens on
pub fn unreachable_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read local addr");
    drop(listener);
    format!("http://{}{}", addr, ANALYZE_PATH)
}

/// Write a config file into a temp dir
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
service:
  endpoint_url: "https://abc123.execute-api.us-east-1.amazonaws.com/prod/analyze"
  timeout_secs: 15
  discard_stale_responses: true
logs:
  level: "debug"
"#;

/// Configuration left with the placeholder empty endpoint
pub const EMPTY_ENDPOINT_YAML: &str = r#"
service:
  endpoint_url: ""
"#;
