use crate::analysis::AnalysisResponse;
use chrono::{DateTime, Utc};
use std::fmt;

/// One rendered confidence entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub name: String,
    pub value: f64,
}

impl ScoreEntry {
    /// `"<name>: <value as percent, 2 decimals>%"`
    pub fn label(&self) -> String {
        format!("{}: {}%", self.name, format_percent(self.value))
    }
}

/// Formats `value * 100` with two decimals, rounding exact ties away from
/// zero. `{:.2}` alone would round those ties to even.
pub fn format_percent(value: f64) -> String {
    let percent = value * 100.0;
    let hundredths = percent * 100.0;
    // `mul_add` yields the rounding error of the product; zero means exact.
    let exact = percent.mul_add(100.0, -hundredths) == 0.0;

    if exact && hundredths.is_finite() && (hundredths - hundredths.trunc()).abs() == 0.5 {
        let rounded = hundredths.trunc() + hundredths.signum();
        format!("{:.2}", rounded / 100.0)
    } else {
        format!("{:.2}", percent)
    }
}

/// `sentiment-<label>` with the label ASCII lower-cased.
pub fn style_hook(sentiment: &str) -> String {
    format!("sentiment-{}", sentiment.to_ascii_lowercase())
}

/// Everything the user can see: the loading indicator, the result panel
/// and its contents.
///
/// Fields only change through the setters below so that a result is either
/// rendered completely or not at all.
#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    loading: bool,
    result_visible: bool,
    analyzed_text: String,
    sentiment_label: String,
    style_hook: String,
    scores: Vec<ScoreEntry>,
    response_id: Option<String>,
    rendered_at: Option<DateTime<Utc>>,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the loading indicator and hides the previous result.
    pub fn begin_loading(&mut self) {
        self.loading = true;
        self.result_visible = false;
    }

    pub fn finish_loading(&mut self) {
        self.loading = false;
    }

    /// Replaces the rendered result with `response` and reveals it.
    pub fn show_result(&mut self, response: &AnalysisResponse) {
        self.analyzed_text = response.text.clone();
        self.sentiment_label = response.sentiment.clone();
        self.style_hook = style_hook(&response.sentiment);
        self.scores = response
            .confidence_scores
            .iter()
            .map(|(name, value)| ScoreEntry {
                name: name.to_string(),
                value,
            })
            .collect();
        self.response_id = response.id.clone();
        self.rendered_at = Some(Utc::now());
        self.result_visible = true;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_result_visible(&self) -> bool {
        self.result_visible
    }

    pub fn analyzed_text(&self) -> &str {
        &self.analyzed_text
    }

    pub fn sentiment_label(&self) -> &str {
        &self.sentiment_label
    }

    pub fn style_hook(&self) -> &str {
        &self.style_hook
    }

    pub fn scores(&self) -> &[ScoreEntry] {
        &self.scores
    }

    pub fn score_lines(&self) -> Vec<String> {
        self.scores.iter().map(ScoreEntry::label).collect()
    }

    pub fn response_id(&self) -> Option<&str> {
        self.response_id.as_deref()
    }

    pub fn rendered_at(&self) -> Option<DateTime<Utc>> {
        self.rendered_at
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.loading {
            writeln!(f, "Analyzing...")?;
        }
        if !self.result_visible {
            return Ok(());
        }

        writeln!(f, "Analyzed text: {}", self.analyzed_text)?;
        writeln!(f, "Sentiment: {} [{}]", self.sentiment_label, self.style_hook)?;
        writeln!(f, "Confidence scores:")?;
        for line in self.score_lines() {
            writeln!(f, "  - {}", line)?;
        }
        if let Some(ref id) = self.response_id {
            writeln!(f, "Record: {}", id)?;
        }
        if let Some(at) = self.rendered_at {
            writeln!(f, "Analyzed at: {}", at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        }
        Ok(())
    }
}
