use crate::{
    Error, Result,
    error::{EMPTY_INPUT_NOTICE, GENERIC_ANALYSIS_FAILURE},
};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};
use serde_json::Value;
use std::fmt;

/// Body of the outbound request. Only built from non-blank input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRequest {
    text: String,
}

impl AnalysisRequest {
    /// Trims the raw input and rejects it if nothing is left.
    pub fn from_input(raw: &str) -> Result<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(Error::validation(EMPTY_INPUT_NOTICE));
        }
        Ok(Self {
            text: text.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Successful (2xx) response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub text: String,
    pub sentiment: String,
    pub confidence_scores: ConfidenceScores,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Failure (non-2xx) response body. Both fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AnalysisError {
    /// Decodes an error body. Each field is read on its own, so a
    /// mistyped `error` does not hide a usable `message`. Bodies that are
    /// not JSON decode as an empty error.
    pub fn from_body(body: &[u8]) -> Self {
        let value: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
        let field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self {
            message: field("message"),
            error: field("error"),
        }
    }

    pub fn user_message(&self) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(GENERIC_ANALYSIS_FAILURE)
            .to_string()
    }
}

/// Per-class confidence values in the order the service sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfidenceScores(Vec<(String, f64)>);

impl ConfidenceScores {
    pub fn new(entries: Vec<(String, f64)>) -> Self {
        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn get(&self, class: &str) -> Option<f64> {
        self.iter().find(|(name, _)| *name == class).map(|(_, v)| v)
    }
}

impl Serialize for ConfidenceScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ConfidenceScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ScoresVisitor;

        impl<'de> Visitor<'de> for ScoresVisitor {
            type Value = ConfidenceScores;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of class names to numeric scores")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, f64)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(4));
                while let Some((name, value)) = access.next_entry::<String, f64>()? {
                    // Later duplicates replace the value but keep the first position.
                    match entries.iter_mut().find(|entry| entry.0 == name) {
                        Some(entry) => entry.1 = value,
                        None => entries.push((name, value)),
                    }
                }
                Ok(ConfidenceScores(entries))
            }
        }

        deserializer.deserialize_map(ScoresVisitor)
    }
}
