use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Body of `POST /api/process-command`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub topic: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Topic is required")]
pub struct TopicRequired;

impl GenerationRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self { topic: topic.into() }
    }

    /// Validates a raw JSON payload. `topic` has to be present, a string, and
    /// non-empty. Whitespace is kept; trimming is the view's job.
    pub fn from_payload(payload: &Value) -> Result<Self, TopicRequired> {
        Self::deserialize(payload)
            .ok()
            .filter(|request| !request.topic.is_empty())
            .ok_or(TopicRequired)
    }
}
