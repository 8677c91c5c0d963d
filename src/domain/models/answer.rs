#[cfg(test)]
#[path = "answer_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

/// Request body of the answer service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub query: String,
}

impl Query {
    pub fn new(text: &str) -> Query {
        return Query {
            query: text.trim().to_string(),
        };
    }

    pub fn is_empty(&self) -> bool {
        return self.query.is_empty();
    }
}

/// Response body of the answer service. Both a missing `answer` and a non
/// numeric `confidence` fail deserialization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Answer {
    /// Confidence is displayed as a percentage, so anything outside of
    /// [0, 1] is clamped.
    pub fn normalize(mut self) -> Answer {
        self.confidence = self.confidence.map(|confidence| {
            return confidence.clamp(0.0, 1.0);
        });

        return self;
    }
}

#[async_trait]
pub trait AnswerService {
    /// Base URL of the service, used in user facing messages.
    fn url(&self) -> String;

    /// Used at startup to warn early when the service can't be reached.
    async fn health_check(&self) -> Result<()>;

    /// Sends a single question and waits for its answer. Any transport error,
    /// non 2xx status or malformed body is returned as an error.
    async fn ask(&self, query: Query) -> Result<Answer>;
}

pub type AnswerServiceArc = Arc<dyn AnswerService + Send + Sync>;
