#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use std::time::Duration;
use std::time::Instant;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Answer;
use crate::domain::models::AnswerService;
use crate::domain::models::Query;

/// Timing reported by the service next to the answer, only used for logging.
#[derive(Default, Debug, Deserialize)]
struct ResponseTiming {
    response_time: Option<f64>,
}

pub struct HttpAnswerService {
    url: String,
    timeout: String,
}

impl Default for HttpAnswerService {
    fn default() -> HttpAnswerService {
        return HttpAnswerService {
            url: Config::get(ConfigKey::ApiUrl),
            timeout: Config::get(ConfigKey::HealthCheckTimeout),
        };
    }
}

impl HttpAnswerService {
    fn endpoint(&self, path: &str) -> String {
        return format!("{}{path}", self.url.trim_end_matches('/'));
    }
}

#[async_trait]
impl AnswerService for HttpAnswerService {
    fn url(&self) -> String {
        return self.url.to_string();
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        let res = reqwest::Client::new()
            .get(self.endpoint("/"))
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "Answer service is not running");
                bail!("Answer service is not running");
            }
        };

        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "Answer service health check failed");
            bail!("Answer service health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn ask(&self, query: Query) -> Result<Answer> {
        let start = Instant::now();
        let res = reqwest::Client::new()
            .post(self.endpoint("/ask"))
            .json(&query)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            bail!("Answer service responded with status {}", status.as_u16());
        }

        let body = res.text().await?;
        let answer = match serde_json::from_str::<Answer>(&body) {
            Ok(answer) => answer,
            Err(err) => bail!("Malformed response from the answer service: {err}"),
        };

        let timing = serde_json::from_str::<ResponseTiming>(&body).unwrap_or_default();
        tracing::debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            response_time = timing.response_time,
            confidence = answer.confidence,
            "Answer received"
        );

        return Ok(answer.normalize());
    }
}
