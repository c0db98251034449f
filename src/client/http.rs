//! HTTP transport for the prioritization service.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use url::Url;

use super::{Prioritizer, RemoteError, Strategy};
use crate::task::{ResponseEnvelope, TaskRecord};

/// Client for the two operations the service exposes under a common base
/// path. One POST per call; no retry, no auth, timeouts left to the
/// transport.
pub struct HttpPrioritizer {
    client: Client,
    base_url: Url,
}

impl HttpPrioritizer {
    pub fn new(base_url: Url) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, operation: &str) -> String {
        format!(
            "{}/{}/",
            self.base_url.as_str().trim_end_matches('/'),
            operation
        )
    }

    async fn post<B: Serialize>(
        &self,
        operation: &str,
        body: &B,
    ) -> Result<ResponseEnvelope, RemoteError> {
        let url = self.endpoint(operation);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|source| RemoteError::Transport { source })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| RemoteError::Transport { source })?;

        if !status.is_success() {
            tracing::warn!("{} returned {}", url, status);
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let envelope: ResponseEnvelope = serde_json::from_str(&text)
            .map_err(|source| RemoteError::InvalidBody {
                source,
                body: text.clone(),
            })?;

        tracing::debug!("{} returned {} tasks", operation, envelope.tasks.len());
        Ok(envelope)
    }
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    tasks: &'a [TaskRecord],
    strategy: Strategy,
}

#[derive(Debug, Serialize)]
struct SuggestRequest<'a> {
    tasks: &'a [TaskRecord],
}

#[async_trait]
impl Prioritizer for HttpPrioritizer {
    async fn analyze(
        &self,
        tasks: &[TaskRecord],
        strategy: Strategy,
    ) -> Result<ResponseEnvelope, RemoteError> {
        self.post("analyze", &AnalyzeRequest { tasks, strategy })
            .await
    }

    async fn suggest(&self, tasks: &[TaskRecord]) -> Result<ResponseEnvelope, RemoteError> {
        self.post("suggest", &SuggestRequest { tasks }).await
    }
}
