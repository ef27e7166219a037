use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::context::{Context, ProgressStats, RecommendationEvaluation};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Outbound surface of the task backend. Every operation resolves failure to
/// "no data" exactly once per turn; nothing here retries or propagates
/// transport errors to the caller.
#[async_trait]
pub trait BackendApi: Send + Sync {
    async fn fetch_context(&self, token: &str) -> Option<Context>;
    async fn group_progress(&self, token: &str) -> Option<ProgressStats>;
    async fn member_progress(&self, token: &str, member_id: &str) -> Option<ProgressStats>;
    async fn save_recommended(&self, token: &str, task_ids: &[String]) -> bool;
    async fn evaluate_recommended(&self, token: &str) -> Option<RecommendationEvaluation>;
}

/// reqwest-backed client for the backend's `/chatbot/*` endpoints.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
        query: &[(&str, &str)],
    ) -> Result<T, BackendError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "backend GET");
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Status(status));
        }

        let body: Value = response.json().await?;
        Ok(unwrap_data(body)?)
    }
}

/// Backend responses wrap the payload under a `data` key; fall back to the
/// raw body when the key is absent.
pub fn unwrap_data<T: DeserializeOwned>(body: Value) -> Result<T, serde_json::Error> {
    match body.get("data") {
        Some(data) if !data.is_null() => serde_json::from_value(data.clone()),
        _ => serde_json::from_value(body),
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn fetch_context(&self, token: &str) -> Option<Context> {
        self.get_json("/chatbot/context", token, &[])
            .await
            .map_err(|e| warn!("context fetch failed: {e}"))
            .ok()
    }

    async fn group_progress(&self, token: &str) -> Option<ProgressStats> {
        self.get_json("/chatbot/group-progress", token, &[])
            .await
            .map_err(|e| warn!("group progress fetch failed: {e}"))
            .ok()
    }

    async fn member_progress(&self, token: &str, member_id: &str) -> Option<ProgressStats> {
        self.get_json("/chatbot/member-progress", token, &[("memberId", member_id)])
            .await
            .map_err(|e| warn!("member progress fetch failed: {e}"))
            .ok()
    }

    async fn save_recommended(&self, token: &str, task_ids: &[String]) -> bool {
        let url = format!("{}/chatbot/recommended-tasks", self.base_url);
        debug!(%url, count = task_ids.len(), "backend POST");
        match self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&json!({ "taskIds": task_ids }))
            .send()
            .await
        {
            // Acknowledgment body is ignored.
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("recommended-tasks save failed: {e}");
                false
            }
        }
    }

    async fn evaluate_recommended(&self, token: &str) -> Option<RecommendationEvaluation> {
        self.get_json("/chatbot/recommended-tasks/evaluate", token, &[])
            .await
            .map_err(|e| warn!("recommendation evaluation failed: {e}"))
            .ok()
    }
}
