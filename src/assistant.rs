use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::backend::BackendApi;
use crate::classifier::Classifier;
use crate::context::Context;
use crate::engine::PolicyEngine;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("message cannot be empty")]
    EmptyMessage,
}

/// What one turn hands back to the transport layer: the rendered answer plus
/// the context snapshot it was rendered against (for the client to display).
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub answer: String,
    pub context: Option<Context>,
}

/// Per-turn orchestrator: validate the message, fetch context, classify,
/// delegate to the policy engine. Holds no state between turns.
pub struct Assistant {
    classifier: Arc<dyn Classifier>,
    backend: Arc<dyn BackendApi>,
    engine: PolicyEngine,
}

impl Assistant {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        backend: Arc<dyn BackendApi>,
        engine: PolicyEngine,
    ) -> Self {
        Self {
            classifier,
            backend,
            engine,
        }
    }

    pub async fn handle(&self, message: &str, token: Option<&str>) -> Result<Reply, AssistantError> {
        if message.trim().is_empty() {
            return Err(AssistantError::EmptyMessage);
        }

        let context = match token {
            Some(t) => self.backend.fetch_context(t).await,
            None => None,
        };

        let classification = self.classifier.classify(message);
        info!(
            tag = %classification.tag,
            confidence = classification.confidence,
            has_context = context.is_some(),
            "classified turn"
        );

        let answer = self
            .engine
            .respond(
                &classification.tag,
                classification.confidence,
                context.as_ref(),
                token,
            )
            .await;

        Ok(Reply { answer, context })
    }
}
