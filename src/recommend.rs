use std::sync::Arc;

use tracing::{debug, info};

use crate::backend::BackendApi;
use crate::context::{Context, RecommendationEvaluation};

/// Persists the "last recommended" task set remotely and later re-checks its
/// completion state. The set itself lives entirely in the backend; this layer
/// holds no cross-turn state.
#[derive(Clone)]
pub struct RecommendationTracker {
    backend: Arc<dyn BackendApi>,
}

impl RecommendationTracker {
    pub fn new(backend: Arc<dyn BackendApi>) -> Self {
        Self { backend }
    }

    /// Saves the ids of the context's future tasks as the recommended set.
    /// No-op when the list is empty or no token is available. Side effect
    /// only; the caller's response never depends on the outcome.
    pub async fn save(&self, token: Option<&str>, context: &Context) {
        let token = match token {
            Some(t) => t,
            None => {
                debug!("no token, skipping recommended-task save");
                return;
            }
        };

        let task_ids: Vec<String> = context
            .tasks
            .future_task_details
            .iter()
            .filter(|detail| !detail.id.is_empty())
            .map(|detail| detail.id.clone())
            .collect();
        if task_ids.is_empty() {
            debug!("no future task ids to recommend");
            return;
        }

        if self.backend.save_recommended(token, &task_ids).await {
            info!(count = task_ids.len(), "saved recommended task set");
        }
    }

    /// Queries the live completion state of the recommended set. `None`
    /// means "no data available", never "all completed" or "none completed".
    pub async fn evaluate(&self, token: Option<&str>) -> Option<RecommendationEvaluation> {
        let token = token?;
        self.backend.evaluate_recommended(token).await
    }
}
