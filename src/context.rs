use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Immutable per-turn snapshot of the user's task/group state, as delivered
/// by the backend's `/chatbot/context` endpoint. Counts and lists are trusted
/// as given; this layer never recomputes one from the other.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Context {
    #[serde(default)]
    pub user: UserInfo,
    #[serde(default)]
    pub date: DateInfo,
    #[serde(default)]
    pub group: Option<GroupInfo>,
    #[serde(default)]
    pub member: Option<MemberInfo>,
    #[serde(default)]
    pub tasks: TaskSnapshot,
    /// Group-scoped progress values merged in by the engine for the
    /// teamProgress intent. Numeric `Value`s so counts stringify without a
    /// decimal point while percents keep theirs.
    #[serde(default)]
    pub stats: HashMap<String, Value>,
    #[serde(default, rename = "memberStats")]
    pub member_stats: HashMap<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub gender: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateInfo {
    #[serde(default)]
    pub current_date: String,
    #[serde(default)]
    pub current_date_vn: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl GroupInfo {
    /// A group record with neither id nor name carries no scope.
    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.name.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskSnapshot {
    #[serde(default, rename = "activeTasks")]
    pub active_tasks: Vec<String>,
    #[serde(default, rename = "activeTasksCount")]
    pub active_tasks_count: u32,
    #[serde(default, rename = "todayTasks")]
    pub today_tasks: Vec<String>,
    #[serde(default, rename = "todayTasksCount")]
    pub today_tasks_count: u32,
    #[serde(default, rename = "futureTasks")]
    pub future_tasks: Vec<String>,
    #[serde(default, rename = "futureTasksCount")]
    pub future_tasks_count: u32,
    #[serde(default, rename = "activeTaskDetails")]
    pub active_task_details: Vec<TaskDetail>,
    #[serde(default, rename = "todayTaskDetails")]
    pub today_task_details: Vec<TaskDetail>,
    #[serde(default, rename = "futureTaskDetails")]
    pub future_task_details: Vec<TaskDetail>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskDetail {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "dueDate")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Completed,
    #[serde(other)]
    Unknown,
}

/// Live completion state of the recommended-task set persisted server-side.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RecommendationEvaluation {
    #[serde(default, rename = "hasRecommended")]
    pub has_recommended: bool,
    #[serde(default, rename = "allCompleted")]
    pub all_completed: bool,
    #[serde(default, rename = "anyCompleted")]
    pub any_completed: bool,
}

/// Per-status task counts for a group or a single member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressStats {
    #[serde(default, rename = "totalTasks")]
    pub total_tasks: i64,
    #[serde(default)]
    pub todo: ProgressBucket,
    #[serde(default)]
    pub in_progress: ProgressBucket,
    #[serde(default)]
    pub completed: ProgressBucket,
    #[serde(default)]
    pub incomplete: ProgressBucket,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ProgressBucket {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub percent: f64,
}
