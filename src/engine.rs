use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use crate::backend::BackendApi;
use crate::context::{Context, ProgressStats, TaskStatus};
use crate::recommend::RecommendationTracker;
use crate::render::PlaceholderRenderer;
use crate::tasks::{FutureTaskStatus, TaskCompletion, TaskScope};
use crate::templates::TemplateStore;

/// Hard cutoff on classifier confidence; at or below it the turn short-
/// circuits to the fixed fallback. Not configurable per call.
pub const CONFIDENCE_THRESHOLD: f32 = 0.75;

pub const FALLBACK_RESPONSE: &str = "I do not understand...";

const TEAM_PROGRESS_UNAVAILABLE: &str = "Team progress is only available to the Product \
     Owner/PM of this group, or there is no task data to report yet.";
const MEMBER_PROGRESS_UNAVAILABLE: &str = "Member progress is only available to the Product \
     Owner/PM of this group, or there is no task data to report yet.";
const DEFAULT_MEMBER_NAME: &str = "this member";

/// Wire labels shared with the classifier and the template set. The
/// "Recomment" spelling is part of that contract and must not be corrected
/// here.
pub mod tags {
    pub const GREETING: &str = "greeting";
    pub const SPECIAL_DAY: &str = "specialDay";
    pub const TODAY_TASK: &str = "todayTask";
    pub const FINISH_TODAY_TASK: &str = "finishTodayTask";
    pub const FINISH_ALL_TASK: &str = "finishAllTask";
    pub const RECOMMENDED_TASKS: &str = "recommentedTasks";
    pub const FINISH_PART_OF_RECOMMENDED: &str = "finishPartOfRecommentedTask";
    pub const FINISH_ALL_RECOMMENDED: &str = "finishAllRecommentedTask";
    pub const WARNING: &str = "Warning";
    pub const ASK_GROUP_NAME: &str = "AskGroupName";
    pub const TEAM_PROGRESS: &str = "teamProgress";
    pub const MEMBER_PROGRESS: &str = "memberProgress";
}

/// Closed set of intent families the policy rules dispatch on. Tags outside
/// the set carry their label through to the default template path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentTag {
    Greeting,
    FinishAllTask,
    TodayTask,
    FinishPartOfRecommended,
    FinishAllRecommended,
    Warning,
    TeamProgress,
    MemberProgress,
    Other(String),
}

impl IntentTag {
    pub fn parse(tag: &str) -> Self {
        match tag {
            tags::GREETING => Self::Greeting,
            tags::FINISH_ALL_TASK => Self::FinishAllTask,
            tags::TODAY_TASK => Self::TodayTask,
            tags::FINISH_PART_OF_RECOMMENDED => Self::FinishPartOfRecommended,
            tags::FINISH_ALL_RECOMMENDED => Self::FinishAllRecommended,
            tags::WARNING => Self::Warning,
            tags::TEAM_PROGRESS => Self::TeamProgress,
            tags::MEMBER_PROGRESS => Self::MemberProgress,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Greeting => tags::GREETING,
            Self::FinishAllTask => tags::FINISH_ALL_TASK,
            Self::TodayTask => tags::TODAY_TASK,
            Self::FinishPartOfRecommended => tags::FINISH_PART_OF_RECOMMENDED,
            Self::FinishAllRecommended => tags::FINISH_ALL_RECOMMENDED,
            Self::Warning => tags::WARNING,
            Self::TeamProgress => tags::TEAM_PROGRESS,
            Self::MemberProgress => tags::MEMBER_PROGRESS,
            Self::Other(tag) => tag,
        }
    }
}

/// Orchestrates one turn: given `(tag, confidence, context, token)`, runs the
/// rule chain and produces the final text. Holds no cross-turn state; the
/// recommended-task set lives entirely in the backend.
pub struct PolicyEngine {
    templates: TemplateStore,
    renderer: PlaceholderRenderer,
    backend: Arc<dyn BackendApi>,
    tracker: RecommendationTracker,
}

impl PolicyEngine {
    pub fn new(templates: TemplateStore, backend: Arc<dyn BackendApi>) -> Self {
        Self {
            templates,
            renderer: PlaceholderRenderer::new(),
            tracker: RecommendationTracker::new(backend.clone()),
            backend,
        }
    }

    /// Pins the calendar date the special-day rules evaluate against.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.renderer = PlaceholderRenderer::with_date(date);
        self
    }

    /// Picks a response for the tag and fills its placeholders. A missing
    /// template or empty response set contributes an empty string, never an
    /// error.
    fn build(&self, tag: &str, context: Option<&Context>) -> String {
        self.templates
            .pick(tag)
            .map(|template| self.renderer.render(template, context))
            .unwrap_or_default()
    }

    pub async fn respond(
        &self,
        tag: &str,
        confidence: f32,
        context: Option<&Context>,
        token: Option<&str>,
    ) -> String {
        if confidence <= CONFIDENCE_THRESHOLD {
            debug!(tag, confidence, "below confidence gate");
            return FALLBACK_RESPONSE.to_string();
        }

        let intent = IntentTag::parse(tag);
        if let Some(text) = self.apply_rules(&intent, context, token).await {
            return text;
        }

        // Default arm: the classifier's tag with the unmodified context.
        let resp = self.build(intent.as_str(), context);
        if resp.is_empty() {
            FALLBACK_RESPONSE.to_string()
        } else {
            resp
        }
    }

    /// Tag-specific rules; `None` means the case contributed nothing and the
    /// turn falls through to the default arm.
    async fn apply_rules(
        &self,
        intent: &IntentTag,
        context: Option<&Context>,
        token: Option<&str>,
    ) -> Option<String> {
        match intent {
            IntentTag::Greeting => self.greeting(context),
            IntentTag::FinishAllTask => self.finish_all_task(context, token).await,
            IntentTag::TodayTask => self.today_task(context, token).await,
            IntentTag::FinishPartOfRecommended
            | IntentTag::FinishAllRecommended
            | IntentTag::Warning => self.recommended_status(intent, context, token).await,
            IntentTag::TeamProgress => self.team_progress(context, token).await,
            IntentTag::MemberProgress => self.member_progress(context, token).await,
            IntentTag::Other(_) => None,
        }
    }

    /// Greeting, plus the special-day congratulation when today qualifies.
    /// Order is fixed: greeting first, blank-line separator.
    fn greeting(&self, context: Option<&Context>) -> Option<String> {
        let greeting = self.build(tags::GREETING, context);
        let special = if self.renderer.special_day().is_some() {
            self.build(tags::SPECIAL_DAY, context)
        } else {
            String::new()
        };

        match (greeting.is_empty(), special.is_empty()) {
            (false, false) => Some(format!("{greeting}\n\n{special}")),
            (false, true) => Some(greeting),
            (true, false) => Some(special),
            (true, true) => None,
        }
    }

    /// The user claims everything is done; answer from the actual state:
    /// no active tasks -> congratulate, today clear -> acknowledge, else
    /// remind them what is still due today.
    async fn finish_all_task(
        &self,
        context: Option<&Context>,
        token: Option<&str>,
    ) -> Option<String> {
        let status = TaskCompletion::evaluate(context);

        let resp = if status.all_tasks_completed {
            self.build(tags::FINISH_ALL_RECOMMENDED, context)
        } else if status.today_tasks_completed {
            self.build(tags::FINISH_TODAY_TASK, context)
        } else {
            self.build(tags::TODAY_TASK, context)
        };

        if status.today_tasks_completed {
            if let Some(extra) = self.future_recommendation(context, token).await {
                return Some(format!("{resp}\n\n{extra}"));
            }
        }

        (!resp.is_empty()).then_some(resp)
    }

    /// Answers with today's tasks only, and proposes the future set when
    /// today is already clear.
    async fn today_task(&self, context: Option<&Context>, token: Option<&str>) -> Option<String> {
        let status = TaskCompletion::evaluate(context);
        let today_ctx = context.map(|ctx| ctx.scoped(TaskScope::Today));
        let resp = self.build(tags::TODAY_TASK, today_ctx.as_ref());

        if status.today_tasks_completed {
            if let Some(extra) = self.future_recommendation(context, token).await {
                return Some(format!("{resp}\n\n{extra}"));
            }
        }

        (!resp.is_empty()).then_some(resp)
    }

    /// When today's tasks are done and future tasks exist: persist them as
    /// the recommended set and render the proposal against a future-only
    /// context. The primary response is never dropped by this step.
    async fn future_recommendation(
        &self,
        context: Option<&Context>,
        token: Option<&str>,
    ) -> Option<String> {
        let ctx = context?;
        if ctx.tasks.future_tasks_count == 0 {
            return None;
        }

        self.tracker.save(token, ctx).await;

        let future_ctx = ctx.scoped(TaskScope::Future);
        let extra = self.build(tags::RECOMMENDED_TASKS, Some(&future_ctx));
        (!extra.is_empty()).then_some(extra)
    }

    /// Shared handling for the recommended-task trio. The remote evaluation
    /// wins whenever it is reachable and has a recommended set; the local
    /// fallback covers only the no-data case.
    async fn recommended_status(
        &self,
        intent: &IntentTag,
        context: Option<&Context>,
        token: Option<&str>,
    ) -> Option<String> {
        let evaluation = self.tracker.evaluate(token).await;

        match evaluation {
            Some(eval) if eval.has_recommended => {
                if eval.all_completed {
                    let resp = self.build(tags::FINISH_ALL_RECOMMENDED, context);
                    if !resp.is_empty() {
                        return Some(resp);
                    }
                }
                if *intent == IntentTag::FinishPartOfRecommended {
                    let resp = if eval.any_completed {
                        self.build(tags::FINISH_PART_OF_RECOMMENDED, context)
                    } else {
                        self.build(tags::WARNING, context)
                    };
                    if !resp.is_empty() {
                        return Some(resp);
                    }
                }
                None
            }
            _ => {
                let resp = match intent {
                    IntentTag::FinishAllRecommended => {
                        self.build(tags::FINISH_ALL_RECOMMENDED, context)
                    }
                    IntentTag::FinishPartOfRecommended => {
                        let future = FutureTaskStatus::evaluate(context);
                        if future.has_future_tasks {
                            let any_completed = future
                                .future_task_details
                                .iter()
                                .any(|detail| detail.status == TaskStatus::Completed);
                            if any_completed {
                                self.build(tags::FINISH_PART_OF_RECOMMENDED, context)
                            } else {
                                self.build(tags::WARNING, context)
                            }
                        } else {
                            // Nothing to check locally; neutral default.
                            self.build(tags::FINISH_PART_OF_RECOMMENDED, context)
                        }
                    }
                    _ => self.build(tags::WARNING, context),
                };
                (!resp.is_empty()).then_some(resp)
            }
        }
    }

    /// Group-wide progress. Requires a group scope in the context; without
    /// one the user is asked to name the group and no fetch is made.
    async fn team_progress(
        &self,
        context: Option<&Context>,
        token: Option<&str>,
    ) -> Option<String> {
        let group_missing = context
            .and_then(|ctx| ctx.group.as_ref())
            .map_or(true, |group| group.is_empty());
        if group_missing {
            let ask = self.build(tags::ASK_GROUP_NAME, context);
            return (!ask.is_empty()).then_some(ask);
        }

        let progress = match token {
            Some(t) => self.backend.group_progress(t).await,
            None => None,
        };
        let progress = match progress {
            Some(p) => p,
            None => return Some(TEAM_PROGRESS_UNAVAILABLE.to_string()),
        };

        let mut merged = context.cloned().unwrap_or_default();
        merged.stats.extend(team_stats(&progress));

        let resp = self.build(tags::TEAM_PROGRESS, Some(&merged));
        (!resp.is_empty())
            .then(|| format!("{resp}\n(Total tasks in group: {})", progress.total_tasks))
    }

    /// Per-member progress; the member id/name are expected to arrive in the
    /// context already resolved.
    async fn member_progress(
        &self,
        context: Option<&Context>,
        token: Option<&str>,
    ) -> Option<String> {
        let member = context.and_then(|ctx| ctx.member.as_ref());
        let member_id = member.map(|m| m.id.as_str()).unwrap_or_default();
        let member_name = member
            .map(|m| m.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_MEMBER_NAME);

        let progress = match token {
            Some(t) => self.backend.member_progress(t, member_id).await,
            None => None,
        };
        let progress = match progress {
            Some(p) => p,
            None => return Some(MEMBER_PROGRESS_UNAVAILABLE.to_string()),
        };

        let mut merged = context.cloned().unwrap_or_default();
        merged
            .member_stats
            .extend(member_stats(member_name, &progress));

        let resp = self.build(tags::MEMBER_PROGRESS, Some(&merged));
        (!resp.is_empty()).then(|| {
            format!(
                "{resp}\n(Total tasks for {member_name} in group: {})",
                progress.total_tasks
            )
        })
    }
}

fn team_stats(progress: &ProgressStats) -> HashMap<String, Value> {
    HashMap::from([
        ("team_total_tasks".into(), progress.total_tasks.into()),
        ("team_todo_count".into(), progress.todo.count.into()),
        ("team_todo_percent".into(), progress.todo.percent.into()),
        ("team_inprogress_count".into(), progress.in_progress.count.into()),
        ("team_inprogress_percent".into(), progress.in_progress.percent.into()),
        ("team_completed_count".into(), progress.completed.count.into()),
        ("team_completed_percent".into(), progress.completed.percent.into()),
        ("team_incomplete_count".into(), progress.incomplete.count.into()),
        ("team_incomplete_percent".into(), progress.incomplete.percent.into()),
    ])
}

fn member_stats(name: &str, progress: &ProgressStats) -> HashMap<String, Value> {
    HashMap::from([
        ("member_name".into(), name.into()),
        ("member_total_tasks".into(), progress.total_tasks.into()),
        ("member_todo_count".into(), progress.todo.count.into()),
        ("member_todo_percent".into(), progress.todo.percent.into()),
        ("member_inprogress_count".into(), progress.in_progress.count.into()),
        ("member_inprogress_percent".into(), progress.in_progress.percent.into()),
        ("member_completed_count".into(), progress.completed.count.into()),
        ("member_completed_percent".into(), progress.completed.percent.into()),
        ("member_incomplete_count".into(), progress.incomplete.count.into()),
        ("member_incomplete_percent".into(), progress.incomplete.percent.into()),
    ])
}
