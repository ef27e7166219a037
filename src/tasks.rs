use crate::context::{Context, TaskDetail, TaskSnapshot};

/// Completion/presence flags derived from a Context snapshot.
///
/// Absence of context yields "not completed, tasks assumed present" so the
/// engine never falsely congratulates a user whose state is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskCompletion {
    pub all_tasks_completed: bool,
    pub today_tasks_completed: bool,
    pub has_active_tasks: bool,
    pub has_today_tasks: bool,
}

impl TaskCompletion {
    pub fn evaluate(context: Option<&Context>) -> Self {
        match context {
            Some(ctx) => {
                let active = ctx.tasks.active_tasks_count;
                let today = ctx.tasks.today_tasks_count;
                Self {
                    all_tasks_completed: active == 0,
                    today_tasks_completed: today == 0,
                    has_active_tasks: active > 0,
                    has_today_tasks: today > 0,
                }
            }
            None => Self {
                all_tasks_completed: false,
                today_tasks_completed: false,
                has_active_tasks: true,
                has_today_tasks: true,
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FutureTaskStatus {
    pub has_future_tasks: bool,
    pub future_tasks_count: u32,
    pub future_task_details: Vec<TaskDetail>,
}

impl FutureTaskStatus {
    pub fn evaluate(context: Option<&Context>) -> Self {
        match context {
            Some(ctx) => Self {
                has_future_tasks: ctx.tasks.future_tasks_count > 0,
                future_tasks_count: ctx.tasks.future_tasks_count,
                future_task_details: ctx.tasks.future_task_details.clone(),
            },
            None => Self::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskScope {
    Today,
    Future,
}

impl Context {
    /// Returns a new Context whose task block holds exactly the chosen
    /// subset as the active set, with the other subset zeroed out. Lets a
    /// single template keyed on generic `{activeTasks}` placeholders serve
    /// both "today" and "future" framing.
    pub fn scoped(&self, scope: TaskScope) -> Context {
        let mut scoped = self.clone();
        scoped.tasks = match scope {
            TaskScope::Today => {
                let tasks = self.tasks.today_tasks.clone();
                let details = self.tasks.today_task_details.clone();
                TaskSnapshot {
                    active_tasks: tasks.clone(),
                    active_tasks_count: tasks.len() as u32,
                    today_tasks_count: tasks.len() as u32,
                    today_tasks: tasks,
                    future_tasks: Vec::new(),
                    future_tasks_count: 0,
                    active_task_details: details.clone(),
                    today_task_details: details,
                    future_task_details: Vec::new(),
                }
            }
            TaskScope::Future => {
                let tasks = self.tasks.future_tasks.clone();
                let details = self.tasks.future_task_details.clone();
                TaskSnapshot {
                    active_tasks: tasks.clone(),
                    active_tasks_count: tasks.len() as u32,
                    today_tasks: Vec::new(),
                    today_tasks_count: 0,
                    future_tasks_count: tasks.len() as u32,
                    future_tasks: tasks,
                    active_task_details: details.clone(),
                    today_task_details: Vec::new(),
                    future_task_details: details,
                }
            }
        };
        scoped
    }
}
