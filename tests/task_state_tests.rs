use taskpilot::context::{Context, TaskDetail, TaskStatus};
use taskpilot::tasks::{FutureTaskStatus, TaskCompletion, TaskScope};

fn detail(id: &str, title: &str, status: TaskStatus) -> TaskDetail {
    TaskDetail {
        id: id.to_string(),
        title: title.to_string(),
        due_date: None,
        status,
    }
}

fn sample_context() -> Context {
    let mut ctx = Context::default();
    ctx.tasks.active_tasks = vec!["A".into(), "B".into(), "C".into()];
    ctx.tasks.active_tasks_count = 3;
    ctx.tasks.today_tasks = vec!["A".into()];
    ctx.tasks.today_tasks_count = 1;
    ctx.tasks.future_tasks = vec!["B".into(), "C".into()];
    ctx.tasks.future_tasks_count = 2;
    ctx.tasks.today_task_details = vec![detail("t1", "A", TaskStatus::InProgress)];
    ctx.tasks.future_task_details = vec![
        detail("f1", "B", TaskStatus::Todo),
        detail("f2", "C", TaskStatus::Completed),
    ];
    ctx.tasks.active_task_details = ctx
        .tasks
        .today_task_details
        .iter()
        .chain(&ctx.tasks.future_task_details)
        .cloned()
        .collect();
    ctx
}

#[test]
fn missing_context_assumes_tasks_present() {
    let status = TaskCompletion::evaluate(None);
    assert!(!status.all_tasks_completed);
    assert!(!status.today_tasks_completed);
    assert!(status.has_active_tasks);
    assert!(status.has_today_tasks);
}

#[test]
fn completion_flags_follow_the_counts() {
    let ctx = sample_context();
    let status = TaskCompletion::evaluate(Some(&ctx));
    assert!(!status.all_tasks_completed);
    assert!(!status.today_tasks_completed);
    assert!(status.has_active_tasks);
    assert!(status.has_today_tasks);

    let mut cleared = ctx.clone();
    cleared.tasks.today_tasks_count = 0;
    let status = TaskCompletion::evaluate(Some(&cleared));
    assert!(status.today_tasks_completed);
    assert!(!status.all_tasks_completed);

    cleared.tasks.active_tasks_count = 0;
    let status = TaskCompletion::evaluate(Some(&cleared));
    assert!(status.all_tasks_completed);
    assert!(!status.has_active_tasks);
}

#[test]
fn future_status_is_empty_without_context() {
    let status = FutureTaskStatus::evaluate(None);
    assert!(!status.has_future_tasks);
    assert_eq!(status.future_tasks_count, 0);
    assert!(status.future_task_details.is_empty());
}

#[test]
fn future_status_carries_details() {
    let ctx = sample_context();
    let status = FutureTaskStatus::evaluate(Some(&ctx));
    assert!(status.has_future_tasks);
    assert_eq!(status.future_tasks_count, 2);
    assert_eq!(status.future_task_details.len(), 2);
    assert_eq!(status.future_task_details[1].status, TaskStatus::Completed);
}

#[test]
fn today_scope_rewrites_active_set_and_zeroes_future() {
    let ctx = sample_context();
    let scoped = ctx.scoped(TaskScope::Today);

    assert_eq!(scoped.tasks.active_tasks, vec!["A".to_string()]);
    assert_eq!(scoped.tasks.active_tasks_count, 1);
    assert_eq!(scoped.tasks.today_tasks_count, 1);
    assert!(scoped.tasks.future_tasks.is_empty());
    assert_eq!(scoped.tasks.future_tasks_count, 0);
    assert!(scoped.tasks.future_task_details.is_empty());
    assert_eq!(scoped.tasks.active_task_details.len(), 1);

    // Everything outside the task block is untouched.
    assert_eq!(scoped.user.name, ctx.user.name);
}

#[test]
fn future_scope_rewrites_active_set_and_zeroes_today() {
    let ctx = sample_context();
    let scoped = ctx.scoped(TaskScope::Future);

    assert_eq!(scoped.tasks.active_tasks, vec!["B".to_string(), "C".to_string()]);
    assert_eq!(scoped.tasks.active_tasks_count, 2);
    assert_eq!(scoped.tasks.future_tasks_count, 2);
    assert!(scoped.tasks.today_tasks.is_empty());
    assert_eq!(scoped.tasks.today_tasks_count, 0);
    assert!(scoped.tasks.today_task_details.is_empty());
    assert_eq!(scoped.tasks.future_task_details.len(), 2);
}
