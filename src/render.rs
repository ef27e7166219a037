use chrono::{Local, NaiveDate};
use serde_json::Value;

use crate::calendar;
use crate::context::Context;

const NO_ACTIVE_TASKS: &str = "You have no active tasks at the moment.";
const NO_TODAY_TASKS: &str = "You have no tasks due today.";
const NO_FUTURE_TASKS: &str = "You have no upcoming tasks.";

/// Progress placeholders the renderer always resolves, defaulting to "0"
/// when the stats map carries no value for them.
const TEAM_KEYS: [&str; 9] = [
    "team_total_tasks",
    "team_todo_count",
    "team_todo_percent",
    "team_inprogress_count",
    "team_inprogress_percent",
    "team_completed_count",
    "team_completed_percent",
    "team_incomplete_count",
    "team_incomplete_percent",
];

const MEMBER_KEYS: [&str; 10] = [
    "member_name",
    "member_total_tasks",
    "member_todo_count",
    "member_todo_percent",
    "member_inprogress_count",
    "member_inprogress_percent",
    "member_completed_count",
    "member_completed_percent",
    "member_incomplete_count",
    "member_incomplete_percent",
];

/// Substitutes `{placeholder}` markers in a response template with live data
/// from a Context snapshot. The calendar date is fixed at construction so the
/// special-day placeholder is deterministic under test.
#[derive(Debug, Clone)]
pub struct PlaceholderRenderer {
    date: NaiveDate,
}

impl Default for PlaceholderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaceholderRenderer {
    pub fn new() -> Self {
        Self {
            date: Local::now().date_naive(),
        }
    }

    pub fn with_date(date: NaiveDate) -> Self {
        Self { date }
    }

    pub fn special_day(&self) -> Option<&'static str> {
        calendar::special_day_on(self.date)
    }

    /// Every recognized key is replaced unconditionally, even if the template
    /// contains none of them. Unknown placeholders are left verbatim.
    ///
    /// Without a context only `{special_day}` is substituted; the rest stay
    /// as literal text. The no-context fallback path relies on exactly this
    /// asymmetry.
    pub fn render(&self, template: &str, context: Option<&Context>) -> String {
        let special_day = self.special_day().unwrap_or_default();

        let ctx = match context {
            Some(ctx) => ctx,
            None => return template.replace("{special_day}", special_day),
        };

        let gender = if ctx.user.gender.is_empty() {
            "friend".to_string()
        } else {
            ctx.user.gender.clone()
        };
        let firstname = if ctx.user.firstname.is_empty() {
            ctx.user.name.clone()
        } else {
            ctx.user.firstname.clone()
        };
        let group_name = ctx
            .group
            .as_ref()
            .map(|g| g.name.clone())
            .unwrap_or_default();

        let tasks = &ctx.tasks;
        let mut pairs: Vec<(&str, String)> = vec![
            ("user_name", ctx.user.name.clone()),
            ("user_firstname", firstname),
            ("Gender", capitalize_first(&gender)),
            ("gender", gender),
            ("activeTasks", bullet_list(&tasks.active_tasks, NO_ACTIVE_TASKS)),
            ("activeTasksCount", tasks.active_tasks_count.to_string()),
            ("todayTasks", bullet_list(&tasks.today_tasks, NO_TODAY_TASKS)),
            ("todayTasksCount", tasks.today_tasks_count.to_string()),
            ("futureTasks", bullet_list(&tasks.future_tasks, NO_FUTURE_TASKS)),
            ("futureTasksCount", tasks.future_tasks_count.to_string()),
            ("current_date", ctx.date.current_date.clone()),
            ("current_date_vn", ctx.date.current_date_vn.clone()),
            ("group_name", group_name),
            ("special_day", special_day.to_string()),
            // Reserved, unimplemented.
            ("location", String::new()),
            ("weather_condition", String::new()),
            ("temperature", String::new()),
        ];

        for key in TEAM_KEYS {
            pairs.push((key, stat_value(&ctx.stats, key)));
        }
        for key in MEMBER_KEYS {
            pairs.push((key, stat_value(&ctx.member_stats, key)));
        }

        let mut result = template.to_string();
        for (key, value) in pairs {
            let marker = format!("{{{key}}}");
            result = result.replace(&marker, &value);
        }
        result
    }
}

fn stat_value(stats: &std::collections::HashMap<String, Value>, key: &str) -> String {
    match stats.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
        None => "0".to_string(),
    }
}

fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn bullet_list(titles: &[String], empty_sentence: &str) -> String {
    if titles.is_empty() {
        return empty_sentence.to_string();
    }
    titles
        .iter()
        .map(|title| format!("- {title}"))
        .collect::<Vec<_>>()
        .join("\n")
}
