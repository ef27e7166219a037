use serde_json::json;
use taskpilot::backend::{unwrap_data, BackendApi, HttpBackend};
use taskpilot::context::{Context, ProgressStats, RecommendationEvaluation};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn context_fetch_unwraps_the_data_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chatbot/context"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "user": { "name": "Linh Tran", "firstname": "Linh", "gender": "sister" },
                "tasks": {
                    "activeTasks": ["Ship v2"],
                    "activeTasksCount": 1,
                    "futureTaskDetails": [
                        { "id": "t9", "title": "Ship v2", "status": "in_progress" }
                    ]
                }
            }
        })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let ctx = backend.fetch_context("tok-1").await.expect("context");
    assert_eq!(ctx.user.firstname, "Linh");
    assert_eq!(ctx.tasks.active_tasks_count, 1);
    assert_eq!(ctx.tasks.future_task_details[0].id, "t9");
    assert!(ctx.group.is_none());
}

#[tokio::test]
async fn bare_payload_without_envelope_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chatbot/group-progress"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalTasks": 6,
            "completed": { "count": 3, "percent": 50.0 }
        })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let progress = backend.group_progress("tok").await.expect("progress");
    assert_eq!(progress.total_tasks, 6);
    assert_eq!(progress.completed.count, 3);
}

#[tokio::test]
async fn non_2xx_resolves_to_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chatbot/context"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    assert!(backend.fetch_context("tok").await.is_none());
    assert!(backend.evaluate_recommended("tok").await.is_none());
}

#[tokio::test]
async fn member_progress_passes_the_member_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chatbot/member-progress"))
        .and(query_param("memberId", "m42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "totalTasks": 2 }
        })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let progress = backend.member_progress("tok", "m42").await.expect("progress");
    assert_eq!(progress.total_tasks, 2);
}

#[tokio::test]
async fn save_recommended_posts_the_id_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chatbot/recommended-tasks"))
        .and(body_json(json!({ "taskIds": ["a", "b"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "ok" })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let ids = vec!["a".to_string(), "b".to_string()];
    assert!(backend.save_recommended("tok", &ids).await);
}

#[tokio::test]
async fn save_recommended_reports_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chatbot/recommended-tasks"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    assert!(!backend.save_recommended("tok", &["a".to_string()]).await);
}

#[tokio::test]
async fn evaluation_parses_camel_case_flags() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chatbot/recommended-tasks/evaluate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "hasRecommended": true, "allCompleted": false, "anyCompleted": true }
        })))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let eval = backend.evaluate_recommended("tok").await.expect("evaluation");
    assert!(eval.has_recommended);
    assert!(!eval.all_completed);
    assert!(eval.any_completed);
}

#[test]
fn unwrap_data_handles_both_shapes() {
    let enveloped: RecommendationEvaluation =
        unwrap_data(json!({ "data": { "hasRecommended": true } })).unwrap();
    assert!(enveloped.has_recommended);

    let bare: RecommendationEvaluation = unwrap_data(json!({ "hasRecommended": true })).unwrap();
    assert!(bare.has_recommended);

    let ctx: Context = unwrap_data(json!({ "data": null })).unwrap_or_default();
    assert!(ctx.tasks.active_tasks.is_empty());
}

#[tokio::test]
async fn malformed_payload_resolves_to_no_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chatbot/group-progress"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let backend = HttpBackend::new(server.uri());
    let progress: Option<ProgressStats> = backend.group_progress("tok").await;
    assert!(progress.is_none());
}
