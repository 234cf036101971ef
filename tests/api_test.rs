//! HTTP 接口集成测试
//!
//! 通过 tower 的 `oneshot` 驱动路由，不监听真实端口。

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use grade_submission::api::{router, AppState};
use grade_submission::infrastructure::{COLLECTION_EXAMS, COLLECTION_SUBMISSIONS};
use grade_submission::{Config, DocumentStore, GradingModel, MemoryStore, SubmissionGrader};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

struct ScriptedModel {
    replies: Mutex<VecDeque<String>>,
}

#[async_trait]
impl GradingModel for ScriptedModel {
    async fn generate_text(&self, _prompt: &str) -> Result<String> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("脚本回复已用尽"))
    }
}

/// 构建带一场单题考试和一次提交的测试应用
fn test_app(replies: &[&str]) -> axum::Router {
    let store = Arc::new(MemoryStore::new());
    store.insert(
        COLLECTION_EXAMS,
        "exam-1",
        json!({
            "id": "exam-1",
            "teacherId": "teacher-7",
            "title": "单题测验",
            "questions": [
                { "id": "q1", "text": "2+2 等于几？", "type": "text",
                  "points": 5, "allowedAnswerTypes": ["text"] }
            ],
            "createdAt": 0,
            "isActive": true,
            "settings": {}
        }),
    );
    store.insert(
        COLLECTION_SUBMISSIONS,
        "sub-1",
        json!({
            "id": "sub-1",
            "examId": "exam-1",
            "studentId": "student-42",
            "answers": [
                { "questionId": "q1", "type": "text", "content": "4" }
            ],
            "startedAt": 0,
            "submittedAt": 0
        }),
    );

    let model = Arc::new(ScriptedModel {
        replies: Mutex::new(replies.iter().map(|s| s.to_string()).collect()),
    });

    let grader = Arc::new(SubmissionGrader::new(
        store as Arc<dyn DocumentStore>,
        model,
        &Config::default(),
    ));

    router(AppState { grader })
}

fn grade_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/grade")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_grade_endpoint_success() {
    let app = test_app(&[r#"{ "score": 5, "feedback": "完全正确。" }"#]);

    let response = app
        .oneshot(grade_request(json!({ "submissionId": "sub-1" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["analysis"]["overallScore"], 100.0);
    assert_eq!(body["analysis"]["questionAnalysis"]["q1"]["score"], 5.0);
}

#[tokio::test]
async fn test_grade_endpoint_missing_submission_is_404() {
    let app = test_app(&[]);

    let response = app
        .oneshot(grade_request(json!({ "submissionId": "ghost" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("ghost"));
}

#[tokio::test]
async fn test_grade_endpoint_empty_id_is_400() {
    let app = test_app(&[]);

    let response = app
        .oneshot(grade_request(json!({ "submissionId": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_grade_endpoint_degraded_answer_still_succeeds() {
    // 模型返回无法解析时接口仍然成功，降级体现在 analysis 里
    let app = test_app(&["这不是 JSON"]);

    let response = app
        .oneshot(grade_request(json!({ "submissionId": "sub-1" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["analysis"]["overallScore"], 0.0);
    assert!(body["analysis"]["questionAnalysis"]["q1"]["error"].is_string());
}
