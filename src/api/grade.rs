//! 评分接口
//!
//! 请求: `{ "submissionId": "..." }`
//! 成功: `200 { "success": true, "analysis": {...} }`
//! 失败: `400/404/500 { "error": "...", "detail": ... }`

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use crate::api::AppState;

/// 评分请求体
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeRequest {
    #[serde(default)]
    pub submission_id: String,
}

/// 评分接口处理函数
///
/// 提交/考试不存在映射为 404；其余评分器错误映射为 500，
/// 并带上错误源作为诊断信息。单题的模型失败不会到这里，
/// 它们体现在返回的 analysis 里。
pub async fn grade(
    State(state): State<AppState>,
    Json(request): Json<GradeRequest>,
) -> (StatusCode, Json<Value>) {
    if request.submission_id.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "submissionId 不能为空" })),
        );
    }

    match state.grader.grade(&request.submission_id).await {
        Ok(analysis) => (
            StatusCode::OK,
            Json(json!({ "success": true, "analysis": analysis })),
        ),
        Err(e) if e.is_not_found() => {
            (StatusCode::NOT_FOUND, Json(json!({ "error": e.to_string() })))
        }
        Err(e) => {
            error!("评分失败: {}", e);

            let detail = std::error::Error::source(&e).map(|source| source.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string(), "detail": detail })),
            )
        }
    }
}
