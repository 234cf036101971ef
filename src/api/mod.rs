//! HTTP 接口层
//!
//! 对 UI 层暴露唯一一个操作：`POST /api/grade`。

pub mod grade;

use axum::{routing::post, Router};
use std::sync::Arc;

use crate::orchestrator::SubmissionGrader;

/// HTTP 层共享状态
#[derive(Clone)]
pub struct AppState {
    pub grader: Arc<SubmissionGrader>,
}

/// 构建路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/grade", post(grade::grade))
        .with_state(state)
}
