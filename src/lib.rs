//! # Grade Submission
//!
//! 一个用于开放题考试 AI 评分的 Rust 服务
//!
//! ## 架构设计
//!
//! 本系统采用严格的分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有外部文档存储，只暴露能力
//! - `DocumentStore` - 按 ID 读文档 / 按字段合并写文档
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单次调用
//! - `LlmService` - 评分模型调用能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一道作答"的完整评分流程
//! - `AnswerCtx` - 上下文封装（submission_id + answer_index）
//! - `AnswerFlow` - 流程编排（提示词 → 模型 → 解析校验）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/submission_grader` - 整次提交的评分器，
//!   遍历作答列表，单题失败就地降级，汇总并写回结果
//!
//! ### ⑤ 接口层（API）
//! - `api/` - axum HTTP 接口，`POST /api/grade`
//!
//! ## 模块结构

pub mod api;
pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{GradeError, GradeResult};
pub use infrastructure::{DocumentStore, MemoryStore};
pub use models::{Analysis, Answer, Exam, Question, QuestionAnalysis, Submission};
pub use orchestrator::SubmissionGrader;
pub use services::{GradingModel, LlmService};
pub use workflow::{AnswerCtx, AnswerFlow};
