//! 考试与题目数据结构
//!
//! 与文档存储中的 JSON 文档保持一致：字段为 camelCase，
//! 时间戳为毫秒级 Unix 时间。

use serde::{Deserialize, Serialize};

/// 题目的媒体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Text,
    Image,
    Audio,
    Video,
}

/// 学生作答的形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerType {
    /// 文字作答
    Text,
    /// 手写拍照
    Handwriting,
    /// 语音作答
    Audio,
}

/// 考试设置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamSettings {
    /// 考试时长（分钟）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// 可作答时间窗口开始（毫秒时间戳）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    /// 可作答时间窗口结束（毫秒时间戳）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
}

/// 单道题目
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// 题目ID（考试内唯一）
    pub id: String,
    /// 题干文本
    pub text: String,
    /// 媒体类型
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// 老师提供的媒体地址（图片/音频/视频题）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    /// 分值（正整数）
    pub points: u32,
    /// 参考答案（供模型参考，可选）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    /// 允许的作答形式
    #[serde(default)]
    pub allowed_answer_types: Vec<AnswerType>,
}

/// 一场考试
///
/// 由老师创建，学生开始作答后视为不可变（评分器依赖这一点，
/// 但不在此处强制）。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: String,
    /// 所属老师ID
    pub teacher_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// 有序题目列表
    pub questions: Vec<Question>,
    /// 创建时间（毫秒时间戳）
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub settings: ExamSettings,
}

impl Exam {
    /// 按题目ID查找题目
    pub fn find_question(&self, question_id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }
}
