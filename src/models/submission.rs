//! 提交记录数据结构

use serde::{Deserialize, Serialize};

use crate::models::analysis::Analysis;
use crate::models::exam::AnswerType;

/// 学生对单道题目的作答
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    /// 指向考试题目列表中的题目ID
    pub question_id: String,
    /// 作答形式
    #[serde(rename = "type")]
    pub answer_type: AnswerType,
    /// 作答内容：文字原文，或上传媒体的 URL
    #[serde(default)]
    pub content: String,
}

/// 一次完整提交
///
/// 学生交卷时创建一次，评分时被修改一次（写入 analysis），
/// 在本系统范围内不会被删除。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    /// 所属考试ID
    pub exam_id: String,
    pub student_id: String,
    pub answers: Vec<Answer>,
    /// 开始作答时间（毫秒时间戳）
    #[serde(default)]
    pub started_at: i64,
    /// 交卷时间（毫秒时间戳）
    #[serde(default)]
    pub submitted_at: i64,
    /// 评分结果，未评分时缺失
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Analysis>,
}
