//! 评分结果数据结构
//!
//! `Analysis` 是整次提交的评分结果，整体覆盖写回到提交文档的
//! `analysis` 字段上；`ModelGrade` 是评分模型按约定返回的原始
//! JSON 结构，经校验后转换为 `QuestionAnalysis`。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// "结构化程度"维度的固定占位值，尚无推导逻辑
pub const STRUCTURAL_PLACEHOLDER: u32 = 80;
/// "批判性思维"维度的固定占位值，尚无推导逻辑
pub const CRITICAL_THINKING_PLACEHOLDER: u32 = 75;

/// 单道题目的评分结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnalysis {
    /// 得分，范围 0..=题目分值
    pub score: f64,
    /// 给学生的反馈
    pub feedback: String,
    /// 概念性错误
    #[serde(skip_serializing_if = "Option::is_none")]
    pub misconceptions: Option<Vec<String>>,
    /// 正确答案说明
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction: Option<String>,
    /// 降级条目才有：本题评分失败的原因
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 维度汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub structural: u32,
    /// 全卷汇总的概念性错误
    pub misconceptions: Vec<String>,
    /// 全卷汇总的知识盲区
    pub knowledge_gaps: Vec<String>,
    pub critical_thinking: u32,
}

/// 整次提交的评分结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// 百分制总分：已处理题目得分之和 / 分值之和 × 100
    pub overall_score: f64,
    /// 整体评语（固定摘要）
    pub feedback: String,
    /// 题目ID → 该题评分结果
    pub question_analysis: BTreeMap<String, QuestionAnalysis>,
    pub dimensions: Dimensions,
}

/// 评分模型返回的原始 JSON 结构
///
/// `score` 与 `feedback` 必填，其余可选；解析或校验失败都走
/// 降级路径，不会让整次评分失败。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelGrade {
    pub score: f64,
    pub feedback: String,
    #[serde(default)]
    pub misconceptions: Option<Vec<String>>,
    #[serde(default)]
    pub knowledge_gaps: Option<Vec<String>>,
    #[serde(default)]
    pub correction: Option<String>,
}

impl ModelGrade {
    /// 转换为写入 Analysis 的单题结果
    pub fn into_question_analysis(self) -> QuestionAnalysis {
        QuestionAnalysis {
            score: self.score,
            feedback: self.feedback,
            misconceptions: self.misconceptions,
            correction: self.correction,
            error: None,
        }
    }
}

impl QuestionAnalysis {
    /// 构造降级条目：本题模型调用或解析失败，计 0 分
    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            score: 0.0,
            feedback: "分析过程中出现错误。".to_string(),
            misconceptions: None,
            correction: None,
            error: Some(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_analysis_omits_absent_fields() {
        let entry = QuestionAnalysis {
            score: 3.0,
            feedback: "要点基本完整。".to_string(),
            misconceptions: None,
            correction: None,
            error: None,
        };

        let value = serde_json::to_value(&entry).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("score"));
        assert!(obj.contains_key("feedback"));
        assert!(!obj.contains_key("misconceptions"));
        assert!(!obj.contains_key("correction"));
        assert!(!obj.contains_key("error"));
    }

    #[test]
    fn test_degraded_entry_shape() {
        let entry = QuestionAnalysis::degraded("模型返回无法解析");
        assert_eq!(entry.score, 0.0);
        assert_eq!(entry.error.as_deref(), Some("模型返回无法解析"));

        let value = serde_json::to_value(&entry).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("error"));
        assert!(!obj.contains_key("correction"));
    }

    #[test]
    fn test_model_grade_accepts_minimal_reply() {
        let grade: ModelGrade =
            serde_json::from_str(r#"{ "score": 4, "feedback": "不错" }"#).unwrap();
        assert_eq!(grade.score, 4.0);
        assert!(grade.misconceptions.is_none());
        assert!(grade.knowledge_gaps.is_none());
    }
}
