//! 作答评分流程 - 流程层
//!
//! 核心职责：定义"一道作答"的完整评分流程
//!
//! 流程顺序：
//! 1. 构建评分提示词（文字作答带原文，图片/语音作答带占位符）
//! 2. 调用评分模型
//! 3. 剥掉代码围栏 → 解析 JSON → 校验分数范围

use anyhow::{Context, Result};
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Config;
use crate::models::{Answer, AnswerType, ModelGrade, Question};
use crate::services::GradingModel;
use crate::utils::logging::truncate_text;
use crate::workflow::answer_ctx::AnswerCtx;

/// 非文字作答在提示词中的占位符，二进制内容不会发给模型
const NON_TEXT_PLACEHOLDER: &str = "【图片/音频文件】";

/// 作答评分流程
///
/// - 编排单道作答的评分步骤
/// - 不持有存储资源
/// - 只依赖评分模型能力（services）
pub struct AnswerFlow {
    model: Arc<dyn GradingModel>,
    fence_re: Regex,
    verbose_logging: bool,
}

impl AnswerFlow {
    /// 创建新的作答评分流程
    pub fn new(model: Arc<dyn GradingModel>, config: &Config) -> Self {
        Self {
            model,
            // 模型偶尔会把 JSON 包在 ```json ... ``` 里
            fence_re: Regex::new(r"```(?:json)?").expect("代码围栏正则无效"),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 评一道作答
    ///
    /// # 参数
    /// - `question`: 作答对应的题目
    /// - `answer`: 学生作答
    /// - `ctx`: 作答上下文（用于日志）
    ///
    /// # 返回
    /// 返回模型给出的评分结果；任何调用 / 解析 / 校验失败都以
    /// `Err` 返回，由上层决定如何降级。
    pub async fn run(
        &self,
        question: &Question,
        answer: &Answer,
        ctx: &AnswerCtx,
    ) -> Result<ModelGrade> {
        if self.verbose_logging {
            info!(
                "{} 作答预览: {}",
                ctx,
                truncate_text(&answer.content, 80)
            );
        }

        let prompt = build_grading_prompt(question, answer);

        let raw = self
            .model
            .generate_text(&prompt)
            .await
            .with_context(|| format!("{} 评分模型调用失败", ctx))?;

        debug!("{} 模型原始返回: {}", ctx, truncate_text(&raw, 200));

        self.parse_grade(&raw, question.points)
            .with_context(|| format!("{} 模型返回解析失败", ctx))
    }

    /// 剥掉模型可能包裹的代码围栏标记
    fn strip_code_fences(&self, raw: &str) -> String {
        self.fence_re.replace_all(raw, "").trim().to_string()
    }

    /// 解析并校验模型返回
    fn parse_grade(&self, raw: &str, points: u32) -> Result<ModelGrade> {
        let cleaned = self.strip_code_fences(raw);

        let grade: ModelGrade =
            serde_json::from_str(&cleaned).context("模型返回不是预期的 JSON 结构")?;

        if !grade.score.is_finite() {
            anyhow::bail!("模型返回的分数无效: {}", grade.score);
        }
        if grade.score < 0.0 || grade.score > points as f64 {
            anyhow::bail!(
                "模型返回的分数 {} 超出范围 [0, {}]",
                grade.score,
                points
            );
        }

        Ok(grade)
    }
}

/// 构建单道作答的评分提示词
///
/// 文字作答带原文；图片/语音作答只带占位符，并要求模型在无文字
/// 可分析时给 0 分、注明需人工复核。
fn build_grading_prompt(question: &Question, answer: &Answer) -> String {
    let answer_text = if answer.answer_type == AnswerType::Text {
        format!("「{}」", answer.content)
    } else {
        NON_TEXT_PLACEHOLDER.to_string()
    };

    let reference = match &question.correct_answer {
        Some(correct) => format!("\n参考答案：「{}」\n", correct),
        None => String::new(),
    };

    let mut prompt = format!(
        r#"请分析下面这份学生作答。

题目：「{}」
题目分值：{}
{}
学生作答：{}

请只按以下 JSON 格式回答，不要附加任何其他文字：
{{
  "score": (0 到 {} 之间的分数),
  "feedback": "给学生的简短反馈",
  "misconceptions": ["若存在概念性错误，列在这里"],
  "knowledgeGaps": ["若存在知识盲区，列在这里"],
  "correction": "正确答案说明"
}}"#,
        question.text, question.points, reference, answer_text, question.points
    );

    if answer.answer_type != AnswerType::Text {
        prompt.push_str(
            "\n注：该作答是一个文件/图片。如果没有可分析的文字，\
             请回复「图片/音频内容暂无法自动分析，需人工复核」并给 0 分。",
        );
    }

    prompt
}
