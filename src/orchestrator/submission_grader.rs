//! 提交评分器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责一次提交的完整评分，是提交级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **加载数据**：读取提交及其所属考试
//! 2. **遍历作答**：按提交顺序循环处理 `Vec<Answer>`
//! 3. **流程调度**：创建并复用 `AnswerFlow`
//! 4. **错误隔离**：单道作答的模型失败就地降级，绝不中断整卷
//! 5. **汇总计算**：总分、概念性错误、知识盲区
//! 6. **结果写回**：整体覆盖提交文档的 `analysis` 字段
//! 7. **统计输出**：记录成功/降级/跳过数量

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{GradeError, GradeResult};
use crate::infrastructure::{DocumentStore, COLLECTION_EXAMS, COLLECTION_SUBMISSIONS};
use crate::models::{
    Analysis, Dimensions, Exam, QuestionAnalysis, Submission, CRITICAL_THINKING_PLACEHOLDER,
    STRUCTURAL_PLACEHOLDER,
};
use crate::services::GradingModel;
use crate::workflow::{AnswerCtx, AnswerFlow};

/// 整体评语（固定摘要，暂无按卷生成的逻辑）
const OVERALL_FEEDBACK: &str = "整体评估已完成。";

/// 作答处理统计
#[derive(Debug, Default)]
pub struct GradingStats {
    /// 模型成功评分的作答数
    pub graded: usize,
    /// 模型失败、降级计 0 分的作答数
    pub degraded: usize,
    /// 题目不存在被跳过的作答数
    pub skipped: usize,
}

/// 提交评分器
///
/// 持有文档存储与评分模型两个外部依赖，二者都以接口注入，
/// 测试中可替换为假实现。
pub struct SubmissionGrader {
    store: Arc<dyn DocumentStore>,
    flow: AnswerFlow,
}

impl SubmissionGrader {
    /// 创建新的提交评分器
    pub fn new(store: Arc<dyn DocumentStore>, model: Arc<dyn GradingModel>, config: &Config) -> Self {
        Self {
            store,
            flow: AnswerFlow::new(model, config),
        }
    }

    /// 评一次提交
    ///
    /// # 参数
    /// - `submission_id`: 提交ID
    ///
    /// # 返回
    /// 返回写回后的评分结果。提交或考试不存在、写回失败时整次
    /// 评分以 `Err` 结束；单道作答的模型失败只影响该题条目。
    pub async fn grade(&self, submission_id: &str) -> GradeResult<Analysis> {
        let submission = self.load_submission(submission_id).await?;
        let exam = self.load_exam(&submission.exam_id).await?;

        log_grade_start(&submission, &exam);

        let mut total_score = 0.0_f64;
        let mut total_possible = 0_u32;
        let mut misconceptions: Vec<String> = Vec::new();
        let mut knowledge_gaps: Vec<String> = Vec::new();
        let mut per_question: BTreeMap<String, QuestionAnalysis> = BTreeMap::new();
        let mut stats = GradingStats::default();

        // ========== 遍历所有作答（提交顺序，一次一个模型调用） ==========
        for (index, answer) in submission.answers.iter().enumerate() {
            let answer_index = index + 1;

            // 题目不存在：静默跳过，不计分（数据完整性容忍，见 DESIGN.md）
            let Some(question) = exam.find_question(&answer.question_id) else {
                warn!(
                    "[提交 {}] ⚠️ 作答 {} 引用的题目不存在，跳过: {}",
                    submission.id, answer_index, answer.question_id
                );
                stats.skipped += 1;
                continue;
            };

            total_possible += question.points;

            let ctx = AnswerCtx::new(
                submission.id.clone(),
                answer_index,
                question.id.clone(),
            );

            // 执行流程（委托给 AnswerFlow），失败就地降级
            match self.flow.run(question, answer, &ctx).await {
                Ok(grade) => {
                    info!(
                        "[提交 {}] ✓ 作答 {} 评分完成: {}/{}",
                        submission.id, answer_index, grade.score, question.points
                    );

                    total_score += grade.score;
                    if let Some(found) = &grade.misconceptions {
                        misconceptions.extend(found.iter().cloned());
                    }
                    if let Some(found) = &grade.knowledge_gaps {
                        knowledge_gaps.extend(found.iter().cloned());
                    }

                    per_question.insert(question.id.clone(), grade.into_question_analysis());
                    stats.graded += 1;
                }
                Err(e) => {
                    error!(
                        "[提交 {}] ❌ 作答 {} 评分失败，降级计 0 分: {:#}",
                        submission.id, answer_index, e
                    );

                    per_question
                        .insert(question.id.clone(), QuestionAnalysis::degraded(format!("{:#}", e)));
                    stats.degraded += 1;
                }
            }
        }

        // 没有任何作答被处理时总分为 0，避免除以零
        let overall_score = if total_possible > 0 {
            total_score / total_possible as f64 * 100.0
        } else {
            0.0
        };

        let analysis = Analysis {
            overall_score,
            feedback: OVERALL_FEEDBACK.to_string(),
            question_analysis: per_question,
            dimensions: Dimensions {
                structural: STRUCTURAL_PLACEHOLDER,
                misconceptions,
                knowledge_gaps,
                critical_thinking: CRITICAL_THINKING_PLACEHOLDER,
            },
        };

        self.persist_analysis(&submission.id, &analysis).await?;

        log_grade_complete(&submission.id, overall_score, &stats);

        Ok(analysis)
    }

    /// 加载提交记录
    async fn load_submission(&self, submission_id: &str) -> GradeResult<Submission> {
        let doc = self
            .store
            .get_by_id(COLLECTION_SUBMISSIONS, submission_id)
            .await
            .map_err(|e| GradeError::store(COLLECTION_SUBMISSIONS, submission_id, e))?
            .ok_or_else(|| GradeError::SubmissionNotFound {
                id: submission_id.to_string(),
            })?;

        serde_json::from_value(doc)
            .map_err(|e| GradeError::invalid_document(COLLECTION_SUBMISSIONS, submission_id, e))
    }

    /// 加载提交所属的考试
    async fn load_exam(&self, exam_id: &str) -> GradeResult<Exam> {
        let doc = self
            .store
            .get_by_id(COLLECTION_EXAMS, exam_id)
            .await
            .map_err(|e| GradeError::store(COLLECTION_EXAMS, exam_id, e))?
            .ok_or_else(|| GradeError::ExamNotFound {
                id: exam_id.to_string(),
            })?;

        serde_json::from_value(doc)
            .map_err(|e| GradeError::invalid_document(COLLECTION_EXAMS, exam_id, e))
    }

    /// 整体覆盖写回 `analysis` 字段
    ///
    /// 同一提交的并发评分没有互斥，最后写入者生效；写回不是
    /// 事务性的，失败时本次评分全部丢弃。
    async fn persist_analysis(&self, submission_id: &str, analysis: &Analysis) -> GradeResult<()> {
        let value = serde_json::to_value(analysis)
            .map_err(|e| GradeError::persistence(submission_id, e.into()))?;

        self.store
            .update_fields(
                COLLECTION_SUBMISSIONS,
                submission_id,
                serde_json::json!({ "analysis": value }),
            )
            .await
            .map_err(|e| GradeError::persistence(submission_id, e))
    }
}

// ========== 日志辅助函数 ==========

fn log_grade_start(submission: &Submission, exam: &Exam) {
    info!("[提交 {}] 开始评分", submission.id);
    info!("[提交 {}] 考试: {}", submission.id, exam.title);
    info!("[提交 {}] 学生: {}", submission.id, submission.student_id);
    info!(
        "[提交 {}] 作答总数: {}",
        submission.id,
        submission.answers.len()
    );
}

fn log_grade_complete(submission_id: &str, overall_score: f64, stats: &GradingStats) {
    info!(
        "[提交 {}] 作答统计: 成功 {}, 降级 {}, 跳过 {}",
        submission_id, stats.graded, stats.degraded, stats.skipped
    );
    info!(
        "[提交 {}] ✅ 评分完成，总分 {:.1}\n",
        submission_id, overall_score
    );
}
