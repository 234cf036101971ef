use std::fmt;

/// 评分流程错误类型
///
/// 只覆盖会让整次评分失败的错误；单道题的模型调用 / 解析失败
/// 在评分循环内部就地降级，不会出现在这里。
#[derive(Debug)]
pub enum GradeError {
    /// 提交记录不存在
    SubmissionNotFound { id: String },
    /// 提交所引用的考试不存在
    ExamNotFound { id: String },
    /// 文档存在但无法反序列化为预期结构
    InvalidDocument {
        collection: String,
        id: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 读取文档存储失败
    Store {
        collection: String,
        id: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 评分结果写回失败
    Persistence {
        id: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for GradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeError::SubmissionNotFound { id } => {
                write!(f, "提交记录不存在: {}", id)
            }
            GradeError::ExamNotFound { id } => {
                write!(f, "考试不存在: {}", id)
            }
            GradeError::InvalidDocument {
                collection,
                id,
                source,
            } => {
                write!(f, "文档格式无效 ({}/{}): {}", collection, id, source)
            }
            GradeError::Store {
                collection,
                id,
                source,
            } => {
                write!(f, "读取文档失败 ({}/{}): {}", collection, id, source)
            }
            GradeError::Persistence { id, source } => {
                write!(f, "评分结果写回失败 (提交: {}): {}", id, source)
            }
        }
    }
}

impl std::error::Error for GradeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GradeError::InvalidDocument { source, .. }
            | GradeError::Store { source, .. }
            | GradeError::Persistence { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

// ========== 便捷构造函数 ==========

impl GradeError {
    /// 创建文档读取错误
    pub fn store(
        collection: impl Into<String>,
        id: impl Into<String>,
        source: anyhow::Error,
    ) -> Self {
        GradeError::Store {
            collection: collection.into(),
            id: id.into(),
            source: source.into(),
        }
    }

    /// 创建文档反序列化错误
    pub fn invalid_document(
        collection: impl Into<String>,
        id: impl Into<String>,
        source: serde_json::Error,
    ) -> Self {
        GradeError::InvalidDocument {
            collection: collection.into(),
            id: id.into(),
            source: Box::new(source),
        }
    }

    /// 创建写回错误
    pub fn persistence(id: impl Into<String>, source: anyhow::Error) -> Self {
        GradeError::Persistence {
            id: id.into(),
            source: source.into(),
        }
    }

    /// 是否属于"资源不存在"一类（HTTP 层映射为 404）
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GradeError::SubmissionNotFound { .. } | GradeError::ExamNotFound { .. }
        )
    }
}

// ========== Result 类型别名 ==========

/// 评分流程结果类型
pub type GradeResult<T> = Result<T, GradeError>;
