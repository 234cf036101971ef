pub mod analysis;
pub mod exam;
pub mod submission;

pub use analysis::{
    Analysis, Dimensions, ModelGrade, QuestionAnalysis, CRITICAL_THINKING_PLACEHOLDER,
    STRUCTURAL_PLACEHOLDER,
};
pub use exam::{AnswerType, Exam, ExamSettings, Question, QuestionType};
pub use submission::{Answer, Submission};
