pub mod submission_grader;

pub use submission_grader::{GradingStats, SubmissionGrader};
