//! Answer-sheet submission, result history and per-user analysis.

mod analysis;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use analysis::{AssessmentAnalysis, QuizTrend};
pub use domain::{
    AnswerValue, AssessmentSubmission, QuestionSheet, QuestionView, ResultId, SubmissionError,
    SubmissionOutcome, SubmittedAnswer, TestResult, UserId,
};
pub use repository::{AssessmentRecord, RepositoryError, ResultRepository};
pub use router::assessment_router;
pub use service::{AssessmentService, AssessmentServiceError, ScoredAssessment};
