//! Career-guidance quizzes: question banks, scoring, recommendations and the
//! timed session flow that ties them together.
//!
//! Three quiz variants share one pipeline. A [`QuizDefinition`] bundles the
//! question bank, the outcome catalog and the [`ScoringRule`] that maps an
//! answer to category weights. [`Scorer`] turns an [`AnswerSet`] into a ranked
//! [`ScoreReport`] and [`Recommender`] joins the leading categories with the
//! catalog.

pub mod definitions;
pub mod domain;
pub mod driver;
pub mod recommend;
pub mod scoring;
pub mod session;
pub mod submissions;

#[cfg(test)]
mod tests;

pub use definitions::{
    DefinitionError, QuizDefinition, QuizDefinitionSpec, QuizLibrary, RecommendationPolicy,
};
pub use domain::{
    Answer, AnswerOption, AnswerSet, CategoryId, CategoryScore, CategoryWeight, OptionTag,
    OutcomeEntry, Question, QuizKind, UnknownQuiz,
};
pub use driver::{drive, spawn_ticker, SessionCommand};
pub use recommend::{top_n, Recommendation, RecommendationError, Recommender};
pub use scoring::{LookupEntry, ScoreReport, Scorer, ScoringRule};
pub use session::{QuizOutcome, QuizSession, SessionError, SessionStep, TickOutcome};
pub use submissions::{
    assessment_router, AssessmentAnalysis, AssessmentRecord, AssessmentService,
    AssessmentServiceError, AssessmentSubmission, RepositoryError, ResultId, ResultRepository,
    ScoredAssessment, SubmissionOutcome, SubmittedAnswer, UserId,
};
