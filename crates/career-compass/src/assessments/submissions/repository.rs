use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::domain::{Answer, CategoryId, CategoryScore, QuizKind};
use super::super::recommend::Recommendation;
use super::domain::{ResultId, TestResult, UserId};

/// Persisted attempt: score, breakdown, raw answers and what was recommended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: ResultId,
    pub user_id: UserId,
    pub quiz: QuizKind,
    pub definition_version: String,
    pub primary_category: CategoryId,
    pub score: u8,
    pub breakdown: Vec<CategoryScore>,
    pub answered: usize,
    pub total_questions: usize,
    pub answers: Vec<Answer>,
    pub recommendations: Vec<Recommendation>,
    pub timed_out: bool,
    pub completed_at: DateTime<Utc>,
}

impl AssessmentRecord {
    pub fn test_result(&self) -> TestResult {
        let primary_label = self
            .recommendations
            .iter()
            .find(|recommendation| recommendation.category == self.primary_category)
            .map(|recommendation| recommendation.display_name.clone())
            .unwrap_or_else(|| self.primary_category.to_string());

        TestResult {
            quiz: self.quiz,
            definition_version: self.definition_version.clone(),
            primary_category: self.primary_category.clone(),
            primary_label,
            score: self.score,
            breakdown: self.breakdown.clone(),
            answered: self.answered,
            total_questions: self.total_questions,
            timed_out: self.timed_out,
            completed_at: self.completed_at,
        }
    }
}

/// Storage abstraction for the result history, so the service can be
/// exercised without a database.
pub trait ResultRepository: Send + Sync {
    fn append(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError>;
    fn fetch(&self, id: &ResultId) -> Result<Option<AssessmentRecord>, RepositoryError>;
    /// All records for `user`, newest first.
    fn history(&self, user: &UserId) -> Result<Vec<AssessmentRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
