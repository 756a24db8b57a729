use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::super::definitions::{QuizDefinition, QuizLibrary};
use super::super::domain::{AnswerSet, QuizKind};
use super::super::recommend::{Recommendation, RecommendationError, Recommender};
use super::super::scoring::{ScoreReport, Scorer};
use super::super::session::QuizOutcome;
use super::analysis::{analyze, AssessmentAnalysis};
use super::domain::{
    collect_answers, AssessmentSubmission, ResultId, SubmissionError, SubmissionOutcome,
    SubmittedAnswer, UserId,
};
use super::repository::{AssessmentRecord, RepositoryError, ResultRepository};

/// Service composing the quiz library, scorer, recommender and result store.
pub struct AssessmentService<R> {
    library: Arc<QuizLibrary>,
    repository: Arc<R>,
}

static RESULT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_result_id() -> ResultId {
    let id = RESULT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ResultId(format!("res-{id:06}"))
}

/// Scored answers plus the recommendations derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredAssessment {
    pub report: ScoreReport,
    pub recommendations: Vec<Recommendation>,
}

impl<R> AssessmentService<R>
where
    R: ResultRepository + 'static,
{
    pub fn new(library: Arc<QuizLibrary>, repository: Arc<R>) -> Self {
        Self {
            library,
            repository,
        }
    }

    pub fn definition(&self, quiz: QuizKind) -> Arc<QuizDefinition> {
        self.library.get(quiz)
    }

    /// Scores answers without persisting anything. Partial sheets are scored
    /// as they stand.
    pub fn evaluate(
        &self,
        quiz: QuizKind,
        answers: &[SubmittedAnswer],
    ) -> Result<ScoredAssessment, AssessmentServiceError> {
        let definition = self.library.get(quiz);
        let answer_set = collect_answers(&definition, answers)?;
        Ok(score_and_recommend(&definition, &answer_set)?)
    }

    /// Scores a submitted answer sheet and appends it to the user's history.
    pub fn submit(
        &self,
        quiz: QuizKind,
        submission: AssessmentSubmission,
        completed_at: DateTime<Utc>,
    ) -> Result<SubmissionOutcome, AssessmentServiceError> {
        let definition = self.library.get(quiz);
        let answer_set = collect_answers(&definition, &submission.answers)?;
        let missing = definition.questions().len().saturating_sub(answer_set.len());
        if missing > 0 && !submission.timed_out {
            return Err(SubmissionError::IncompleteSheet { missing }.into());
        }
        let scored = score_and_recommend(&definition, &answer_set)?;

        self.persist(
            &definition,
            submission.user_id,
            scored,
            answer_set,
            submission.timed_out,
            completed_at,
        )
    }

    /// Persists the outcome of an interactive session.
    pub fn record_session(
        &self,
        user_id: UserId,
        definition: &QuizDefinition,
        outcome: QuizOutcome,
        completed_at: DateTime<Utc>,
    ) -> Result<SubmissionOutcome, AssessmentServiceError> {
        let recommendations = outcome.recommendations(definition)?;
        let scored = ScoredAssessment {
            report: outcome.report,
            recommendations,
        };
        let answer_set = outcome.answers.into_iter().collect();

        self.persist(
            definition,
            user_id,
            scored,
            answer_set,
            outcome.timed_out,
            completed_at,
        )
    }

    pub fn history(&self, user_id: &UserId) -> Result<Vec<AssessmentRecord>, AssessmentServiceError> {
        Ok(self.repository.history(user_id)?)
    }

    pub fn get(&self, id: &ResultId) -> Result<AssessmentRecord, AssessmentServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn analysis(&self, user_id: &UserId) -> Result<AssessmentAnalysis, AssessmentServiceError> {
        let records = self.repository.history(user_id)?;
        Ok(analyze(user_id, &records))
    }

    fn persist(
        &self,
        definition: &QuizDefinition,
        user_id: UserId,
        scored: ScoredAssessment,
        answers: AnswerSet,
        timed_out: bool,
        completed_at: DateTime<Utc>,
    ) -> Result<SubmissionOutcome, AssessmentServiceError> {
        let ScoredAssessment {
            report,
            recommendations,
        } = scored;
        let top = report
            .top()
            .cloned()
            .ok_or(AssessmentServiceError::NoScores)?;
        let next_steps = next_steps(&recommendations);

        let record = AssessmentRecord {
            id: next_result_id(),
            user_id,
            quiz: definition.kind(),
            definition_version: definition.version().to_string(),
            primary_category: top.category,
            score: top.percentage,
            breakdown: report.scores,
            answered: report.answered,
            total_questions: report.total_questions,
            answers: answers.to_vec(),
            recommendations,
            timed_out,
            completed_at,
        };

        let stored = self.repository.append(record)?;
        info!(
            result_id = %stored.id.0,
            quiz = %stored.quiz,
            primary = %stored.primary_category,
            score = stored.score,
            "assessment result recorded"
        );

        Ok(SubmissionOutcome {
            result_id: stored.id.clone(),
            test_result: stored.test_result(),
            recommendations: stored.recommendations.clone(),
            next_steps,
        })
    }
}

fn score_and_recommend(
    definition: &QuizDefinition,
    answers: &AnswerSet,
) -> Result<ScoredAssessment, RecommendationError> {
    let report = Scorer::new(definition).score(answers);
    let recommendations = Recommender::new(definition).recommend(&report)?;
    Ok(ScoredAssessment {
        report,
        recommendations,
    })
}

/// Follow-up actions derived from the leading recommendation.
pub(crate) fn next_steps(recommendations: &[Recommendation]) -> Vec<String> {
    let Some(top) = recommendations.first() else {
        return Vec::new();
    };

    let mut steps = vec![format!(
        "Explore colleges offering {} programs",
        top.display_name
    )];
    if let Some(career) = top.careers.first() {
        steps.push(format!("Book a mentorship session with a practising {career}"));
    }
    if !top.subjects.is_empty() {
        steps.push(format!("Strengthen your foundation in {}", top.subjects.join(", ")));
    }
    steps.push("Retake the assessment in six months to track how your interests change".to_string());
    steps
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Recommendation(#[from] RecommendationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("quiz produced no category scores")]
    NoScores,
}
