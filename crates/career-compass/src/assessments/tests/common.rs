use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::assessments::definitions::{QuizDefinition, QuizLibrary};
use crate::assessments::domain::{Answer, AnswerSet, OptionTag, Question, QuizKind};
use crate::assessments::submissions::domain::{
    AnswerValue, AssessmentSubmission, ResultId, SubmittedAnswer, UserId,
};
use crate::assessments::submissions::repository::{
    AssessmentRecord, RepositoryError, ResultRepository,
};
use crate::assessments::submissions::{assessment_router, AssessmentService};

pub(super) fn definition(kind: QuizKind) -> QuizDefinition {
    QuizDefinition::builtin(kind)
}

/// Answers every question with the option chosen by `pick`.
pub(super) fn answer_all(
    definition: &QuizDefinition,
    pick: impl Fn(&Question) -> usize,
) -> AnswerSet {
    definition
        .questions()
        .iter()
        .map(|question| Answer::for_option(question, pick(question)))
        .collect()
}

/// Interest answers at index 0 and Career Goals answers at index 2.
pub(super) fn technology_leaning_answers(definition: &QuizDefinition) -> AnswerSet {
    answer_all(definition, |question| match question.category.as_str() {
        "Interest" => 0,
        "Career Goals" => 2,
        _ => 1,
    })
}

pub(super) fn typed_option(question: &Question, code: &str) -> usize {
    question
        .options
        .iter()
        .position(|option| matches!(&option.tag, OptionTag::Type(tag) if tag.as_str() == code))
        .expect("every RIASEC question offers each type")
}

/// Index of the option whose only weight is `{science: 3}`.
pub(super) fn pure_science_option(question: &Question) -> usize {
    question
        .options
        .iter()
        .position(|option| match &option.tag {
            OptionTag::Weighted(weights) => {
                weights.len() == 1
                    && weights[0].category.as_str() == "science"
                    && weights[0].weight == 3
            }
            _ => false,
        })
        .expect("every stream question offers a pure science option")
}

pub(super) fn submission_for(
    definition: &QuizDefinition,
    user: &str,
    pick: impl Fn(&Question) -> usize,
) -> AssessmentSubmission {
    AssessmentSubmission {
        user_id: UserId(user.to_string()),
        answers: definition
            .questions()
            .iter()
            .map(|question| SubmittedAnswer {
                question_id: question.id,
                answer: AnswerValue::Index(pick(question)),
                category: Some(question.category.clone()),
            })
            .collect(),
        timed_out: false,
    }
}

pub(super) fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn build_service() -> (AssessmentService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = AssessmentService::new(Arc::new(QuizLibrary::builtin()), repository.clone());
    (service, repository)
}

pub(super) fn router_with_service(service: AssessmentService<MemoryRepository>) -> axum::Router {
    assessment_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<Vec<AssessmentRecord>>>,
}

impl ResultRepository for MemoryRepository {
    fn append(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ResultId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn history(&self, user: &UserId) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<AssessmentRecord> = guard
            .iter()
            .rev()
            .filter(|record| &record.user_id == user)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(records)
    }
}

pub(super) struct UnavailableRepository;

impl ResultRepository for UnavailableRepository {
    fn append(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ResultId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn history(&self, _user: &UserId) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
