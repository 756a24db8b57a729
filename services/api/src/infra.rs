use career_compass::assessments::{
    AssessmentRecord, QuizKind, QuizLibrary, RepositoryError, ResultId, ResultRepository, UserId,
};
use career_compass::config::AssessmentConfig;
use career_compass::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Append-only result store kept for the lifetime of the process.
#[derive(Default, Clone)]
pub(crate) struct InMemoryResultRepository {
    records: Arc<Mutex<Vec<AssessmentRecord>>>,
}

impl ResultRepository for InMemoryResultRepository {
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
        // Appended in arrival order; reversing first keeps same-instant entries newest first.
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

pub(crate) fn load_library(config: &AssessmentConfig) -> Result<Arc<QuizLibrary>, AppError> {
    Ok(Arc::new(QuizLibrary::load(config)?))
}

pub(crate) fn parse_quiz(raw: &str) -> Result<QuizKind, String> {
    raw.parse::<QuizKind>().map_err(|err| err.to_string())
}
