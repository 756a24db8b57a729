//! End-to-end scenarios for the three quizzes, exercised through the public
//! session, scoring and service APIs.

mod common {
    use std::sync::{Arc, Mutex};

    use career_compass::assessments::{
        AssessmentRecord, OptionTag, Question, QuizSession, RepositoryError, ResultId,
        ResultRepository, SessionStep, QuizOutcome, UserId,
    };

    /// Runs a session to completion, answering each question with `pick`.
    pub(super) fn complete(
        mut session: QuizSession,
        pick: impl Fn(&Question) -> usize,
    ) -> QuizOutcome {
        loop {
            let choice = pick(session.current_question().expect("open question"));
            session.select_option(choice).expect("valid option");
            match session.commit_and_advance().expect("selection made") {
                SessionStep::Advanced { .. } => {}
                SessionStep::Finished(outcome) => return outcome,
            }
        }
    }

    pub(super) fn typed(question: &Question, code: &str) -> usize {
        question
            .options
            .iter()
            .position(|option| matches!(&option.tag, OptionTag::Type(tag) if tag.as_str() == code))
            .expect("type offered")
    }

    pub(super) fn pure_science(question: &Question) -> usize {
        question
            .options
            .iter()
            .position(|option| {
                matches!(&option.tag, OptionTag::Weighted(weights)
                    if weights.len() == 1 && weights[0].category.as_str() == "science" && weights[0].weight == 3)
            })
            .expect("science option offered")
    }

    #[derive(Default)]
    pub(super) struct VecRepository {
        records: Mutex<Vec<AssessmentRecord>>,
    }

    impl ResultRepository for VecRepository {
        fn append(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
            self.records
                .lock()
                .expect("repository mutex poisoned")
                .push(record.clone());
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
                .filter(|record| &record.user_id == user)
                .cloned()
                .collect();
            records.reverse();
            records.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
            Ok(records)
        }
    }

    pub(super) fn shared_repository() -> Arc<VecRepository> {
        Arc::new(VecRepository::default())
    }
}

use std::sync::Arc;

use career_compass::assessments::{
    AssessmentService, QuizDefinition, QuizKind, QuizLibrary, QuizSession, TickOutcome, UserId,
};
use chrono::{TimeZone, Utc};
use common::*;

#[test]
fn aptitude_session_recommends_technology() {
    let definition = Arc::new(QuizDefinition::builtin(QuizKind::Aptitude));
    let outcome = complete(QuizSession::new(definition.clone()), |question| {
        match question.category.as_str() {
            "Interest" => 0,
            "Career Goals" => 2,
            _ => 3,
        }
    });

    let top = outcome.report.top().expect("scores present");
    assert_eq!(top.category.as_str(), "technology");
    assert_eq!(top.percentage, 100);

    let recommendations = outcome.recommendations(&definition).expect("catalog match");
    assert_eq!(recommendations[0].display_name, "Technology");
    assert_eq!(
        &recommendations[0].careers[..2],
        &["Software Engineer".to_string(), "Data Scientist".to_string()]
    );
}

#[test]
fn riasec_session_ranks_realistic_first() {
    let definition = Arc::new(QuizDefinition::builtin(QuizKind::Riasec));
    let outcome = complete(QuizSession::new(definition.clone()), |question| {
        typed(question, "R")
    });

    let ranked: Vec<(&str, u32, u8)> = outcome
        .report
        .scores
        .iter()
        .map(|score| (score.category.as_str(), score.raw_score, score.percentage))
        .collect();
    assert_eq!(ranked[0], ("R", 18, 100));
    assert_eq!(ranked[1], ("I", 0, 0));
    assert_eq!(ranked[2], ("A", 0, 0));

    let recommendations = outcome.recommendations(&definition).expect("catalog match");
    let categories: Vec<&str> = recommendations
        .iter()
        .map(|recommendation| recommendation.category.as_str())
        .collect();
    assert_eq!(categories, vec!["R", "I", "A"]);
}

#[test]
fn stream_session_recommends_science() {
    let definition = Arc::new(QuizDefinition::builtin(QuizKind::Stream));
    let outcome = complete(QuizSession::new(definition.clone()), pure_science);

    assert_eq!(outcome.report.score_for("science").map(|s| s.percentage), Some(100));
    assert_eq!(outcome.report.score_for("commerce").map(|s| s.percentage), Some(0));
    assert_eq!(outcome.report.score_for("arts").map(|s| s.percentage), Some(0));

    let recommendations = outcome.recommendations(&definition).expect("catalog match");
    assert_eq!(recommendations[0].category.as_str(), "science");
    assert!(recommendations[0]
        .careers
        .iter()
        .any(|career| career == "Doctor"));
}

#[test]
fn timer_expiry_scores_partial_answers() {
    let definition = Arc::new(QuizDefinition::builtin(QuizKind::Aptitude).with_time_limit(3));
    let mut session = QuizSession::new(definition);

    session.select_option(1).expect("valid option");
    assert_eq!(session.tick(), TickOutcome::Running { remaining_secs: 2 });
    assert_eq!(session.tick(), TickOutcome::Running { remaining_secs: 1 });

    let TickOutcome::TimedOut(outcome) = session.tick() else {
        panic!("third tick ends the quiz");
    };
    assert!(outcome.timed_out);
    assert_eq!(outcome.answers.len(), 1);
    assert_eq!(outcome.report.score_for("science").map(|s| s.raw_score), Some(2));
    assert!(session.is_completed());
    assert_eq!(session.tick(), TickOutcome::Idle);
}

#[test]
fn interactive_attempts_build_a_history() {
    let library = Arc::new(QuizLibrary::builtin());
    let repository = shared_repository();
    let service = AssessmentService::new(library.clone(), repository);
    let user = UserId("student-42".to_string());

    for (day, code) in [(1, "A"), (2, "A"), (3, "S")] {
        let definition = library.get(QuizKind::Riasec);
        let outcome = complete(QuizSession::new(definition.clone()), |question| {
            typed(question, code)
        });
        let completed_at = Utc
            .with_ymd_and_hms(2025, 3, day, 10, 0, 0)
            .single()
            .expect("valid timestamp");
        service
            .record_session(user.clone(), &definition, outcome, completed_at)
            .expect("attempt recorded");
    }

    let history = service.history(&user).expect("history");
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].primary_category.as_str(), "S");

    let analysis = service.analysis(&user).expect("analysis");
    let trend = &analysis.trends[0];
    assert_eq!(trend.attempts, 3);
    assert_eq!(trend.most_frequent_category.as_str(), "A");
    assert_eq!(trend.latest_category.as_str(), "S");
    assert_eq!(analysis.strongest_category.as_ref().map(|c| c.as_str()), Some("A"));
}
