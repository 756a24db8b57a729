use super::common::*;
use std::sync::Arc;

use crate::assessments::definitions::QuizLibrary;
use crate::assessments::domain::QuizKind;
use crate::assessments::session::{QuizSession, SessionStep};
use crate::assessments::submissions::domain::{AnswerValue, SubmissionError, UserId};
use crate::assessments::submissions::repository::{RepositoryError, ResultRepository};
use crate::assessments::submissions::{AssessmentService, AssessmentServiceError};

#[test]
fn submit_persists_the_scored_attempt() {
    let (service, repository) = build_service();
    let definition = definition(QuizKind::Stream);
    let submission = submission_for(&definition, "student-1", pure_science_option);

    let outcome = service
        .submit(QuizKind::Stream, submission, at(2, 9))
        .expect("submission accepted");

    assert!(outcome.result_id.0.starts_with("res-"));
    assert_eq!(outcome.test_result.primary_category.as_str(), "science");
    assert_eq!(outcome.test_result.score, 100);
    assert_eq!(outcome.test_result.answered, 16);
    assert!(!outcome.next_steps.is_empty());

    let stored = repository
        .fetch(&outcome.result_id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.answers.len(), 16);
    assert_eq!(stored.recommendations, outcome.recommendations);
    assert_eq!(stored.completed_at, at(2, 9));
}

#[test]
fn submit_rejects_answers_to_unknown_questions() {
    let (service, repository) = build_service();
    let definition = definition(QuizKind::Aptitude);
    let mut submission = submission_for(&definition, "student-1", |_| 0);
    submission.answers[0].question_id = 404;

    match service.submit(QuizKind::Aptitude, submission, at(2, 9)) {
        Err(AssessmentServiceError::Submission(SubmissionError::UnknownQuestion(404))) => {}
        other => panic!("expected unknown question, got {other:?}"),
    }
    assert!(repository
        .history(&UserId("student-1".to_string()))
        .expect("history")
        .is_empty());
}

#[test]
fn riasec_submissions_accept_type_codes() {
    let (service, _) = build_service();
    let definition = definition(QuizKind::Riasec);
    let mut submission = submission_for(&definition, "student-2", |_| 0);
    for answer in &mut submission.answers {
        answer.answer = AnswerValue::Code("I".to_string());
    }

    let outcome = service
        .submit(QuizKind::Riasec, submission, at(3, 10))
        .expect("type codes resolve");

    assert_eq!(outcome.test_result.primary_category.as_str(), "I");
    assert_eq!(outcome.recommendations.len(), 3);
    assert_eq!(outcome.recommendations[0].rank, 1);
}

#[test]
fn partial_submissions_are_scored_as_they_stand() {
    let (service, _) = build_service();
    let definition = definition(QuizKind::Aptitude);
    let mut submission = submission_for(&definition, "student-3", |_| 0);
    submission.answers.truncate(1);
    submission.timed_out = true;

    let outcome = service
        .submit(QuizKind::Aptitude, submission, at(4, 8))
        .expect("partial sheets are valid");

    assert!(outcome.test_result.timed_out);
    assert_eq!(outcome.test_result.answered, 1);
    assert_eq!(outcome.test_result.total_questions, 10);
    assert_eq!(outcome.test_result.primary_category.as_str(), "technology");
    assert_eq!(outcome.test_result.score, 25);
}

#[test]
fn incomplete_sheets_are_rejected_unless_timed_out() {
    let (service, repository) = build_service();
    let definition = definition(QuizKind::Stream);
    let mut submission = submission_for(&definition, "student-4", pure_science_option);
    submission.answers.truncate(10);

    match service.submit(QuizKind::Stream, submission.clone(), at(4, 8)) {
        Err(AssessmentServiceError::Submission(SubmissionError::IncompleteSheet { missing: 6 })) => {}
        other => panic!("expected incomplete sheet, got {other:?}"),
    }
    submission.answers.clear();
    assert!(matches!(
        service.submit(QuizKind::Stream, submission, at(4, 8)),
        Err(AssessmentServiceError::Submission(SubmissionError::IncompleteSheet { missing: 16 }))
    ));
    assert!(repository.records.lock().expect("lock").is_empty());
}

#[test]
fn empty_timed_out_submission_falls_back_to_catalog_order() {
    let (service, _) = build_service();
    let definition = definition(QuizKind::Stream);
    let mut submission = submission_for(&definition, "student-4", |_| 0);
    submission.answers.clear();
    submission.timed_out = true;

    let outcome = service
        .submit(QuizKind::Stream, submission, at(4, 8))
        .expect("empty sheet scores as zero");

    assert_eq!(outcome.test_result.score, 0);
    assert_eq!(outcome.test_result.primary_category.as_str(), "science");
}

#[test]
fn history_is_newest_first_and_scoped_to_the_user() {
    let (service, _) = build_service();
    let aptitude = definition(QuizKind::Aptitude);
    let stream = definition(QuizKind::Stream);

    service
        .submit(
            QuizKind::Aptitude,
            submission_for(&aptitude, "student-5", |_| 0),
            at(1, 9),
        )
        .expect("first");
    service
        .submit(
            QuizKind::Stream,
            submission_for(&stream, "student-5", pure_science_option),
            at(5, 9),
        )
        .expect("second");
    service
        .submit(
            QuizKind::Stream,
            submission_for(&stream, "someone-else", |_| 1),
            at(6, 9),
        )
        .expect("other user");

    let history = service
        .history(&UserId("student-5".to_string()))
        .expect("history");
    let quizzes: Vec<QuizKind> = history.iter().map(|record| record.quiz).collect();
    assert_eq!(quizzes, vec![QuizKind::Stream, QuizKind::Aptitude]);
}

#[test]
fn analysis_tracks_attempts_per_quiz() {
    let (service, _) = build_service();
    let stream = definition(QuizKind::Stream);
    let user = UserId("student-6".to_string());

    service
        .submit(
            QuizKind::Stream,
            submission_for(&stream, "student-6", pure_science_option),
            at(1, 9),
        )
        .expect("first");
    service
        .submit(
            QuizKind::Stream,
            submission_for(&stream, "student-6", |_| 1),
            at(2, 9),
        )
        .expect("second");

    let analysis = service.analysis(&user).expect("analysis");
    assert_eq!(analysis.total_assessments, 2);
    assert_eq!(analysis.trends.len(), 1);

    let trend = &analysis.trends[0];
    assert_eq!(trend.quiz, QuizKind::Stream);
    assert_eq!(trend.attempts, 2);
    assert_eq!(trend.best_score, 100);
    assert_eq!(trend.latest_category.as_str(), "commerce");
    assert_eq!(trend.most_frequent_category.as_str(), "science");
    assert_eq!(analysis.observations.len(), 1);
}

#[test]
fn record_session_stores_interactive_attempts() {
    let (service, repository) = build_service();
    let definition = service.definition(QuizKind::Riasec);
    let mut session = QuizSession::new(definition.clone());

    let outcome = loop {
        let question = session.current_question().expect("question available").clone();
        session
            .select_option(typed_option(&question, "S"))
            .expect("valid option");
        match session.commit_and_advance().expect("selection made") {
            SessionStep::Advanced { .. } => continue,
            SessionStep::Finished(outcome) => break outcome,
        }
    };

    let stored = service
        .record_session(
            UserId("student-7".to_string()),
            &definition,
            outcome,
            at(7, 12),
        )
        .expect("recorded");

    assert_eq!(stored.test_result.primary_category.as_str(), "S");
    assert_eq!(
        repository.records.lock().expect("lock").len(),
        1,
        "one attempt stored"
    );
}

#[test]
fn repository_failures_surface_as_service_errors() {
    let service = AssessmentService::new(
        Arc::new(QuizLibrary::builtin()),
        Arc::new(UnavailableRepository),
    );
    let definition = definition(QuizKind::Aptitude);

    match service.submit(
        QuizKind::Aptitude,
        submission_for(&definition, "student-8", |_| 0),
        at(1, 1),
    ) {
        Err(AssessmentServiceError::Repository(RepositoryError::Unavailable(_))) => {}
        other => panic!("expected repository error, got {other:?}"),
    }
}
