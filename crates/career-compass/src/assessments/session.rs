//! Answer collection for one interactive quiz attempt.
//!
//! A session walks the question bank one question at a time, keeps a
//! tentative selection for the question on screen and a committed answer per
//! visited question. Time is advanced from outside through [`QuizSession::tick`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::definitions::QuizDefinition;
use super::domain::{Answer, AnswerSet, Question};
use super::recommend::{Recommendation, RecommendationError, Recommender};
use super::scoring::{ScoreReport, Scorer};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("select an answer before proceeding")]
    NoAnswerSelected,
    #[error("question {question_id} has no option {choice} (it has {available})")]
    OptionOutOfRange {
        question_id: u32,
        choice: usize,
        available: usize,
    },
    #[error("the quiz session has already finished")]
    SessionClosed,
}

/// Result of committing the current answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStep {
    Advanced { index: usize },
    Finished(QuizOutcome),
}

/// Result of one timer tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Running { remaining_secs: u32 },
    TimedOut(QuizOutcome),
    /// The session had already finished; the tick was ignored.
    Idle,
}

/// Scored answers from a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOutcome {
    pub report: ScoreReport,
    pub answers: Vec<Answer>,
    pub timed_out: bool,
}

impl QuizOutcome {
    pub fn recommendations(
        &self,
        definition: &QuizDefinition,
    ) -> Result<Vec<Recommendation>, RecommendationError> {
        Recommender::new(definition).recommend(&self.report)
    }
}

#[derive(Debug)]
pub struct QuizSession {
    definition: Arc<QuizDefinition>,
    answers: AnswerSet,
    current_index: usize,
    tentative: Option<usize>,
    remaining_secs: u32,
    completed: bool,
}

impl QuizSession {
    pub fn new(definition: Arc<QuizDefinition>) -> Self {
        let remaining_secs = definition.time_limit_secs();
        Self {
            definition,
            answers: AnswerSet::new(),
            current_index: 0,
            tentative: None,
            remaining_secs,
            completed: false,
        }
    }

    pub fn definition(&self) -> &QuizDefinition {
        &self.definition
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.completed {
            return None;
        }
        self.definition.questions().get(self.current_index)
    }

    pub fn tentative_selection(&self) -> Option<usize> {
        self.tentative
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Records a tentative choice for the current question without advancing.
    pub fn select_option(&mut self, choice: usize) -> Result<(), SessionError> {
        let question = self.current_question().ok_or(SessionError::SessionClosed)?;
        if choice >= question.options.len() {
            return Err(SessionError::OptionOutOfRange {
                question_id: question.id,
                choice,
                available: question.options.len(),
            });
        }

        self.tentative = Some(choice);
        Ok(())
    }

    /// Stores the tentative choice and moves on, finishing after the last question.
    pub fn commit_and_advance(&mut self) -> Result<SessionStep, SessionError> {
        if self.completed {
            return Err(SessionError::SessionClosed);
        }
        let choice = self.tentative.ok_or(SessionError::NoAnswerSelected)?;
        self.commit(choice);

        if self.current_index + 1 < self.definition.questions().len() {
            self.current_index += 1;
            self.tentative = None;
            Ok(SessionStep::Advanced {
                index: self.current_index,
            })
        } else {
            Ok(SessionStep::Finished(self.finish(false)))
        }
    }

    /// Steps back one question and redisplays its stored answer. Returns
    /// `false` when already on the first question or finished.
    pub fn go_back(&mut self) -> bool {
        if self.completed || self.current_index == 0 {
            return false;
        }

        self.current_index -= 1;
        let question_id = self.definition.questions()[self.current_index].id;
        self.tentative = self
            .answers
            .get(question_id)
            .map(|answer| answer.option_index);
        true
    }

    /// Advances the countdown by one second. On expiry the tentative choice,
    /// if any, is committed and the session is scored as it stands.
    pub fn tick(&mut self) -> TickOutcome {
        if self.completed {
            return TickOutcome::Idle;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return TickOutcome::Running {
                remaining_secs: self.remaining_secs,
            };
        }

        if let Some(choice) = self.tentative {
            self.commit(choice);
        }
        TickOutcome::TimedOut(self.finish(true))
    }

    fn commit(&mut self, choice: usize) {
        let question = &self.definition.questions()[self.current_index];
        let answer = Answer::for_option(question, choice);
        if let Some(previous) = self.answers.record(answer) {
            debug!(
                question_id = previous.question_id,
                previous = %previous.value,
                "answer overwritten"
            );
        }
    }

    fn finish(&mut self, timed_out: bool) -> QuizOutcome {
        self.completed = true;
        self.tentative = None;

        let report = Scorer::new(&self.definition).score(&self.answers);
        info!(
            quiz = %self.definition.kind(),
            answered = report.answered,
            total = report.total_questions,
            timed_out,
            top = report.top().map(|score| score.category.as_str()).unwrap_or("none"),
            "quiz session finished"
        );

        QuizOutcome {
            report,
            answers: self.answers.to_vec(),
            timed_out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessments::domain::QuizKind;

    fn session(kind: QuizKind) -> QuizSession {
        QuizSession::new(Arc::new(QuizDefinition::builtin(kind)))
    }

    #[test]
    fn advancing_without_selection_is_rejected() {
        let mut session = session(QuizKind::Aptitude);
        assert_eq!(
            session.commit_and_advance(),
            Err(SessionError::NoAnswerSelected)
        );
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn selection_overwrites_until_committed() {
        let mut session = session(QuizKind::Aptitude);
        session.select_option(1).expect("valid option");
        session.select_option(3).expect("valid option");

        assert_eq!(session.tentative_selection(), Some(3));
        assert_eq!(
            session.commit_and_advance(),
            Ok(SessionStep::Advanced { index: 1 })
        );
        assert_eq!(session.tentative_selection(), None);
        assert_eq!(session.answers().get(1).map(|a| a.option_index), Some(3));
    }

    #[test]
    fn out_of_range_choice_is_rejected() {
        let mut session = session(QuizKind::Stream);
        assert!(matches!(
            session.select_option(4),
            Err(SessionError::OptionOutOfRange { available: 4, .. })
        ));
        assert_eq!(session.tentative_selection(), None);
    }

    #[test]
    fn go_back_is_a_no_op_on_first_question() {
        let mut session = session(QuizKind::Riasec);
        assert!(!session.go_back());
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn go_back_restores_the_stored_answer() {
        let mut session = session(QuizKind::Riasec);
        session.select_option(2).expect("valid option");
        session.commit_and_advance().expect("advance");

        assert!(session.go_back());
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.tentative_selection(), Some(2));
    }

    #[test]
    fn tick_counts_down_then_forces_completion() {
        let definition = QuizDefinition::builtin(QuizKind::Stream).with_time_limit(3);
        let mut session = QuizSession::new(Arc::new(definition));
        session.select_option(0).expect("valid option");

        assert_eq!(session.tick(), TickOutcome::Running { remaining_secs: 2 });
        assert_eq!(session.tick(), TickOutcome::Running { remaining_secs: 1 });
        let outcome = match session.tick() {
            TickOutcome::TimedOut(outcome) => outcome,
            other => panic!("expected timeout, got {other:?}"),
        };

        assert!(outcome.timed_out);
        assert_eq!(outcome.answers.len(), 1);
        assert_eq!(outcome.report.answered, 1);
        assert_eq!(
            outcome.report.score_for("science").map(|s| s.raw_score),
            Some(3)
        );
        assert!(session.is_completed());
        assert_eq!(session.tick(), TickOutcome::Idle);
        assert_eq!(session.select_option(0), Err(SessionError::SessionClosed));
    }

    #[test]
    fn timeout_without_selection_scores_committed_answers_only() {
        let definition = QuizDefinition::builtin(QuizKind::Aptitude).with_time_limit(1);
        let mut session = QuizSession::new(Arc::new(definition));

        match session.tick() {
            TickOutcome::TimedOut(outcome) => {
                assert!(outcome.answers.is_empty());
                assert!(outcome.report.scores.iter().all(|s| s.raw_score == 0));
                assert_eq!(
                    outcome.report.top().map(|s| s.category.as_str()),
                    Some("technology")
                );
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
