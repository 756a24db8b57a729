use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::definitions::QuizDefinition;
use super::super::domain::{
    Answer, AnswerSet, CategoryId, CategoryScore, OptionTag, Question, QuizKind,
};
use super::super::recommend::Recommendation;

/// Identifier wrapper for students.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier wrapper for persisted assessment results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultId(pub String);

/// Answer as sent by a client: the option index, its type code or its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Index(usize),
    Code(String),
}

impl std::fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerValue::Index(index) => write!(f, "{index}"),
            AnswerValue::Code(code) => f.write_str(code),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: u32,
    pub answer: AnswerValue,
    /// Informational; the stored category is always copied from the question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Answer sheet for one quiz. Only a timed-out sheet may leave questions out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    pub user_id: UserId,
    pub answers: Vec<SubmittedAnswer>,
    #[serde(default)]
    pub timed_out: bool,
}

/// Summary of a scored attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub quiz: QuizKind,
    pub definition_version: String,
    pub primary_category: CategoryId,
    pub primary_label: String,
    pub score: u8,
    pub breakdown: Vec<CategoryScore>,
    pub answered: usize,
    pub total_questions: usize,
    pub timed_out: bool,
    pub completed_at: DateTime<Utc>,
}

/// Response to a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub result_id: ResultId,
    pub test_result: TestResult,
    pub recommendations: Vec<Recommendation>,
    pub next_steps: Vec<String>,
}

/// Client-facing question bank. Scoring tags stay server side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionSheet {
    pub quiz: QuizKind,
    pub title: String,
    pub version: String,
    pub time_limit_secs: u32,
    pub questions: Vec<QuestionView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    pub id: u32,
    pub text: String,
    pub category: String,
    pub options: Vec<String>,
}

impl QuestionSheet {
    pub fn from_definition(definition: &QuizDefinition) -> Self {
        Self {
            quiz: definition.kind(),
            title: definition.title().to_string(),
            version: definition.version().to_string(),
            time_limit_secs: definition.time_limit_secs(),
            questions: definition.questions().iter().map(QuestionView::from).collect(),
        }
    }
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id,
            text: question.text.clone(),
            category: question.category.clone(),
            options: question
                .options
                .iter()
                .map(|option| option.label.clone())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("question {0} is not part of this quiz")]
    UnknownQuestion(u32),
    #[error("question {question_id} was answered more than once")]
    DuplicateAnswer { question_id: u32 },
    #[error("'{answer}' is not a valid answer for question {question_id}")]
    InvalidAnswer { question_id: u32, answer: String },
    #[error("{missing} question(s) left unanswered on a sheet that did not time out")]
    IncompleteSheet { missing: usize },
}

/// Resolves client answers against `definition` into an answer set.
pub(crate) fn collect_answers(
    definition: &QuizDefinition,
    submitted: &[SubmittedAnswer],
) -> Result<AnswerSet, SubmissionError> {
    let mut answers = AnswerSet::new();

    for entry in submitted {
        let question = definition
            .question(entry.question_id)
            .ok_or(SubmissionError::UnknownQuestion(entry.question_id))?;

        let option_index = match &entry.answer {
            AnswerValue::Index(index) => Some(*index),
            AnswerValue::Code(code) => code.trim().parse::<usize>().ok().or_else(|| {
                let code = code.trim();
                question
                    .options
                    .iter()
                    .position(|option| {
                        matches!(&option.tag, OptionTag::Type(type_code) if type_code.as_str().eq_ignore_ascii_case(code))
                    })
                    .or_else(|| {
                        question
                            .options
                            .iter()
                            .position(|option| option.label.eq_ignore_ascii_case(code))
                    })
            }),
        }
        .filter(|index| *index < question.options.len())
        .ok_or_else(|| SubmissionError::InvalidAnswer {
            question_id: entry.question_id,
            answer: entry.answer.to_string(),
        })?;

        if answers
            .record(Answer::for_option(question, option_index))
            .is_some()
        {
            return Err(SubmissionError::DuplicateAnswer {
                question_id: entry.question_id,
            });
        }
    }

    Ok(answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submitted(question_id: u32, answer: AnswerValue) -> SubmittedAnswer {
        SubmittedAnswer {
            question_id,
            answer,
            category: None,
        }
    }

    #[test]
    fn type_codes_and_indices_resolve_to_options() {
        let definition = QuizDefinition::builtin(QuizKind::Riasec);
        let answers = collect_answers(
            &definition,
            &[
                submitted(1, AnswerValue::Code("s".to_string())),
                submitted(2, AnswerValue::Index(5)),
                submitted(3, AnswerValue::Code("0".to_string())),
            ],
        )
        .expect("answers resolve");

        assert_eq!(answers.get(1).map(|a| a.value.as_str()), Some("S"));
        assert_eq!(answers.get(2).map(|a| a.value.as_str()), Some("C"));
        assert_eq!(answers.get(3).map(|a| a.value.as_str()), Some("R"));
    }

    #[test]
    fn labels_resolve_for_every_option_shape() {
        for kind in QuizKind::ordered() {
            let definition = QuizDefinition::builtin(kind);
            let question = &definition.questions()[0];
            let last = question.options.len() - 1;
            let label = question.options[last].label.to_uppercase();

            let answers = collect_answers(&definition, &[submitted(question.id, AnswerValue::Code(label))])
                .expect("label resolves");
            assert_eq!(answers.get(question.id).map(|a| a.option_index), Some(last));
        }
    }

    #[test]
    fn rejects_unknown_questions_and_bad_options() {
        let definition = QuizDefinition::builtin(QuizKind::Aptitude);

        assert_eq!(
            collect_answers(&definition, &[submitted(99, AnswerValue::Index(0))]),
            Err(SubmissionError::UnknownQuestion(99))
        );
        assert!(matches!(
            collect_answers(&definition, &[submitted(1, AnswerValue::Index(4))]),
            Err(SubmissionError::InvalidAnswer { question_id: 1, .. })
        ));
        assert!(matches!(
            collect_answers(&definition, &[submitted(1, AnswerValue::Code("Z".to_string()))]),
            Err(SubmissionError::InvalidAnswer { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_answers() {
        let definition = QuizDefinition::builtin(QuizKind::Stream);
        let result = collect_answers(
            &definition,
            &[
                submitted(4, AnswerValue::Index(0)),
                submitted(4, AnswerValue::Index(1)),
            ],
        );
        assert_eq!(
            result,
            Err(SubmissionError::DuplicateAnswer { question_id: 4 })
        );
    }

    #[test]
    fn answer_values_deserialize_from_numbers_or_strings() {
        let parsed: Vec<SubmittedAnswer> = serde_json::from_str(
            r#"[{"question_id": 1, "answer": 2, "category": "Interest"},
                {"question_id": 2, "answer": "R"}]"#,
        )
        .expect("valid payload");

        assert_eq!(parsed[0].answer, AnswerValue::Index(2));
        assert_eq!(parsed[1].answer, AnswerValue::Code("R".to_string()));
    }
}
