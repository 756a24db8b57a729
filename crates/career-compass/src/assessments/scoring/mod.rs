mod rules;

pub use rules::{LookupEntry, ScoringRule};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::definitions::QuizDefinition;
use super::domain::{AnswerSet, CategoryId, CategoryScore, QuizKind};

/// Stateless scorer applying a quiz definition's rule table to an answer set.
pub struct Scorer<'a> {
    definition: &'a QuizDefinition,
}

impl<'a> Scorer<'a> {
    pub fn new(definition: &'a QuizDefinition) -> Self {
        Self { definition }
    }

    /// Aggregates, normalizes and ranks every catalog category. Answers to
    /// unknown questions are skipped; missing questions count as zero.
    pub fn score(&self, answers: &AnswerSet) -> ScoreReport {
        let definition = self.definition;
        let rule = definition.rule();
        let mut totals: Vec<(CategoryId, u32)> = definition
            .catalog()
            .iter()
            .map(|entry| (entry.category.clone(), 0))
            .collect();

        let mut answered = 0;
        for answer in answers.iter() {
            let Some(question) = definition.question(answer.question_id) else {
                debug!(
                    quiz = %definition.kind(),
                    question_id = answer.question_id,
                    "skipping answer for unknown question"
                );
                continue;
            };
            answered += 1;

            for (category, weight) in rule.contributions(question, answer.option_index) {
                if let Some((_, total)) = totals.iter_mut().find(|(id, _)| id == category) {
                    *total += weight;
                }
            }
        }

        let ceiling = definition.ceiling();
        let mut scores: Vec<CategoryScore> = totals
            .into_iter()
            .map(|(category, raw_score)| CategoryScore {
                category,
                raw_score,
                percentage: percentage(raw_score, ceiling),
                rank: 0,
            })
            .collect();

        // Stable: equal scores keep catalog order.
        scores.sort_by(|a, b| b.raw_score.cmp(&a.raw_score));
        for (index, score) in scores.iter_mut().enumerate() {
            score.rank = index + 1;
        }

        ScoreReport {
            quiz: definition.kind(),
            scores,
            ceiling,
            answered,
            total_questions: definition.questions().len(),
        }
    }
}

fn percentage(raw_score: u32, ceiling: u32) -> u8 {
    if ceiling == 0 {
        return 0;
    }
    let pct = (f64::from(raw_score) / f64::from(ceiling) * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Ranked category breakdown produced by one scoring pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub quiz: QuizKind,
    pub scores: Vec<CategoryScore>,
    pub ceiling: u32,
    pub answered: usize,
    pub total_questions: usize,
}

impl ScoreReport {
    /// Highest ranked category. Only empty for a catalog without entries.
    pub fn top(&self) -> Option<&CategoryScore> {
        self.scores.first()
    }

    pub fn score_for(&self, category: &str) -> Option<&CategoryScore> {
        self.scores
            .iter()
            .find(|score| score.category.as_str() == category)
    }

    pub fn is_partial(&self) -> bool {
        self.answered < self.total_questions
    }
}
