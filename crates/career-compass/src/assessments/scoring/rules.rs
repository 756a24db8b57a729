use serde::{Deserialize, Serialize};

use super::super::domain::{CategoryId, CategoryWeight, OptionTag, Question};

/// Lookup row used by positional quizzes: answering option `option_index` of a
/// question tagged `question_category` grants `weights`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
    pub question_category: String,
    pub option_index: usize,
    pub weights: Vec<CategoryWeight>,
}

impl LookupEntry {
    pub fn new(question_category: &str, option_index: usize, weights: &[(&str, u8)]) -> Self {
        Self {
            question_category: question_category.to_string(),
            option_index,
            weights: weights
                .iter()
                .map(|(category, weight)| CategoryWeight::new(category, *weight))
                .collect(),
        }
    }
}

/// Policy turning a chosen option into category contributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ScoringRule {
    /// Options are positional; weights come from the table. Questions whose
    /// category has no rows contribute nothing.
    IndexLookup { table: Vec<LookupEntry> },
    /// Each option names one category worth a single point.
    SingleType,
    /// Each option lists its own weights, possibly for several categories.
    WeightedMultiCategory,
}

impl ScoringRule {
    /// Option shape accepted by this rule.
    pub const fn option_shape(&self) -> &'static str {
        match self {
            Self::IndexLookup { .. } => "positional",
            Self::SingleType => "type",
            Self::WeightedMultiCategory => "weighted",
        }
    }

    pub(crate) fn accepts(&self, tag: &OptionTag) -> bool {
        matches!(
            (self, tag),
            (Self::IndexLookup { .. }, OptionTag::Positional)
                | (Self::SingleType, OptionTag::Type(_))
                | (Self::WeightedMultiCategory, OptionTag::Weighted(_))
        )
    }

    /// Contributions granted by choosing `option_index` on `question`.
    pub fn contributions<'a>(
        &'a self,
        question: &'a Question,
        option_index: usize,
    ) -> Vec<(&'a CategoryId, u32)> {
        let Some(option) = question.options.get(option_index) else {
            return Vec::new();
        };

        match (self, &option.tag) {
            (Self::IndexLookup { table }, OptionTag::Positional) => table
                .iter()
                .find(|entry| {
                    entry.question_category == question.category
                        && entry.option_index == option_index
                })
                .map(|entry| {
                    entry
                        .weights
                        .iter()
                        .map(|weight| (&weight.category, u32::from(weight.weight)))
                        .collect()
                })
                .unwrap_or_default(),
            (Self::SingleType, OptionTag::Type(code)) => vec![(code, 1)],
            (Self::WeightedMultiCategory, OptionTag::Weighted(weights)) => weights
                .iter()
                .map(|weight| (&weight.category, u32::from(weight.weight)))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Largest single-category contribution any option of `question` can make.
    pub fn question_ceiling(&self, question: &Question) -> u32 {
        (0..question.options.len())
            .flat_map(|index| self.contributions(question, index))
            .map(|(_, weight)| weight)
            .max()
            .unwrap_or(0)
    }

    /// Normalization denominator: the per-question maxima summed over the bank.
    pub fn ceiling(&self, questions: &[Question]) -> u32 {
        questions
            .iter()
            .map(|question| self.question_ceiling(question))
            .sum()
    }

    /// Every weight this rule grants without looking at options.
    pub(crate) fn table_weights(&self) -> impl Iterator<Item = &CategoryWeight> {
        let table: &[LookupEntry] = match self {
            Self::IndexLookup { table } => table,
            _ => &[],
        };
        table.iter().flat_map(|entry| entry.weights.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessments::domain::AnswerOption;

    fn positional_question(category: &str) -> Question {
        Question {
            id: 1,
            text: "Which club would you join?".to_string(),
            category: category.to_string(),
            options: vec![
                AnswerOption::positional("Robotics"),
                AnswerOption::positional("Astronomy"),
            ],
        }
    }

    fn lookup_rule() -> ScoringRule {
        ScoringRule::IndexLookup {
            table: vec![
                LookupEntry::new("Interest", 0, &[("technology", 2)]),
                LookupEntry::new("Interest", 1, &[("science", 2)]),
            ],
        }
    }

    #[test]
    fn lookup_rule_reads_table_by_category_and_index() {
        let rule = lookup_rule();
        let question = positional_question("Interest");

        let contributions = rule.contributions(&question, 1);
        assert_eq!(contributions.len(), 1);
        assert_eq!(contributions[0].0.as_str(), "science");
        assert_eq!(contributions[0].1, 2);
        assert_eq!(rule.question_ceiling(&question), 2);
    }

    #[test]
    fn unmapped_question_categories_contribute_nothing() {
        let rule = lookup_rule();
        let question = positional_question("Work Style");

        assert!(rule.contributions(&question, 0).is_empty());
        assert_eq!(rule.question_ceiling(&question), 0);
    }

    #[test]
    fn weighted_rule_ceiling_uses_heaviest_single_weight() {
        let question = Question {
            id: 3,
            text: "Favourite project?".to_string(),
            category: "Projects".to_string(),
            options: vec![
                AnswerOption::weighted("Lab experiment", &[("science", 3)]),
                AnswerOption::weighted("School fair stall", &[("commerce", 2), ("arts", 1)]),
            ],
        };
        let rule = ScoringRule::WeightedMultiCategory;

        assert_eq!(rule.contributions(&question, 1).len(), 2);
        assert_eq!(rule.ceiling(&[question.clone(), question]), 6);
    }

    #[test]
    fn mismatched_option_shapes_are_ignored() {
        let question = positional_question("Interest");
        assert!(ScoringRule::SingleType.contributions(&question, 0).is_empty());
        assert!(!ScoringRule::SingleType.accepts(&OptionTag::Positional));
        assert!(lookup_rule().accepts(&OptionTag::Positional));
    }
}
