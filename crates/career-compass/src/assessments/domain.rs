use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a scoring category (e.g. `technology`, `R`, `science`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

impl CategoryId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The three quiz variants offered to students.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizKind {
    Aptitude,
    Riasec,
    Stream,
}

impl QuizKind {
    pub const fn ordered() -> [Self; 3] {
        [Self::Aptitude, Self::Riasec, Self::Stream]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Aptitude => "Aptitude Test",
            Self::Riasec => "RIASEC Interest Profiler",
            Self::Stream => "Stream Selector",
        }
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::Aptitude => "aptitude",
            Self::Riasec => "riasec",
            Self::Stream => "stream",
        }
    }
}

impl fmt::Display for QuizKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown quiz '{0}' (expected aptitude, riasec or stream)")]
pub struct UnknownQuiz(pub String);

impl FromStr for QuizKind {
    type Err = UnknownQuiz;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "aptitude" | "generic" => Ok(Self::Aptitude),
            "riasec" | "interest" => Ok(Self::Riasec),
            "stream" | "stream-quiz" | "stream_quiz" => Ok(Self::Stream),
            _ => Err(UnknownQuiz(value.to_string())),
        }
    }
}

/// Weight granted to a single category by an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryWeight {
    pub category: CategoryId,
    pub weight: u8,
}

impl CategoryWeight {
    pub fn new(category: &str, weight: u8) -> Self {
        Self {
            category: CategoryId::new(category),
            weight,
        }
    }
}

/// How an option declares its contribution. Which shape is valid depends on
/// the quiz's scoring rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum OptionTag {
    /// Weight comes from the quiz lookup table keyed by question category and index.
    #[default]
    Positional,
    /// Single type code worth one point.
    Type(CategoryId),
    /// Explicit weights for one or more categories.
    Weighted(Vec<CategoryWeight>),
}

impl OptionTag {
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Positional => "positional",
            Self::Type(_) => "type",
            Self::Weighted(_) => "weighted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    #[serde(default)]
    pub tag: OptionTag,
}

impl AnswerOption {
    pub fn positional(label: &str) -> Self {
        Self {
            label: label.to_string(),
            tag: OptionTag::Positional,
        }
    }

    pub fn typed(label: &str, code: &str) -> Self {
        Self {
            label: label.to_string(),
            tag: OptionTag::Type(CategoryId::new(code)),
        }
    }

    pub fn weighted(label: &str, weights: &[(&str, u8)]) -> Self {
        Self {
            label: label.to_string(),
            tag: OptionTag::Weighted(
                weights
                    .iter()
                    .map(|(category, weight)| CategoryWeight::new(category, *weight))
                    .collect(),
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub category: String,
    pub options: Vec<AnswerOption>,
}

/// A committed choice for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: u32,
    pub option_index: usize,
    /// Identifying value of the chosen option: its type code when it has one,
    /// otherwise its index.
    pub value: String,
    pub category: String,
}

impl Answer {
    /// Builds the answer for `option_index`; the caller guarantees the index is in range.
    pub fn for_option(question: &Question, option_index: usize) -> Self {
        let value = match question.options.get(option_index).map(|option| &option.tag) {
            Some(OptionTag::Type(code)) => code.to_string(),
            _ => option_index.to_string(),
        };

        Self {
            question_id: question.id,
            option_index,
            value,
            category: question.category.clone(),
        }
    }
}

/// One answer per question, keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    answers: BTreeMap<u32, Answer>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `answer`, returning the one it replaced.
    pub fn record(&mut self, answer: Answer) -> Option<Answer> {
        self.answers.insert(answer.question_id, answer)
    }

    pub fn get(&self, question_id: u32) -> Option<&Answer> {
        self.answers.get(&question_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Answer> {
        self.answers.values()
    }

    pub fn to_vec(&self) -> Vec<Answer> {
        self.answers.values().cloned().collect()
    }
}

impl FromIterator<Answer> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = Answer>>(iter: I) -> Self {
        let mut set = AnswerSet::new();
        for answer in iter {
            set.record(answer);
        }
        set
    }
}

/// Ranked, normalized result for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: CategoryId,
    pub raw_score: u32,
    pub percentage: u8,
    pub rank: usize,
}

/// Display metadata and suggestions attached to a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeEntry {
    pub category: CategoryId,
    pub display_name: String,
    pub description: String,
    pub accent: String,
    pub careers: Vec<String>,
    pub subjects: Vec<String>,
}
