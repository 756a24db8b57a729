//! Question banks and outcome catalogs for each quiz.
//!
//! Definitions are plain data handed to the scorer and recommender. The
//! built-in banks can be replaced at startup with JSON files of the same
//! shape; every definition, built-in or loaded, passes the same validation.

mod aptitude;
mod riasec;
mod stream;

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{CategoryId, CategoryWeight, OptionTag, OutcomeEntry, Question, QuizKind};
use super::scoring::ScoringRule;
use crate::config::AssessmentConfig;

/// Bounds on any single category weight an option or lookup row grants.
pub const MIN_WEIGHT: u8 = 1;
pub const MAX_WEIGHT: u8 = 3;

/// How many categories to recommend and how many careers to list for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationPolicy {
    pub top_n: usize,
    #[serde(default)]
    pub career_limit: Option<usize>,
}

/// Validated question bank, rule table and outcome catalog for one quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuizDefinitionSpec")]
pub struct QuizDefinition {
    kind: QuizKind,
    version: String,
    title: String,
    time_limit_secs: u32,
    rule: ScoringRule,
    questions: Vec<Question>,
    catalog: Vec<OutcomeEntry>,
    recommendation: RecommendationPolicy,
    #[serde(skip)]
    ceiling: u32,
}

/// Unvalidated form accepted from JSON files.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizDefinitionSpec {
    pub kind: QuizKind,
    pub version: String,
    pub title: String,
    pub time_limit_secs: u32,
    pub rule: ScoringRule,
    pub questions: Vec<Question>,
    pub catalog: Vec<OutcomeEntry>,
    pub recommendation: RecommendationPolicy,
}

impl TryFrom<QuizDefinitionSpec> for QuizDefinition {
    type Error = DefinitionError;

    fn try_from(spec: QuizDefinitionSpec) -> Result<Self, Self::Error> {
        QuizDefinition::new(spec)
    }
}

impl QuizDefinition {
    pub fn new(spec: QuizDefinitionSpec) -> Result<Self, DefinitionError> {
        validate(&spec)?;
        let ceiling = spec.rule.ceiling(&spec.questions);

        Ok(Self {
            kind: spec.kind,
            version: spec.version,
            title: spec.title,
            time_limit_secs: spec.time_limit_secs,
            rule: spec.rule,
            questions: spec.questions,
            catalog: spec.catalog,
            recommendation: spec.recommendation,
            ceiling,
        })
    }

    /// Built-in definition for `kind`.
    pub fn builtin(kind: QuizKind) -> Self {
        let spec = match kind {
            QuizKind::Aptitude => aptitude::definition(),
            QuizKind::Riasec => riasec::definition(),
            QuizKind::Stream => stream::definition(),
        };
        let ceiling = spec.rule.ceiling(&spec.questions);

        Self {
            kind: spec.kind,
            version: spec.version,
            title: spec.title,
            time_limit_secs: spec.time_limit_secs,
            rule: spec.rule,
            questions: spec.questions,
            catalog: spec.catalog,
            recommendation: spec.recommendation,
            ceiling,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, DefinitionError> {
        let file = File::open(path).map_err(|source| DefinitionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| DefinitionError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn kind(&self) -> QuizKind {
        self.kind
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    pub fn rule(&self) -> &ScoringRule {
        &self.rule
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn catalog(&self) -> &[OutcomeEntry] {
        &self.catalog
    }

    pub fn recommendation(&self) -> RecommendationPolicy {
        self.recommendation
    }

    /// Maximum raw score any single category can reach.
    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    pub fn with_time_limit(mut self, secs: u32) -> Self {
        self.time_limit_secs = secs;
        self
    }

    /// Copy of this definition in its unvalidated, serializable form.
    pub fn to_spec(&self) -> QuizDefinitionSpec {
        QuizDefinitionSpec {
            kind: self.kind,
            version: self.version.clone(),
            title: self.title.clone(),
            time_limit_secs: self.time_limit_secs,
            rule: self.rule.clone(),
            questions: self.questions.clone(),
            catalog: self.catalog.clone(),
            recommendation: self.recommendation,
        }
    }
}

fn validate(spec: &QuizDefinitionSpec) -> Result<(), DefinitionError> {
    if spec.questions.is_empty() {
        return Err(DefinitionError::EmptyBank(spec.kind));
    }
    if spec.catalog.is_empty() {
        return Err(DefinitionError::EmptyCatalog(spec.kind));
    }
    if spec.recommendation.top_n == 0 {
        return Err(DefinitionError::ZeroTopN(spec.kind));
    }
    if spec.time_limit_secs == 0 {
        return Err(DefinitionError::ZeroTimeLimit(spec.kind));
    }

    let mut categories = BTreeSet::new();
    for entry in &spec.catalog {
        if !categories.insert(&entry.category) {
            return Err(DefinitionError::DuplicateCategory(entry.category.clone()));
        }
    }

    let known = |category: &CategoryId, question_id: Option<u32>| {
        if categories.contains(category) {
            Ok(())
        } else {
            Err(DefinitionError::UnknownCategory {
                question_id,
                category: category.clone(),
            })
        }
    };

    let in_range = |weight: &CategoryWeight, question_id: Option<u32>| {
        if (MIN_WEIGHT..=MAX_WEIGHT).contains(&weight.weight) {
            Ok(())
        } else {
            Err(DefinitionError::WeightOutOfRange {
                question_id,
                category: weight.category.clone(),
                weight: weight.weight,
            })
        }
    };

    for weight in spec.rule.table_weights() {
        known(&weight.category, None)?;
        in_range(weight, None)?;
    }

    let mut ids = BTreeSet::new();
    for question in &spec.questions {
        if !ids.insert(question.id) {
            return Err(DefinitionError::DuplicateQuestion(question.id));
        }
        if question.options.is_empty() {
            return Err(DefinitionError::NoOptions(question.id));
        }

        for (option_index, option) in question.options.iter().enumerate() {
            if !spec.rule.accepts(&option.tag) {
                return Err(DefinitionError::OptionShape {
                    question_id: question.id,
                    option_index,
                    expected: spec.rule.option_shape(),
                    found: option.tag.shape(),
                });
            }

            match &option.tag {
                OptionTag::Positional => {}
                OptionTag::Type(code) => known(code, Some(question.id))?,
                OptionTag::Weighted(weights) => {
                    let mut seen = BTreeSet::new();
                    for weight in weights {
                        known(&weight.category, Some(question.id))?;
                        in_range(weight, Some(question.id))?;
                        if !seen.insert(&weight.category) {
                            return Err(DefinitionError::RepeatedWeight {
                                question_id: question.id,
                                category: weight.category.clone(),
                            });
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

/// Reasons a definition is rejected.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error("{0} definition has no questions")]
    EmptyBank(QuizKind),
    #[error("{0} definition has an empty outcome catalog")]
    EmptyCatalog(QuizKind),
    #[error("{0} definition must recommend at least one category")]
    ZeroTopN(QuizKind),
    #[error("{0} definition must allow a positive time limit")]
    ZeroTimeLimit(QuizKind),
    #[error("category '{0}' appears twice in the outcome catalog")]
    DuplicateCategory(CategoryId),
    #[error("question {0} is defined twice")]
    DuplicateQuestion(u32),
    #[error("question {0} has no options")]
    NoOptions(u32),
    #[error("question {question_id} option {option_index} is {found}, quiz expects {expected} options")]
    OptionShape {
        question_id: u32,
        option_index: usize,
        expected: &'static str,
        found: &'static str,
    },
    #[error("category '{category}' is not in the outcome catalog (question {question_id:?})")]
    UnknownCategory {
        question_id: Option<u32>,
        category: CategoryId,
    },
    #[error("question {question_id} lists category '{category}' more than once on one option")]
    RepeatedWeight {
        question_id: u32,
        category: CategoryId,
    },
    #[error("category '{category}' weight {weight} is outside {}..={} (question {question_id:?})", MIN_WEIGHT, MAX_WEIGHT)]
    WeightOutOfRange {
        question_id: Option<u32>,
        category: CategoryId,
        weight: u8,
    },
    #[error("{} declares a {found} quiz, expected {expected}", .path.display())]
    KindMismatch {
        path: PathBuf,
        expected: QuizKind,
        found: QuizKind,
    },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid quiz definition in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The active definition for every quiz kind.
#[derive(Debug, Clone)]
pub struct QuizLibrary {
    definitions: BTreeMap<QuizKind, Arc<QuizDefinition>>,
}

impl QuizLibrary {
    pub fn builtin() -> Self {
        Self::from_definitions(std::iter::empty())
    }

    pub fn from_definitions(definitions: impl IntoIterator<Item = QuizDefinition>) -> Self {
        let mut library = Self {
            definitions: QuizKind::ordered()
                .into_iter()
                .map(|kind| (kind, Arc::new(QuizDefinition::builtin(kind))))
                .collect(),
        };
        for definition in definitions {
            library
                .definitions
                .insert(definition.kind(), Arc::new(definition));
        }
        library
    }

    /// Built-in definitions, replaced by `<dir>/<quiz>.json` where present,
    /// with the configured time limit override applied.
    pub fn load(config: &AssessmentConfig) -> Result<Self, DefinitionError> {
        let mut definitions = Vec::new();

        if let Some(dir) = config.definitions_dir.as_ref().filter(|dir| !dir.is_dir()) {
            warn!(path = %dir.display(), "definitions directory not found, using built-in quizzes");
        }

        for kind in QuizKind::ordered() {
            let override_path = config
                .definitions_dir
                .as_ref()
                .map(|dir| dir.join(format!("{}.json", kind.slug())))
                .filter(|path| path.is_file());

            let mut definition = match override_path {
                Some(path) => {
                    let definition = QuizDefinition::from_path(&path)?;
                    if definition.kind() != kind {
                        return Err(DefinitionError::KindMismatch {
                            path,
                            expected: kind,
                            found: definition.kind(),
                        });
                    }
                    info!(quiz = %kind, version = definition.version(), path = %path.display(), "loaded quiz definition override");
                    definition
                }
                None => QuizDefinition::builtin(kind),
            };

            if let Some(secs) = config.time_limit_override {
                definition = definition.with_time_limit(secs);
            }
            definitions.push(definition);
        }

        Ok(Self::from_definitions(definitions))
    }

    pub fn get(&self, kind: QuizKind) -> Arc<QuizDefinition> {
        // Every kind is seeded with its built-in definition on construction.
        self.definitions
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| Arc::new(QuizDefinition::builtin(kind)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<QuizDefinition>> {
        self.definitions.values()
    }
}

impl Default for QuizLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}
