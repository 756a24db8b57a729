use serde::{Deserialize, Serialize};

use super::definitions::{QuizDefinition, RecommendationPolicy};
use super::domain::{CategoryId, CategoryScore, OutcomeEntry};
use super::scoring::ScoreReport;

/// First `n` entries of an already ranked score list.
pub fn top_n(results: &[CategoryScore], n: usize) -> &[CategoryScore] {
    &results[..n.min(results.len())]
}

/// Joins ranked scores against a quiz's outcome catalog.
pub struct Recommender<'a> {
    catalog: &'a [OutcomeEntry],
    policy: RecommendationPolicy,
}

impl<'a> Recommender<'a> {
    pub fn new(definition: &'a QuizDefinition) -> Self {
        Self {
            catalog: definition.catalog(),
            policy: definition.recommendation(),
        }
    }

    pub fn resolve(&self, category: &CategoryId) -> Result<&'a OutcomeEntry, RecommendationError> {
        self.catalog
            .iter()
            .find(|entry| &entry.category == category)
            .ok_or_else(|| RecommendationError::UnknownCategory(category.clone()))
    }

    /// Catalog metadata for each entry in `top`, careers capped by the quiz policy.
    pub fn build_recommendation_set(
        &self,
        top: &[CategoryScore],
    ) -> Result<Vec<Recommendation>, RecommendationError> {
        top.iter()
            .map(|score| {
                let entry = self.resolve(&score.category)?;
                let careers = match self.policy.career_limit {
                    Some(limit) => entry.careers.iter().take(limit).cloned().collect(),
                    None => entry.careers.clone(),
                };

                Ok(Recommendation {
                    category: entry.category.clone(),
                    display_name: entry.display_name.clone(),
                    description: entry.description.clone(),
                    accent: entry.accent.clone(),
                    rank: score.rank,
                    percentage: score.percentage,
                    careers,
                    subjects: entry.subjects.clone(),
                })
            })
            .collect()
    }

    /// Recommendations for the policy's top `n` categories of `report`.
    pub fn recommend(&self, report: &ScoreReport) -> Result<Vec<Recommendation>, RecommendationError> {
        self.build_recommendation_set(top_n(&report.scores, self.policy.top_n))
    }
}

/// Human-facing suggestion for one of the top categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: CategoryId,
    pub display_name: String,
    pub description: String,
    pub accent: String,
    pub rank: usize,
    pub percentage: u8,
    pub careers: Vec<String>,
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecommendationError {
    /// The scorer produced a category the catalog does not define.
    #[error("category '{0}' is not defined in the outcome catalog")]
    UnknownCategory(CategoryId),
}
