use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::super::domain::{CategoryId, QuizKind};
use super::domain::UserId;
use super::repository::AssessmentRecord;

/// Aggregate view over one quiz in a user's history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizTrend {
    pub quiz: QuizKind,
    pub quiz_label: &'static str,
    pub attempts: usize,
    pub average_score: f32,
    pub best_score: u8,
    pub most_frequent_category: CategoryId,
    pub latest_category: CategoryId,
    pub latest_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentAnalysis {
    pub user_id: UserId,
    pub total_assessments: usize,
    pub trends: Vec<QuizTrend>,
    /// Category with the highest average percentage across all attempts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strongest_category: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
}

pub(crate) fn analyze(user_id: &UserId, records: &[AssessmentRecord]) -> AssessmentAnalysis {
    let trends: Vec<QuizTrend> = QuizKind::ordered()
        .into_iter()
        .filter_map(|quiz| {
            let attempts: Vec<&AssessmentRecord> =
                records.iter().filter(|record| record.quiz == quiz).collect();
            quiz_trend(quiz, &attempts)
        })
        .collect();

    let mut category_totals: BTreeMap<&CategoryId, (u64, u64)> = BTreeMap::new();
    for score in records.iter().flat_map(|record| &record.breakdown) {
        let entry = category_totals.entry(&score.category).or_default();
        entry.0 += u64::from(score.percentage);
        entry.1 += 1;
    }
    let strongest_category = category_totals
        .into_iter()
        .rev()
        .filter(|(_, (_, count))| *count > 0)
        .max_by(|(_, (a_sum, a_count)), (_, (b_sum, b_count))| {
            (a_sum * b_count).cmp(&(b_sum * a_count))
        })
        .map(|(category, _)| category.clone());

    let mut observations = Vec::new();
    for trend in &trends {
        if trend.attempts > 1 && trend.most_frequent_category == trend.latest_category {
            observations.push(format!(
                "{}: '{}' has been the top result consistently",
                trend.quiz_label, trend.latest_category
            ));
        } else if trend.attempts > 1 {
            observations.push(format!(
                "{}: latest top result '{}' differs from the usual '{}'",
                trend.quiz_label, trend.latest_category, trend.most_frequent_category
            ));
        }
    }

    AssessmentAnalysis {
        user_id: user_id.clone(),
        total_assessments: records.len(),
        trends,
        strongest_category,
        observations,
    }
}

fn quiz_trend(quiz: QuizKind, attempts: &[&AssessmentRecord]) -> Option<QuizTrend> {
    let latest = attempts.iter().max_by_key(|record| record.completed_at)?;

    let total: u32 = attempts.iter().map(|record| u32::from(record.score)).sum();
    let average_score = total as f32 / attempts.len() as f32;
    let best_score = attempts.iter().map(|record| record.score).max().unwrap_or(0);

    // Ties go to the category reached first in chronological order.
    let mut chronological = attempts.to_vec();
    chronological.sort_by_key(|record| record.completed_at);
    let mut frequency: Vec<(&CategoryId, usize)> = Vec::new();
    for record in &chronological {
        match frequency
            .iter_mut()
            .find(|(category, _)| *category == &record.primary_category)
        {
            Some((_, count)) => *count += 1,
            None => frequency.push((&record.primary_category, 1)),
        }
    }
    let most_frequent_category = frequency
        .iter()
        .fold(None::<(&CategoryId, usize)>, |best, &(category, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((category, count)),
        })
        .map(|(category, _)| category.clone())
        .unwrap_or_else(|| latest.primary_category.clone());

    Some(QuizTrend {
        quiz,
        quiz_label: quiz.label(),
        attempts: attempts.len(),
        average_score,
        best_score,
        most_frequent_category,
        latest_category: latest.primary_category.clone(),
        latest_at: latest.completed_at,
    })
}
