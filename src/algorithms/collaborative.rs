use super::similarity::CosineSimilarity;
use super::UserSimilarity;
use crate::config::RecommendationConfig;
use crate::error::Result;
use crate::models::*;
use crate::services::rating_store::RatingStore;
use crate::utils::top_n;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which other users feed a target user's predictions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributorPolicy {
    /// Only users with a strictly positive similarity contribute.
    #[default]
    PositiveOnly,
    /// Every other user contributes, whatever the sign of its similarity.
    All,
}

impl ContributorPolicy {
    pub fn admits(self, similarity: f64) -> bool {
        match self {
            ContributorPolicy::PositiveOnly => similarity > 0.0,
            ContributorPolicy::All => true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct WeightedSum {
    weighted: f64,
    weight: f64,
}

/// Per-movie running sums of one recommendation pass.
#[derive(Debug, Clone, Default)]
pub struct ScoreAccumulator {
    sums: BTreeMap<MovieId, WeightedSum>,
}

impl ScoreAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, movie_id: MovieId, similarity: f64, score: f64) {
        let entry = self.sums.entry(movie_id).or_default();
        entry.weighted += similarity * score;
        entry.weight += similarity;
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    /// Weighted averages for every movie whose total weight is positive,
    /// ascending by movie ID.
    pub fn into_predictions(self) -> Vec<Recommendation> {
        self.sums
            .into_iter()
            .filter(|(_, sum)| sum.weight > 0.0)
            .map(|(movie_id, sum)| Recommendation::new(movie_id, sum.weighted / sum.weight))
            .collect()
    }
}

/// User-based collaborative filtering over a [`RatingStore`].
#[derive(Debug, Clone, Default)]
pub struct CollaborativeRecommender<S = CosineSimilarity> {
    similarity: S,
    policy: ContributorPolicy,
    exclude_rated: bool,
}

impl CollaborativeRecommender<CosineSimilarity> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RecommendationConfig) -> Self {
        Self::new()
            .with_policy(config.contributor_policy)
            .excluding_rated(config.exclude_rated)
    }
}

impl<S: UserSimilarity> CollaborativeRecommender<S> {
    pub fn with_similarity(similarity: S) -> Self {
        Self {
            similarity,
            policy: ContributorPolicy::default(),
            exclude_rated: false,
        }
    }

    pub fn with_policy(mut self, policy: ContributorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Skip movies the target user has already rated.
    pub fn excluding_rated(mut self, exclude: bool) -> Self {
        self.exclude_rated = exclude;
        self
    }

    pub fn policy(&self) -> ContributorPolicy {
        self.policy
    }

    pub fn similarity(&self, a: &User, b: &User) -> f64 {
        self.similarity.similarity(a, b)
    }

    /// Similarity of every admitted contributor to `target`, ascending by
    /// user ID. The target itself is never compared.
    pub fn contributors<'a>(
        &self,
        store: &'a RatingStore,
        target: UserId,
    ) -> Result<Vec<(&'a User, f64)>> {
        let target_user = store.user(target)?;

        Ok(store
            .users()
            .filter(|other| other.id != target)
            .map(|other| (other, self.similarity.similarity(target_user, other)))
            .filter(|&(_, similarity)| self.policy.admits(similarity))
            .collect())
    }

    /// Ranks movies for `target` by the similarity-weighted average of the
    /// contributors' ratings, best first, at most `max_results` entries.
    pub fn recommend(
        &self,
        store: &RatingStore,
        target: UserId,
        max_results: usize,
    ) -> Result<Vec<Recommendation>> {
        let target_user = store.user(target)?;
        let contributors = self.contributors(store, target)?;

        let mut accumulator = ScoreAccumulator::new();
        for (other, similarity) in contributors {
            for rating in &other.ratings {
                if self.exclude_rated && target_user.has_rated(rating.movie_id) {
                    continue;
                }
                accumulator.add(rating.movie_id, similarity, rating.score);
            }
        }

        Ok(top_n(accumulator.into_predictions(), max_results))
    }
}
