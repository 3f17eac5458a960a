pub mod collaborative;
pub mod distance;
pub mod neighbors;
pub mod similarity;

pub use collaborative::{CollaborativeRecommender, ContributorPolicy, ScoreAccumulator};
pub use distance::EuclideanDistance;
pub use neighbors::{distinguishing_dimensions, NeighborRecommender};
pub use similarity::{shared_ratings, CosineSimilarity, SharedRating};

use crate::error::Result;
use crate::models::*;
use crate::services::rating_store::RatingStore;

/// Pairwise similarity between two users' rating histories.
pub trait UserSimilarity: Send + Sync {
    fn similarity(&self, a: &User, b: &User) -> f64;
}

/// Distance between two feature vectors of equal length.
pub trait VectorDistance: Send + Sync {
    fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64>;
}

/// Cosine similarity of two users over the movies both have rated.
pub fn similarity(a: &User, b: &User) -> f64 {
    CosineSimilarity.similarity(a, b)
}

/// Top `max_results` movies for `user_id`, using the default contributor
/// policy (positive similarities only) and scoring already-rated movies.
pub fn recommend(store: &RatingStore, user_id: UserId, max_results: usize) -> Result<Vec<Recommendation>> {
    CollaborativeRecommender::new().recommend(store, user_id, max_results)
}

/// Euclidean distance between two feature vectors.
pub fn distance(a: &[f64], b: &[f64]) -> Result<f64> {
    EuclideanDistance.distance(a, b)
}

pub fn nearest_neighbors<'a>(catalog: &'a [Movie], query: &Movie, k: usize) -> Result<Vec<Neighbor<'a>>> {
    NeighborRecommender::new().nearest_neighbors(catalog, query, k)
}

pub fn recommend_from<'a>(catalog: &'a [Movie], query: &Movie, k: usize) -> Result<Vec<&'a Movie>> {
    NeighborRecommender::new().recommend_from(catalog, query, k)
}
