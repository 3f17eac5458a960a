use crate::models::Recommendation;
use std::cmp::Ordering;

pub mod validation;

pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Descending score, then ascending movie ID.
pub fn compare_recommendations(a: &Recommendation, b: &Recommendation) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.movie_id.cmp(&b.movie_id))
}

pub fn rank_recommendations(recommendations: &mut [Recommendation]) {
    recommendations.sort_by(compare_recommendations);
}

pub fn top_n(mut recommendations: Vec<Recommendation>, n: usize) -> Vec<Recommendation> {
    rank_recommendations(&mut recommendations);
    recommendations.truncate(n);
    recommendations
}

/// Stable ascending sort of `(distance, payload)` pairs. Equal distances keep
/// their input order.
pub fn sort_by_distance<T>(pairs: &mut [(f64, T)]) {
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
}
