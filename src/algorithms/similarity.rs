use super::UserSimilarity;
use crate::models::{MovieId, User};
use nalgebra::DVector;
use std::collections::{BTreeMap, HashMap};

/// A movie rated by two users, with each user's score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharedRating {
    pub movie_id: MovieId,
    pub a: f64,
    pub b: f64,
}

/// Ratings two users gave to the same movies, ascending by movie ID.
pub fn shared_ratings(a: &User, b: &User) -> Vec<SharedRating> {
    let rated_by_b: HashMap<MovieId, f64> = b
        .ratings
        .iter()
        .map(|r| (r.movie_id, r.score))
        .collect();

    let mut shared = BTreeMap::new();
    for rating in &a.ratings {
        if let Some(&score_b) = rated_by_b.get(&rating.movie_id) {
            shared.insert(rating.movie_id, (rating.score, score_b));
        }
    }

    shared
        .into_iter()
        .map(|(movie_id, (a, b))| SharedRating { movie_id, a, b })
        .collect()
}

/// Cosine similarity restricted to the movies both users rated.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineSimilarity;

impl CosineSimilarity {
    pub fn new() -> Self {
        Self
    }
}

impl UserSimilarity for CosineSimilarity {
    fn similarity(&self, a: &User, b: &User) -> f64 {
        let shared = shared_ratings(a, b);
        if shared.is_empty() {
            return 0.0;
        }

        let (scores_a, scores_b): (Vec<f64>, Vec<f64>) =
            shared.iter().map(|s| (s.a, s.b)).unzip();
        let (Some(a), Some(b)) = (unit_scaled(scores_a), unit_scaled(scores_b)) else {
            return 0.0;
        };

        let cosine = a.dot(&b) / (a.norm() * b.norm());
        if cosine.is_finite() {
            cosine.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Divides by the largest magnitude so squaring in `norm` cannot overflow.
/// `None` for an all-zero vector.
fn unit_scaled(scores: Vec<f64>) -> Option<DVector<f64>> {
    let mut v = DVector::from_vec(scores);
    let max = v.amax();
    if max == 0.0 {
        return None;
    }
    v /= max;
    Some(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u64, ratings: &[(u64, f64)]) -> User {
        User::new(id, format!("user {id}")).with_ratings(ratings.iter().copied())
    }

    #[test]
    fn test_shared_ratings_aligned_by_movie() {
        let a = user(1, &[(3, 1.0), (1, 2.0), (5, 9.0)]);
        let b = user(2, &[(1, 4.0), (3, 6.0), (4, 7.0)]);

        let shared = shared_ratings(&a, &b);
        assert_eq!(
            shared,
            vec![
                SharedRating { movie_id: 1, a: 2.0, b: 4.0 },
                SharedRating { movie_id: 3, a: 1.0, b: 6.0 },
            ]
        );
    }

    #[test]
    fn test_cosine_similarity() {
        let cosine = CosineSimilarity::new();

        let a = user(1, &[(1, 3.0), (2, 4.0)]);
        let b = user(2, &[(1, 6.0), (2, 8.0), (9, 1.0)]);
        assert!((cosine.similarity(&a, &b) - 1.0).abs() < 1e-12);

        let c = user(3, &[(1, 1.0), (2, 0.0)]);
        let d = user(4, &[(1, 0.0), (2, 1.0)]);
        assert_eq!(cosine.similarity(&c, &d), 0.0);

        let e = user(5, &[(1, 2.0)]);
        let f = user(6, &[(1, -3.0)]);
        assert!((cosine.similarity(&e, &f) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_only_shared_items_count() {
        let cosine = CosineSimilarity::new();
        let a = user(1, &[(1, 1.0), (2, 1.0)]);
        let b = user(2, &[(1, 1.0), (3, 100.0)]);
        assert!((cosine.similarity(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_shared_items_or_zero_norm() {
        let cosine = CosineSimilarity::new();
        let a = user(1, &[(1, 5.0)]);
        let b = user(2, &[(2, 5.0)]);
        assert_eq!(cosine.similarity(&a, &b), 0.0);

        let zeros = user(3, &[(1, 0.0)]);
        assert_eq!(cosine.similarity(&a, &zeros), 0.0);
        assert_eq!(cosine.similarity(&zeros, &a), 0.0);
    }

    #[test]
    fn test_large_scores_stay_in_range() {
        let cosine = CosineSimilarity::new();
        let a = user(1, &[(1, 1e200), (2, 1e200)]);
        let b = user(2, &[(1, 1e200), (2, 1e200)]);
        assert!((cosine.similarity(&a, &b) - 1.0).abs() < 1e-12);

        let c = user(3, &[(1, f64::MAX), (2, -f64::MAX)]);
        let sim = cosine.similarity(&a, &c);
        assert!(sim.abs() < 1e-12);
        assert!((cosine.similarity(&c, &c) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_symmetry() {
        let cosine = CosineSimilarity::new();
        let a = user(1, &[(1, 9.0), (2, 3.0), (3, 6.0), (4, 1.0)]);
        let b = user(2, &[(1, 5.0), (2, 2.0), (3, 9.0), (4, 7.0)]);
        assert_eq!(cosine.similarity(&a, &b), cosine.similarity(&b, &a));
    }
}
