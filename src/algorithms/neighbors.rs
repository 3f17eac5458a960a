use super::distance::EuclideanDistance;
use super::VectorDistance;
use crate::error::{RecError, Result};
use crate::models::*;
use crate::utils::sort_by_distance;
use crate::utils::validation::{validate_feature_values, validate_query};
use std::collections::HashSet;

/// Dimensions where the neighbor carries weight and the query carries none.
pub fn distinguishing_dimensions(neighbor: &[f64], query: &[f64]) -> Vec<usize> {
    neighbor
        .iter()
        .zip(query)
        .enumerate()
        .filter(|(_, (&n, &q))| n != 0.0 && q == 0.0)
        .map(|(i, _)| i)
        .collect()
}

/// Brute-force k-nearest-neighbor search over a movie catalog.
///
/// Every call scans the whole catalog; there is no index to keep in sync.
#[derive(Debug, Clone, Default)]
pub struct NeighborRecommender<D = EuclideanDistance> {
    distance: D,
}

impl NeighborRecommender<EuclideanDistance> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D: VectorDistance> NeighborRecommender<D> {
    pub fn with_distance(distance: D) -> Self {
        Self { distance }
    }

    /// The `k` catalog movies closest to `query`, nearest first.
    ///
    /// Movies at the same distance form one bucket and are never split: once
    /// the bucket holding the k-th movie is reached all of it is returned,
    /// so the result can be longer than `k`. Within a bucket, catalog order
    /// is kept. A movie whose ID equals `exclude` is skipped.
    ///
    /// Non-finite values in the query or in any scored catalog movie are
    /// rejected rather than ranked.
    pub fn nearest_to<'a>(
        &self,
        catalog: &'a [Movie],
        query: &[f64],
        exclude: Option<MovieId>,
        k: usize,
    ) -> Result<Vec<Neighbor<'a>>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        validate_query(query)?;

        let mut scored = Vec::with_capacity(catalog.len());
        for movie in catalog {
            if exclude == Some(movie.id) {
                continue;
            }
            let features = movie
                .features()
                .ok_or(RecError::MissingFeatures { movie_id: movie.id })?;
            validate_feature_values(movie.id, features)?;
            scored.push((self.distance.distance(query, features)?, movie));
        }

        sort_by_distance(&mut scored);

        let cutoff = match scored.get(k - 1) {
            Some(&(distance, _)) => distance,
            None => f64::INFINITY,
        };

        Ok(scored
            .into_iter()
            .take_while(|&(distance, _)| distance <= cutoff)
            .map(|(distance, movie)| Neighbor { movie, distance })
            .collect())
    }

    /// Nearest neighbors of a movie, leaving the movie itself out.
    pub fn nearest_neighbors<'a>(
        &self,
        catalog: &'a [Movie],
        query: &Movie,
        k: usize,
    ) -> Result<Vec<Neighbor<'a>>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let features = query
            .features()
            .ok_or(RecError::MissingFeatures { movie_id: query.id })?;
        validate_feature_values(query.id, features)?;
        self.nearest_to(catalog, features, Some(query.id), k)
    }

    /// Neighbors of `query` that bring at least one genre the query lacks,
    /// each movie at most once, in neighbor order.
    pub fn recommend_from_vector<'a>(
        &self,
        catalog: &'a [Movie],
        query: &[f64],
        exclude: Option<MovieId>,
        k: usize,
    ) -> Result<Vec<&'a Movie>> {
        let neighbors = self.nearest_to(catalog, query, exclude, k)?;

        let mut seen = HashSet::new();
        Ok(neighbors
            .into_iter()
            .map(|n| n.movie)
            .filter(|movie| {
                movie
                    .features()
                    .is_some_and(|f| !distinguishing_dimensions(f, query).is_empty())
            })
            .filter(|movie| seen.insert(movie.id))
            .collect())
    }

    pub fn recommend_from<'a>(
        &self,
        catalog: &'a [Movie],
        query: &Movie,
        k: usize,
    ) -> Result<Vec<&'a Movie>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        let features = query
            .features()
            .ok_or(RecError::MissingFeatures { movie_id: query.id })?;
        validate_feature_values(query.id, features)?;
        self.recommend_from_vector(catalog, features, Some(query.id), k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dataset::SAMPLE_QUERY_ID;

    fn catalog() -> Vec<Movie> {
        crate::models::Dataset::sample().movies
    }

    fn query() -> Movie {
        Movie::new(SAMPLE_QUERY_ID, "The Dark Knight Rises")
            .with_features(vec![0.0, 0.0, 9.0, 0.0, 9.0, 0.0, 8.4, 9.0, 9.0])
    }

    fn ids(movies: &[&Movie]) -> Vec<MovieId> {
        movies.iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_nearest_neighbors_keeps_tie_bucket() {
        let catalog = catalog();
        let neighbors = NeighborRecommender::new()
            .nearest_neighbors(&catalog, &query(), 3)
            .unwrap();

        let found: Vec<_> = neighbors.iter().map(|n| n.movie.id).collect();
        // 12 Angry Men and Pulp Fiction tie, then Schindler's List and
        // Return of the King tie at the bucket holding the third movie.
        assert_eq!(found, vec![5, 8, 6, 7]);
        assert!(neighbors.windows(2).all(|w| w[0].distance <= w[1].distance));
        assert_eq!(neighbors[0].distance, neighbors[1].distance);
    }

    #[test]
    fn test_exact_k_without_ties() {
        let catalog: Vec<_> = (1..=5)
            .map(|i| Movie::new(i, format!("m{i}")).with_features(vec![i as f64, 0.0]))
            .collect();
        let neighbors = NeighborRecommender::new()
            .nearest_to(&catalog, &[0.0, 0.0], None, 2)
            .unwrap();
        let found: Vec<_> = neighbors.iter().map(|n| n.movie.id).collect();
        assert_eq!(found, vec![1, 2]);
        assert_eq!(neighbors[1].distance, 2.0);
    }

    #[test]
    fn test_query_excluded_by_id() {
        let catalog = catalog();
        let dark_knight_rises = catalog.iter().find(|m| m.id == SAMPLE_QUERY_ID).unwrap().clone();
        let neighbors = NeighborRecommender::new()
            .nearest_neighbors(&catalog, &dark_knight_rises, 10)
            .unwrap();
        assert_eq!(neighbors.len(), 8);
        assert!(neighbors.iter().all(|n| n.movie.id != SAMPLE_QUERY_ID));
    }

    #[test]
    fn test_degenerate_inputs() {
        let recommender = NeighborRecommender::new();
        assert!(recommender.nearest_neighbors(&catalog(), &query(), 0).unwrap().is_empty());
        assert!(recommender.nearest_neighbors(&[], &query(), 3).unwrap().is_empty());
        assert!(recommender.recommend_from(&catalog(), &query(), 0).unwrap().is_empty());
    }

    #[test]
    fn test_dimension_mismatch() {
        let catalog = vec![Movie::new(1, "short").with_features(vec![1.0, 2.0])];
        let err = NeighborRecommender::new()
            .nearest_neighbors(&catalog, &query(), 1)
            .unwrap_err();
        assert_eq!(err, RecError::DimensionMismatch { expected: 9, actual: 2 });
    }

    #[test]
    fn test_missing_features() {
        let catalog = vec![Movie::new(1, "bare")];
        let recommender = NeighborRecommender::new();
        assert_eq!(
            recommender.nearest_neighbors(&catalog, &query(), 1).unwrap_err(),
            RecError::MissingFeatures { movie_id: 1 }
        );
        assert_eq!(
            recommender.nearest_neighbors(&[], &Movie::new(2, "q"), 1).unwrap_err(),
            RecError::MissingFeatures { movie_id: 2 }
        );
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let recommender = NeighborRecommender::new();
        let mut nan_query = query().features().unwrap().to_vec();
        nan_query[0] = f64::NAN;
        assert_eq!(
            recommender.nearest_to(&catalog(), &nan_query, None, 3).unwrap_err(),
            RecError::InvalidQuery { dimension: 0 }
        );
        assert_eq!(
            recommender
                .recommend_from(&catalog(), &Movie::new(20, "nan").with_features(nan_query), 3)
                .unwrap_err(),
            RecError::InvalidFeature { movie_id: 20, dimension: 0 }
        );

        let catalog = vec![
            Movie::new(1, "finite").with_features(vec![1.0, 0.0]),
            Movie::new(2, "nan").with_features(vec![f64::NAN, 0.0]),
        ];
        assert_eq!(
            recommender.nearest_to(&catalog, &[0.0, 0.0], None, 2).unwrap_err(),
            RecError::InvalidFeature { movie_id: 2, dimension: 0 }
        );
    }

    #[test]
    fn test_recommend_from_sample() {
        let catalog = catalog();
        let recs = NeighborRecommender::new()
            .recommend_from(&catalog, &query(), 3)
            .unwrap();
        assert_eq!(ids(&recs), vec![5, 8, 6, 7]);
    }

    #[test]
    fn test_recommend_from_requires_new_dimension() {
        let catalog = vec![
            Movie::new(1, "same genres").with_features(vec![1.0, 0.0, 0.0]),
            Movie::new(2, "adds comedy").with_features(vec![1.0, 0.0, 5.0]),
            Movie::new(2, "adds comedy again").with_features(vec![1.0, 0.0, 5.0]),
        ];
        let recs = NeighborRecommender::new()
            .recommend_from_vector(&catalog, &[1.0, 1.0, 0.0], None, 3)
            .unwrap();
        assert_eq!(ids(&recs), vec![2]);
        assert_eq!(recs[0].name, "adds comedy");
    }

    #[test]
    fn test_distinguishing_dimensions() {
        assert_eq!(
            distinguishing_dimensions(&[1.0, 0.0, 2.0, 3.0], &[0.0, 0.0, 1.0, 0.0]),
            vec![0, 3]
        );
        assert!(distinguishing_dimensions(&[0.0, 1.0], &[0.0, 1.0]).is_empty());
    }
}
