use crate::error::{RecError, Result};
use crate::models::*;
use crate::utils::validation::{validate_dimension, validate_movie_features};
use std::collections::HashMap;

/// Catalog movies with fixed-length feature vectors, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    movies: Vec<Movie>,
    index: HashMap<MovieId, usize>,
    dimension: Option<usize>,
}

impl FeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension: Some(dimension),
            ..Self::default()
        }
    }

    /// Builds a store from `movies`. Without an explicit `dimension` the
    /// first movie's vector length becomes the store's dimension.
    pub fn from_movies<I>(movies: I, dimension: Option<usize>) -> Result<Self>
    where
        I: IntoIterator<Item = Movie>,
    {
        let mut store = match dimension {
            Some(d) => Self::with_dimension(d),
            None => Self::new(),
        };
        for movie in movies {
            store.insert(movie)?;
        }
        Ok(store)
    }

    pub fn insert(&mut self, movie: Movie) -> Result<()> {
        let features = validate_movie_features(&movie)?;

        match self.dimension {
            Some(expected) => validate_dimension(features, expected)?,
            None => self.dimension = Some(features.len()),
        }

        if self.index.contains_key(&movie.id) {
            return Err(RecError::DuplicateMovie(movie.id));
        }

        self.index.insert(movie.id, self.movies.len());
        self.movies.push(movie);
        Ok(())
    }

    pub fn get(&self, id: MovieId) -> Result<&Movie> {
        self.index
            .get(&id)
            .map(|&i| &self.movies[i])
            .ok_or_else(|| RecError::movie_not_found(id))
    }

    pub fn find_by_title(&self, title: &str) -> Option<&Movie> {
        let title = title.trim();
        self.movies
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(title))
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_inferred_from_first_movie() {
        let mut store = FeatureStore::new();
        store.insert(Movie::new(1, "a").with_features(vec![1.0, 2.0, 3.0])).unwrap();
        assert_eq!(store.dimension(), Some(3));

        let err = store
            .insert(Movie::new(2, "b").with_features(vec![1.0]))
            .unwrap_err();
        assert_eq!(err, RecError::DimensionMismatch { expected: 3, actual: 1 });
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insert_rejects_bad_movies() {
        let mut store = FeatureStore::with_dimension(2);
        assert_eq!(
            store.insert(Movie::new(1, "none")),
            Err(RecError::MissingFeatures { movie_id: 1 })
        );

        store.insert(Movie::new(1, "ok").with_features(vec![0.0, 1.0])).unwrap();
        assert_eq!(
            store.insert(Movie::new(1, "again").with_features(vec![0.0, 1.0])),
            Err(RecError::DuplicateMovie(1))
        );
    }

    #[test]
    fn test_lookup_preserves_insertion_order() {
        let store = FeatureStore::from_movies(
            [
                Movie::new(30, "Heat").with_features(vec![1.0]),
                Movie::new(10, "Alien").with_features(vec![2.0]),
            ],
            None,
        )
        .unwrap();

        let ids: Vec<_> = store.movies().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![30, 10]);
        assert_eq!(store.get(10).unwrap().name, "Alien");
        assert_eq!(store.get(11).unwrap_err(), RecError::movie_not_found(11));
        assert_eq!(store.find_by_title(" alien ").map(|m| m.id), Some(10));
        assert!(store.find_by_title("Aliens").is_none());
    }
}
