use super::{Movie, MovieId, User};
use crate::error::Result;
use crate::services::feature_store::FeatureStore;
use crate::services::rating_store::RatingStore;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Users, their ratings and the movie catalog, as loaded by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub movies: Vec<Movie>,
}

/// ID of "The Dark Knight Rises" in [`Dataset::sample`].
pub const SAMPLE_QUERY_ID: MovieId = 9;

impl Dataset {
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("invalid dataset JSON")
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dataset {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("failed to parse dataset {}", path.display()))
    }

    /// Validates the dataset into a rating store and a feature store.
    ///
    /// Movies without a feature vector are part of the catalog for ratings
    /// only and are left out of the feature store.
    pub fn into_stores(self, dimension: Option<usize>) -> Result<(RatingStore, FeatureStore)> {
        let ratings = RatingStore::from_users(self.users)?;
        let features = FeatureStore::from_movies(
            self.movies.into_iter().filter(|m| m.features.is_some()),
            dimension,
        )?;
        Ok((ratings, features))
    }

    /// The demonstration data set: four users rating movies 1-4 and a
    /// nine-genre catalog that includes "The Dark Knight Rises" as the
    /// canonical neighbor query.
    pub fn sample() -> Self {
        let users = vec![
            User::new(1, "User One").with_ratings([(1, 9.0), (2, 3.0), (3, 6.0), (4, 1.0)]),
            User::new(2, "User Two").with_ratings([(1, 5.0), (2, 2.0), (3, 9.0), (4, 7.0)]),
            User::new(3, "User Three").with_ratings([(1, 7.0), (2, 7.0), (3, 5.0), (4, 6.0)]),
            User::new(4, "User Four").with_ratings([(1, 8.0), (2, 9.0), (3, 2.0)]),
        ];

        let catalog: [(MovieId, &str, [f64; 9]); 9] = [
            (1, "The Shawshank Redemption", [9.3, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            (2, "The Godfather", [9.2, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            (3, "The Dark Knight", [9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            (4, "The Godfather: Part II", [9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            (5, "12 Angry Men", [8.9, 0.0, 0.0, 0.0, 9.0, 0.0, 0.0, 9.0, 0.0]),
            (6, "Schindler's List", [8.9, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            (7, "The Lord of the Rings: The Return of the King", [8.9, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            (8, "Pulp Fiction", [8.9, 0.0, 9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0]),
            (SAMPLE_QUERY_ID, "The Dark Knight Rises", [0.0, 0.0, 9.0, 0.0, 9.0, 0.0, 8.4, 9.0, 9.0]),
        ];

        let movies = catalog
            .iter()
            .map(|(id, name, features)| Movie::new(*id, *name).with_features(features.to_vec()))
            .collect();

        Self { users, movies }
    }

    pub fn movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }
}
