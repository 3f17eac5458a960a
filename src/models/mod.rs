use serde::{Deserialize, Serialize};

pub mod dataset;
pub mod genre;

pub use dataset::Dataset;
pub use genre::{Genre, GenreWeights};

pub type UserId = u64;
pub type MovieId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub movie_id: MovieId,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub ratings: Vec<Rating>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<f64>>,
}

/// Predicted score for a movie the target user may like.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub score: f64,
}

/// A catalog movie paired with its distance to a query vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Neighbor<'a> {
    pub movie: &'a Movie,
    pub distance: f64,
}

/// Owned form of [`Neighbor`], for results that outlive a store lock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieMatch {
    pub movie: Movie,
    pub distance: f64,
}

impl Rating {
    pub fn new(movie_id: MovieId, score: f64) -> Self {
        Self { movie_id, score }
    }
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ratings: Vec::new(),
        }
    }

    pub fn with_rating(mut self, movie_id: MovieId, score: f64) -> Self {
        self.ratings.push(Rating::new(movie_id, score));
        self
    }

    pub fn with_ratings<I>(mut self, ratings: I) -> Self
    where
        I: IntoIterator<Item = (MovieId, f64)>,
    {
        self.ratings
            .extend(ratings.into_iter().map(|(movie_id, score)| Rating::new(movie_id, score)));
        self
    }

    pub fn rating_for(&self, movie_id: MovieId) -> Option<f64> {
        self.ratings
            .iter()
            .find(|r| r.movie_id == movie_id)
            .map(|r| r.score)
    }

    pub fn has_rated(&self, movie_id: MovieId) -> bool {
        self.ratings.iter().any(|r| r.movie_id == movie_id)
    }
}

impl Movie {
    pub fn new(id: MovieId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            features: None,
        }
    }

    pub fn with_features(mut self, features: Vec<f64>) -> Self {
        self.features = Some(features);
        self
    }

    pub fn with_genres(self, genres: GenreWeights) -> Self {
        self.with_features(genres.to_vector())
    }

    pub fn features(&self) -> Option<&[f64]> {
        self.features.as_deref()
    }
}

impl Recommendation {
    pub fn new(movie_id: MovieId, score: f64) -> Self {
        Self { movie_id, score }
    }
}

impl Neighbor<'_> {
    pub fn to_match(&self) -> MovieMatch {
        MovieMatch {
            movie: self.movie.clone(),
            distance: self.distance,
        }
    }
}

impl From<Neighbor<'_>> for MovieMatch {
    fn from(neighbor: Neighbor<'_>) -> Self {
        neighbor.to_match()
    }
}
