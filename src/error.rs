use crate::models::{MovieId, UserId};
use std::fmt;

pub type Result<T> = std::result::Result<T, RecError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Movie,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::User => f.write_str("user"),
            Entity::Movie => f.write_str("movie"),
        }
    }
}

/// Errors surfaced by the stores and the recommendation algorithms.
///
/// Degenerate inputs (no shared ratings, empty catalog, `k == 0`) are not
/// errors; they produce empty or zero results instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecError {
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: u64 },

    #[error("feature dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("movie {movie_id} has no feature vector")]
    MissingFeatures { movie_id: MovieId },

    #[error("user {0} already exists")]
    DuplicateUser(UserId),

    #[error("movie {0} already exists")]
    DuplicateMovie(MovieId),

    #[error("user {user_id} rated movie {movie_id} more than once")]
    DuplicateRating { user_id: UserId, movie_id: MovieId },

    #[error("user {user_id} gave movie {movie_id} a non-finite score")]
    InvalidScore { user_id: UserId, movie_id: MovieId },

    #[error("movie {movie_id} has a non-finite feature at dimension {dimension}")]
    InvalidFeature { movie_id: MovieId, dimension: usize },

    #[error("query vector has a non-finite value at dimension {dimension}")]
    InvalidQuery { dimension: usize },
}

impl RecError {
    pub fn user_not_found(id: UserId) -> Self {
        RecError::NotFound {
            entity: Entity::User,
            id,
        }
    }

    pub fn movie_not_found(id: MovieId) -> Self {
        RecError::NotFound {
            entity: Entity::Movie,
            id,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RecError::NotFound { .. })
    }
}
