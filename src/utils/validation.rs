use crate::error::{RecError, Result};
use crate::models::*;
use std::collections::HashSet;

pub fn validate_rating(user_id: UserId, rating: &Rating) -> Result<()> {
    if !rating.score.is_finite() {
        return Err(RecError::InvalidScore {
            user_id,
            movie_id: rating.movie_id,
        });
    }
    Ok(())
}

/// Rejects non-finite scores and repeated ratings of the same movie.
pub fn validate_user(user: &User) -> Result<()> {
    let mut seen = HashSet::with_capacity(user.ratings.len());

    for rating in &user.ratings {
        validate_rating(user.id, rating)?;

        if !seen.insert(rating.movie_id) {
            return Err(RecError::DuplicateRating {
                user_id: user.id,
                movie_id: rating.movie_id,
            });
        }
    }

    Ok(())
}

/// Returns the movie's feature vector once it is known to be present,
/// non-empty and finite.
pub fn validate_movie_features(movie: &Movie) -> Result<&[f64]> {
    let features = match movie.features() {
        Some(features) if !features.is_empty() => features,
        _ => return Err(RecError::MissingFeatures { movie_id: movie.id }),
    };

    validate_feature_values(movie.id, features)?;
    Ok(features)
}

pub fn validate_feature_values(movie_id: MovieId, features: &[f64]) -> Result<()> {
    match first_non_finite(features) {
        Some(dimension) => Err(RecError::InvalidFeature { movie_id, dimension }),
        None => Ok(()),
    }
}

/// Ad-hoc query vectors carry no movie ID.
pub fn validate_query(features: &[f64]) -> Result<()> {
    match first_non_finite(features) {
        Some(dimension) => Err(RecError::InvalidQuery { dimension }),
        None => Ok(()),
    }
}

fn first_non_finite(values: &[f64]) -> Option<usize> {
    values.iter().position(|v| !v.is_finite())
}

pub fn validate_dimension(features: &[f64], expected_dim: usize) -> Result<()> {
    if features.len() != expected_dim {
        return Err(RecError::DimensionMismatch {
            expected: expected_dim,
            actual: features.len(),
        });
    }
    Ok(())
}
