use crate::algorithms::similarity::shared_ratings;
use crate::error::{RecError, Result};
use crate::models::*;
use crate::utils::validation::{validate_rating, validate_user};
use std::collections::{BTreeMap, BTreeSet};

/// In-memory users and their ratings, keyed by user ID.
///
/// Iteration is always in ascending user ID so that every pass over the
/// store visits users in the same order.
#[derive(Debug, Clone, Default)]
pub struct RatingStore {
    users: BTreeMap<UserId, User>,
}

impl RatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_users<I>(users: I) -> Result<Self>
    where
        I: IntoIterator<Item = User>,
    {
        let mut store = Self::new();
        for user in users {
            store.insert_user(user)?;
        }
        Ok(store)
    }

    pub fn insert_user(&mut self, user: User) -> Result<()> {
        validate_user(&user)?;

        if self.users.contains_key(&user.id) {
            return Err(RecError::DuplicateUser(user.id));
        }

        self.users.insert(user.id, user);
        Ok(())
    }

    pub fn add_rating(&mut self, user_id: UserId, movie_id: MovieId, score: f64) -> Result<()> {
        let user = self
            .users
            .get_mut(&user_id)
            .ok_or_else(|| RecError::user_not_found(user_id))?;

        let rating = Rating::new(movie_id, score);
        validate_rating(user_id, &rating)?;

        if user.has_rated(movie_id) {
            return Err(RecError::DuplicateRating { user_id, movie_id });
        }

        user.ratings.push(rating);
        Ok(())
    }

    pub fn user(&self, id: UserId) -> Result<&User> {
        self.users.get(&id).ok_or_else(|| RecError::user_not_found(id))
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn rating_count(&self) -> usize {
        self.users.values().map(|u| u.ratings.len()).sum()
    }

    pub fn rating(&self, user_id: UserId, movie_id: MovieId) -> Option<f64> {
        self.users.get(&user_id)?.rating_for(movie_id)
    }

    /// Movies rated by both users, ascending by movie ID.
    pub fn shared_items(&self, a: UserId, b: UserId) -> Result<Vec<MovieId>> {
        let user_a = self.user(a)?;
        let user_b = self.user(b)?;

        Ok(shared_ratings(user_a, user_b)
            .into_iter()
            .map(|shared| shared.movie_id)
            .collect())
    }

    /// Every distinct movie rated by anyone, ascending.
    pub fn rated_items(&self) -> Vec<MovieId> {
        self.users
            .values()
            .flat_map(|u| u.ratings.iter().map(|r| r.movie_id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
