use crate::algorithms::{distinguishing_dimensions, CollaborativeRecommender, NeighborRecommender};
use crate::config::Config;
use crate::error::RecError;
use crate::models::*;
use crate::services::feature_store::FeatureStore;
use crate::services::rating_store::RatingStore;
use anyhow::{Context, Result};
use parking_lot::RwLock;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStats {
    pub users: usize,
    pub ratings: usize,
    pub movies: usize,
    pub feature_dimension: Option<usize>,
}

/// Content-based recommendation together with the genres it would add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecommendation {
    pub movie: Movie,
    pub adds_genres: Vec<String>,
}

/// Thread-safe entry point over both stores.
///
/// Every computation holds a read lock on the store it scans for the whole
/// pass; writers wait until in-flight passes finish.
pub struct RecommendationService {
    ratings: Arc<RwLock<RatingStore>>,
    features: Arc<RwLock<FeatureStore>>,
    collaborative: CollaborativeRecommender,
    neighbors: NeighborRecommender,
    config: Arc<Config>,
    pool: rayon::ThreadPool,
}

impl RecommendationService {
    pub fn new(ratings: RatingStore, features: FeatureStore, config: Arc<Config>) -> Result<Self> {
        config.validate()?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.runtime.worker_threads)
            .thread_name(|i| format!("cinerec-worker-{i}"))
            .build()
            .context("failed to build recommendation worker pool")?;

        let collaborative = CollaborativeRecommender::from_config(&config.recommendation);

        info!(
            "Initialized recommendation service: {} users, {} movies, {} workers, {:?} contributors",
            ratings.len(),
            features.len(),
            config.runtime.worker_threads,
            collaborative.policy()
        );

        Ok(Self {
            ratings: Arc::new(RwLock::new(ratings)),
            features: Arc::new(RwLock::new(features)),
            collaborative,
            neighbors: NeighborRecommender::new(),
            config,
            pool,
        })
    }

    pub fn from_dataset(dataset: Dataset, config: Arc<Config>) -> Result<Self> {
        let (ratings, features) = dataset.into_stores(config.neighbors.feature_dimension)?;
        Self::new(ratings, features, config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> ServiceStats {
        let ratings = self.ratings.read();
        let features = self.features.read();
        ServiceStats {
            users: ratings.len(),
            ratings: ratings.rating_count(),
            movies: features.len(),
            feature_dimension: features.dimension(),
        }
    }

    pub fn similarity(&self, user_a: UserId, user_b: UserId) -> Result<f64> {
        let store = self.ratings.read();
        let a = store.user(user_a)?;
        let b = store.user(user_b)?;
        Ok(self.collaborative.similarity(a, b))
    }

    pub fn recommend_for_user(&self, user_id: UserId, max_results: Option<usize>) -> Result<Vec<Recommendation>> {
        let max_results = max_results.unwrap_or(self.config.recommendation.max_results);
        let store = self.ratings.read();

        match self.collaborative.recommend(&store, user_id, max_results) {
            Ok(recommendations) => {
                debug!(
                    "Computed {} recommendations for user {} over {} users",
                    recommendations.len(),
                    user_id,
                    store.len()
                );
                Ok(recommendations)
            }
            Err(e) => {
                error!("Failed to recommend for user {}: {}", user_id, e);
                Err(e.into())
            }
        }
    }

    /// Recommends for many users in parallel under a single read lock.
    /// Each user's outcome is independent of the others.
    pub fn recommend_for_users(
        &self,
        user_ids: &[UserId],
        max_results: Option<usize>,
    ) -> Vec<(UserId, Result<Vec<Recommendation>, RecError>)> {
        let max_results = max_results.unwrap_or(self.config.recommendation.max_results);
        let start_time = std::time::Instant::now();
        let guard = self.ratings.read();
        let store: &RatingStore = &guard;

        let results: Vec<_> = self.pool.install(|| {
            user_ids
                .par_iter()
                .map(|&id| (id, self.collaborative.recommend(store, id, max_results)))
                .collect()
        });

        let failed = results.iter().filter(|(_, r)| r.is_err()).count();
        info!(
            "Batch recommended for {} users in {}ms ({} failed)",
            user_ids.len(),
            start_time.elapsed().as_millis(),
            failed
        );
        results
    }

    pub fn find_movie_by_title(&self, title: &str) -> Option<Movie> {
        self.features.read().find_by_title(title).cloned()
    }

    pub fn similar_movies(&self, movie_id: MovieId, k: Option<usize>) -> Result<Vec<MovieMatch>> {
        let k = k.unwrap_or(self.config.neighbors.k);
        let store = self.features.read();
        let query = store.get(movie_id)?;

        let neighbors = self.neighbors.nearest_neighbors(store.movies(), query, k)?;
        debug!("Found {} neighbors of movie {} (k = {})", neighbors.len(), movie_id, k);
        Ok(neighbors.into_iter().map(MovieMatch::from).collect())
    }

    pub fn neighbors_for_vector(&self, features: &[f64], k: Option<usize>) -> Result<Vec<MovieMatch>> {
        let k = k.unwrap_or(self.config.neighbors.k);
        let store = self.features.read();

        let neighbors = self.neighbors.nearest_to(store.movies(), features, None, k)?;
        debug!("Found {} neighbors of ad-hoc vector (k = {})", neighbors.len(), k);
        Ok(neighbors.into_iter().map(MovieMatch::from).collect())
    }

    pub fn recommend_from_movie(&self, movie_id: MovieId, k: Option<usize>) -> Result<Vec<ContentRecommendation>> {
        let k = k.unwrap_or(self.config.neighbors.k);
        let store = self.features.read();
        let query = store.get(movie_id)?;

        let movies = self.neighbors.recommend_from(store.movies(), query, k)?;
        let query_features = query.features().unwrap_or_default();
        Ok(Self::explain(movies, query_features))
    }

    pub fn recommend_from_vector(&self, features: &[f64], k: Option<usize>) -> Result<Vec<ContentRecommendation>> {
        let k = k.unwrap_or(self.config.neighbors.k);
        let store = self.features.read();

        let movies = self.neighbors.recommend_from_vector(store.movies(), features, None, k)?;
        Ok(Self::explain(movies, features))
    }

    fn explain(movies: Vec<&Movie>, query: &[f64]) -> Vec<ContentRecommendation> {
        movies
            .into_iter()
            .map(|movie| {
                let adds_genres = movie
                    .features()
                    .map(|f| distinguishing_dimensions(f, query))
                    .unwrap_or_default()
                    .into_iter()
                    .map(|i| match Genre::from_index(i) {
                        Some(genre) => genre.name().to_string(),
                        None => format!("dimension {i}"),
                    })
                    .collect();
                ContentRecommendation {
                    movie: movie.clone(),
                    adds_genres,
                }
            })
            .collect()
    }

    pub fn add_user(&self, user: User) -> Result<()> {
        let user_id = user.id;
        self.ratings.write().insert_user(user)?;
        info!("Added user {}", user_id);
        Ok(())
    }

    pub fn add_rating(&self, user_id: UserId, movie_id: MovieId, score: f64) -> Result<()> {
        self.ratings.write().add_rating(user_id, movie_id, score)?;
        debug!("User {} rated movie {} with {}", user_id, movie_id, score);
        Ok(())
    }

    pub fn add_movie(&self, movie: Movie) -> Result<()> {
        let movie_id = movie.id;
        self.features.write().insert(movie)?;
        info!("Added movie {} to the catalog", movie_id);
        Ok(())
    }
}
