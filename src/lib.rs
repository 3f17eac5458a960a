pub mod algorithms;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use algorithms::{distance, nearest_neighbors, recommend, recommend_from, similarity};
pub use crate::config::Config;
pub use error::RecError;
pub use models::*;
pub use services::feature_store::FeatureStore;
pub use services::rating_store::RatingStore;
pub use services::recommendation::RecommendationService;

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `default_filter` when it is set.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
