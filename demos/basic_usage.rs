use cinerec::models::dataset::SAMPLE_QUERY_ID;
use cinerec::*;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    init_tracing("info");

    println!("🎬 cinerec basic usage");

    // 1. Load the sample data set and configuration
    let dataset = Dataset::sample();
    let mut config = Config::default();
    config.recommendation.max_results = 4;
    println!("✅ {} users, {} movies loaded", dataset.users.len(), dataset.movies.len());

    let service = RecommendationService::from_dataset(dataset.clone(), Arc::new(config))?;

    // 2. Collaborative filtering
    println!("\n👥 User similarities to User One:");
    for other in 2..=4 {
        println!("  user 1 ~ user {}: {:.4}", other, service.similarity(1, other)?);
    }

    println!("\n⭐ Recommendations for User One:");
    for (rank, rec) in service.recommend_for_user(1, None)?.iter().enumerate() {
        let name = dataset.movie(rec.movie_id).map_or("?", |m| m.name.as_str());
        println!("  {}. {} (predicted {:.3})", rank + 1, name, rec.score);
    }

    // 3. Content-based neighbors
    let query = service
        .find_movie_by_title("The Dark Knight Rises")
        .ok_or_else(|| anyhow::anyhow!("sample query missing"))?;
    let k = 3;

    println!("\n🔍 The {} most similar movies to {:?}:", k, query.name);
    for (rank, m) in service.similar_movies(SAMPLE_QUERY_ID, Some(k))?.iter().enumerate() {
        println!("  {}. {} (distance {:.3})", rank + 1, m.movie.name, m.distance);
    }

    println!("\n📦 Recommended movies based on {:?}:", query.name);
    for (rank, rec) in service.recommend_from_movie(SAMPLE_QUERY_ID, Some(k))?.iter().enumerate() {
        println!("  {}. {} (adds {})", rank + 1, rec.movie.name, rec.adds_genres.join(", "));
    }

    // 4. Ad-hoc genre query
    let weights = GenreWeights::default()
        .with(Genre::Comedy, 8.0)
        .with(Genre::Fantasy, 9.0);
    println!("\n🎭 Closest movies to a {:?} profile:", weights.genres());
    for m in service.neighbors_for_vector(&weights.to_vector(), Some(2))? {
        println!("  - {} (distance {:.3})", m.movie.name, m.distance);
    }

    println!("\n📊 {:?}", service.stats());
    Ok(())
}
