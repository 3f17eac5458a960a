use anyhow::{anyhow, Result};
use cinerec::{init_tracing, Config, Dataset, RecommendationService};
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file; defaults plus CINEREC__* overrides when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON dataset of users and movies; the built-in sample when omitted
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cosine similarity between two users
    Similarity {
        #[arg(long)]
        user_a: u64,
        #[arg(long)]
        user_b: u64,
    },
    /// Collaborative-filtering recommendations for a user
    Recommend {
        #[arg(short, long)]
        user: u64,
        #[arg(short = 'n', long)]
        max_results: Option<usize>,
    },
    /// Nearest catalog movies to a movie or feature vector
    Neighbors {
        #[command(flatten)]
        query: QueryArgs,
        #[arg(short, long)]
        k: Option<usize>,
    },
    /// Neighbors that add genres the query lacks
    RecommendFrom {
        #[command(flatten)]
        query: QueryArgs,
        #[arg(short, long)]
        k: Option<usize>,
    },
    /// Store sizes and feature dimension
    Stats,
}

#[derive(ClapArgs, Debug)]
#[group(required = true, multiple = false)]
struct QueryArgs {
    #[arg(long)]
    movie: Option<u64>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    features: Option<Vec<f64>>,
}

enum Query {
    Movie(u64),
    Vector(Vec<f64>),
}

fn resolve_query(service: &RecommendationService, args: QueryArgs) -> Result<Query> {
    match (args.movie, args.title, args.features) {
        (Some(id), _, _) => Ok(Query::Movie(id)),
        (_, Some(title), _) => service
            .find_movie_by_title(&title)
            .map(|movie| Query::Movie(movie.id))
            .ok_or_else(|| anyhow!("no movie titled {:?}", title)),
        (_, _, Some(features)) => Ok(Query::Vector(features)),
        _ => Err(anyhow!("a movie, title or feature vector is required")),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    info!("Configuration loaded: {:?}", config);

    let dataset = match &args.dataset {
        Some(path) => Dataset::from_json_file(path)?,
        None => {
            info!("No dataset given, using the built-in sample");
            Dataset::sample()
        }
    };

    let service = RecommendationService::from_dataset(dataset, Arc::new(config))?;

    match args.command {
        Command::Similarity { user_a, user_b } => {
            let similarity = service.similarity(user_a, user_b)?;
            print_json(&serde_json::json!({
                "user_a": user_a,
                "user_b": user_b,
                "similarity": similarity,
            }))
        }
        Command::Recommend { user, max_results } => {
            print_json(&service.recommend_for_user(user, max_results)?)
        }
        Command::Neighbors { query, k } => match resolve_query(&service, query)? {
            Query::Movie(id) => print_json(&service.similar_movies(id, k)?),
            Query::Vector(features) => print_json(&service.neighbors_for_vector(&features, k)?),
        },
        Command::RecommendFrom { query, k } => match resolve_query(&service, query)? {
            Query::Movie(id) => print_json(&service.recommend_from_movie(id, k)?),
            Query::Vector(features) => print_json(&service.recommend_from_vector(&features, k)?),
        },
        Command::Stats => print_json(&service.stats()),
    }
}
