use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{Catalog, Dataset};
use engine::{EngineConfig, EngineError, Recommendation, RecommendationEngine};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Hybrid movie recommender: collaborative filtering + tag similarity + prompt boost
#[derive(Parser)]
#[command(name = "hybrid-recs")]
#[command(about = "Recommend movies from one rating and a free-text prompt", long_about = None)]
struct Cli {
    /// JSON dataset ({"items": [...], "ratings": [...]}); the built-in sample if omitted
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// JSON engine configuration; missing fields use the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the CF weight in the hybrid mix
    #[arg(long)]
    alpha: Option<f32>,

    /// Override the boost per matching tag
    #[arg(long)]
    beta: Option<f32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get recommendations from one rated title and a prompt
    Recommend {
        /// Title of a movie you have seen (exact, case-insensitive)
        #[arg(long)]
        title: String,

        /// Your rating for it, 1-5
        #[arg(long, allow_negative_numbers = true)]
        rating: i64,

        /// What you're in the mood for, e.g. "sci-fi with a heist"
        #[arg(long, default_value = "")]
        prompt: String,

        /// Number of recommendations to return (configured default if omitted)
        #[arg(long)]
        limit: Option<usize>,

        /// Show where each score came from
        #[arg(long)]
        explain: bool,

        /// Print the recommendations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search for movies by title
    Search {
        /// Title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// List every movie in the catalog
    Catalog,

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let dataset = load_dataset(cli.dataset.as_deref())?;
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(alpha) = cli.alpha {
        config = config.with_alpha(alpha);
    }
    if let Some(beta) = cli.beta {
        config = config.with_beta(beta);
    }

    let start = Instant::now();
    let engine = RecommendationEngine::from_dataset(dataset, config).context("Failed to build engine")?;
    debug!("Engine built in {:?}", start.elapsed());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            title,
            rating,
            prompt,
            limit,
            explain,
            json,
        } => handle_recommend(&engine, &title, rating, &prompt, limit, explain, json)?,
        Commands::Search { title } => handle_search(engine.catalog(), &title),
        Commands::Catalog => handle_catalog(engine.catalog()),
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(engine, requests, concurrent).await?,
    }

    Ok(())
}

fn load_dataset(path: Option<&Path>) -> Result<Dataset> {
    match path {
        Some(path) => Dataset::load_json(path)
            .with_context(|| format!("Failed to load dataset from {}", path.display())),
        None => Ok(Dataset::sample()),
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid config {}", path.display()))
}

/// Handle the 'recommend' command
fn handle_recommend(
    engine: &RecommendationEngine,
    title: &str,
    rating: i64,
    prompt: &str,
    limit: Option<usize>,
    explain: bool,
    json: bool,
) -> Result<()> {
    let limit = limit.unwrap_or(engine.config().default_top_n);

    let recommendations = match engine.recommend(title, rating, prompt, limit) {
        Ok(recommendations) => recommendations,
        Err(EngineError::NotFound { title }) => {
            let suggestions = engine.catalog().search(&title);
            if !suggestions.is_empty() {
                eprintln!("{}", "Did you mean:".yellow());
                for item in suggestions.iter().take(5) {
                    eprintln!("  - {}", item.title);
                }
            }
            bail!("Movie '{}' not found", title);
        }
        Err(err) => return Err(err.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
    } else {
        let heading = format!("Because you rated {} {}/5", title, rating);
        print_recommendations(&heading, &recommendations, explain);
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(catalog: &Catalog, title: &str) {
    let matches = catalog.search(title);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  (no matches)");
    }
    for item in matches.iter().take(20) {
        println!(
            "{}: {} ({}) [{}]",
            item.id,
            item.title,
            format_year(item.year),
            item.genres.join(", ")
        );
    }
}

/// Handle the 'catalog' command
fn handle_catalog(catalog: &Catalog) {
    println!("{}", format!("Catalog ({} movies):", catalog.len()).bold().blue());
    for item in catalog.all() {
        let tags: Vec<&str> = item.tags.iter().map(String::as_str).collect();
        println!(
            "{}: {} ({})\n   {}",
            item.id.to_string().green(),
            item.title,
            format_year(item.year),
            tags.join(", ").dimmed()
        );
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(engine: RecommendationEngine, requests: usize, concurrent: usize) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }
    let titles: Vec<String> = engine.catalog().all().iter().map(|i| i.title.clone()).collect();
    if titles.is_empty() {
        bail!("Catalog is empty");
    }

    // Random title/rating pairs
    let inputs: Vec<(String, i64)> = (0..requests)
        .map(|_| {
            let title = titles[rand::random_range(0..titles.len())].clone();
            (title, rand::random_range(1..=5))
        })
        .collect();

    // Scoring is CPU-bound: run on the blocking pool, bounded by a semaphore
    let permits = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();
    let mut handles = vec![];
    for (title, rating) in inputs {
        let engine = engine.clone();
        let permit = permits.clone().acquire_owned().await?;
        let handle = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let start = Instant::now();
            engine.recommend_default(&title, rating, "action sci-fi")?;
            Ok::<_, EngineError>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        match handle.await? {
            Ok(elapsed) => timings.push(elapsed),
            Err(err) => warn!("Benchmark request failed: {}", err),
        }
    }
    let total_time = wall_clock.elapsed();
    if timings.is_empty() {
        return Err(anyhow!("Every benchmark request failed"));
    }

    let latency_sum: Duration = timings.iter().sum();
    let avg_latency = latency_sum / timings.len() as u32;
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = timings.len() as f32 / total_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", timings.len(), concurrent.max(1));
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

fn format_year(year: Option<u16>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "?".to_string())
}

/// Helper function to format and print recommendations
fn print_recommendations(heading: &str, recommendations: &[Recommendation], explain: bool) {
    println!("{}", heading.bold().blue());
    if recommendations.is_empty() {
        println!("  (nothing to recommend)");
        return;
    }

    for (rank, rec) in recommendations.iter().enumerate() {
        let marker = if rec.is_boosted() {
            " *".yellow().to_string()
        } else {
            String::new()
        };
        println!(
            "{}. {} ({}) [{}] - Score: {:.2}{}",
            (rank + 1).to_string().green(),
            rec.title,
            format_year(rec.year),
            rec.genres.join(", "),
            rec.score,
            marker
        );
        if explain {
            println!(
                "   CF {:.2} | CB {:.2} | hybrid {:.2}",
                rec.cf_score, rec.cb_score, rec.hybrid_score
            );
            println!("   {}", rec.explanation.dimmed());
        }
    }
}
