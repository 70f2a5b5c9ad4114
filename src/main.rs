mod config;
mod export;
mod extract;
mod fetch;
mod model;
mod pager;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use config::Settings;
use fetch::Fetcher;
use model::{dedup_reviews, Review};
use pager::ReviewScraper;

#[derive(Parser)]
#[command(name = "review_scraper", about = "Paginated product review scraper")]
struct Cli {
    /// Path to the settings JSON file
    #[arg(short, long, default_value = "settings.example.json")]
    settings: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape every identifier in an input list and export the results
    Run {
        /// Input file with one identifier per line (# comments and blanks skipped)
        #[arg(short, long, default_value = "data/inputs.sample.txt")]
        input: PathBuf,
        /// Output path; overrides the settings file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format, json or ndjson; overrides the settings file
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Scrape a single identifier and print its reviews as JSON
    One {
        /// Identifier (e.g. product code) to scrape
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli.settings)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.logging.level)),
        )
        .init();

    if !cli.settings.exists() {
        info!(
            "settings file {} not found, using defaults",
            cli.settings.display()
        );
    }

    let t0 = Instant::now();

    match cli.command {
        Commands::Run {
            input,
            output,
            format,
        } => {
            run_batch(&settings, &input, output, format).await?;
        }
        Commands::One { id } => {
            let scraper = build_scraper(&settings)?;
            let reviews = scraper.scrape_reviews(&id).await;
            info!("fetched {} reviews for {}", reviews.len(), id);
            println!("{}", serde_json::to_string_pretty(&reviews)?);
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        info!("done in {:.1}s", elapsed.as_secs_f64());
    }

    Ok(())
}

async fn run_batch(
    settings: &Settings,
    input: &Path,
    output: Option<PathBuf>,
    format: Option<String>,
) -> Result<()> {
    let mut ids = read_identifiers(input)?;
    if ids.is_empty() {
        warn!("no identifiers found in {}, nothing to do", input.display());
        return Ok(());
    }
    if ids.len() > settings.daily_asin_limit {
        warn!(
            "{} identifiers exceed the daily limit of {}, only the first {} will be processed",
            ids.len(),
            settings.daily_asin_limit,
            settings.daily_asin_limit
        );
        ids.truncate(settings.daily_asin_limit);
    }

    let scraper = build_scraper(settings)?;

    let pb = ProgressBar::new(ids.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
            .progress_chars("=> "),
    );

    let mut all_reviews: Vec<Review> = Vec::new();
    for (idx, id) in ids.iter().enumerate() {
        pb.set_message(id.clone());
        info!("({}/{}) scraping reviews for {}", idx + 1, ids.len(), id);
        let reviews = scraper.scrape_reviews(id).await;
        info!("fetched {} reviews for {}", reviews.len(), id);
        all_reviews.extend(reviews);
        pb.inc(1);
    }
    pb.finish_and_clear();

    if all_reviews.is_empty() {
        warn!("no reviews collected, exiting without writing output");
        return Ok(());
    }

    let total = all_reviews.len();
    let all_reviews = dedup_reviews(all_reviews);
    info!(
        "{} unique reviews after deduplicating {} collected",
        all_reviews.len(),
        total
    );

    let out_path = output.unwrap_or_else(|| PathBuf::from(&settings.output.path));
    let out_format = format.unwrap_or_else(|| settings.output.format.clone());

    info!(
        "writing {} reviews to {} (format={})",
        all_reviews.len(),
        out_path.display(),
        out_format
    );
    match out_format.as_str() {
        "json" => export::write_json(&all_reviews, &out_path, settings.output.indent)?,
        "ndjson" => export::write_ndjson(&all_reviews, &out_path)?,
        other => bail!("unknown output format: {}", other),
    }

    Ok(())
}

fn build_scraper(settings: &Settings) -> Result<ReviewScraper> {
    let fetcher = Fetcher::new(
        &settings.base_url,
        settings.user_agent.as_deref(),
        settings.request_timeout,
    )?;
    Ok(ReviewScraper::new(
        fetcher,
        settings.max_reviews_per_asin,
        settings.delay_between_requests,
        settings.stars.iter().copied(),
    ))
}

fn read_identifiers(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading input list {}", path.display()))?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

// ── Tests ──
