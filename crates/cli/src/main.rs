use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{
    DeckRequest, DraftEngine, EngineConfig, ModelKey, PickOrderPolicy, PickOrderRequest,
    RatingRecord,
};
use rand::Rng;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

/// DraftRecs - Draft Pick and Deck Recommendations
#[derive(Parser)]
#[command(name = "draft-recs")]
#[command(about = "Card draft recommendations from trained per-set models", long_about = None)]
struct Cli {
    /// Directory holding cards/<SET>.csv and models/<SET>_<MODE>.json
    #[arg(short, long, env = "DRAFT_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// Draft mode used when a command doesn't pass --draft-mode
    #[arg(long, default_value = "Premier")]
    default_draft_mode: String,

    /// Leave cards already in the collection out of pick order
    #[arg(long)]
    exclude_picked: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List sets that have a trained model
    Sets,

    /// Rank every card in a set given the cards picked so far
    PickOrder {
        /// Set code, e.g. FDN
        #[arg(long)]
        set: String,

        #[arg(long)]
        draft_mode: Option<String>,

        /// Cards picked so far (names may contain commas, so pass one value per card)
        #[arg(long, num_args = 1..)]
        collection: Vec<String>,

        /// Only print the first N cards
        #[arg(long)]
        top: Option<usize>,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Pick the best cards from a finished pool
    BuildDeck {
        #[arg(long)]
        set: String,

        #[arg(long)]
        draft_mode: Option<String>,

        /// Every card in the pool, one value per physical copy
        #[arg(long, num_args = 1.., required = true)]
        pool: Vec<String>,

        /// Deck colors as WUBRG symbols, e.g. UW
        #[arg(long)]
        starting_colors: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Run benchmark to test cold-cache performance
    Benchmark {
        #[arg(long)]
        set: String,

        #[arg(long)]
        draft_mode: Option<String>,

        /// Number of concurrent pick-order requests
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Cards in each random collection
        #[arg(long, default_value = "15")]
        picks: usize,
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
        .init();

    let cli = Cli::parse();

    let policy = if cli.exclude_picked {
        PickOrderPolicy::ExcludePicked
    } else {
        PickOrderPolicy::RankAll
    };
    let config = EngineConfig::default()
        .with_data_dir(cli.data_dir)
        .with_default_draft_mode(cli.default_draft_mode)
        .with_pick_order_policy(policy);

    match cli.command {
        Commands::Sets => handle_sets(config).await?,
        Commands::PickOrder {
            set,
            draft_mode,
            collection,
            top,
            json,
        } => {
            let mut request = PickOrderRequest::new(set).with_collection(collection);
            request.draft_mode = draft_mode;
            handle_pick_order(config, request, top, json).await?
        }
        Commands::BuildDeck {
            set,
            draft_mode,
            pool,
            starting_colors,
            json,
        } => {
            let request = DeckRequest {
                set_code: set,
                draft_mode,
                pool,
                starting_colors,
            };
            handle_build_deck(config, request, json).await?
        }
        Commands::Benchmark {
            set,
            draft_mode,
            requests,
            picks,
        } => handle_benchmark(config, set, draft_mode, requests, picks).await?,
    }

    Ok(())
}

/// Handle the 'sets' command
async fn handle_sets(config: EngineConfig) -> Result<()> {
    let data_dir = config.data_dir.clone();
    let engine = DraftEngine::from_config(config);

    let sets = engine
        .list_available_sets()
        .await
        .with_context(|| format!("Failed to list sets in {}", data_dir.display()))?;

    println!("{}", "Available sets:".bold().blue());
    for set in sets {
        println!("  {} {}", "•".green(), set);
    }
    Ok(())
}

/// Handle the 'pick-order' command
async fn handle_pick_order(
    config: EngineConfig,
    request: PickOrderRequest,
    top: Option<usize>,
    json: bool,
) -> Result<()> {
    let engine = DraftEngine::from_config(config);
    let set_code = request.set_code.clone();

    let mut records = engine
        .get_pick_order(request)
        .await
        .with_context(|| format!("Failed to rank cards for {}", set_code))?;
    if let Some(n) = top {
        records.truncate(n);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print_records(&format!("Pick order for {}:", set_code), &records);
    }
    Ok(())
}

/// Handle the 'build-deck' command
async fn handle_build_deck(config: EngineConfig, request: DeckRequest, json: bool) -> Result<()> {
    let engine = DraftEngine::from_config(config);
    let set_code = request.set_code.clone();
    let pool_size = request.pool.len();

    let deck = engine
        .get_deck_recommendation(request)
        .await
        .with_context(|| format!("Failed to build a deck for {}", set_code))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&deck)?);
    } else {
        print_records(
            &format!("Deck for {} ({} of {} pool cards):", set_code, deck.len(), pool_size),
            &deck,
        );
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    config: EngineConfig,
    set: String,
    draft_mode: Option<String>,
    requests: usize,
    picks: usize,
) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }

    // Read the card list through a throwaway engine so the measured one
    // starts with a cold cache
    let names = {
        let lister = DraftEngine::from_config(config.clone());
        let mode = draft_mode
            .clone()
            .unwrap_or_else(|| config.default_draft_mode.clone());
        let model = lister
            .registry()
            .resolve(&ModelKey::new(&set, &mode))
            .await
            .with_context(|| format!("Failed to load {} {}", set, mode))?;
        model.catalog().names()
    };
    if names.is_empty() && picks > 0 {
        bail!("Catalog for {} has no cards to pick from", set);
    }

    // Random collections drawn with replacement
    let collections: Vec<Vec<String>> = {
        let mut rng = rand::rng();
        (0..requests)
            .map(|_| {
                (0..picks)
                    .map(|_| names[rng.random_range(0..names.len())].clone())
                    .collect()
            })
            .collect()
    };

    let engine = DraftEngine::from_config(config);
    info!(
        "Issuing {} concurrent pick-order requests for {} against a cold cache",
        requests, set
    );
    let start = Instant::now();

    let mut handles = vec![];
    for collection in collections {
        let engine = engine.clone();
        let mut request = PickOrderRequest::new(set.clone()).with_collection(collection);
        request.draft_mode = draft_mode.clone();
        let handle = tokio::spawn(async move {
            let start = Instant::now();
            engine.get_pick_order(request).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    let mut timings = vec![];
    for handle in handles {
        timings.push(handle.await??);
    }
    let wall_time = start.elapsed();

    timings.sort();
    let total: Duration = timings.iter().sum();
    let avg_latency = total / timings.len() as u32;
    let throughput = requests as f64 / wall_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {}", requests);
    println!("Wall time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(&timings, 0.50));
    println!("P95 latency: {:?}", percentile(&timings, 0.95));
    println!("P99 latency: {:?}", percentile(&timings, 0.99));
    println!("Throughput: {:.2} requests/second", throughput);
    println!("Resident models: {}", engine.registry().loaded_keys().len());

    Ok(())
}

/// Nearest-rank percentile of sorted timings
fn percentile(sorted: &[Duration], p: f64) -> Duration {
    let rank = (sorted.len() as f64 * p).ceil() as usize;
    sorted[rank.clamp(1, sorted.len()) - 1]
}

/// Helper function to format and print rating records
fn print_records(title: &str, records: &[RatingRecord]) {
    println!("{}", title.bold().blue());
    for (i, record) in records.iter().enumerate() {
        let synergy = if record.synergy > 0.0 {
            format!("{:+.3}", record.synergy).green()
        } else if record.synergy < 0.0 {
            format!("{:+.3}", record.synergy).red()
        } else {
            format!("{:+.3}", record.synergy).normal()
        };
        println!(
            "{:>3}. {} [{}] {} - Rating: {:.3} (base {:.3}, synergy {})",
            (i + 1).to_string().green(),
            record.name,
            record.color_identity,
            record.rarity.as_deref().unwrap_or("-"),
            record.rating,
            record.base_rating,
            synergy
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile() {
        let timings: Vec<Duration> = (1..=100).map(Duration::from_millis).collect();
        assert_eq!(percentile(&timings, 0.50), Duration::from_millis(50));
        assert_eq!(percentile(&timings, 0.99), Duration::from_millis(99));
        assert_eq!(percentile(&timings[..1], 0.95), Duration::from_millis(1));
    }

    #[test]
    fn test_cli_parses_multi_value_collection() {
        let cli = Cli::try_parse_from([
            "draft-recs",
            "pick-order",
            "--set",
            "FDN",
            "--collection",
            "Kiora, the Rising Tide",
            "Think Twice",
            "--top",
            "5",
        ])
        .unwrap();

        match cli.command {
            Commands::PickOrder {
                collection, top, ..
            } => {
                assert_eq!(collection, vec!["Kiora, the Rising Tide", "Think Twice"]);
                assert_eq!(top, Some(5));
            }
            _ => panic!("expected pick-order"),
        }
    }
}
