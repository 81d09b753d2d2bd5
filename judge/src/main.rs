use std::path::PathBuf;

use clap::Parser;
use judge::{board_dimensions, play_games};
use pelmanism::GameConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to the game config JSON file
    config: PathBuf,

    /// Board width, derived from the deck size if omitted
    #[arg(long)]
    width: Option<usize>,

    /// Board height, derived from the deck size if omitted
    #[arg(long)]
    height: Option<usize>,

    /// How many games to play
    #[arg(short, long, default_value_t = 1)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,

    /// Print the board after every turn
    #[arg(long, default_value_t = false)]
    show_board: bool,

    /// Print the final score as JSON to stdout
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let config = GameConfig::load(&args.config)?;
    config.validate()?;
    let (width, height) = board_dimensions(config.deck_size(), args.width, args.height);
    info!(width, height, cards = config.deck_size(), "Laying out the cards");

    let match_score = play_games(
        &config,
        (width, height),
        args.num_games,
        &mut rng,
        args.show_board,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&match_score)?);
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
