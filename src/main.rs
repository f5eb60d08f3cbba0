use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use fruit_worm::game::GameConfig;
use fruit_worm::highscores::{HighScoreLedger, JsonFileStore};
use fruit_worm::logging::{self, LogTarget};
use fruit_worm::modes::{HumanMode, PlayOptions, print_scores};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fruit_worm")]
#[command(version, about = "Grid worm arcade game with colour bonuses")]
struct Cli {
    /// What to run
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// JSON game configuration; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// High-score file
    #[arg(long, default_value = "fruit_worm_scores.json")]
    scores: PathBuf,

    /// Slower tick for touch-style play
    #[arg(long)]
    mobile: bool,

    /// Ring the terminal bell on game events
    #[arg(long)]
    bell: bool,

    /// Seed for reproducible fruit placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play with keyboard controls
    Play,
    /// Print the high-score table
    Scores,
}

fn load_config(path: Option<&PathBuf>) -> Result<GameConfig> {
    let config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            serde_json::from_str(&raw).context("Failed to parse config")?
        }
        None => GameConfig::default(),
    };
    config.validate().map_err(|err| anyhow!("Invalid config: {}", err))?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let target = match (&cli.log_file, &cli.mode) {
        (Some(path), _) => LogTarget::File(path.as_path()),
        (None, Mode::Scores) => LogTarget::Stderr,
        (None, Mode::Play) => LogTarget::Disabled,
    };
    logging::init(target, cli.verbose)?;

    let config = load_config(cli.config.as_ref())?;
    let ledger = HighScoreLedger::from_config(JsonFileStore::new(&cli.scores), &config);

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Play => {
            let options = PlayOptions {
                mobile: cli.mobile,
                bell: cli.bell,
                seed: cli.seed,
            };
            let mut human_mode = HumanMode::new(config, ledger, options);
            human_mode.run().await?;
        }
        Mode::Scores => {
            print_scores(&ledger, &mut std::io::stdout().lock())?;
        }
    }

    Ok(())
}
