//! Guess the Number - CLI
//!
//! Number-guessing game with TUI and CLI modes. Finished rounds are saved to a
//! CSV file or a remote table.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use guess_number::{
    commands::run_simple,
    core::{DEFAULT_ALIAS, Difficulty},
    game::SessionRegistry,
    persistence::{DEFAULT_TABLE, SinkConfig},
};
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "guess_number",
    about = "Guess the secret number before you run out of attempts",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Difficulty of the first round: easy, medium (default) or hard
    #[arg(short, long, global = true, default_value = "medium")]
    difficulty: Difficulty,

    /// Your alias, stored with each result
    #[arg(short, long, global = true, env = "GUESS_ALIAS", default_value = DEFAULT_ALIAS)]
    alias: String,

    /// Where results are saved
    #[arg(long, global = true, env = "GUESS_STORE", value_enum, default_value_t = Store::Csv)]
    store: Store,

    /// CSV file for `--store csv`
    #[arg(long, global = true, env = "GUESS_CSV_PATH", default_value = "partidas.csv")]
    csv_path: PathBuf,

    /// Base URL of the remote store for `--store remote`
    #[arg(long, global = true, env = "SUPABASE_URL", hide_env_values = true)]
    remote_url: Option<String>,

    /// API key of the remote store
    #[arg(long, global = true, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    remote_key: Option<String>,

    /// Table receiving the results
    #[arg(long, global = true, default_value = DEFAULT_TABLE)]
    remote_table: String,

    /// Seed for reproducible secrets
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (line-based, no TUI)
    Simple,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Store {
    /// Local CSV file
    Csv,
    /// Remote REST table
    Remote,
}

impl Cli {
    fn sink_config(&self) -> Result<SinkConfig> {
        Ok(match self.store {
            Store::Csv => SinkConfig::Csv {
                path: self.csv_path.clone(),
            },
            Store::Remote => SinkConfig::Remote {
                base_url: self
                    .remote_url
                    .clone()
                    .context("--store remote needs --remote-url or SUPABASE_URL")?,
                api_key: self
                    .remote_key
                    .clone()
                    .context("--store remote needs --remote-key or SUPABASE_ANON_KEY")?,
                table: self.remote_table.clone(),
            },
        })
    }
}

/// Set up `env_logger`
///
/// `RUST_LOG` always wins. Without it the TUI stays silent unless logs go to a
/// file, since stderr output would corrupt the alternate screen.
fn init_logging(log_file: Option<&Path>, tui: bool) -> Result<()> {
    let default_filter = if tui && log_file.is_none() {
        "off"
    } else {
        "warn"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.as_ref().unwrap_or(&Commands::Play);
    init_logging(cli.log_file.as_deref(), matches!(command, Commands::Play))?;

    let sink = cli
        .sink_config()?
        .build()
        .context("cannot set up result storage")?;
    log::info!("saving results to {}", sink.describe());

    let mut registry = SessionRegistry::new(sink, cli.difficulty);
    if let Some(seed) = cli.seed {
        registry = registry.with_seed(seed);
    }

    match command {
        Commands::Play => run_play_command(registry, &cli.alias),
        Commands::Simple => run_simple(&mut registry, &cli.alias),
    }
}

fn run_play_command(registry: SessionRegistry, alias: &str) -> Result<()> {
    use guess_number::interactive::{App, run_tui};

    let app = App::new(registry, alias);
    run_tui(app)
}
