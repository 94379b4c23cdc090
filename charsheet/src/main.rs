//! Character roster CLI.
//!
//! Create, view and delete tabletop characters from a simple menu. The
//! roster lives in `characters.json` (or `--file` / `CHARSHEET_FILE`) and
//! is rewritten after every change and once more on exit or Ctrl+C.
//!
//! ```bash
//! cargo run -p charsheet -- --file party.json -v
//! ```

mod app;
mod terminal;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use charsheet_core::{
    flush_on_shutdown, wait_for_signal, Roster, RosterConfig, SharedRoster, Shutdown,
};
use clap::Parser;
use log::{info, warn};
use tokio::sync::Mutex;

use app::App;
use terminal::TerminalPrompt;
use ui::SheetTheme;

#[derive(Parser)]
#[command(name = "charsheet")]
#[command(about = "Create, view and delete tabletop RPG characters")]
#[command(version)]
struct Cli {
    /// Roster file (overrides CHARSHEET_FILE; default characters.json)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Verbose logging to stderr (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = RosterConfig::from_env();
    if let Some(file) = cli.file {
        config = config.with_data_file(file);
    }
    info!("Using roster file {}", config.data_file.display());

    let theme = SheetTheme::detect();

    let (roster, notice) = Roster::open(config.store()).await;
    if let Some(e) = notice {
        println!("{}", theme.error(&format!("Error loading characters: {e}")));
    }

    let roster: SharedRoster = Arc::new(Mutex::new(roster));
    let shutdown = Arc::new(Shutdown::new());
    spawn_shutdown_listener(roster.clone(), shutdown.clone());

    let mut prompt = TerminalPrompt::new(theme.clone());
    App::new(roster, shutdown, theme).run(&mut prompt).await;

    Ok(())
}

/// Flush and exit on Ctrl+C or SIGTERM.
fn spawn_shutdown_listener(roster: SharedRoster, shutdown: Arc<Shutdown>) {
    tokio::spawn(async move {
        let signal = match wait_for_signal().await {
            Ok(signal) => signal,
            Err(e) => {
                warn!("Could not listen for shutdown signals: {e}");
                return;
            }
        };

        println!(
            "\nReceived {}. Saving characters and exiting...",
            signal.name()
        );
        match flush_on_shutdown(&roster, &shutdown, signal).await {
            Some(Err(e)) => println!("Error saving characters: {e}"),
            Some(Ok(())) => {}
            // The menu is already saving on its way out.
            None => return,
        }
        std::process::exit(0);
    });
}

fn init_logging(verbosity: u8) {
    let mut builder = match verbosity {
        0 => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")),
        1 => {
            let mut builder = env_logger::Builder::new();
            builder.filter_level(log::LevelFilter::Info);
            builder
        }
        _ => {
            let mut builder = env_logger::Builder::new();
            builder.filter_level(log::LevelFilter::Debug);
            builder
        }
    };
    builder.target(env_logger::Target::Stderr);
    if builder.try_init().is_err() {
        eprintln!("Logger already initialized");
    }
}
