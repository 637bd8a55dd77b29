mod clock;
mod script;
mod shell;
mod snapshot;


use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, info, warn};
use twod_canvas::config::EngineConfig;
use twod_canvas::engine::Engine;
use twod_canvas::settings::SettingsStore;

use crate::clock::FrameClock;
use crate::script::ScriptReader;
use crate::shell::{RunSummary, Shell, ShellError};

#[derive(Parser, Debug)]
#[command(name = "twod", about = "TwoD level editor: pannable, zoomable tile grid with a settings panel")]
struct Cli {
    /// Settings file.
    #[arg(long, env = "TWOD_SETTINGS_FILE")]
    settings: Option<PathBuf>,

    /// JSON-lines input script; stdin when absent.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Write the last rendered frame to this PNG file.
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Run frames back to back instead of at the configured frame rate.
    #[arg(long)]
    no_throttle: bool,

    /// Stop after this many frames.
    #[arg(long)]
    max_frames: Option<u64>,
}

fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "ignoring unreadable .env"),
    }

    let cli = Cli::parse();
    match run(cli) {
        Ok(summary) => {
            info!(frames = summary.frames, commits = summary.commits, quit = summary.quit, "editor closed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "editor failed");
            eprintln!("twod: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<RunSummary, ShellError> {
    let mut config = EngineConfig::from_env()?;
    if let Some(path) = &cli.settings {
        config.settings_path = path.clone();
    }
    info!(settings = %config.settings_path.display(), frame_rate = config.frame_rate, "starting editor");

    let store = SettingsStore::new(config.settings_path.clone());
    let settings = store.load();
    let clock = if cli.no_throttle { FrameClock::unthrottled() } else { FrameClock::new(config.frame_rate) };
    let engine = Engine::new(config, settings);

    let summary = match &cli.script {
        Some(path) => {
            let file = File::open(path).map_err(|source| ShellError::OpenScript { path: path.clone(), source })?;
            drive(engine, store, BufReader::new(file), clock, &cli)?
        }
        None => drive(engine, store, io::stdin().lock(), clock, &cli)?,
    };
    Ok(summary)
}

fn drive<R: io::BufRead>(
    engine: Engine,
    store: SettingsStore,
    input: R,
    clock: FrameClock,
    cli: &Cli,
) -> Result<RunSummary, ShellError> {
    let mut shell = Shell::new(engine, store, ScriptReader::new(input), clock).with_max_frames(cli.max_frames);
    let summary = shell.run()?;
    if let Some(path) = &cli.snapshot {
        snapshot::save_png(shell.engine().frame(), path)?;
    }
    Ok(summary)
}
