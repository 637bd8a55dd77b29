use std::env;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command as Process, ExitCode};

use clap::{Parser, Subcommand};
use tracing::{error, info};


#[derive(Debug, thiserror::Error)]
enum LauncherError {
    #[error("editor executable not found at {0}")]
    EditorNotFound(PathBuf),
    #[error("could not locate the launcher executable: {0}")]
    CurrentExe(#[source] io::Error),
    #[error("failed to start {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("the 3D engine is not implemented yet")]
    NotImplemented,
}

#[derive(Parser, Debug)]
#[command(name = "twod-launcher", about = "Start one of the editor engines")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the 2D level editor and return immediately.
    Twod {
        /// Editor executable; defaults to `twod` next to this launcher.
        #[arg(long, env = "TWOD_EDITOR")]
        editor: Option<PathBuf>,
        /// Arguments passed through to the editor.
        #[arg(last = true)]
        args: Vec<OsString>,
    },
    /// Reserved for the 3D engine.
    Threed,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Twod { editor, args } => launch_twod(editor.as_deref(), &args).map(|child| {
            info!(pid = child.id(), "editor started");
        }),
        Command::Threed => Err(LauncherError::NotImplemented),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "launch failed");
            ExitCode::FAILURE
        }
    }
}

fn launch_twod(explicit: Option<&Path>, args: &[OsString]) -> Result<Child, LauncherError> {
    let launcher = env::current_exe().map_err(LauncherError::CurrentExe)?;
    let editor = resolve_editor(explicit, &launcher)?;
    spawn_detached(&editor, args)
}

/// The editor binary's file name on this platform.
fn editor_file_name() -> String {
    format!("twod{}", env::consts::EXE_SUFFIX)
}

/// Pick the editor path: the explicit one if given, else the sibling of `launcher`.
fn resolve_editor(explicit: Option<&Path>, launcher: &Path) -> Result<PathBuf, LauncherError> {
    let candidate = match explicit {
        Some(path) => path.to_path_buf(),
        None => launcher.with_file_name(editor_file_name()),
    };
    if candidate.is_file() { Ok(candidate) } else { Err(LauncherError::EditorNotFound(candidate)) }
}

/// Start `path` and return without waiting for it to exit.
fn spawn_detached(path: &Path, args: &[OsString]) -> Result<Child, LauncherError> {
    info!(path = %path.display(), "starting editor");
    Process::new(path)
        .args(args)
        .spawn()
        .map_err(|source| LauncherError::Spawn { path: path.to_path_buf(), source })
}
