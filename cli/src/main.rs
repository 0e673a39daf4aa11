use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use pinchzoom::config::{ConfigError, Options};
use pinchzoom::replay::{ReplayError, Script, replay};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write output: {0}")]
    Write(#[from] io::Error),
    #[error(transparent)]
    Replay(#[from] ReplayError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "pinchzoom", about = "Replay touch gesture scripts through the pinch-zoom engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a gesture script and print one JSON record per step.
    Replay(ReplayCommand),
    /// Validate an options JSON file.
    CheckOptions {
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ReplayCommand {
    script: PathBuf,

    /// Options file replacing the script's own options.
    #[arg(long)]
    options: Option<PathBuf>,

    #[command(flatten)]
    overrides: OptionOverrides,
}

/// Per-field overrides applied on top of the script or file options.
#[derive(Args, Debug, Default)]
struct OptionOverrides {
    #[arg(long, env = "PINCHZOOM_TAP_ZOOM_FACTOR")]
    tap_zoom_factor: Option<f64>,

    #[arg(long, env = "PINCHZOOM_ZOOM_OUT_FACTOR")]
    zoom_out_factor: Option<f64>,

    #[arg(long, env = "PINCHZOOM_MIN_ZOOM")]
    min_zoom: Option<f64>,

    #[arg(long, env = "PINCHZOOM_MAX_ZOOM")]
    max_zoom: Option<f64>,

    #[arg(long, env = "PINCHZOOM_ANIMATION_DURATION")]
    animation_duration: Option<f64>,

    #[arg(long, env = "PINCHZOOM_LOCK_DRAG_AXIS")]
    lock_drag_axis: Option<bool>,
}

impl OptionOverrides {
    fn apply(&self, options: &mut Options) {
        let fields = [
            (self.tap_zoom_factor, &mut options.tap_zoom_factor),
            (self.zoom_out_factor, &mut options.zoom_out_factor),
            (self.min_zoom, &mut options.min_zoom),
            (self.max_zoom, &mut options.max_zoom),
            (self.animation_duration, &mut options.animation_duration),
        ];
        for (value, field) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(lock) = self.lock_drag_axis {
            options.lock_drag_axis = lock;
        }
    }
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Replay(command) => run_replay(&command),
        Command::CheckOptions { path } => run_check_options(&path),
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_owned(), source })
}

fn load_script(command: &ReplayCommand) -> Result<Script, CliError> {
    let mut script = Script::from_json(&read(&command.script)?)?;
    if let Some(path) = &command.options {
        script.options = Options::from_json(&read(path)?)?;
    }
    command.overrides.apply(&mut script.options);
    Ok(script)
}

fn run_replay(command: &ReplayCommand) -> Result<(), CliError> {
    let script = load_script(command)?;
    let records = replay(&script)?;
    info!(script = %command.script.display(), records = records.len(), "replayed gesture script");

    let mut out = BufWriter::new(io::stdout().lock());
    for record in &records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

fn run_check_options(path: &Path) -> Result<(), CliError> {
    let options = Options::from_json(&read(path)?)?;
    info!(path = %path.display(), "options are valid");
    println!("{}", serde_json::to_string_pretty(&options)?);
    Ok(())
}
