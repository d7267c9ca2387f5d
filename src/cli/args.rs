//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the convert command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Named preset (e.g. 10s, 30s, 1m); starts at 00:00:00
    #[arg(short, long, conflicts_with_all = ["start", "end"])]
    pub preset: Option<String>,

    /// Start time (HH:MM:SS, MM:SS or seconds); defaults to 00:00:00
    #[arg(short, long)]
    pub start: Option<String>,

    /// End time (HH:MM:SS, MM:SS or seconds); defaults to the media duration
    #[arg(short, long)]
    pub end: Option<String>,

    /// Output file path (default: <stem>-<timestamp>.gif in the output directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Ffmpeg executable to use
    #[arg(long)]
    pub ffmpeg: Option<PathBuf>,

    /// Print a JSON report instead of the output URL
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the presets command
#[derive(Args, Debug)]
pub struct PresetsArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
