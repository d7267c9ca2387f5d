//! CLI module for gifcut
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::adapters::LogFormat;

pub mod args;
pub mod commands;

/// gifcut - trim a video and turn the segment into an animated GIF
#[derive(Parser, Debug)]
#[command(name = "gifcut")]
#[command(about = "Trim a video clip and convert it to an animated GIF")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a segment of a video file to a GIF
    Convert(args::ConvertArgs),
    /// Print the duration of a video file
    Probe(args::ProbeArgs),
    /// List the configured presets
    Presets(args::PresetsArgs),
}
