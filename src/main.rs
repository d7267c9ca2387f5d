//! gifcut CLI
//!
//! Trims a video to a time range and converts the segment to an animated GIF.
//!
//! # Usage
//!
//! ```bash
//! gifcut convert --input video.mp4 --preset 10s
//! gifcut convert --input video.mp4 --start 00:01:00 --end 00:01:30 --output clip.gif
//! gifcut probe --input video.mp4
//! gifcut presets --json
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use gifcut::adapters::init_logging;
use gifcut::cli::{commands, Cli, Commands};
use gifcut::config_initialization::initialize_configuration_hierarchy;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let resolved = initialize_configuration_hierarchy(&cli)?;
    let config = resolved.config;
    init_logging(&config.log_level, config.log_format)?;

    for note in &resolved.notes {
        debug!("{}", note);
    }
    info!("Starting gifcut");

    match cli.command {
        Commands::Convert(args) => {
            info!("Executing convert command");
            commands::convert(args, &config).await?;
        }
        Commands::Probe(args) => {
            info!("Executing probe command");
            commands::probe(args, &config).await?;
        }
        Commands::Presets(args) => {
            commands::presets(args, &config)?;
        }
    }

    Ok(())
}
