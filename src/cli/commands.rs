//! Command implementations

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::adapters::AppConfig;
use crate::app::{AppContainer, ClipConverter, ConverterView};
use crate::cli::args::{ConvertArgs, PresetsArgs, ProbeArgs};
use crate::domain::model::{Bound, ConversionState, MediaSource, TimeField, TimeSpec};
use crate::error::{GifcutError, GifcutResult};
use crate::ports::ResultSink;

/// Machine-readable summary of a finished conversion
#[derive(Debug, Serialize)]
struct ConvertReport {
    input: String,
    output_url: String,
    selection: String,
    start: TimeSpec,
    end: TimeSpec,
    offset_secs: u64,
    duration_secs: u64,
}

#[derive(Debug, Serialize)]
struct ProbeReport {
    input: String,
    duration: TimeSpec,
    duration_secs: u64,
}

/// Execute the convert command
pub async fn convert(args: ConvertArgs, config: &AppConfig) -> Result<()> {
    info!("Starting convert operation");
    info!("Input: {}", args.input.display());

    ensure_input(&args.input)?;

    let container = AppContainer::new(config.clone());
    let config = container.config();
    let sink: Arc<dyn ResultSink> = Arc::new(|url: String| info!(url = %url, "Output ready"));
    let converter = container.clip_converter(sink, args.output.clone());

    converter.mount();
    converter.set_source(Some(MediaSource::new(&args.input)));

    let view = converter
        .wait_until(config.engine_load_timeout(), |view| {
            view.ready || matches!(view.state, ConversionState::Failed(_))
        })
        .await
        .ok_or_else(|| GifcutError::Timeout {
            what: "ffmpeg to load".to_string(),
        })?;
    if let ConversionState::Failed(reason) = view.state {
        anyhow::bail!("Failed to load ffmpeg: {}", reason);
    }

    let duration_known = wait_for_duration(&converter, config).await.is_some();
    if !duration_known {
        warn!("Media duration unknown");
    }

    if let Some(preset) = &args.preset {
        converter
            .select(preset)
            .with_context(|| format!("Invalid preset '{}'", preset))?;
    } else {
        if args.end.is_none() && !duration_known {
            anyhow::bail!("Media duration is unknown; pass --end explicitly");
        }
        converter.select_custom();
        if let Some(start) = &args.start {
            set_bound(&converter, Bound::Start, start)?;
        }
        if let Some(end) = &args.end {
            set_bound(&converter, Bound::End, end)?;
        }
    }

    let before = converter.view();
    info!("Range: {} -> {} ({})", before.start, before.end, before.selection);

    let url = converter.submit().await.context("Conversion failed")?;

    if args.json {
        let offset_secs = before.start.total_seconds();
        let report = ConvertReport {
            input: args.input.display().to_string(),
            output_url: url,
            selection: before.selection,
            start: before.start,
            end: before.end,
            offset_secs,
            duration_secs: before.end.total_seconds().saturating_sub(offset_secs),
        };
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize convert report to JSON")?;
        println!("{}", json);
    } else {
        println!("{}", url);
    }

    info!("Convert operation completed successfully");
    Ok(())
}

/// Execute the probe command
pub async fn probe(args: ProbeArgs, config: &AppConfig) -> Result<()> {
    info!("Starting probe operation");
    info!("Input: {}", args.input.display());

    ensure_input(&args.input)?;

    let container = AppContainer::new(config.clone());
    let converter = container.clip_converter(Arc::new(|_url: String| {}), None);
    converter.set_source(Some(MediaSource::new(&args.input)));

    let view = wait_for_duration(&converter, container.config())
        .await
        .ok_or_else(|| anyhow::anyhow!("Could not determine media duration"))?;

    if args.json {
        let report = ProbeReport {
            input: args.input.display().to_string(),
            duration: view.video_duration,
            duration_secs: view.video_duration.total_seconds(),
        };
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize probe report to JSON")?;
        println!("{}", json);
    } else {
        println!("{}", view.video_duration);
    }

    Ok(())
}

/// Execute the presets command
pub fn presets(args: PresetsArgs, config: &AppConfig) -> Result<()> {
    let container = AppContainer::new(config.clone());
    let converter = container.clip_converter(Arc::new(|_url: String| {}), None);

    if args.json {
        let json = serde_json::to_string_pretty(converter.presets())
            .context("Failed to serialize presets to JSON")?;
        println!("{}", json);
        return Ok(());
    }

    for preset in converter.presets() {
        println!(
            "{:<8} {}",
            preset.label,
            TimeSpec::from_total_seconds(u64::from(preset.duration_secs))
        );
    }
    println!("{:<8} (start and end given explicitly)", "custom");
    Ok(())
}

fn ensure_input(path: &Path) -> GifcutResult<()> {
    if !path.exists() {
        return Err(GifcutError::InputFileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

/// Wait for the duration poll to settle, `None` when it failed or timed out
async fn wait_for_duration(converter: &ClipConverter, config: &AppConfig) -> Option<ConverterView> {
    converter
        .wait_until(config.duration_discovery_timeout(), |view| {
            view.duration_known || view.error.is_some()
        })
        .await
        .filter(|view| view.duration_known)
}

fn set_bound(converter: &ClipConverter, bound: Bound, text: &str) -> Result<()> {
    let time = TimeSpec::parse(text).with_context(|| format!("Invalid time '{}'", text))?;
    for field in [TimeField::Hours, TimeField::Minutes, TimeField::Seconds] {
        converter
            .set_field(bound, field, time.get(field))
            .with_context(|| format!("Invalid time '{}'", text))?;
    }
    Ok(())
}
