//! chapterino CLI entrypoint.
//!
//! Thin adapter around the core pipeline: gathers the container path, the
//! activation bytes and the output settings from flags, environment and
//! config file, then runs probe → per-chapter transcode → archive.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chapterino_core::{
    load_config, load_config_from_env, validate_config, ActivationBytes, AudioFormat,
    ConversionPipeline, ConversionRequest, FfmpegTranscoder, FfprobeProber, ZipArchiver,
};

/// Convert a protected audiobook into per-chapter audio files plus a zip.
#[derive(Parser, Debug)]
#[command(name = "chapterino")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the input .aax container
    container: PathBuf,

    /// 8-hex-character activation bytes (falls back to the config file)
    #[arg(env = "ACTIVATION_BYTES")]
    activation_bytes: Option<String>,

    /// Output directory (default: <output.dir>/<stem>_chapters_<ext>)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Encoder VBR quality (0 = best, 9 = worst)
    #[arg(short, long)]
    quality: Option<String>,

    /// Target codec: mp3 or ogg
    #[arg(short, long)]
    format: Option<String>,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn parse_format(value: &str) -> Result<AudioFormat> {
    match value {
        "mp3" => Ok(AudioFormat::Mp3),
        "ogg" | "vorbis" | "ogg_vorbis" => Ok(AudioFormat::OggVorbis),
        other => bail!("unsupported format: {other} (expected mp3 or ogg)"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    run(Cli::parse()).await
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => load_config_from_env().context("Failed to load configuration")?,
    };
    validate_config(&config).context("Configuration validation failed")?;

    if !cli.container.is_file() {
        bail!("Input file not found: {}", cli.container.display());
    }

    let key = match cli.activation_bytes.as_deref() {
        Some(raw) => raw
            .parse::<ActivationBytes>()
            .context("Activation bytes must be 8 hex characters")?,
        None => config
            .audible
            .activation_bytes
            .clone()
            .context("No activation bytes given (argument, $ACTIVATION_BYTES or config file)")?,
    };

    let mut profile = config.output.profile.clone();
    if let Some(quality) = cli.quality {
        profile.vbr_quality = quality;
    }
    if let Some(format) = cli.format.as_deref() {
        profile.format = parse_format(format)?;
    }

    let stem = cli
        .container
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("audiobook");
    let book_dir_name = format!("{}_chapters_{}", stem, profile.format.extension());
    let output_dir = cli
        .out
        .clone()
        .unwrap_or_else(|| config.output.dir.join(&book_dir_name));
    let archive_path = output_dir
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_default()
        .join(format!("{}.zip", book_dir_name));

    let pipeline = ConversionPipeline::new(
        FfprobeProber::new(config.tools.clone()),
        FfmpegTranscoder::new(config.tools.clone()),
        ZipArchiver::new(),
    );
    pipeline
        .validate()
        .await
        .context("External tool check failed")?;

    info!("Extracting chapters from {}", cli.container.display());
    let request = ConversionRequest {
        container: cli.container.clone(),
        key,
        output_dir: output_dir.clone(),
        profile,
    };
    let outcome = pipeline.convert_and_archive(&request, &archive_path).await?;

    println!(
        "Created {} files in {}",
        outcome.chapter_files.len(),
        output_dir.display()
    );
    for file in &outcome.chapter_files {
        println!("  {}", file.display());
    }
    println!("Archive written to {}", outcome.archive.archive_path.display());

    Ok(())
}
