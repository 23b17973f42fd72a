//! Scan command - OCR a receipt image, then interpret it.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use rcpt_core::{load_image, scan_image, PureOcrEngine};

use super::load_config;
use super::output::{self, OutputArgs};

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// Receipt image (png, jpg, tiff, bmp)
    #[arg(required = true)]
    input: PathBuf,

    /// Model directory (default: from config)
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Also print the recognized text to stderr
    #[arg(long)]
    show_text: bool,

    #[command(flatten)]
    output: OutputArgs,
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Loading image...");
    pb.set_position(10);
    let image = load_image(&args.input)?;

    pb.set_message("Loading OCR models...");
    pb.set_position(30);
    let model_dir = args
        .model_dir
        .clone()
        .unwrap_or_else(|| config.ocr.model_dir.clone());
    let engine = PureOcrEngine::from_dir(&model_dir, config.ocr.clone()).map_err(|e| {
        anyhow::anyhow!(
            "{}\n\nPlace the OCR models in {} or pass --model-dir.",
            e,
            model_dir.display()
        )
    })?;

    pb.set_message("Running OCR...");
    pb.set_position(50);
    let result = scan_image(&engine, &image)?;

    pb.finish_and_clear();

    if args.show_text {
        eprintln!("{}", style("Recognized text:").blue());
        eprintln!("{}", result.raw_text);
        eprintln!();
    }

    let rendered = output::render(
        &result,
        args.output.view(),
        args.output.format(&config)?,
        args.output.pretty(&config),
    )?;
    output::write(&rendered, args.output.output.as_deref())?;

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
