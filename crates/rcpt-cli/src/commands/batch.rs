//! Batch processing command for multiple receipt files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, error, warn};

use rcpt_core::models::config::RcptConfig;
use rcpt_core::receipt::rules::format_amount;
use rcpt_core::{load_image, scan_image, ExtractionResult, PureOcrEngine, RuleInterpreter};

use super::load_config;
use super::output::{self, OutputFormat, View};

const TEXT_EXTENSIONS: &[&str] = &["txt"];
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tiff", "tif", "bmp"];

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for one result file per input
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Write a summary CSV (into the output directory, else stdout)
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Model directory for image inputs (default: from config)
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    result: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

/// One row of the summary CSV.
#[derive(Serialize)]
struct SummaryRow<'a> {
    file: String,
    status: &'static str,
    store_name: &'a str,
    receipt_date: &'a str,
    category: &'a str,
    total_amount: String,
    item_count: usize,
    error: &'a str,
    processing_time_ms: u64,
}

/// Lazily created OCR engine, shared by every image in the batch.
struct Ocr<'a> {
    config: &'a RcptConfig,
    model_dir: PathBuf,
    engine: Option<PureOcrEngine>,
}

impl<'a> Ocr<'a> {
    fn engine(&mut self) -> anyhow::Result<&PureOcrEngine> {
        if self.engine.is_none() {
            debug!("Loading OCR models from {}", self.model_dir.display());
            self.engine = Some(PureOcrEngine::from_dir(
                &self.model_dir,
                self.config.ocr.clone(),
            )?);
        }
        self.engine
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("OCR engine unavailable"))
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_text(p) || is_image(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut ocr = Ocr {
        config: &config,
        model_dir: args
            .model_dir
            .clone()
            .unwrap_or_else(|| config.ocr.model_dir.clone()),
        engine: None,
    };

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let outcome = process_single_file(&path, &mut ocr);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match outcome {
            Ok(result) => {
                if let Some(ref output_dir) = args.output_dir {
                    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("receipt");
                    let output_path = output_dir.join(format!("{}.{}", stem, args.format.extension()));
                    let rendered = output::render(&result, View::Result, args.format, true)?;
                    fs::write(&output_path, rendered)?;
                }

                results.push(ProcessResult {
                    path,
                    result: Some(result),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                error!("Failed to process {}: {}", path.display(), e);

                if !args.continue_on_error {
                    pb.abandon();
                    return Err(e.context(format!("processing {}", path.display())));
                }

                results.push(ProcessResult {
                    path,
                    result: None,
                    error: Some(e.to_string()),
                    processing_time_ms,
                });
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    if args.summary {
        let summary = format_summary(&results)?;
        match args.output_dir {
            Some(ref output_dir) => {
                let summary_path = output_dir.join("summary.csv");
                fs::write(&summary_path, summary)?;
                eprintln!(
                    "{} Summary written to {}",
                    style("✓").green(),
                    summary_path.display()
                );
            }
            None => print!("{}", summary),
        }
    }

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    let succeeded = results.len() - failed;

    eprintln!(
        "{} Processed {} files: {} succeeded, {} failed in {:.1}s",
        if failed == 0 { style("✓").green() } else { style("!").yellow() },
        results.len(),
        succeeded,
        failed,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

fn process_single_file(path: &Path, ocr: &mut Ocr<'_>) -> anyhow::Result<ExtractionResult> {
    if is_text(path) {
        let bytes = fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes);
        return Ok(RuleInterpreter::new().interpret(&text));
    }

    let image = load_image(path)?;
    let engine = ocr.engine()?;
    let result = scan_image(engine, &image)?;

    if result.raw_text.trim().is_empty() {
        warn!("No text detected in {}", path.display());
    }

    Ok(result)
}

fn format_summary(results: &[ProcessResult]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    for r in results {
        let row = match &r.result {
            Some(result) => SummaryRow {
                file: r.path.display().to_string(),
                status: "ok",
                store_name: &result.store_name,
                receipt_date: result.receipt_date.as_deref().unwrap_or_default(),
                category: result.category.as_str(),
                total_amount: result.total_amount.map(format_amount).unwrap_or_default(),
                item_count: result.items.len(),
                error: "",
                processing_time_ms: r.processing_time_ms,
            },
            None => SummaryRow {
                file: r.path.display().to_string(),
                status: "error",
                store_name: "",
                receipt_date: "",
                category: "",
                total_amount: String::new(),
                item_count: 0,
                error: r.error.as_deref().unwrap_or_default(),
                processing_time_ms: r.processing_time_ms,
            },
        };
        wtr.serialize(row)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn is_text(path: &Path) -> bool {
    has_extension(path, TEXT_EXTENSIONS)
}

fn is_image(path: &Path) -> bool {
    has_extension(path, IMAGE_EXTENSIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_filters() {
        assert!(is_text(Path::new("scans/receipt.TXT")));
        assert!(is_image(Path::new("scans/receipt.jpeg")));
        assert!(!is_image(Path::new("scans/receipt.pdf")));
        assert!(!is_text(Path::new("scans/receipt")));
    }

    #[test]
    fn test_summary_rows() {
        let results = vec![
            ProcessResult {
                path: PathBuf::from("a.txt"),
                result: Some(rcpt_core::interpret("Uber\nRide $14.20")),
                error: None,
                processing_time_ms: 1,
            },
            ProcessResult {
                path: PathBuf::from("b.png"),
                result: None,
                error: Some("could not read the image".to_string()),
                processing_time_ms: 2,
            },
        ];

        let summary = format_summary(&results).unwrap();
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(
            lines[0],
            "file,status,store_name,receipt_date,category,total_amount,item_count,error,processing_time_ms"
        );
        assert_eq!(lines[1], "a.txt,ok,Uber,,Transportation,14.20,1,,1");
        assert_eq!(lines[2], "b.png,error,,,,,0,could not read the image,2");
    }
}
