//! Rendering interpreted receipts as JSON, CSV, or text.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use console::style;

use rcpt_core::models::config::RcptConfig;
use rcpt_core::receipt::rules::format_amount;
use rcpt_core::{ExtractionResult, LineItem, ReceiptSubmission, UploadResponse};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per line item
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// Parse a format name from the config file.
    pub fn from_name(name: &str) -> anyhow::Result<Self> {
        <Self as ValueEnum>::from_str(name, true)
            .map_err(|_| anyhow::anyhow!("Unknown output format in config: {}", name))
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Which shape of the interpretation to emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    /// The full extraction result.
    Result,
    /// The display-only upload response.
    Upload,
    /// The record to persist.
    Submission,
}

/// Output options shared by single-file commands.
#[derive(Args, Clone)]
pub struct OutputArgs {
    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (default: from config, else json)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Emit the upload response instead of the full result
    #[arg(long, conflicts_with = "submission")]
    pub upload: bool,

    /// Emit the receipt submission (zero items dropped, total recomputed)
    #[arg(long)]
    pub submission: bool,

    /// Pretty-print JSON
    #[arg(long)]
    pub pretty: bool,
}

impl OutputArgs {
    pub fn view(&self) -> View {
        if self.upload {
            View::Upload
        } else if self.submission {
            View::Submission
        } else {
            View::Result
        }
    }

    pub fn format(&self, config: &RcptConfig) -> anyhow::Result<OutputFormat> {
        match self.format {
            Some(format) => Ok(format),
            None => OutputFormat::from_name(&config.output.format),
        }
    }

    pub fn pretty(&self, config: &RcptConfig) -> bool {
        self.pretty || config.output.pretty
    }
}

/// Render an interpretation in the requested view and format.
pub fn render(
    result: &ExtractionResult,
    view: View,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match (view, format) {
        (View::Result, OutputFormat::Json) => to_json(result, pretty),
        (View::Upload, OutputFormat::Json) => to_json(&UploadResponse::from(result), pretty),
        (View::Submission, OutputFormat::Json) => {
            to_json(&ReceiptSubmission::from_extraction(result), pretty)
        }
        (View::Submission, OutputFormat::Csv) => {
            let submission = ReceiptSubmission::from_extraction(result);
            format_csv(
                &submission.store,
                None,
                submission.category.as_str(),
                Some(format_amount(submission.total).as_str()),
                &submission.items,
            )
        }
        (View::Upload, OutputFormat::Csv) => {
            let upload = UploadResponse::from(result);
            format_csv(
                &upload.store_name,
                None,
                upload.category.as_str(),
                upload.total_amount.map(format_amount).as_deref(),
                &upload.items,
            )
        }
        (View::Result, OutputFormat::Csv) => format_csv(
            &result.store_name,
            result.receipt_date.as_deref(),
            result.category.as_str(),
            result.total_amount.map(format_amount).as_deref(),
            &result.items,
        ),
        (View::Submission, OutputFormat::Text) => {
            Ok(format_submission_text(&ReceiptSubmission::from_extraction(result)))
        }
        (View::Upload, OutputFormat::Text) => Ok(format_upload_text(&UploadResponse::from(result))),
        (View::Result, OutputFormat::Text) => Ok(format_text(result)),
    }
}

/// Write rendered output to a file, or stdout.
pub fn write(output: &str, path: Option<&Path>) -> anyhow::Result<()> {
    if let Some(output_path) = path {
        fs::write(output_path, output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}

fn format_csv(
    store: &str,
    date: Option<&str>,
    category: &str,
    total: Option<&str>,
    items: &[LineItem],
) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "store_name",
        "receipt_date",
        "category",
        "total_amount",
        "item_name",
        "item_amount",
    ])?;

    let date = date.unwrap_or_default();
    let total = total.unwrap_or_default();

    if items.is_empty() {
        wtr.write_record([store, date, category, total, "", ""])?;
    }
    for item in items {
        wtr.write_record([
            store,
            date,
            category,
            total,
            item.name.as_str(),
            format_amount(item.amount).as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_items(output: &mut String, items: &[LineItem]) {
    if items.is_empty() {
        output.push_str("Items: none found\n");
        return;
    }

    output.push_str("Items:\n");
    let width = items.iter().map(|i| i.name.chars().count()).max().unwrap_or(0);
    for item in items {
        output.push_str(&format!(
            "  {:<width$}  {:>10}\n",
            item.name,
            format_amount(item.amount),
            width = width
        ));
    }
}

fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Store: {}\n", result.store_name));
    match (&result.receipt_date, result.parsed_date()) {
        (Some(raw), Some(date)) => output.push_str(&format!("Date: {} ({})\n", raw, date)),
        (Some(raw), None) => output.push_str(&format!("Date: {} (not a calendar date)\n", raw)),
        (None, _) => output.push_str("Date: not found\n"),
    }
    output.push_str(&format!("Category: {}\n", result.category));
    match result.total_amount {
        Some(total) => output.push_str(&format!("Total: {}\n", format_amount(total))),
        None => output.push_str("Total: not found\n"),
    }
    output.push('\n');

    format_items(&mut output, &result.items);
    output
}

fn format_upload_text(upload: &UploadResponse) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", upload.message));
    output.push_str(&format!("Store: {}\n", upload.store_name));
    output.push_str(&format!("Category: {}\n", upload.category));
    match upload.total_amount {
        Some(total) => output.push_str(&format!("Total: {}\n", format_amount(total))),
        None => output.push_str("Total: not found\n"),
    }
    output.push('\n');

    format_items(&mut output, &upload.items);
    output
}

fn format_submission_text(submission: &ReceiptSubmission) -> String {
    let mut output = String::new();

    output.push_str(&format!("Store: {}\n", submission.store));
    output.push_str(&format!("Category: {}\n", submission.category));
    output.push_str(&format!("Total: {}\n", format_amount(submission.total)));
    output.push('\n');

    format_items(&mut output, &submission.items);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn costco() -> ExtractionResult {
        rcpt_core::interpret(
            "Costco Wholesale\nPaper Towels $12.99\nPromotion -$2.00\nSubtotal $10.99\nGrand Total $10.99",
        )
    }

    #[test]
    fn test_format_from_name() {
        assert_eq!(OutputFormat::from_name("CSV").unwrap(), OutputFormat::Csv);
        assert!(OutputFormat::from_name("xml").is_err());
    }

    #[test]
    fn test_csv_has_row_per_item() {
        let csv = render(&costco(), View::Result, OutputFormat::Csv, false).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[2],
            "Costco Wholesale,,Groceries,10.99,Promotion for Paper Towels,-2.00"
        );
    }

    #[test]
    fn test_upload_json() {
        let json = render(&costco(), View::Upload, OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["message"], "OCR extraction successful");
        assert_eq!(value["total_amount"], "10.99");
        assert!(value.get("raw_text").is_none());
    }

    #[test]
    fn test_upload_csv_and_text_have_no_date() {
        let result = rcpt_core::interpret("Lyft\n03/01/2024\nRide $18.40");

        let csv = render(&result, View::Upload, OutputFormat::Csv, false).unwrap();
        assert_eq!(csv.lines().nth(1), Some("Lyft,,Transportation,18.40,Ride,18.40"));

        let text = render(&result, View::Upload, OutputFormat::Text, false).unwrap();
        assert!(text.starts_with("OCR extraction successful\n"));
        assert!(text.contains("Total: 18.40"));
        assert!(!text.contains("03/01/2024"));
        assert!(!text.contains("Date:"));
    }

    #[test]
    fn test_submission_text() {
        let text = render(&costco(), View::Submission, OutputFormat::Text, false).unwrap();
        assert!(text.contains("Total: 10.99"));
        assert!(text.contains("Promotion for Paper Towels"));
    }

    #[test]
    fn test_text_reports_missing_fields() {
        let text = render(&rcpt_core::interpret(""), View::Result, OutputFormat::Text, false).unwrap();
        assert!(text.contains("Store: Unknown"));
        assert!(text.contains("Total: not found"));
        assert!(text.contains("Items: none found"));
    }
}
