//! Interpret command - structure receipt text that was already recognized.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use tracing::{debug, info};

use rcpt_core::RuleInterpreter;

use super::load_config;
use super::output::{self, OutputArgs};

/// Arguments for the interpret command.
#[derive(Args)]
pub struct InterpretArgs {
    /// Text file with OCR output ("-" or omitted reads stdin)
    input: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,
}

pub async fn run(args: InterpretArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let text = read_text(args.input.as_deref())?;
    info!("Interpreting {} characters of receipt text", text.len());

    let result = RuleInterpreter::new().interpret(&text);

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

/// Read receipt text from a file, or stdin for `None` / `-`.
///
/// Invalid UTF-8 is replaced rather than rejected; OCR output is often noisy.
pub fn read_text(input: Option<&Path>) -> anyhow::Result<String> {
    let bytes = match input {
        Some(path) if path != Path::new("-") => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            fs::read(path)?
        }
        _ => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
