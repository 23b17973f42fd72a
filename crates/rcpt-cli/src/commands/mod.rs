//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod interpret;
pub mod output;
pub mod scan;

use std::path::Path;

use tracing::debug;

use rcpt_core::models::config::RcptConfig;

/// Load configuration from `--config`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<RcptConfig> {
    if let Some(path) = config_path {
        return Ok(RcptConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(RcptConfig::from_file(&default_path)?)
    } else {
        Ok(RcptConfig::default())
    }
}
