use std::path::{Path, PathBuf};

use anyhow::Result;
use devpair_core::dump::DEFAULT_DUMP_DIR;
use devpair_core::{load_classifier_config, ClassifierConfig};
use tracing_subscriber::EnvFilter;

pub mod commands;

/// Install the stderr log subscriber. `RUST_LOG` overrides the `warn` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Dump directory to search, falling back to the capture pipeline's default.
pub fn resolve_dump_dir(dir: Option<&str>) -> PathBuf {
    PathBuf::from(dir.unwrap_or(DEFAULT_DUMP_DIR))
}

/// Load the classifier config from `path`, or use the defaults when absent,
/// then apply a `--wait-ms` override.
pub fn load_config_or_default(path: Option<&Path>, wait_ms: Option<u64>) -> Result<ClassifierConfig> {
    let mut config = match path {
        Some(path) => load_classifier_config(path)?,
        None => ClassifierConfig::default(),
    };
    if let Some(wait_ms) = wait_ms {
        config.wait_ms = wait_ms;
    }
    Ok(config)
}
