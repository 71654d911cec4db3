//! commentcov library - Measure comment coverage of Go source files
//!
//! This library exposes the command line plumbing of commentcov (config
//! loading, input discovery, output rendering) for testing and embedding.

pub mod config;
pub mod output;

use commentcov_core::WalkSources;
use config::Config;
use eyre::{Result, WrapErr};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Where the config is looked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = ".config/commentcov/config.yaml";

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        eyre::bail!(
            "Config file not found at {}\n\n\
             Create a config file such as:\n\n\
             keep_lint_annotations: false\n\
             format: text",
            path.display()
        );
    }

    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = facet_yaml::from_str(&content)
        .wrap_err_with(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

/// Load config if it exists, otherwise return the default config.
pub fn load_config_or_default(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }

    match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            Config::default()
        }
    }
}

/// Expand the command line inputs into the Go files to measure.
///
/// Files are taken as given; directories are walked for `.go` files. A file
/// reached through several inputs is kept once, at its first occurrence.
pub fn collect_go_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let found = WalkSources::new(path)
                .paths()
                .wrap_err_with(|| format!("Failed to walk {}", path.display()))?;
            files.extend(found);
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            eyre::bail!("No such file or directory: {}", path.display());
        }
    }

    let mut seen = HashSet::new();
    files.retain(|file| seen.insert(file.canonicalize().unwrap_or_else(|_| file.clone())));

    Ok(files)
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the default level
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
