//! commentcov - Measure comment coverage of Go source files
//!
//! commentcov parses Go files and lists every documentable entity (package,
//! functions, variables and constants, types) with the header and inline
//! comments attached to it.

use clap::Parser;
use commentcov::output::{OutputFormat, render_items};
use commentcov::{
    DEFAULT_CONFIG_PATH, collect_go_files, init_tracing, load_config, load_config_or_default,
};
use commentcov_core::{MeasureOptions, PathSources, measure_coverage};
use eyre::{Result, WrapErr};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

/// CLI arguments
#[derive(Debug, Parser)]
#[command(name = "commentcov", version, about)]
struct Args {
    /// Go files or directories to measure (default: current directory)
    paths: Vec<PathBuf>,

    /// Path to config file (default: .config/commentcov/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format: text, json
    #[arg(short, long)]
    format: Option<String>,

    /// Keep comments that only hold a nolint annotation or directives
    #[arg(long)]
    keep_lint_annotations: bool,

    /// List comment texts and enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => load_config_or_default(Path::new(DEFAULT_CONFIG_PATH)),
    };

    let format_name = args
        .format
        .as_deref()
        .or(config.format.as_deref())
        .unwrap_or("text");
    let format = OutputFormat::from_str(format_name).ok_or_else(|| {
        eyre::eyre!("Unknown output format '{}' (expected text or json)", format_name)
    })?;

    let options = MeasureOptions {
        keep_lint_annotations: args.keep_lint_annotations || config.keep_lint_annotations,
    };

    let roots = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths
    };
    let files = collect_go_files(&roots)?;

    eprintln!(
        "{} Measuring {} Go files...",
        "->".blue().bold(),
        files.len().to_string().green()
    );

    let items = measure_coverage(PathSources::new(files), &options)
        .wrap_err("Failed to measure comment coverage")?;

    print!("{}", render_items(&items, format, args.verbose)?);

    Ok(())
}
