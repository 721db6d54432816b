//! The uastify Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::path::{Path, PathBuf};
use std::process;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use crate::cli::args::{Command, UastifyArgs};
use crate::drivers::{python, Driver, DriverManifest, DriverRegistry};
use crate::errors::{print_error, UastError};
use crate::pipeline::{JsonNativeParser, ParseRequest, ParseService};
use crate::uast::Role;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = UastifyArgs::parse();
    init_tracing(args.verbose);

    // Dispatch to the appropriate subcommand handler.
    let result = match args.command {
        Command::Parse {
            file,
            language,
            driver,
            compact,
            outline,
        } => handle_parse(&file, language, driver.as_deref(), compact, outline),
        Command::Bench { language, paths } => handle_bench(&language, &paths),
        Command::Roles => {
            handle_roles();
            Ok(())
        }
        Command::Config { language } => handle_config(&language),
    };

    if let Err(e) = result {
        print_error(e);
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_input(path: &Path) -> Result<String, UastError> {
    std::fs::read_to_string(path).map_err(|e| UastError::io(path.display().to_string(), e))
}

/// Handles the `parse` subcommand.
fn handle_parse(
    file: &Path,
    language: Option<String>,
    manifest: Option<&Path>,
    compact: bool,
    outline: bool,
) -> Result<(), UastError> {
    let mut registry = DriverRegistry::with_builtin();
    let mut default_language = python::LANGUAGE.to_string();
    if let Some(path) = manifest {
        let driver = Driver::from_manifest(DriverManifest::load(path)?);
        default_language = driver.language().to_string();
        registry.register(driver);
    }
    let language = language.unwrap_or(default_language);

    let content = read_input(file)?;
    let service = ParseService::new(registry, JsonNativeParser);
    let request = ParseRequest::new(language, content).with_filename(file.display().to_string());
    let tree = service.normalize(&request)?;
    if outline {
        print!("{}", tree.outline());
        Ok(())
    } else {
        output::print_uast(&tree, compact)
    }
}

/// Handles the `bench` subcommand.
///
/// Files are normalized one after another; the first failure stops the run.
/// A zero-byte file ends the run early and successfully; whitespace-only
/// content is an ordinary input and fails to decode.
fn handle_bench(language: &str, paths: &[PathBuf]) -> Result<(), UastError> {
    let service = ParseService::with_builtin();
    // Fail on an unknown language before touching the filesystem.
    service.registry().get(language)?;

    let files = collect_files(paths)?;
    info!(language, files = files.len(), "starting bench run");

    let mut total = Duration::ZERO;
    let mut done = 0;
    for file in &files {
        let content = read_input(file)?;
        if content.is_empty() {
            output::print_bench_stop(file);
            break;
        }
        let request = ParseRequest::new(language, content).with_filename(file.display().to_string());
        let started = Instant::now();
        let result = service.normalize(&request);
        let elapsed = started.elapsed();
        total += elapsed;
        match result {
            Ok(tree) => output::print_bench_ok(file, elapsed, tree.count()),
            Err(e) => {
                output::print_bench_failed(file, elapsed);
                return Err(e);
            }
        }
        done += 1;
    }
    output::print_bench_summary(done, total);
    Ok(())
}

/// Expands directories recursively, in sorted order.
fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, UastError> {
    let mut files = Vec::new();
    for root in paths {
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .unwrap_or(root.as_path())
                    .display()
                    .to_string();
                UastError::io(path, e.into())
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
    }
    debug!(count = files.len(), "collected bench inputs");
    Ok(files)
}

/// Handles the `roles` subcommand.
fn handle_roles() {
    for role in Role::all() {
        println!("{role}");
    }
}

/// Handles the `config` subcommand.
fn handle_config(language: &str) -> Result<(), UastError> {
    let registry = DriverRegistry::with_builtin();
    let driver = registry.get(language)?;
    let text = serde_yaml::to_string(driver.builder().config()).map_err(|e| UastError::Encode {
        message: e.to_string(),
    })?;
    print!("{text}");
    Ok(())
}
