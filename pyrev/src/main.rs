//! pyrev — pyright findings on the lines a change actually touched.
//!
//! The binary plays the host role around `pyrev-core`: it computes the diff
//! with git2 in the current directory, hands the owned patches to
//! [`PyrightRunner`], prints each resulting review message as
//! `path:line: severity: message`, and exits nonzero when any error-severity
//! finding landed on the diff.
//!
//! pyright runs in the process's working directory, so invoke pyrev from the
//! project root the checker should analyze.

mod git;

use std::process::ExitCode;

use pyrev_core::{PyrightRunner, ReviewMessage, Severity};
use tracing_subscriber::EnvFilter;

use crate::git::types::DiffMode;

/// Returns the path to the pyrev config file.
///
/// Prefers `$XDG_CONFIG_HOME/pyrev/config.toml`; falls back to
/// `~/.config/pyrev/config.toml` when the env var is absent.
fn config_path() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(std::path::PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| std::path::PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| std::path::PathBuf::from(".config"));
    base.join("pyrev").join("config.toml")
}

/// Loads the default base ref from `~/.config/pyrev/config.toml`.
///
/// Returns `None` if the file does not exist, cannot be parsed, or has no
/// `base` key. Config errors are soft failures reported as warnings.
fn load_default_base() -> Option<String> {
    let path = config_path();
    let raw = std::fs::read_to_string(&path).ok()?;
    let table: toml::Table = match toml::from_str(&raw) {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!("config parse error in {:?}: {}", path, e);
            return None;
        }
    };
    table.get("base").and_then(|v| v.as_str()).map(str::to_owned)
}

/// Resolves the diff mode from argv.
///
/// Accepted forms: no arguments (unstaged, or the configured base ref when
/// one is set), `--staged`, `--base <ref>`, or a `<from>..<to>` range.
fn parse_mode(args: &[String]) -> Result<DiffMode, String> {
    const USAGE: &str = "usage: pyrev [--staged | --base <ref> | <from>..<to>]";

    match args {
        [] => Ok(match load_default_base() {
            Some(base) => DiffMode::Base(base),
            None => DiffMode::Unstaged,
        }),
        [flag] if flag == "--staged" => Ok(DiffMode::Staged),
        [flag, base] if flag == "--base" => Ok(DiffMode::Base(base.clone())),
        [range] => match range.split_once("..") {
            Some((from, to)) if !from.is_empty() && !to.is_empty() => Ok(DiffMode::CommitRange {
                from: from.to_owned(),
                to: to.to_owned(),
            }),
            _ => Err(format!("unrecognised argument `{range}`\n{USAGE}")),
        },
        _ => Err(USAGE.to_owned()),
    }
}

/// Computes patches for `mode` in the current directory and runs the plugin.
fn review(mode: &DiffMode) -> Result<Vec<ReviewMessage>, Box<dyn std::error::Error>> {
    let patches = git::patches::load_patches(".", mode)?;
    tracing::debug!(patches = patches.len(), ?mode, "loaded diff");

    let runner = PyrightRunner::new(&patches, mode.commit());
    Ok(runner.run()?)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mode = match parse_mode(&args) {
        Ok(mode) => mode,
        Err(usage) => {
            eprintln!("pyrev: {usage}");
            return ExitCode::FAILURE;
        }
    };

    match review(&mode) {
        Ok(messages) => {
            for message in &messages {
                println!("{message}");
            }
            let has_errors = messages
                .iter()
                .any(|m| matches!(m.severity, Some(Severity::Error)));
            if has_errors {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            tracing::error!("review failed: {e}");
            ExitCode::FAILURE
        }
    }
}
