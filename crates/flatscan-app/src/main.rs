// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Flatscan — command-line document rectifier
//
// Entry point. Initialises logging, resolves scan settings, runs the pipeline
// on one photo and saves the result.

mod cli;
mod export;

use std::process::ExitCode;

use clap::Parser;
use flatscan_core::error::Result;
use flatscan_core::human_errors::{Severity, humanize_error, humanize_negative};
use flatscan_core::{CornerOrdering, NoDocument, ScanConfig};
use flatscan_document::{DocumentScanner, ScanOutcome};

use cli::Cli;

/// How a run ended when no hard error occurred.
#[derive(Debug, Clone, PartialEq)]
enum RunStatus {
    /// Settings were printed; nothing was scanned.
    PrintedConfig,
    /// The scan was written to the listed paths.
    Saved(Vec<std::path::PathBuf>),
    /// The photo did not contain a usable page.
    NoDocument(NoDocument),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let fallback = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .init();

    tracing::info!("Flatscan starting");

    match run(&cli) {
        Ok(RunStatus::PrintedConfig) => ExitCode::SUCCESS,
        Ok(RunStatus::Saved(paths)) => {
            for path in paths {
                println!("Saved {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Ok(RunStatus::NoDocument(negative)) => {
            let human = humanize_negative(&negative);
            eprintln!("{}\n{}", human.message, human.suggestion);
            ExitCode::from(2)
        }
        Err(err) => {
            let human = humanize_error(&err);
            if human.severity == Severity::Permanent {
                tracing::error!(error = %err, "scan failed");
            } else {
                tracing::warn!(error = %err, "scan failed");
            }
            eprintln!("{}\n{}", human.message, human.suggestion);
            ExitCode::FAILURE
        }
    }
}

/// Effective settings: defaults, then the override file, then flags.
fn resolve_config(cli: &Cli) -> Result<ScanConfig> {
    let mut config = match &cli.config {
        Some(path) => ScanConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => ScanConfig::default(),
    };
    if cli.angular {
        config.corner_ordering = CornerOrdering::Angular;
    }
    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli) -> Result<RunStatus> {
    let config = resolve_config(cli)?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(RunStatus::PrintedConfig);
    }

    let Some(input) = cli.input.as_deref() else {
        return Ok(RunStatus::PrintedConfig);
    };

    let scanner = DocumentScanner::new(config)?;
    let outcome = scanner.scan_path(input)?;

    let doc = match outcome {
        ScanOutcome::Scanned(doc) => doc,
        negative => {
            // Every non-scanned outcome carries a reason.
            let reason = negative.no_document().unwrap_or(NoDocument::NoContour);
            tracing::warn!(%reason, "no document found");
            return Ok(RunStatus::NoDocument(reason));
        }
    };

    let (width, height) = doc.gray.dimensions();
    println!("Page {width}x{height}, threshold {}", doc.threshold);

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli::default_output(input));
    let mut saved = vec![export::save_page(&doc, &output, cli.binary, cli.dpi)?];

    if let Some(path) = &cli.gray_out {
        flatscan_document::raster::save(&doc.gray, path)?;
        saved.push(path.clone());
    }
    if let Some(path) = &cli.binary_out {
        flatscan_document::raster::save(&doc.binary, path)?;
        saved.push(path.clone());
    }

    Ok(RunStatus::Saved(saved))
}
