// core/src/bin/risk_label.rs
//! Labeler en JSON-liste med records og skriver rapport.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use wearable_risk_core::{cli, label_batch, load_thresholds, records_from_json, Metrics, ThresholdConfig};

#[derive(Debug, Parser)]
#[command(
    name = "risk_label",
    version,
    about = "Label wearable-sensor records with a risk category"
)]
struct Args {
    /// JSON-fil med en liste records
    records: PathBuf,

    /// Grensefil (JSON); mangler filen brukes referansegrensene
    #[arg(long, env = "RISK_THRESHOLDS")]
    thresholds: Option<PathBuf>,

    /// Skriv labelet rapport som JSON hit
    #[arg(long)]
    out: Option<PathBuf>,

    /// Skriv prometheus-tellere til stdout etter rapporten
    #[arg(long)]
    metrics: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let cfg = match &args.thresholds {
        Some(p) => load_thresholds(p).with_context(|| format!("loading thresholds from {}", p.display()))?,
        None => ThresholdConfig::default(),
    };

    let contents = std::fs::read_to_string(&args.records)
        .with_context(|| format!("reading {}", args.records.display()))?;
    let raw = records_from_json(&contents)
        .with_context(|| format!("parsing records in {}", args.records.display()))?;

    let metrics = Metrics::new().context("creating metrics registry")?;
    let report = label_batch(&raw, &cfg, Some(&metrics));

    if let Some(out) = &args.out {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(out, json).with_context(|| format!("writing {}", out.display()))?;
        info!("labeled report written to {}", out.display());
    }

    cli::print_report(&report);
    if args.metrics {
        println!("{}", metrics.render()?);
    }
    Ok(())
}
