//! Batch labeller for boundary files.
//!
//! Reads boundary files, finds a label anchor for every boundary in
//! parallel, and writes the anchors as JSON.

mod config;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use polelabel::boundary::{read_boundaries, Boundary};
use polelabel::models::LabelRecord;
use polelabel::{IndexedGeometry, Label, LabelError, Labeller};

use crate::config::{default_precision, Config, GlobalConfig, InputConfig};

#[derive(Parser, Debug)]
#[command(name = "polelabel")]
#[command(about = "Find label positions inside boundary polygons")]
struct Args {
    /// Boundary file (JSON)
    #[arg(short, long, required_unless_present = "config", conflicts_with = "config")]
    file: Option<PathBuf>,

    /// TOML config listing several boundary files. Search settings and
    /// outputs then come from the config alone.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Search precision, in coordinate units
    #[arg(short, long, default_value_t = default_precision(), conflicts_with = "config")]
    precision: f64,

    /// Stop refining a boundary after this many probes
    #[arg(long, conflicts_with = "config")]
    max_probes: Option<usize>,

    /// Scan every edge for distances instead of using the segment index
    #[arg(long, conflicts_with = "config")]
    brute_force: bool,

    /// Output file (stdout if not set)
    #[arg(short, long, conflicts_with = "config")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging, stdout is reserved for output
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Polelabel batch labeller");

    match (&args.config, &args.file) {
        (Some(config_path), _) => {
            let config = Config::load_from_file(config_path)?;
            info!("Loaded config with {} inputs", config.inputs.len());
            for input in &config.inputs {
                run_input(input, &config.global)?;
            }
        }
        (None, Some(file)) => {
            let global = GlobalConfig {
                precision: args.precision,
                max_probes: args.max_probes,
                indexed: !args.brute_force,
            };
            let input = InputConfig {
                name: file
                    .file_stem()
                    .and_then(|n| n.to_str())
                    .unwrap_or("boundaries")
                    .to_string(),
                path: file.clone(),
                output: args.output.clone(),
                precision: None,
            };
            run_input(&input, &global)?;
        }
        (None, None) => anyhow::bail!("Either --file or --config is required"),
    }

    Ok(())
}

/// Label every boundary of one input file and write the records
fn run_input(input: &InputConfig, global: &GlobalConfig) -> Result<()> {
    info!("Labelling '{}' from {}", input.name, input.path.display());

    let boundaries = read_boundaries(&input.path)?;

    let mut labeller = Labeller::new(input.precision(global));
    if let Some(max_probes) = global.max_probes {
        labeller = labeller.with_max_probes(max_probes);
    }

    let pb = ProgressBar::new(boundaries.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    // Boundaries are independent, label them in parallel
    let results: Vec<(&Boundary, Result<Label, LabelError>)> = boundaries
        .par_iter()
        .map(|boundary| {
            let result = label_boundary(&labeller, boundary, global.indexed);
            pb.inc(1);
            (boundary, result)
        })
        .collect();
    pb.finish_and_clear();

    let mut records = Vec::with_capacity(results.len());
    let mut skipped = 0;
    for (boundary, result) in results {
        match result {
            Ok(label) => {
                if label.truncated {
                    warn!(
                        "Probe budget exhausted for {} after {} probes",
                        boundary.id, label.probes
                    );
                }
                records.push(LabelRecord::new(boundary, &label));
            }
            Err(e) => {
                warn!("Skipping boundary {}: {}", boundary.id, e);
                skipped += 1;
            }
        }
    }

    info!(
        "Labelled {} boundaries of '{}' ({} skipped)",
        records.len(),
        input.name,
        skipped
    );

    write_records(&records, input.output.as_deref())
}

fn label_boundary(
    labeller: &Labeller,
    boundary: &Boundary,
    indexed: bool,
) -> Result<Label, LabelError> {
    if indexed {
        labeller.label(&IndexedGeometry::new(boundary.geometry.clone()))
    } else {
        labeller.label(&boundary.geometry)
    }
}

fn write_records(records: &[LabelRecord], output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, records)?;
            writer.flush()?;
            info!("Wrote {} labels to {}", records.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            serde_json::to_writer_pretty(&mut writer, records)?;
            writeln!(writer)?;
            writer.flush()?;
        }
    }
    Ok(())
}
