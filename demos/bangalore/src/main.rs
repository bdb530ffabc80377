//! bangalore — synthesize a Bangalore-like road graph, score it, and export.
//!
//! Writes `graph.json`, `predictions.csv` and `samples.csv` (plus
//! `output.db` with the `sqlite` feature) into the output directory.

mod summary;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tg_core::{NodeId, Scenario, SynthesisConfig};
use tg_output::{CsvWriter, OutputWriter, PredictionRow};
use tg_service::{PredictionMap, SampleRow, TrafficService};

/// Synthetic Bangalore traffic graph and congestion predictions.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for a reproducible run; overrides the config file's seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Synthesis parameters as JSON; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Hour of day to predict, 0..=23.
    #[arg(long, default_value_t = 8)]
    hour: i64,

    /// `sunny` or `rainy`.
    #[arg(long, default_value = "sunny")]
    weather: String,

    /// `weekday` or `weekend`.
    #[arg(long, default_value = "weekday")]
    day_type: String,

    /// Number of labeled sample rows to export.
    #[arg(long, default_value_t = 1000)]
    samples: usize,

    /// Also print one intersection in detail, e.g. `node_12`.
    #[arg(long)]
    node: Option<String>,

    /// Output directory.
    #[arg(long, default_value = "output/bangalore")]
    out: PathBuf,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(args: &Args) -> Result<SynthesisConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening config {}", path.display()))?;
            serde_json::from_reader(file)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SynthesisConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;
    Ok(config)
}

fn export<W: OutputWriter>(
    mut writer: W,
    scenario:   &Scenario,
    map:        &PredictionMap,
    samples:    &[SampleRow],
) -> Result<()> {
    writer.write_predictions(&PredictionRow::from_map(scenario, map))?;
    writer.write_samples(samples)?;
    writer.finish()?;
    Ok(())
}

fn write_graph_json(service: &TrafficService, dir: &Path) -> Result<()> {
    let path = dir.join("graph.json");
    let file = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(file, &service.get_graph()?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let config = load_config(&args)?;
    let scenario = Scenario::parse(args.hour, &args.weather, &args.day_type)?;
    info!(seed = ?config.seed, %scenario, "starting");

    println!("=== bangalore — synthetic traffic graph ===");
    let t0 = Instant::now();
    let service = TrafficService::start(config)?;
    let graph = service.graph().context("graph missing after start")?;
    summary::print_network(&graph);
    println!("Synthesized in {:.3} s", t0.elapsed().as_secs_f64());
    println!();

    let map = service.predict_map(&scenario)?;
    println!("Scenario: {scenario}");
    summary::print_hotspots(&graph, &map, 10);
    println!();

    if let Some(key) = &args.node {
        let id = NodeId::parse_key(key).with_context(|| format!("not a node key: {key}"))?;
        summary::print_node(&graph, &map, id)?;
        println!();
    }

    let samples = service.generate_samples(args.samples)?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;
    write_graph_json(&service, &args.out)?;
    export(CsvWriter::new(&args.out)?, &scenario, &map, &samples)?;

    #[cfg(feature = "sqlite")]
    export(tg_output::SqliteWriter::new(&args.out)?, &scenario, &map, &samples)?;

    println!("Output written to {}", args.out.display());
    println!("  graph.json       : {} nodes", graph.node_count());
    println!("  predictions.csv  : {} rows", map.len());
    println!("  samples.csv      : {} rows", samples.len());

    Ok(())
}
