mod display;
mod export;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hazardwise_ai::{Catalog, EngineConfig};
use hazardwise_core::{Query, ReferenceData};

/// Location-aware flood and earthquake guidance.
#[derive(Debug, Parser)]
#[command(name = "hazardwise", version)]
struct Cli {
    /// Engine configuration (JSON).
    #[arg(long, global = true, env = "HAZARDWISE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the number of voting neighbours.
    #[arg(long, global = true)]
    neighbors: Option<usize>,

    /// Override the neighbour weight smoothing constant.
    #[arg(long, global = true)]
    smoothing: Option<f64>,

    /// Clamp normalized query features into [0, 1].
    #[arg(long, global = true)]
    clamp: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct QueryArgs {
    #[arg(long, default_value = "Punjab")]
    province: String,

    #[arg(long, default_value = "")]
    city: String,

    /// flood or earthquake.
    #[arg(long, default_value = "flood")]
    hazard: String,

    /// Masonry House, RC Frame, School Block, or Bridge Approach.
    #[arg(long, default_value = "Masonry House")]
    structure: String,
}

impl QueryArgs {
    fn resolve(&self) -> Query {
        Query::resolve(&self.province, &self.city, &self.hazard, &self.structure)
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Guidance report (summary, materials, safety, steps).
    Guidance {
        #[command(flatten)]
        query: QueryArgs,

        /// Print a readable card instead of JSON.
        #[arg(long)]
        text: bool,
    },
    /// One annotated SVG diagram per step.
    Images {
        #[command(flatten)]
        query: QueryArgs,

        /// JSON array of steps; defaults to the guidance steps for the query.
        #[arg(long)]
        steps: Option<PathBuf>,

        /// Also write each diagram as step-N.svg here.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Raw inference result with its neighbours.
    Infer {
        #[command(flatten)]
        query: QueryArgs,

        #[arg(long)]
        text: bool,
    },
    /// Inspect or export the synthetic training corpus.
    Corpus {
        /// Rows to show in the table.
        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// Show a single row as a card.
        #[arg(long, conflicts_with = "ipc")]
        row: Option<usize>,

        /// Write the whole corpus as an Arrow IPC file instead of printing.
        #[arg(long)]
        ipc: Option<PathBuf>,
    },
    /// Catalog statistics.
    Stats {
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("HAZARDWISE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// File configuration (if any) with command-line overrides applied.
fn engine_config(cli: &Cli) -> anyhow::Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(k) = cli.neighbors {
        config.neighbor_count = k;
    }
    if let Some(c) = cli.smoothing {
        config.weight_smoothing = c;
    }
    if cli.clamp {
        config.clamp_query_features = true;
    }
    config.validate().context("invalid engine configuration")?;
    Ok(config)
}

fn read_steps(path: &Path) -> anyhow::Result<Vec<hazardwise_core::GuidanceStep>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(hazardwise_render::steps_from_json(&value))
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = engine_config(&cli)?;
    let catalog =
        Catalog::build(ReferenceData::standard(), config).context("building catalog")?;

    match cli.command {
        Command::Guidance { query, text } => {
            let query = query.resolve();
            let report = catalog.guidance_for(&query);
            if text {
                display::print_report_card(&query, &report);
            } else {
                print_json(&report)?;
            }
        }
        Command::Images {
            query,
            steps,
            out_dir,
        } => {
            let query = query.resolve();
            let steps = match steps {
                Some(path) => read_steps(&path)?,
                None => catalog.guidance_for(&query).steps,
            };
            let diagrams = hazardwise_render::images_for(catalog.reference(), &query, &steps);
            if let Some(dir) = out_dir {
                let paths = export::write_svgs(&diagrams, &dir)?;
                info!(count = paths.len(), dir = %dir.display(), "diagrams written");
            }
            print_json(&diagrams)?;
        }
        Command::Infer { query, text } => {
            let result = catalog.infer_query(&query.resolve());
            if text {
                display::print_inference_card(&result);
            } else {
                print_json(&result)?;
            }
        }
        Command::Corpus { limit, row, ipc } => {
            let batch = catalog
                .corpus()
                .to_record_batch()
                .context("building corpus batch")?;
            if let Some(path) = ipc {
                let rows = export::write_ipc(&batch, &path)?;
                eprintln!("Wrote {rows} rows to {}", path.display());
            } else if let Some(row) = row {
                display::print_case_card(&batch, row)?;
            } else {
                println!("{}", export::table(&batch, Some(limit))?);
                if batch.num_rows() > limit {
                    eprintln!("  ({} of {} rows)", limit, batch.num_rows());
                }
            }
        }
        Command::Stats { json } => {
            let stats = catalog.stats();
            if json {
                print_json(&stats)?;
            } else {
                display::print_stats(&stats);
            }
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    info!("hazardwise v{}", env!("CARGO_PKG_VERSION"));
    run(cli)
}
