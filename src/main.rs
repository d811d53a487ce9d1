use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use schemagraph::analytics::Analyzer;
use schemagraph::config::Config;
use schemagraph::layout::GridLayout;
use schemagraph::loader;
use schemagraph::metrics::MetricsSnapshot;
use std::fs;
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Schema JSON produced by the introspection backend
    input: PathBuf,
    /// What to emit
    #[clap(value_enum, default_value = "stats")]
    mode: Mode,
    /// Table whose degree and column count are reported separately
    #[clap(short, long)]
    selected: Option<String>,
    /// Per-column quality metrics JSON
    #[clap(short, long)]
    metrics: Option<PathBuf>,
    /// TOML file with [layout] and [analytics] settings
    #[clap(short, long)]
    config: Option<PathBuf>,
    /// Output file (default: stdout)
    #[clap(short, long)]
    output: Option<PathBuf>,
    #[clap(long)]
    pretty: bool,
    #[clap(short, long, default_value = "warn")]
    log_level: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Graph,
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let input = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let schema = loader::parse_schema(&input)?;
    info!(
        tables = schema.tables.len(),
        foreign_keys = schema.foreign_keys.len(),
        "schema loaded"
    );

    let json = match cli.mode {
        Mode::Graph => {
            let graph = GridLayout::from(&config.layout).layout(&schema);
            to_json(&graph, cli.pretty)?
        }
        Mode::Stats => {
            let metrics = match &cli.metrics {
                Some(path) => {
                    let raw = fs::read_to_string(path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    Some(MetricsSnapshot::from_json(&raw)?)
                }
                None => None,
            };
            let mut analyzer = Analyzer::new(config.analytics.clone());
            if let Some(metrics) = &metrics {
                analyzer = analyzer.with_metrics(metrics);
            }
            let stats = analyzer.analyze(&schema, cli.selected.as_deref());
            to_json(&stats, cli.pretty)?
        }
    };

    match &cli.output {
        Some(path) => fs::write(path, &json)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn setup_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("schemagraph={}", level)))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
