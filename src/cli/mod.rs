//! Credit Scoring CLI Module
//!
//! Command-line interface for a single scoring run.

use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::time::Instant;

use crate::pipeline::{PipelineConfig, ScoringPipeline};
use crate::report::TerminalReporter;

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString    { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "credit-scoring")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Loan default scoring with a random forest")]
#[command(long_about = None)]
pub struct Cli {
    /// Input CSV file (defaults to /content/Loan_Default.csv)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip the confusion matrix, ROC and importance charts
    #[arg(long)]
    pub no_charts: bool,
}

impl Cli {
    /// Resolve the run configuration: file or defaults, then flag overrides
    pub fn pipeline_config(&self) -> anyhow::Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(data) = &self.data {
            config = config.with_data_path(data.clone());
        }
        if self.no_charts {
            config = config.with_render_charts(false);
        }
        Ok(config)
    }
}

fn print_header(config: &PipelineConfig) {
    println!();
    println!("  {}", "Credit Scoring".white().bold());
    println!("  {}", dim(&format!("v{}  ·  random forest  ·  rust", env!("CARGO_PKG_VERSION"))));
    println!();
    println!("  {:<12} {}", muted("Data"), config.data_path.display());
    println!("  {:<12} {}", muted("Target"), config.target_column);
    println!("  {:<12} {}", muted("Trees"), config.forest.n_estimators);
    println!("  {:<12} {}", muted("Seed"), config.random_state);
}

/// Run the full pipeline, reporting to stdout
pub fn cmd_run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.pipeline_config()?;
    print_header(&config);

    let start = Instant::now();
    let pipeline = ScoringPipeline::new(config)?;
    let mut reporter = TerminalReporter::stdout();
    pipeline.run(&mut reporter)?;

    println!();
    println!("  {} {}", accent("›"), dim(&format!("finished in {:?}", start.elapsed())));
    println!();
    Ok(())
}
