use anyhow::{Context, Result};
use clap::Parser;
use solar_site_optimizer::config::{Config, ReportFormat};
use solar_site_optimizer::optimizer::StrategyKind;
use solar_site_optimizer::report::Reporter;
use solar_site_optimizer::runner::{run_all, RunSettings};
use solar_site_optimizer::{loader, telemetry, CandidateRegistry};
use std::path::PathBuf;
use tracing::{info, warn};
use validator::Validate;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Candidate file (header line, then id,cost,yield per line)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Installation budget in RM
    #[arg(short, long, allow_negative_numbers = true)]
    budget: Option<i64>,

    /// Strategy to run: exact, greedy or brute_force (repeatable, default all)
    #[arg(short, long = "strategy")]
    strategies: Vec<StrategyKind>,

    /// Candidates kept before running brute force on a larger input
    #[arg(long)]
    sample_size: Option<usize>,

    /// Seed for the brute force sample
    #[arg(long)]
    seed: Option<u64>,

    /// Report format: text or json
    #[arg(short, long)]
    format: Option<ReportFormat>,

    /// Extra TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[arg(short, long)]
    debug: bool,
}

impl Cli {
    /// Overlay the command line on the loaded configuration and re-validate
    fn apply(self, cfg: &mut Config) -> Result<()> {
        if let Some(input) = self.input {
            cfg.input.path = input;
        }
        if let Some(budget) = self.budget {
            cfg.solver.budget = budget;
        }
        if !self.strategies.is_empty() {
            cfg.solver.strategies = self.strategies;
        }
        if let Some(sample_size) = self.sample_size {
            cfg.sampling.sample_size = sample_size;
        }
        if self.seed.is_some() {
            cfg.sampling.seed = self.seed;
        }
        if let Some(format) = self.format {
            cfg.report.format = format;
        }
        cfg.validate().context("invalid command line arguments")
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    telemetry::init_tracing(cli.debug, cli.json_logs);

    let mut cfg = Config::load(cli.config.as_deref())?;
    cli.apply(&mut cfg)?;

    let candidates = loader::load_candidates(&cfg.input.path, cfg.input.delimiter);
    if candidates.is_empty() {
        warn!(path = %cfg.input.path.display(), "no candidates loaded");
        println!("No data found or failed to read CSV.");
        return Ok(());
    }

    let registry = CandidateRegistry::new(candidates);
    let settings = RunSettings::from(&cfg);
    info!(
        candidates = registry.len(),
        budget = settings.budget,
        strategies = ?settings.strategies,
        "starting Solar Site Optimizer"
    );

    let mut reporter = Reporter::new(std::io::stdout().lock(), cfg.report.format);
    run_all(&registry, &settings, &mut reporter)?;

    Ok(())
}
