use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use trunkline_core::{
    resolve_network, validate_network, BlastPlan, EngineConfig, EngineError, Network,
};

#[derive(Parser)]
#[command(name = "trunkline", about = "Blast connection network engine")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a network blob and print the validation report
    Validate {
        /// Network JSON ({ "points": [...], "connections": [...] })
        input: PathBuf,
    },
    /// Resolve per-hole firing times and print them
    Resolve {
        input: PathBuf,
        /// Simultaneity window in milliseconds
        #[arg(short, long, default_value = "1.0")]
        tolerance_ms: f64,
    },
    /// Resolve and write the full plan (timings, events, metrics, warnings)
    Simulate {
        input: PathBuf,
        #[arg(short, long, default_value = "1.0")]
        tolerance_ms: f64,
        /// Output path; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn load_network(path: &Path) -> anyhow::Result<Network> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    match Network::from_value(value) {
        Ok(network) => Ok(network),
        Err(errors) => {
            for error in &errors {
                eprintln!("input error: {error}");
            }
            bail!("{} malformed record(s) in {}", errors.len(), path.display());
        }
    }
}

/// Run the pipeline, dumping the full defect list before failing so the
/// operator is not left with a bare count.
fn run_pipeline(network: &Network, config: &EngineConfig) -> anyhow::Result<BlastPlan> {
    match resolve_network(network, config, None) {
        Ok(plan) => Ok(plan),
        Err(EngineError::Invalid { report }) => {
            eprintln!("{}", serde_json::to_string_pretty(&report)?);
            bail!("network failed validation with {} error(s)", report.errors.len());
        }
        Err(EngineError::Referential { errors }) => {
            for error in &errors {
                eprintln!("error: {error}");
            }
            bail!("{} connection(s) reference missing holes", errors.len());
        }
        Err(err) => Err(err.into()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Validate { input } => {
            let network = load_network(&input)?;
            let report = validate_network(&network, &EngineConfig::default());
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.is_valid() {
                bail!("{} validation error(s)", report.errors.len());
            }
        }
        Commands::Resolve {
            input,
            tolerance_ms,
        } => {
            let network = load_network(&input)?;
            let config = EngineConfig::with_tolerance_ms(tolerance_ms);
            let plan = run_pipeline(&network, &config)?;
            for timing in &plan.timings {
                println!(
                    "#{:<4} {:<12} {:>10.3} ms",
                    timing.rank,
                    timing.hole_id,
                    timing.arrival_us as f64 / 1000.0
                );
            }
            for warning in &plan.warnings {
                eprintln!("warning: {warning}");
            }
        }
        Commands::Simulate {
            input,
            tolerance_ms,
            output,
        } => {
            let network = load_network(&input)?;
            let config = EngineConfig::with_tolerance_ms(tolerance_ms);
            let plan = run_pipeline(&network, &config)?;
            let encoded = serde_json::to_string_pretty(&plan)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, encoded)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!(
                        "{} events, {:.1} ms total -> {}",
                        plan.events.len(),
                        plan.metrics.total_time_us as f64 / 1000.0,
                        path.display()
                    );
                }
                None => println!("{encoded}"),
            }
        }
    }

    Ok(())
}
