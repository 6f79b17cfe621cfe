// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::audit::{self, AuditConfig, Golden};
use crate::corpus::Family;

/// `echo-dmath-audit` arguments.
#[derive(Parser, Debug)]
#[command(name = "echo-dmath-audit")]
#[command(about = "Record and verify bit-exact digests of the echo-dmath engine")]
pub struct Cli {
    /// Selected subcommand.
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the corpus and write a golden digest file
    Record {
        #[command(flatten)]
        run: RunArgs,
        /// Path to output golden.json
        #[arg(long)]
        out: PathBuf,
    },
    /// Replay the corpus pinned in a golden file and compare digests
    Verify {
        /// Path to golden.json
        golden: PathBuf,
    },
    /// Run the corpus repeatedly to detect in-process non-determinism
    Torture {
        #[command(flatten)]
        run: RunArgs,
        /// Number of runs
        #[arg(long, default_value = "20")]
        runs: u32,
    },
}

/// Run parameters; flags override the config file, which overrides defaults.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// JSON config file (`seed`, `cases`, `families`)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Root seed
    #[arg(long)]
    pub seed: Option<u64>,
    /// Operations per family
    #[arg(long)]
    pub cases: Option<u32>,
    /// Restrict to these families (repeatable)
    #[arg(long = "family", value_enum)]
    pub families: Vec<Family>,
}

impl RunArgs {
    /// Resolves the effective config.
    pub fn resolve(&self) -> Result<AuditConfig> {
        let mut config = match &self.config {
            Some(path) => AuditConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => AuditConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(cases) = self.cases {
            config.cases = cases;
        }
        if !self.families.is_empty() {
            config.families.clone_from(&self.families);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Parses the process arguments and runs the selected command.
pub fn entrypoint() -> Result<()> {
    run(Cli::parse())
}

/// Runs an already-parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Record { run, out } => {
            let config = run.resolve()?;
            let golden = audit::record(&config, &out)
                .with_context(|| format!("failed to record {}", out.display()))?;
            info!(
                "AUDIT: recorded {} families to {}",
                golden.digests.len(),
                out.display()
            );
        }
        Commands::Verify { golden } => {
            let pinned = Golden::load(&golden)
                .with_context(|| format!("failed to load golden file {}", golden.display()))?;
            let report = audit::verify(&pinned)?;
            info!(
                "AUDIT: OK. {} families, {} words verified.",
                report.digests.len(),
                report.total_words()
            );
        }
        Commands::Torture { run, runs } => {
            let config = run.resolve()?;
            info!("AUDIT: torture starting, {runs} runs");
            audit::torture(&config, runs)?;
            info!("AUDIT: torture complete. {runs} runs identical.");
        }
    }
    Ok(())
}
