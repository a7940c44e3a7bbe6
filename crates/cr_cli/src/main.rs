//! Operator CLI for the creature racing engine.
//!
//! Each subcommand reads a JSON request file (`-` for stdin), feeds it to
//! the engine's JSON API, and prints the response. Useful for replaying and
//! re-verifying races from disclosed seed material without standing up the
//! full service.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cr_cli")]
#[command(about = "Run creature racing engine operations from JSON requests", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pretty-print the JSON response
    #[arg(long, global = true, default_value = "false")]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute training gains for an activity
    Gains {
        /// Request JSON file, or - for stdin
        input: PathBuf,
    },
    /// Decay a fatigue/sharpness pair over elapsed time
    Decay { input: PathBuf },
    /// Check training/race action eligibility
    Eligibility { input: PathBuf },
    /// Score a weighted aggregate race
    Score { input: PathBuf },
    /// Simulate a house segment race from a combined seed
    Simulate { input: PathBuf },
    /// Re-verify a published segment race from disclosed seed material
    Verify { input: PathBuf },
    /// Look up the reward delta for a finishing position
    Reward { input: PathBuf },
}

fn read_request(path: &PathBuf) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read request from stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read request file {}", path.display()))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (input, run): (&PathBuf, fn(&str) -> cr_core::Result<String>) = match &cli.command {
        Commands::Gains { input } => (input, cr_core::compute_gains_json),
        Commands::Decay { input } => (input, cr_core::decay_condition_json),
        Commands::Eligibility { input } => (input, cr_core::check_eligibility_json),
        Commands::Score { input } => (input, cr_core::score_race_json),
        Commands::Simulate { input } => (input, cr_core::simulate_segment_race_json),
        Commands::Verify { input } => (input, cr_core::verify_segment_race_json),
        Commands::Reward { input } => (input, cr_core::reward_for_position_json),
    };

    let request = read_request(input)?;
    let response = run(&request).map_err(|e| anyhow::anyhow!("{}", e))?;

    if cli.pretty {
        let value: serde_json::Value = serde_json::from_str(&response)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", response);
    }

    Ok(())
}
