//! bestpath CLI
//!
//! - `run`: the K heaviest paths through a four-relation join chain
//! - `verify`: cross-check the engine against exhaustive enumeration
//! - `synth`: write a deterministic synthetic dataset plus a job file

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use bestpath_engine::BestPathEngine;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::Level;

mod config;
mod output;
mod synth;
mod verify;

use config::JobArgs;

#[derive(Parser)]
#[command(name = "bestpath")]
#[command(
    author,
    version,
    about = "Top-K heaviest paths through a fixed four-relation join chain"
)]
struct Cli {
    /// More logging on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the K best paths `a → b → c → d → e` by summed weight.
    Run {
        #[command(flatten)]
        job: JobArgs,
        /// Emit one JSON object per result instead of a table.
        #[arg(long)]
        json: bool,
        /// Print per-stage counters to stderr.
        #[arg(long)]
        stats: bool,
    },

    /// Compare the engine's weights with an exhaustive enumeration.
    ///
    /// Enumeration materializes the full join; use on small inputs only.
    Verify {
        #[command(flatten)]
        job: JobArgs,
    },

    /// Generate four synthetic relations and a `job.json`.
    Synth {
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,
        /// Rows per relation
        #[arg(long, default_value_t = 200)]
        rows: usize,
        /// Distinct key values per position
        #[arg(long, default_value_t = 20)]
        keys: u32,
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Probability that a row gets one null field
        #[arg(long, default_value_t = 0.0)]
        null_rate: f64,
        #[arg(long, default_value_t = -10, allow_hyphen_values = true)]
        min_weight: i32,
        #[arg(long, default_value_t = 100, allow_hyphen_values = true)]
        max_weight: i32,
        /// K written to the job file
        #[arg(short, long, default_value_t = 10)]
        k: i64,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run { job, json, stats } => {
            let job = job.resolve()?;
            let report = BestPathEngine::new(job.reader()).run_with_report(&job.query)?;

            let mut out = io::stdout().lock();
            if json {
                output::write_json_lines(&mut out, &report.results)?;
            } else {
                output::write_table(&mut out, &report.results)?;
            }
            if stats {
                output::print_stats(&report.stages)?;
            }
        }

        Commands::Verify { job } => {
            let job = job.resolve()?;
            let verdict = verify::verify(&job.reader(), &job.query)?;
            verify::report(&verdict)?;
        }

        Commands::Synth {
            out,
            rows,
            keys,
            seed,
            null_rate,
            min_weight,
            max_weight,
            k,
        } => {
            let opts = synth::SynthOptions {
                rows,
                keys,
                seed,
                null_rate,
                min_weight,
                max_weight,
            };
            let data = synth::generate(&opts)?;
            synth::write_dataset(&out, &data, k)?;
            eprintln!(
                "{} {}",
                "wrote".green().bold(),
                out.display().to_string().bold()
            );
        }
    }

    Ok(())
}
