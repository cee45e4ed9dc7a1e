use clap::Parser;
use log::debug;

use crate::{counter::CounterKind, runner::{Runner, RunnerConfig}};

#[derive(Debug, Parser)]
#[command(about = "Time concurrent read+increment workers against a shared counter")]
pub struct Args {
    /// Number of worker threads, each running its own timed loop
    pub threads: usize,
}

/// Entry point shared by the per-variant executables.
pub fn run_variant(kind: CounterKind) -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    debug!("{}: starting with {} threads", kind, args.threads);
    Runner::new(RunnerConfig::new(kind, args.threads)).run()?;
    Ok(())
}
