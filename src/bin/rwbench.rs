use std::io;
use std::process::exit;

use log::{error, info};
use rwbench::sweep::{run_sweep, ContainerKind, LockKind, SweepConfig};
use rwbench::workload::{Key, Workload};
use rwbench::Result;
use structopt::StructOpt;

/// Command line of `rwbench`. Every flag is optional and falls back to `SweepConfig::default()`.
#[derive(StructOpt, Debug)]
#[structopt(
    name = "rwbench",
    about = "Times a reader-writer locked BST, sorted list and stack under concurrent workloads"
)]
struct Opt {
    /// Container to benchmark: bst, list or stack. Repeat to select several.
    #[structopt(long = "container", value_name = "CONTAINER", number_of_values = 1)]
    containers: Vec<ContainerKind>,
    /// Run thread counts from 1 up to this
    #[structopt(long, value_name = "N")]
    max_threads: Option<usize>,
    /// Keys are drawn from [1, KEYSPACE]. Repeat to select several.
    #[structopt(long = "keyspace", value_name = "KEYSPACE", number_of_values = 1)]
    keyspaces: Vec<Key>,
    /// Workload profile: read or write. Repeat to select several.
    #[structopt(long = "workload", value_name = "WORKLOAD", number_of_values = 1)]
    workloads: Vec<Workload>,
    /// Iterations averaged per configuration
    #[structopt(long, value_name = "N")]
    iterations: Option<u32>,
    /// Operations per run, shared by all threads
    #[structopt(long, value_name = "N")]
    budget: Option<u64>,
    /// Raw lock behind the containers: parking or spin
    #[structopt(long, value_name = "LOCK")]
    lock: Option<LockKind>,
}

impl Opt {
    fn into_config(self) -> SweepConfig {
        let mut config = SweepConfig::default();

        if !self.containers.is_empty() {
            config.containers = self.containers;
        }
        if !self.keyspaces.is_empty() {
            config.keyspaces = self.keyspaces;
        }
        if !self.workloads.is_empty() {
            config.workloads = self.workloads;
        }
        if let Some(max_threads) = self.max_threads {
            config.max_threads = max_threads;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(budget) = self.budget {
            config.budget = budget;
        }
        if let Some(lock) = self.lock {
            config.lock = lock;
        }

        config
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opt = Opt::from_args();

    if let Err(e) = run(opt) {
        error!("{}", e);
        exit(1);
    }
}

fn run(opt: Opt) -> Result<()> {
    let config = opt.into_config();
    config.validate()?;

    info!("rwbench {}", env!("CARGO_PKG_VERSION"));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_sweep(&config, &mut out)?;

    Ok(())
}
