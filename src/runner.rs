use std::fmt;
use std::time::{Duration, Instant};

use crossbeam_utils::thread;
use log::{debug, trace};

use crate::error::{BenchError, Result};
use crate::util::RandomGenerator;
use crate::workload::{BenchTarget, Budget, Family, Key, OpStats, Worker, Workload};

/// One point of the parameter grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BenchConfig {
    pub threads: usize,
    pub keyspace: Key,
    pub workload: Workload,
    pub iterations: u32,
    pub budget: u64,
}

impl BenchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(BenchError::InvalidConfig("thread count must be at least 1".into()));
        }

        if self.keyspace == 0 {
            return Err(BenchError::InvalidConfig("keyspace must be at least 1".into()));
        }

        if self.iterations == 0 {
            return Err(BenchError::InvalidConfig("iterations must be at least 1".into()));
        }

        if self.budget == 0 {
            return Err(BenchError::InvalidConfig("operation budget must be at least 1".into()));
        }

        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Iteration {
    pub elapsed: Duration,
    pub stats: OpStats,
}

/// Timing of every iteration of one configuration.
#[derive(Clone, Debug)]
pub struct Report {
    pub container: &'static str,
    pub family: Family,
    pub config: BenchConfig,
    pub iterations: Vec<Iteration>,
}

impl Report {
    pub fn total(&self) -> Duration {
        self.iterations.iter().map(|iteration| iteration.elapsed).sum()
    }

    /// Total time divided by the iteration count, truncated to whole milliseconds.
    pub fn mean_millis(&self) -> u128 {
        self.total().as_millis() / self.iterations.len().max(1) as u128
    }

    pub fn stats(&self) -> OpStats {
        self.iterations.iter().map(|iteration| iteration.stats).sum()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.family {
            Family::Set => write!(
                f,
                "Time taken for {} threads to {} {} keyspace: {} ms",
                self.config.threads,
                self.config.workload,
                self.config.keyspace,
                self.mean_millis()
            ),
            Family::Stack => write!(
                f,
                "Time taken for {} threads to {} keyspace: {} ms",
                self.config.threads,
                self.config.keyspace,
                self.mean_millis()
            ),
        }
    }
}

/// Run one iteration: build a fresh container, prefill it if the container asks for it, let
/// `config.threads` workers drain the budget, then drop the container.
///
/// The measured time covers all of it.
pub fn run_iteration<C: BenchTarget>(config: &BenchConfig, budget: &Budget) -> Result<Iteration> {
    budget.reset();

    let start = Instant::now();

    let stats = {
        let target = C::create();

        if C::PREFILL {
            trace!("{}: prefill {} keys", C::NAME, config.keyspace / 2);
            target.prefill(config.keyspace, &mut RandomGenerator::new());
        }

        let per_thread = thread::scope(|s| {
            let mut threads = Vec::new();

            for _ in 0..config.threads {
                let worker = Worker::new(&target, budget, config.workload, config.keyspace);
                threads.push(s.spawn(move |_| worker.run()));
            }

            threads
                .into_iter()
                .map(|h| h.join())
                .collect::<std::thread::Result<Vec<_>>>()
        })
        .map_err(|_| BenchError::WorkerPanicked)?
        .map_err(|_| BenchError::WorkerPanicked)?;

        per_thread.into_iter().sum::<OpStats>()
    };

    Ok(Iteration {
        elapsed: start.elapsed(),
        stats,
    })
}

/// Run every iteration of one configuration with container `C`.
pub fn experiment<C: BenchTarget>(config: BenchConfig) -> Result<Report> {
    config.validate()?;

    let budget = Budget::new(config.budget);
    let mut iterations = Vec::with_capacity(config.iterations as usize);

    for i in 0..config.iterations {
        let iteration = run_iteration::<C>(&config, &budget)?;

        debug!(
            "{} {} threads {} {} keyspace iteration {}: {:?}",
            C::NAME,
            config.threads,
            config.workload,
            config.keyspace,
            i,
            iteration.elapsed
        );

        iterations.push(iteration);
    }

    let report = Report {
        container: C::NAME,
        family: C::FAMILY,
        config,
        iterations,
    };

    debug!("{} ops ({})", C::NAME, report.stats());

    Ok(report)
}
