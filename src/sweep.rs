use std::fmt;
use std::io::Write;
use std::str::FromStr;

use log::{debug, info};

use crate::bst::RwLockBST;
use crate::error::{BenchError, Result};
use crate::linkedlist::RwLockList;
use crate::lock::{DefaultRawRwLock, RawSpinRwLock};
use crate::runner::{experiment, BenchConfig, Report};
use crate::stack::RwLockStack;
use crate::workload::{BenchTarget, Key, Workload};

pub const DEFAULT_MAX_THREADS: usize = 10;
pub const DEFAULT_KEYSPACES: [Key; 2] = [100, 10_000];
pub const DEFAULT_ITERATIONS: u32 = 10;
pub const DEFAULT_BUDGET: u64 = 100_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    Bst,
    List,
    Stack,
}

impl ContainerKind {
    pub const ALL: [ContainerKind; 3] = [ContainerKind::Bst, ContainerKind::List, ContainerKind::Stack];

    pub fn title(self) -> &'static str {
        match self {
            ContainerKind::Bst => <RwLockBST<Key> as BenchTarget>::NAME,
            ContainerKind::List => <RwLockList<Key> as BenchTarget>::NAME,
            ContainerKind::Stack => <RwLockStack<Key> as BenchTarget>::NAME,
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerKind::Bst => write!(f, "bst"),
            ContainerKind::List => write!(f, "list"),
            ContainerKind::Stack => write!(f, "stack"),
        }
    }
}

impl FromStr for ContainerKind {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bst" => Ok(ContainerKind::Bst),
            "list" => Ok(ContainerKind::List),
            "stack" => Ok(ContainerKind::Stack),
            _ => Err(BenchError::InvalidConfig(format!(
                "unknown container `{}`, expected `bst`, `list` or `stack`",
                s
            ))),
        }
    }
}

/// Raw lock behind every container of a sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockKind {
    Parking,
    Spin,
}

impl fmt::Display for LockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockKind::Parking => write!(f, "parking"),
            LockKind::Spin => write!(f, "spin"),
        }
    }
}

impl FromStr for LockKind {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "parking" => Ok(LockKind::Parking),
            "spin" => Ok(LockKind::Spin),
            _ => Err(BenchError::InvalidConfig(format!(
                "unknown lock `{}`, expected `parking` or `spin`",
                s
            ))),
        }
    }
}

/// The whole parameter grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SweepConfig {
    pub containers: Vec<ContainerKind>,
    /// Thread counts run from 1 up to and including this.
    pub max_threads: usize,
    pub keyspaces: Vec<Key>,
    pub workloads: Vec<Workload>,
    pub iterations: u32,
    pub budget: u64,
    pub lock: LockKind,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            containers: ContainerKind::ALL.to_vec(),
            max_threads: DEFAULT_MAX_THREADS,
            keyspaces: DEFAULT_KEYSPACES.to_vec(),
            workloads: Workload::ALL.to_vec(),
            iterations: DEFAULT_ITERATIONS,
            budget: DEFAULT_BUDGET,
            lock: LockKind::Parking,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<()> {
        if self.containers.is_empty() {
            return Err(BenchError::InvalidConfig("no container selected".into()));
        }

        if self.keyspaces.is_empty() {
            return Err(BenchError::InvalidConfig("no keyspace selected".into()));
        }

        if self.workloads.is_empty() {
            return Err(BenchError::InvalidConfig("no workload selected".into()));
        }

        for &keyspace in &self.keyspaces {
            self.point(1, keyspace, Workload::Read).validate()?;
        }

        if self.max_threads == 0 {
            return Err(BenchError::InvalidConfig("thread count must be at least 1".into()));
        }

        Ok(())
    }

    fn point(&self, threads: usize, keyspace: Key, workload: Workload) -> BenchConfig {
        BenchConfig {
            threads,
            keyspace,
            workload,
            iterations: self.iterations,
            budget: self.budget,
        }
    }

    /// Workloads to run for a container. A stack only has the push/pop profile.
    fn workloads_of(&self, kind: ContainerKind) -> Vec<Workload> {
        match kind {
            ContainerKind::Stack => vec![Workload::Write],
            ContainerKind::Bst | ContainerKind::List => self.workloads.clone(),
        }
    }
}

fn run_point(kind: ContainerKind, lock: LockKind, config: BenchConfig) -> Result<Report> {
    match (kind, lock) {
        (ContainerKind::Bst, LockKind::Parking) => {
            experiment::<RwLockBST<Key, DefaultRawRwLock>>(config)
        }
        (ContainerKind::Bst, LockKind::Spin) => experiment::<RwLockBST<Key, RawSpinRwLock>>(config),
        (ContainerKind::List, LockKind::Parking) => {
            experiment::<RwLockList<Key, DefaultRawRwLock>>(config)
        }
        (ContainerKind::List, LockKind::Spin) => {
            experiment::<RwLockList<Key, RawSpinRwLock>>(config)
        }
        (ContainerKind::Stack, LockKind::Parking) => {
            experiment::<RwLockStack<Key, DefaultRawRwLock>>(config)
        }
        (ContainerKind::Stack, LockKind::Spin) => {
            experiment::<RwLockStack<Key, RawSpinRwLock>>(config)
        }
    }
}

/// Run the grid, writing section headers and one line per configuration to `out`.
pub fn run_sweep<W: Write>(config: &SweepConfig, out: &mut W) -> Result<Vec<Report>> {
    config.validate()?;

    info!(
        "sweep: containers {:?}, 1..={} threads, keyspaces {:?}, {} iterations of {} ops, {} lock",
        config.containers,
        config.max_threads,
        config.keyspaces,
        config.iterations,
        config.budget,
        config.lock
    );

    let mut reports = Vec::new();

    for &kind in &config.containers {
        writeln!(out, "{}", kind.title())?;

        for &keyspace in &config.keyspaces {
            writeln!(out, "Keyspace: {}", keyspace)?;

            for workload in config.workloads_of(kind) {
                if kind != ContainerKind::Stack {
                    match workload {
                        Workload::Read => writeln!(out, "Read work")?,
                        Workload::Write => writeln!(out, "Write work")?,
                    }
                }

                for threads in 1..=config.max_threads {
                    debug!("{} {} work with {} threads", kind, workload, threads);

                    let report = run_point(kind, config.lock, config.point(threads, keyspace, workload))?;
                    writeln!(out, "{}", report)?;
                    out.flush()?;

                    reports.push(report);
                }
            }
        }
    }

    Ok(reports)
}
