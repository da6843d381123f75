use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_utils::CachePadded;
use parking_lot::lock_api::RawRwLock;

use crate::bst::RwLockBST;
use crate::error::BenchError;
use crate::linkedlist::RwLockList;
use crate::set::ConcurrentSet;
use crate::stack::{ConcurrentStack, RwLockStack};
use crate::util::RandomGenerator;

pub type Key = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Search,
    Insert,
    Remove,
    Push,
    Pop,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Search,
        Operation::Insert,
        Operation::Remove,
        Operation::Push,
        Operation::Pop,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Which operations a container understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Family {
    Set,
    Stack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Workload {
    Read,
    Write,
}

impl Workload {
    pub const ALL: [Workload; 2] = [Workload::Read, Workload::Write];

    /// Map a percentile in `[1, 100]` to the operation to issue.
    ///
    /// Read: 90% search, 5% insert, 5% remove.
    /// Write: 50% insert, 50% remove, or 50% push, 50% pop on a stack.
    pub fn operation(self, family: Family, percentile: u32) -> Operation {
        match (family, self) {
            (Family::Set, Workload::Read) => match percentile {
                0..=90 => Operation::Search,
                91..=95 => Operation::Insert,
                _ => Operation::Remove,
            },
            (Family::Set, Workload::Write) => {
                if percentile <= 50 {
                    Operation::Insert
                } else {
                    Operation::Remove
                }
            }
            // a stack has nothing to read, both profiles are push/pop
            (Family::Stack, _) => {
                if percentile <= 50 {
                    Operation::Push
                } else {
                    Operation::Pop
                }
            }
        }
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Workload::Read => write!(f, "read"),
            Workload::Write => write!(f, "write"),
        }
    }
}

impl FromStr for Workload {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Workload::Read),
            "write" => Ok(Workload::Write),
            _ => Err(BenchError::InvalidConfig(format!(
                "unknown workload `{}`, expected `read` or `write`",
                s
            ))),
        }
    }
}

/// A container the workers can drive.
pub trait BenchTarget: Sync {
    const NAME: &'static str;
    const FAMILY: Family;
    /// Whether the container is filled with `keyspace / 2` random keys before the workers start.
    const PREFILL: bool;

    fn create() -> Self;

    /// Run one operation and return whether it succeeded.
    fn apply(&self, op: Operation, key: Key) -> bool;

    fn prefill(&self, keyspace: Key, rng: &mut RandomGenerator) {
        let op = match Self::FAMILY {
            Family::Set => Operation::Insert,
            Family::Stack => Operation::Push,
        };

        for _ in 0..keyspace / 2 {
            let _ = self.apply(op, rng.key(keyspace));
        }
    }
}

fn apply_set<S: ConcurrentSet<Key>>(set: &S, op: Operation, key: Key) -> bool {
    match op {
        Operation::Search => set.search(&key),
        Operation::Insert => set.insert(key),
        Operation::Remove => set.remove(&key),
        Operation::Push | Operation::Pop => unreachable!("{:?} on a set", op),
    }
}

impl<R: RawRwLock + Sync> BenchTarget for RwLockBST<Key, R> {
    const NAME: &'static str = "Binary search tree";
    const FAMILY: Family = Family::Set;
    const PREFILL: bool = false;

    fn create() -> Self {
        <Self as ConcurrentSet<Key>>::new()
    }

    fn apply(&self, op: Operation, key: Key) -> bool {
        apply_set(self, op, key)
    }
}

impl<R: RawRwLock + Sync> BenchTarget for RwLockList<Key, R> {
    const NAME: &'static str = "Linked list";
    const FAMILY: Family = Family::Set;
    const PREFILL: bool = true;

    fn create() -> Self {
        <Self as ConcurrentSet<Key>>::new()
    }

    fn apply(&self, op: Operation, key: Key) -> bool {
        apply_set(self, op, key)
    }
}

impl<R: RawRwLock + Sync> BenchTarget for RwLockStack<Key, R> {
    const NAME: &'static str = "Stack";
    const FAMILY: Family = Family::Stack;
    const PREFILL: bool = true;

    fn create() -> Self {
        <Self as ConcurrentStack<Key>>::new()
    }

    fn apply(&self, op: Operation, key: Key) -> bool {
        match op {
            Operation::Push => {
                self.push(key);
                true
            }
            Operation::Pop => self.pop().is_some(),
            Operation::Search | Operation::Insert | Operation::Remove => {
                unreachable!("{:?} on a stack", op)
            }
        }
    }
}

/// The operation budget shared by all workers of one run.
///
/// Every claim takes one ticket; only the first `total` tickets are honoured, so the workers
/// together issue exactly `total` operations.
pub struct Budget {
    issued: CachePadded<AtomicU64>,
    total: u64,
}

impl Budget {
    pub fn new(total: u64) -> Self {
        Self {
            issued: CachePadded::new(AtomicU64::new(0)),
            total,
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Claim one operation. Return false once the budget is used up.
    pub fn claim(&self) -> bool {
        self.issued.fetch_add(1, Ordering::Relaxed) < self.total
    }

    pub fn reset(&self) {
        self.issued.store(0, Ordering::Relaxed);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpCount {
    pub issued: u64,
    pub succeeded: u64,
}

/// Per-operation counters of a worker, or of a whole run once merged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpStats {
    counts: [OpCount; 5],
}

impl OpStats {
    pub fn record(&mut self, op: Operation, succeeded: bool) {
        let count = &mut self.counts[op.index()];
        count.issued += 1;

        if succeeded {
            count.succeeded += 1;
        }
    }

    pub fn get(&self, op: Operation) -> OpCount {
        self.counts[op.index()]
    }

    /// Number of operations issued, successful or not.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|count| count.issued).sum()
    }
}

impl AddAssign for OpStats {
    fn add_assign(&mut self, other: Self) {
        for (count, other) in self.counts.iter_mut().zip(other.counts.iter()) {
            count.issued += other.issued;
            count.succeeded += other.succeeded;
        }
    }
}

impl Add for OpStats {
    type Output = OpStats;

    fn add(mut self, other: Self) -> Self::Output {
        self += other;
        self
    }
}

impl std::iter::Sum for OpStats {
    fn sum<I: Iterator<Item = OpStats>>(iter: I) -> Self {
        iter.fold(OpStats::default(), Add::add)
    }
}

impl fmt::Display for OpStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        for op in Operation::ALL.iter() {
            let count = self.get(*op);

            if count.issued == 0 {
                continue;
            }

            if !first {
                write!(f, ", ")?;
            }
            first = false;

            write!(f, "{:?}: {}/{}", op, count.succeeded, count.issued)?;
        }

        Ok(())
    }
}

/// One thread's share of a run: claim from the budget, draw an operation, apply it.
pub struct Worker<'a, C> {
    target: &'a C,
    budget: &'a Budget,
    workload: Workload,
    keyspace: Key,
    rng: RandomGenerator,
}

impl<'a, C: BenchTarget> Worker<'a, C> {
    pub fn new(target: &'a C, budget: &'a Budget, workload: Workload, keyspace: Key) -> Self {
        Self::with_rng(target, budget, workload, keyspace, RandomGenerator::new())
    }

    pub fn with_rng(
        target: &'a C,
        budget: &'a Budget,
        workload: Workload,
        keyspace: Key,
        rng: RandomGenerator,
    ) -> Self {
        Self {
            target,
            budget,
            workload,
            keyspace,
            rng,
        }
    }

    pub fn run(mut self) -> OpStats {
        let mut stats = OpStats::default();

        while self.budget.claim() {
            let op = self.workload.operation(C::FAMILY, self.rng.percentile());
            let key = self.rng.key(self.keyspace);

            stats.record(op, self.target.apply(op, key));
        }

        stats
    }
}
