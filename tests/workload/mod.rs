use crossbeam_utils::thread::scope;
use rwbench::bst::RwLockBST;
use rwbench::linkedlist::RwLockList;
use rwbench::stack::RwLockStack;
use rwbench::util::RandomGenerator;
use rwbench::workload::{BenchTarget, Budget, Family, Key, OpStats, Operation, Worker, Workload};

#[test]
fn test_read_profile() {
    for percentile in 1..=90 {
        assert_eq!(Workload::Read.operation(Family::Set, percentile), Operation::Search);
    }
    for percentile in 91..=95 {
        assert_eq!(Workload::Read.operation(Family::Set, percentile), Operation::Insert);
    }
    for percentile in 96..=100 {
        assert_eq!(Workload::Read.operation(Family::Set, percentile), Operation::Remove);
    }
}

#[test]
fn test_write_profile() {
    for percentile in 1..=50 {
        assert_eq!(Workload::Write.operation(Family::Set, percentile), Operation::Insert);
        assert_eq!(Workload::Write.operation(Family::Stack, percentile), Operation::Push);
        assert_eq!(Workload::Read.operation(Family::Stack, percentile), Operation::Push);
    }
    for percentile in 51..=100 {
        assert_eq!(Workload::Write.operation(Family::Set, percentile), Operation::Remove);
        assert_eq!(Workload::Write.operation(Family::Stack, percentile), Operation::Pop);
    }
}

#[test]
fn test_parse_workload() {
    assert_eq!("read".parse::<Workload>().unwrap(), Workload::Read);
    assert_eq!("write".parse::<Workload>().unwrap(), Workload::Write);
    assert!("mixed".parse::<Workload>().is_err());
    assert_eq!(Workload::Write.to_string(), "write");
}

#[test]
fn test_random_generator_range() {
    let mut rng = RandomGenerator::seeded(42);

    for _ in 0..10_000 {
        let key = rng.key(100);
        assert!((1..=100).contains(&key));

        let percentile = rng.percentile();
        assert!((1..=100).contains(&percentile));
    }

    assert_eq!(rng.between(7, 7), 7);
    assert_eq!(rng.key(1), 1);
}

#[test]
fn test_budget_claims() {
    let budget = Budget::new(3);

    assert!(budget.claim());
    assert!(budget.claim());
    assert!(budget.claim());
    assert!(!budget.claim());
    assert!(!budget.claim());

    budget.reset();
    assert!(budget.claim());
    assert_eq!(budget.total(), 3);
}

fn drain_budget<C: BenchTarget>(workload: Workload, thread_num: usize, total: u64) -> OpStats {
    let target = C::create();
    let budget = Budget::new(total);

    scope(|s| {
        let mut threads = Vec::new();

        for _ in 0..thread_num {
            let worker = Worker::new(&target, &budget, workload, 64);
            threads.push(s.spawn(move |_| worker.run()));
        }

        threads
            .into_iter()
            .map(|h| h.join().unwrap())
            .sum::<OpStats>()
    })
    .unwrap()
}

#[test]
fn test_budget_is_exact() {
    for thread_num in [1, 2, 3, 8, 16].iter() {
        let stats = drain_budget::<RwLockBST<Key>>(Workload::Read, *thread_num, 10_007);
        assert_eq!(stats.total(), 10_007);

        let stats = drain_budget::<RwLockList<Key>>(Workload::Write, *thread_num, 5_003);
        assert_eq!(stats.total(), 5_003);

        let stats = drain_budget::<RwLockStack<Key>>(Workload::Write, *thread_num, 5_003);
        assert_eq!(stats.total(), 5_003);
    }
}

#[test]
fn test_worker_issues_profile_operations() {
    let stats = drain_budget::<RwLockBST<Key>>(Workload::Write, 4, 10_000);
    assert_eq!(stats.get(Operation::Search).issued, 0);
    assert_eq!(stats.get(Operation::Push).issued, 0);
    assert!(stats.get(Operation::Insert).issued > 0);
    assert!(stats.get(Operation::Remove).issued > 0);

    // nothing can be removed that was not inserted
    assert!(stats.get(Operation::Remove).succeeded <= stats.get(Operation::Insert).succeeded);

    let stats = drain_budget::<RwLockStack<Key>>(Workload::Write, 4, 10_000);
    assert_eq!(
        stats.get(Operation::Push).issued + stats.get(Operation::Pop).issued,
        10_000
    );
    assert_eq!(stats.get(Operation::Push).succeeded, stats.get(Operation::Push).issued);
}

#[test]
fn test_seeded_worker_single_thread() {
    let target = <RwLockBST<Key> as BenchTarget>::create();
    let budget = Budget::new(1_000);

    let worker = Worker::with_rng(
        &target,
        &budget,
        Workload::Read,
        16,
        RandomGenerator::seeded(7),
    );
    let stats = worker.run();

    assert_eq!(stats.total(), 1_000);
    assert_eq!(
        stats.get(Operation::Search).issued
            + stats.get(Operation::Insert).issued
            + stats.get(Operation::Remove).issued,
        1_000
    );

    let keys = target.keys();
    assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(keys.iter().all(|key| (1..=16).contains(key)));
}

#[test]
fn test_prefill() {
    let mut rng = RandomGenerator::seeded(1);

    let list = <RwLockList<Key> as BenchTarget>::create();
    list.prefill(100, &mut rng);
    // random keys may collide, the list keeps only distinct ones
    assert!(list.len() >= 1 && list.len() <= 50);

    let stack = <RwLockStack<Key> as BenchTarget>::create();
    stack.prefill(100, &mut rng);
    assert_eq!(stack.len(), 50);
}
