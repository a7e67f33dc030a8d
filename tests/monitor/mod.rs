use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::Barrier;
use std::time::Duration;

use crossbeam_utils::thread::scope;
use lockable::monitor::MonitorTable;

use crate::util::RacyCounter;

#[test]
fn test_same_identity_serializes() {
    let table = MonitorTable::new();
    let object = Box::new(0u64);
    let counter = RacyCounter::new();

    scope(|scope| {
        for _ in 0..50 {
            scope.spawn(|_| {
                for _ in 0..1_000 {
                    table.synchronized(&*object, || counter.bump());
                }
            });
        }
    })
    .unwrap();

    assert_eq!(counter.get(), 50_000);
    assert_eq!(table.len(), 1);
}

#[test]
fn test_distinct_identities_run_concurrently() {
    let table = MonitorTable::new();
    let a = Box::new(0u32);
    let b = Box::new(0u32);

    // each side blocks inside its critical section until the other has
    // entered; only concurrent execution can complete the handshake
    let (a_tx, a_rx) = mpsc::channel();
    let (b_tx, b_rx) = mpsc::channel();

    let table_ref = &table;
    let a_ref = &*a;
    let b_ref = &*b;

    scope(|scope| {
        scope.spawn(move |_| {
            table_ref.synchronized(a_ref, || {
                a_tx.send(()).unwrap();
                b_rx.recv_timeout(Duration::from_secs(5)).unwrap();
            })
        });
        scope.spawn(move |_| {
            table_ref.synchronized(b_ref, || {
                b_tx.send(()).unwrap();
                a_rx.recv_timeout(Duration::from_secs(5)).unwrap();
            })
        });
    })
    .unwrap();

    assert_eq!(table.len(), 2);
}

#[test]
fn test_first_use_race_creates_one_lock() {
    let table = MonitorTable::new();
    let object = Box::new(7u64);
    let go = Barrier::new(16);

    scope(|scope| {
        for _ in 0..16 {
            scope.spawn(|_| {
                go.wait();
                table.synchronized(&*object, || {});
            });
        }
    })
    .unwrap();

    assert_eq!(table.len(), 1);
}

#[test]
fn test_nested_synchronized_on_same_identity() {
    let table = MonitorTable::new();
    let object = Box::new(1u8);

    let out = table.synchronized(&*object, || table.synchronized(&*object, || 9));

    assert_eq!(out, 9);
    assert_eq!(table.len(), 1);
}

#[test]
fn test_synchronized_releases_after_panic() {
    let table = MonitorTable::new();
    let object = Box::new(3u8);

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        table.synchronized(&*object, || -> () { panic!("inside the monitor") });
    }));
    assert!(result.is_err());

    // the identity's lock must be free again
    assert_eq!(table.synchronized(&*object, || 5), 5);
}

#[test]
fn test_new_table_is_empty() {
    let table = MonitorTable::new();

    assert!(table.is_empty());
    assert_eq!(table.len(), 0);
}
