//! Stress tests for concurrent use of the default context
//!
//! These tests verify:
//! - Records from concurrent threads never interleave within a line
//! - Per-thread contexts never leak keys into each other
//! - Re-reading the default context is safe under contention

use leveled_logger::prelude::*;
use leveled_logger::sinks::SharedBuffer;
use leveled_logger::{info, kv, with};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

static TEST_LOCK: Mutex<()> = parking_lot::const_mutex(());

const THREADS: usize = 8;
const RECORDS_PER_THREAD: usize = 250;

fn parse_all(buffer: &SharedBuffer) -> Vec<serde_json::Value> {
    buffer
        .lines()
        .iter()
        .map(|line| serde_json::from_str(line).expect("Interleaved or corrupt line"))
        .collect()
}

#[test]
fn test_concurrent_contexts_do_not_cross_talk() {
    let _guard = TEST_LOCK.lock();
    let buffer = SharedBuffer::new();
    init_with_writer(LogFormat::Json, buffer.clone());

    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            thread::spawn(move || {
                let key = format!("worker_{}", worker);
                for n in 0..RECORDS_PER_THREAD {
                    info!(with!("worker" => worker, key.as_str() => true))
                        .log(kv!("msg" => format!("{}-{}", worker, n)));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Worker thread panicked");
    }

    let records = parse_all(&buffer);
    assert_eq!(records.len(), THREADS * RECORDS_PER_THREAD);

    let mut per_worker: HashMap<i64, usize> = HashMap::new();
    for record in &records {
        let worker = record["worker"].as_i64().expect("worker key present");
        let msg = record["msg"].as_str().unwrap();
        assert!(msg.starts_with(&format!("{}-", worker)), "{} logged by {}", msg, worker);

        let object = record.as_object().unwrap();
        let worker_keys: Vec<&String> = object
            .keys()
            .filter(|k| k.starts_with("worker_"))
            .collect();
        assert_eq!(worker_keys, vec![&format!("worker_{}", worker)]);

        *per_worker.entry(worker).or_default() += 1;
    }
    assert_eq!(per_worker.len(), THREADS);
    assert!(per_worker.values().all(|&count| count == RECORDS_PER_THREAD));
}

#[test]
fn test_shared_leveler_across_threads() {
    let _guard = TEST_LOCK.lock();
    let buffer = SharedBuffer::new();
    init_with_writer(LogFormat::Logfmt, buffer.clone());

    let shared = Arc::new(with!("component" => "ingest"));
    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let local = shared.with([("worker", worker)]);
                for _ in 0..RECORDS_PER_THREAD {
                    info!(local).msg("tick");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Worker thread panicked");
    }

    let lines = buffer.lines();
    assert_eq!(lines.len(), THREADS * RECORDS_PER_THREAD);
    for line in &lines {
        assert!(line.starts_with("level=info "), "corrupt line: {}", line);
        assert!(line.contains("component=ingest"));
        assert_eq!(line.matches(" worker=").count(), 1);
    }
    assert_eq!(shared.keys(), vec!["ts", "caller", "function", "component"]);
}

#[test]
fn test_add_default_keyvals_then_concurrent_readers() {
    let _guard = TEST_LOCK.lock();
    let buffer = SharedBuffer::new();
    init_with_writer(LogFormat::Json, buffer.clone());
    add_default_keyvals([("deployment", "canary")]);

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            thread::spawn(|| {
                for _ in 0..RECORDS_PER_THREAD {
                    info!().msg("read default");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Worker thread panicked");
    }

    let records = parse_all(&buffer);
    assert_eq!(records.len(), THREADS * RECORDS_PER_THREAD);
    assert!(records.iter().all(|r| r["deployment"] == "canary"));
}
