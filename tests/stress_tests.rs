//! Stress tests for ordered dispatch
//!
//! These tests verify:
//! - Records from many threads are numbered and dispatched in one total order
//! - Each thread's own records keep their relative order
//! - Shutdown drains a large backlog

use rust_ordered_logger::core::LogLevel;
use rust_ordered_logger::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const THREADS: usize = 8;
const PER_THREAD: usize = 250;

#[test]
fn test_concurrent_callers_share_one_order() {
    let memory = MemoryTransport::new();
    let logger = Arc::new(
        Logger::builder()
            .format("{{index}} {{message}}")
            .index_format("%06s")
            .transport(memory.clone())
            .build()
            .expect("Failed to build logger"),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger.info(format!("{}:{}", t, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    logger.flush().expect("Failed to flush");

    let records = memory.records();
    assert_eq!(records.len(), THREADS * PER_THREAD);

    // Sequence numbers are contiguous and follow dispatch order
    for (position, record) in records.iter().enumerate() {
        assert_eq!(record.sequence, position as u64 + 1);
        assert_eq!(record.index, format!("{:06}", position + 1));
    }

    // Per-thread order is preserved
    let mut last_seen: HashMap<usize, usize> = HashMap::new();
    for record in &records {
        let (thread_id, i) = record
            .message
            .split_once(':')
            .map(|(t, i)| (t.parse::<usize>().unwrap(), i.parse::<usize>().unwrap()))
            .expect("well formed message");
        if let Some(previous) = last_seen.insert(thread_id, i) {
            assert!(i > previous, "thread {} went from {} to {}", thread_id, previous, i);
        }
    }

    assert_eq!(logger.metrics().dispatched(), (THREADS * PER_THREAD) as u64);
    assert_eq!(logger.metrics().in_flight(), 0);
}

#[test]
fn test_threshold_changes_while_logging() {
    let memory = MemoryTransport::new();
    let logger = Arc::new(
        Logger::builder()
            .format("{{title}}")
            .transport(memory.clone())
            .build()
            .expect("Failed to build logger"),
    );

    let writer = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for _ in 0..1000 {
                logger.debug("d");
                logger.fatal("f");
            }
        })
    };
    let toggler = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for i in 0..200 {
                let level = if i % 2 == 0 { LogLevel::Debug } else { LogLevel::Error };
                logger.set_level(level);
                thread::yield_now();
            }
        })
    };

    writer.join().expect("Writer panicked");
    toggler.join().expect("Toggler panicked");
    logger.flush().expect("Failed to flush");

    let outputs = memory.outputs();
    let fatal = outputs.iter().filter(|o| o.as_str() == "FATAL").count();
    let debug = outputs.iter().filter(|o| o.as_str() == "DEBUG").count();

    // Fatal passes every threshold used here
    assert_eq!(fatal, 1000);
    assert_eq!(debug as u64 + logger.metrics().suppressed(), 1000);
}

#[test]
fn test_shutdown_drains_backlog() {
    let memory = MemoryTransport::new();
    let mut logger = Logger::builder()
        .format("{{message}}")
        .transport(memory.clone())
        .build()
        .expect("Failed to build logger");

    for i in 0..5_000 {
        logger.info(format!("{}", i));
    }

    assert!(logger.shutdown(Duration::from_secs(30)));
    assert_eq!(memory.len(), 5_000);
    assert_eq!(logger.pending(), 0);
}
