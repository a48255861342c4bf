//! File logging example
//!
//! Demonstrates sending every record to the console, a text file and a
//! JSON-lines file at once.
//!
//! Run with: cargo run --example file_logging

use rust_ordered_logger::prelude::*;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Ordered Logger - File Logging Example ===\n");

    let mut logger = Logger::builder()
        .format("{{index}} {{timestamp}} <{{title}}> {{message}}")
        .dateformat("rfc3339")
        .level(LogLevel::Debug)
        .transport(ConsoleTransport::new())
        .transport(FileTransport::new("application.log")?)
        .transport(JsonTransport::new("application.jsonl")?)
        .build()?;

    println!("1. Logging to console, text file and JSON file:");

    logger.info("Application started");
    logger.debug("Loading configuration...");
    logger.info("Configuration loaded successfully");
    logger.warn("Using default settings for some options");
    logger.info("Connecting to database...");
    logger.info("Database connection established");
    logger.error("Failed to load optional plugin");
    logger.info("Application initialization complete");

    println!("\n2. Performing some operations:");

    for i in 1..=5 {
        logger.info(format!("Processing item {}/5", i));
        if i == 3 {
            logger.warn("Item 3 took longer than expected");
        }
    }

    logger.info("All operations completed");

    // Drain the queue and flush every transport
    if !logger.shutdown(Duration::from_secs(5)) {
        eprintln!("Some records were still pending at shutdown");
    }

    let metrics = logger.metrics();
    println!(
        "\nDispatched {} records, {} failed",
        metrics.dispatched(),
        metrics.failed()
    );

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' and 'application.jsonl' for the output");

    Ok(())
}
