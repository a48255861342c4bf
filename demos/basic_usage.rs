//! Basic logger usage example
//!
//! Demonstrates the default console transport, severity levels and the
//! threshold gate.
//!
//! Run with: cargo run --example basic_usage

use rust_ordered_logger::prelude::*;
use rust_ordered_logger::{info, warn};

fn main() -> Result<()> {
    println!("=== Rust Ordered Logger - Basic Usage Example ===\n");

    // Console transport, default template, LOG threshold
    let logger = Logger::builder()
        .format("{{index}} {{timestamp}} <{{title}}> {{message}}")
        .level(LogLevel::Log)
        .build()?;

    println!("1. Logging at different levels:");
    logger.log("This is a log message");
    logger.trace("This is a trace message");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.fatal("This is a fatal message");
    logger.flush()?;

    println!("\n2. Raising the threshold:");
    logger.set_level(LogLevel::Warn);
    println!("   Threshold set to WARN - log, trace, debug and info won't show:");
    logger.debug("Debug message (hidden)");
    logger.info("Info message (hidden)");
    warn!(logger, "Warning message (visible), attempt {}", 2);
    logger.fatal("Fatal always passes unless the logger is disabled");
    logger.flush()?;

    println!("\n3. Disabling output:");
    logger.set_level(LogLevel::Disabled);
    logger.fatal("Fatal message (hidden)");
    logger.set_level(LogLevel::Info);
    info!(logger, "Back on, {} records suppressed so far", logger.metrics().suppressed());
    logger.flush()?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
