//! Source location example
//!
//! Demonstrates call-site placeholders, right-aligned columns, a custom
//! source-map resolver and a preprocess hook.
//!
//! Run with: cargo run --example source_locations

use async_trait::async_trait;
use rust_ordered_logger::core::RawFrame;
use rust_ordered_logger::prelude::*;
use std::time::Duration;

/// Resolver that pretends to consult a source map and relocates every
/// frame into a `generated/` tree
struct PrefixResolver {
    latency: Duration,
}

#[async_trait]
impl SourceMapResolver for PrefixResolver {
    async fn resolve(&self, frame: &RawFrame) -> Result<Vec<ResolvedLocation>> {
        tokio::time::sleep(self.latency).await;

        let file = frame.location.rsplit('/').next().unwrap_or_default();
        Ok(vec![ResolvedLocation {
            callee: frame.callee.clone(),
            file: format!("generated/{}", file),
            line: frame.line,
            column: frame.column,
        }])
    }
}

fn main() -> Result<()> {
    println!("=== Rust Ordered Logger - Source Locations Example ===\n");

    println!("1. Default resolver, location right-aligned at 100 columns:");
    let logger = Logger::builder()
        .format("{{index}} <{{title}}> {{message}}{{rhs}}{{callee}} {{file}}:{{line}}:{{pos}}")
        .characters_per_line(100)
        .root_dir(env!("CARGO_MANIFEST_DIR"))
        .build()?;

    logger.info("Resolved from the captured backtrace");
    logger.warn("Every call reports its own line");
    logger.flush()?;

    println!("\n2. Slow custom resolver; output still follows call order:");
    let logger = Logger::builder()
        .format("{{index}} <{{title}}> {{message}}{{rhs}}{{method}} {{folder}}:{{line}}")
        .characters_per_line(100)
        .resolver(PrefixResolver {
            latency: Duration::from_millis(25),
        })
        .preprocess(|record| {
            record.message = record.message.to_uppercase();
            Ok(())
        })
        .build()?;

    for i in 1..=3 {
        logger.info(format!("step {} of 3", i));
    }
    logger.flush()?;

    println!(
        "\n{} locations could not be resolved",
        logger.metrics().unresolved_locations()
    );
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
