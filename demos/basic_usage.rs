//! Basic logger usage example
//!
//! Demonstrates hierarchical namespace resolution with the built-in `std`
//! console appender.
//!
//! Run with: cargo run --example basic_usage

use rust_log4r::prelude::*;
use rust_log4r::{info, warn};

fn main() -> Result<()> {
    println!("=== Rust Log4r - Basic Usage Example ===\n");

    let props = Properties::new()
        .with("logger", "__root__", "WARN, std")
        .with("logger", "shop/orders", "TRACE, std");
    let factory = LoggerFactory::new(props);

    // shop/orders/billing inherits from shop/orders
    println!("1. Logger under a configured package:");
    let billing = factory.try_get_logger("shop/orders/billing")?;
    billing.trace("This is a trace message");
    billing.debug("This is a debug message");
    billing.info("This is an info message");
    billing.fatal("This is a fatal message");

    // shop/catalog falls back to __root__
    println!("\n2. Logger falling back to the root:");
    let catalog = factory.try_get_logger("shop/catalog")?;
    catalog.info("Info message (hidden)");
    warn!(catalog, "Stock for item {} is low", 1042);

    println!("\n3. Changing a logger's level at runtime:");
    catalog.set_level(LogLevel::Info);
    info!(catalog, "Catalog reloaded with {} items", 311);

    println!(
        "\n   catalog: emitted={}, suppressed={}",
        catalog.metrics().emitted_count(),
        catalog.metrics().suppressed_count()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
