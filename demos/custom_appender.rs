//! Custom appender example
//!
//! Registers a new appender type and references it from configuration.
//!
//! Run with: cargo run --example custom_appender

use parking_lot::{Mutex, RwLock};
use rust_log4r::core::{threshold_param, LogEvent};
use rust_log4r::prelude::*;
use std::sync::Arc;

/// Keeps the most recent lines in memory.
struct RingAppender {
    id: String,
    threshold: RwLock<LogLevel>,
    capacity: usize,
    lines: Mutex<Vec<String>>,
}

impl RingAppender {
    fn from_params(id: &str, params: &AppenderParams) -> Result<Arc<dyn Appender>> {
        let capacity = match params.get("capacity") {
            Some(value) => value.trim().parse().map_err(|_| {
                LoggerError::config("ring", format!("invalid capacity '{}'", value))
            })?,
            None => 16,
        };

        Ok(Arc::new(Self {
            id: id.to_string(),
            threshold: RwLock::new(threshold_param(params)),
            capacity,
            lines: Mutex::new(Vec::new()),
        }))
    }
}

impl Appender for RingAppender {
    fn id(&self) -> &str {
        &self.id
    }

    fn threshold(&self) -> LogLevel {
        *self.threshold.read()
    }

    fn set_threshold(&self, threshold: LogLevel) {
        *self.threshold.write() = threshold;
    }

    fn fire(&self, event: &LogEvent) -> Result<()> {
        if !self.accepts(event.level()) {
            return Ok(());
        }

        let mut lines = self.lines.lock();
        if lines.len() == self.capacity {
            lines.remove(0);
        }
        lines.push(event.render());
        Ok(())
    }
}

fn main() -> Result<()> {
    println!("=== Rust Log4r - Custom Appender Example ===\n");

    let props = Properties::new()
        .with("appender", "recent.type", "ring")
        .with("appender", "recent.capacity", "3")
        .with("appender", "recent.threshold", "INFO")
        .with("logger", "__root__", "DEBUG, recent");

    let factory = LoggerFactory::new(props);
    factory.register_appender_type("ring", RingAppender::from_params)?;

    let logger = factory.try_get_logger("example/ring")?;
    for i in 1..=5 {
        logger.debug(format!("debug {}", i));
        logger.info(format!("request {}", i));
    }

    println!("Registered appenders: {:?}", factory.appender_ids());
    println!("Logger bindings:      {:?}", logger.appender_ids());
    println!(
        "Emitted {} events; the ring keeps the last three INFO lines.",
        logger.metrics().emitted_count()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
