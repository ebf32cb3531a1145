//! File logging example
//!
//! Loads a TOML configuration that routes a package to a daily rolling
//! file, then prints what was written.
//!
//! Run with: cargo run --example file_logging

use rust_log4r::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== Rust Log4r - File Logging Example ===\n");

    let dir = std::env::temp_dir().join("rust_log4r_demo");
    fs::create_dir_all(&dir)?;
    let log_path = dir.join("app.log");
    let config_path = dir.join("log4r.toml");

    fs::write(
        &config_path,
        format!(
            r#"
[appender]
app.type = "file"
app.path = "{}"
app.threshold = "INFO"

[logger]
__root__ = "WARN, std"
"example/jobs" = ["DEBUG", "std", "app"]
"#,
            log_path.display()
        ),
    )?;

    let factory = LoggerFactory::new(FileSource::new(&config_path));
    let jobs = factory.try_get_logger("example/jobs/nightly")?;

    jobs.debug("Console only: below the file appender threshold");
    jobs.info("Nightly job started");
    jobs.error("Nightly job failed: disk quota exceeded");
    jobs.flush()?;

    println!("\nContents of {}:", log_path.display());
    for line in fs::read_to_string(&log_path)?.lines() {
        println!("  {}", line);
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
