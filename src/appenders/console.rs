//! Console appender implementation

use crate::core::{threshold_param, Appender, AppenderParams, LogEvent, LogLevel, Result};
use parking_lot::{Mutex, RwLock};
use std::io::{self, Write};
use std::sync::Arc;

/// Type name the console appender is registered under.
pub const CONSOLE_APPENDER_TYPE: &str = "std";

enum Target {
    Stdout,
    Writer(Mutex<Box<dyn Write + Send>>),
}

/// Writes one rendered line per accepted event to standard output.
pub struct ConsoleAppender {
    id: String,
    threshold: RwLock<LogLevel>,
    use_colors: bool,
    target: Target,
}

impl ConsoleAppender {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            threshold: RwLock::new(LogLevel::All),
            use_colors: false,
            target: Target::Stdout,
        }
    }

    /// Constructor registered for the `std` appender type.
    ///
    /// Reads the optional `threshold` and `colors` parameters; never fails.
    pub fn from_params(id: &str, params: &AppenderParams) -> Result<Arc<dyn Appender>> {
        let use_colors = params
            .get("colors")
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"));

        Ok(Arc::new(
            Self::new(id)
                .with_threshold(threshold_param(params))
                .with_colors(use_colors),
        ))
    }

    #[must_use]
    pub fn with_threshold(self, threshold: LogLevel) -> Self {
        *self.threshold.write() = threshold;
        self
    }

    /// Colour the level name. Has no effect without the `console` feature.
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Send output to `writer` instead of standard output.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_log4r::appenders::ConsoleAppender;
    ///
    /// let appender = ConsoleAppender::new("captured").with_writer(std::io::sink());
    /// ```
    #[must_use]
    pub fn with_writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.target = Target::Writer(Mutex::new(Box::new(writer)));
        self
    }

    fn format_line(&self, event: &LogEvent) -> String {
        #[cfg(feature = "console")]
        {
            if self.use_colors {
                use colored::Colorize;
                let level = event.level().to_str().color(event.level().color_code());
                return event.render_with_level(&level.to_string());
            }
        }

        event.render()
    }
}

impl Appender for ConsoleAppender {
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

        let line = self.format_line(event);
        match &self.target {
            Target::Stdout => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", line)?;
            }
            Target::Writer(writer) => {
                writeln!(writer.lock(), "{}", line)?;
            }
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        match &self.target {
            Target::Stdout => io::stdout().flush()?,
            Target::Writer(writer) => writer.lock().flush()?,
        }
        Ok(())
    }
}
