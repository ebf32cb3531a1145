//! Daily rolling file appender
//!
//! Appends one rendered line per accepted event to a file. The first event
//! fired on a later calendar day than the appender's watermark rolls the
//! file: the current file is renamed with a `.<YYYYMMDD>` suffix naming the
//! day being rolled away from, and a fresh file is opened at the original
//! path.
//!
//! The rollover check, the rename/reopen, and the write all happen under one
//! exclusive lock per appender, so racing `fire` calls at a day boundary roll
//! exactly once and never write to a half-rotated handle.

use crate::core::{
    threshold_param, Appender, AppenderParams, DateSource, LogEvent, LogLevel, LoggerError,
    Result, SystemDate,
};
use parking_lot::RwLock;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Type name the daily rolling file appender is registered under.
pub const DAILY_FILE_APPENDER_TYPE: &str = "file";

struct FileState {
    path: PathBuf,
    writer: Option<File>,
    /// Calendar date (`YYYYMMDD`) the current file belongs to.
    watermark: u32,
}

/// File appender that rolls over once per calendar day.
///
/// # Examples
///
/// ```no_run
/// use rust_log4r::appenders::DailyRollingFileAppender;
/// use rust_log4r::core::{Appender, LogEvent, LogLevel};
///
/// let appender = DailyRollingFileAppender::new("app", "/var/log/app.log")
///     .unwrap()
///     .with_threshold(LogLevel::Info);
/// appender.fire(&LogEvent::new("app", LogLevel::Warn, "disk almost full")).unwrap();
/// ```
pub struct DailyRollingFileAppender {
    id: String,
    threshold: RwLock<LogLevel>,
    state: RwLock<FileState>,
    dates: Arc<dyn DateSource>,
}

impl DailyRollingFileAppender {
    /// Open (or create) `path` for appending, using the local calendar date.
    ///
    /// # Errors
    ///
    /// Returns error if the working directory is unavailable for a relative
    /// path, or if the file cannot be created or opened
    pub fn new(id: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        Self::with_date_source(id, path, Arc::new(SystemDate))
    }

    /// Like [`new`](Self::new) with an explicit source for "today".
    pub fn with_date_source(
        id: impl Into<String>,
        path: impl AsRef<Path>,
        dates: Arc<dyn DateSource>,
    ) -> Result<Self> {
        let path = resolve_path(path.as_ref())?;
        let file = open_log_file(&path)?;
        let watermark = dates.today();

        Ok(Self {
            id: id.into(),
            threshold: RwLock::new(LogLevel::All),
            state: RwLock::new(FileState {
                path,
                writer: Some(file),
                watermark,
            }),
            dates,
        })
    }

    /// Constructor registered for the `file` appender type.
    ///
    /// Requires a `path` parameter; `threshold` is optional.
    pub fn from_params(id: &str, params: &AppenderParams) -> Result<Arc<dyn Appender>> {
        let path = params.get("path").map(|p| p.trim()).filter(|p| !p.is_empty()).ok_or_else(|| {
            LoggerError::config(
                DAILY_FILE_APPENDER_TYPE,
                format!("the path parameter is required for appender '{}'", id),
            )
        })?;

        Ok(Arc::new(
            Self::new(id, path)?.with_threshold(threshold_param(params)),
        ))
    }

    #[must_use]
    pub fn with_threshold(self, threshold: LogLevel) -> Self {
        *self.threshold.write() = threshold;
        self
    }

    /// Absolute path of the live log file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.state.read().path.clone()
    }

    /// Date (`YYYYMMDD`) the live file belongs to.
    #[must_use]
    pub fn watermark(&self) -> u32 {
        self.state.read().watermark
    }

    /// Switch output to `path`.
    ///
    /// The new file is opened before the old handle is released, so a
    /// failure leaves the appender writing where it was.
    pub fn set_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = resolve_path(path.as_ref())?;
        let file = open_log_file(&path)?;

        let mut state = self.state.write();
        if let Some(mut old) = state.writer.take() {
            let _ = old.flush();
        }
        state.writer = Some(file);
        state.path = path;
        Ok(())
    }

    /// Path the file is renamed to when rolling away from `watermark`.
    fn backup_path(path: &Path, watermark: u32) -> PathBuf {
        let mut backup = path.as_os_str().to_os_string();
        backup.push(format!(".{}", watermark));
        PathBuf::from(backup)
    }

    /// Close, rename, and reopen the live file. Caller holds the state lock.
    fn roll(state: &mut FileState, today: u32) -> Result<()> {
        // Release the handle before renaming
        if let Some(mut writer) = state.writer.take() {
            let _ = writer.flush();
        }

        let backup = Self::backup_path(&state.path, state.watermark);
        let rename_result = if state.path.exists() {
            fs::rename(&state.path, &backup).map_err(|e| {
                LoggerError::file_rotation(
                    state.path.display().to_string(),
                    format!("Failed to rename to '{}': {}", backup.display(), e),
                )
            })
        } else {
            Ok(())
        };

        // Reopen even when the rename failed so the current event still lands
        let file = open_log_file(&state.path).map_err(|e| {
            LoggerError::file_rotation(
                state.path.display().to_string(),
                format!("Failed to create new log file: {}", e),
            )
        })?;
        state.writer = Some(file);
        state.watermark = today;

        rename_result
    }
}

impl Appender for DailyRollingFileAppender {
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
        let mut guard = self.state.write();
        let state = &mut *guard;

        let today = self.dates.today();
        if today > state.watermark {
            if let Err(e) = Self::roll(state, today) {
                eprintln!(
                    "[WARN] Log rotation failed: {}. Continuing with current file.",
                    e
                );
                // Don't retry a broken rotation on every event
                state.watermark = today;
            }
        }

        if !self.accepts(event.level()) {
            return Ok(());
        }

        if state.writer.is_none() {
            let file = open_log_file(&state.path).map_err(|e| {
                eprintln!("[ERROR] Failed to reopen log file after rotation failure: {}", e);
                e
            })?;
            state.writer = Some(file);
        }

        let mut line = event.render();
        line.push('\n');

        let path = &state.path;
        match state.writer.as_mut() {
            Some(writer) => writer.write_all(line.as_bytes()).map_err(|e| {
                LoggerError::file_appender(
                    path.display().to_string(),
                    format!("Failed to write log entry: {}", e),
                )
            }),
            None => Err(LoggerError::writer("Writer not initialized")),
        }
    }

    fn flush(&self) -> Result<()> {
        let mut state = self.state.write();
        if let Some(writer) = state.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}

/// Absolute paths are kept; relative ones are joined onto the working directory.
fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    let cwd = std::env::current_dir().map_err(|e| {
        LoggerError::io_operation(
            "resolving log path",
            format!("working directory unavailable for '{}'", path.display()),
            e,
        )
    })?;
    Ok(cwd.join(path))
}

fn open_log_file(path: &Path) -> Result<File> {
    // Create parent directory if it doesn't exist
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            LoggerError::io_operation(
                "create log directory",
                format!("Failed to create directory '{}'", parent.display()),
                e,
            )
        })?;
    }

    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    options.open(path).map_err(|e| {
        LoggerError::file_appender(path.display().to_string(), format!("Failed to open: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualDate;
    use std::thread;
    use tempfile::tempdir;

    fn appender_at(path: &Path, dates: &Arc<ManualDate>) -> DailyRollingFileAppender {
        DailyRollingFileAppender::with_date_source("file", path, dates.clone()).unwrap()
    }

    fn read_lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_from_params_requires_path() {
        let err = DailyRollingFileAppender::from_params("myTest2", &AppenderParams::new())
            .err()
            .unwrap();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_from_params_threshold() {
        let dir = tempdir().unwrap();
        let mut params = AppenderParams::new();
        params.insert("threshold".to_string(), "INFO".to_string());
        params.insert(
            "path".to_string(),
            dir.path().join("myTest2.log").display().to_string(),
        );

        let appender = DailyRollingFileAppender::from_params("myTest2", &params).unwrap();
        assert_eq!(appender.id(), "myTest2");
        assert_eq!(appender.threshold(), LogLevel::Info);
        assert!(dir.path().join("myTest2.log").exists());
    }

    #[test]
    fn test_relative_path_resolves_against_working_directory() {
        let resolved = resolve_path(Path::new("logs/app.log")).unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(resolved, std::env::current_dir().unwrap().join("logs/app.log"));

        let absolute = Path::new("/tmp/app.log");
        assert_eq!(resolve_path(absolute).unwrap(), absolute);
    }

    #[test]
    fn test_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("nested/deeper/app.log");

        let appender = DailyRollingFileAppender::new("file", &log_path).unwrap();
        assert!(log_path.exists());
        assert_eq!(appender.path(), log_path);
    }

    #[test]
    fn test_same_day_appends_without_rename() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("app.log");
        let dates = Arc::new(ManualDate::new(20240101));
        let appender = appender_at(&log_path, &dates);

        for i in 0..5 {
            appender
                .fire(&LogEvent::new("svc", LogLevel::Info, format!("message {}", i)))
                .unwrap();
        }

        let lines = read_lines(&log_path);
        assert_eq!(lines.len(), 5);
        assert!(lines[4].ends_with("INFO svc: message 4"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
        assert_eq!(appender.watermark(), 20240101);
    }

    #[test]
    fn test_day_change_rolls_once() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("app.log");
        let dates = Arc::new(ManualDate::new(20240101));
        let appender = appender_at(&log_path, &dates);

        for i in 0..3 {
            appender
                .fire(&LogEvent::new("svc", LogLevel::Info, format!("day one {}", i)))
                .unwrap();
        }

        dates.set(20240102);
        appender.fire(&LogEvent::new("svc", LogLevel::Info, "day two 0")).unwrap();
        appender.fire(&LogEvent::new("svc", LogLevel::Info, "day two 1")).unwrap();

        let backup = dir.path().join("app.log.20240101");
        assert_eq!(read_lines(&backup).len(), 3);

        let live = read_lines(&log_path);
        assert_eq!(live.len(), 2);
        assert!(live[0].ends_with("day two 0"));
        assert_eq!(appender.watermark(), 20240102);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_earlier_date_does_not_roll() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("app.log");
        let dates = Arc::new(ManualDate::new(20240105));
        let appender = appender_at(&log_path, &dates);

        dates.set(20240104);
        appender.fire(&LogEvent::new("svc", LogLevel::Info, "clock went back")).unwrap();

        assert_eq!(appender.watermark(), 20240105);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_rotation_happens_before_threshold_check() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("app.log");
        let dates = Arc::new(ManualDate::new(20240101));
        let appender = appender_at(&log_path, &dates).with_threshold(LogLevel::Error);

        appender.fire(&LogEvent::new("svc", LogLevel::Error, "kept")).unwrap();
        appender.fire(&LogEvent::new("svc", LogLevel::Info, "filtered")).unwrap();
        assert_eq!(read_lines(&log_path).len(), 1);

        dates.set(20240102);
        appender.fire(&LogEvent::new("svc", LogLevel::Trace, "filtered")).unwrap();

        assert_eq!(read_lines(&dir.path().join("app.log.20240101")).len(), 1);
        assert!(read_lines(&log_path).is_empty());
    }

    #[test]
    fn test_concurrent_fires_across_boundary_roll_once() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("race.log");
        let dates = Arc::new(ManualDate::new(20240101));
        let appender = Arc::new(appender_at(&log_path, &dates));

        appender.fire(&LogEvent::new("svc", LogLevel::Info, "before")).unwrap();
        dates.set(20240102);

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let appender = Arc::clone(&appender);
                thread::spawn(move || {
                    for i in 0..25 {
                        appender
                            .fire(&LogEvent::new("svc", LogLevel::Info, format!("{}-{}", t, i)))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let backup = read_lines(&dir.path().join("race.log.20240101"));
        assert_eq!(backup.len(), 1);
        assert!(backup[0].ends_with("before"));
        assert_eq!(read_lines(&log_path).len(), 200);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_failed_rename_keeps_writing() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("app.log");
        let dates = Arc::new(ManualDate::new(20240101));
        let appender = appender_at(&log_path, &dates);

        appender.fire(&LogEvent::new("svc", LogLevel::Info, "first")).unwrap();

        // A non-empty directory in the backup's place makes the rename fail
        let blocker = dir.path().join("app.log.20240101");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("occupied"), b"x").unwrap();

        dates.set(20240102);
        appender.fire(&LogEvent::new("svc", LogLevel::Info, "second")).unwrap();

        let live = read_lines(&log_path);
        assert_eq!(live.len(), 2);
        assert!(live[1].ends_with("second"));
        assert_eq!(appender.watermark(), 20240102);
    }

    #[test]
    fn test_set_path_switches_file() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.log");
        let second = dir.path().join("second.log");
        let appender = DailyRollingFileAppender::new("file", &first).unwrap();

        appender.fire(&LogEvent::new("svc", LogLevel::Info, "one")).unwrap();
        appender.set_path(&second).unwrap();
        appender.fire(&LogEvent::new("svc", LogLevel::Info, "two")).unwrap();

        assert_eq!(appender.path(), second);
        assert_eq!(read_lines(&first).len(), 1);
        assert_eq!(read_lines(&second).len(), 1);
        assert!(read_lines(&second)[0].ends_with("two"));
    }

    #[test]
    fn test_backup_path_suffix() {
        let backup = DailyRollingFileAppender::backup_path(Path::new("/var/log/app.log"), 20231231);
        assert_eq!(backup, PathBuf::from("/var/log/app.log.20231231"));
    }
}
