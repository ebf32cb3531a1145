//! Calendar-date sources for daily rollover

use chrono::{Datelike, Local, NaiveDate};
use std::sync::atomic::{AtomicU32, Ordering};

/// Pack a date as `YYYYMMDD`.
#[must_use]
pub fn date_stamp(date: NaiveDate) -> u32 {
    // Years before 0 never occur for wall-clock dates.
    date.year().max(0) as u32 * 10_000 + date.month() * 100 + date.day()
}

/// Supplies "today" as a `YYYYMMDD` integer.
pub trait DateSource: Send + Sync {
    fn today(&self) -> u32;
}

/// Local wall-clock date.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDate;

impl DateSource for SystemDate {
    fn today(&self) -> u32 {
        date_stamp(Local::now().date_naive())
    }
}

/// A date that only changes when told to.
///
/// # Examples
///
/// ```
/// use rust_log4r::core::{DateSource, ManualDate};
///
/// let date = ManualDate::new(20240101);
/// date.set(20240102);
/// assert_eq!(date.today(), 20240102);
/// ```
#[derive(Debug)]
pub struct ManualDate {
    today: AtomicU32,
}

impl ManualDate {
    pub const fn new(today: u32) -> Self {
        Self {
            today: AtomicU32::new(today),
        }
    }

    pub fn set(&self, today: u32) {
        self.today.store(today, Ordering::SeqCst);
    }
}

impl DateSource for ManualDate {
    fn today(&self) -> u32 {
        self.today.load(Ordering::SeqCst)
    }
}
