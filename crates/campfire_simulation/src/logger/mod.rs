//! Process-wide logger with a pluggable printer.
//!
//! The simulation never prints directly: hosts install a [`LogPrinter`]
//! (console, engine console, test buffer) and the core routes every message
//! through [`log_with_level`]. Timestamps are added here, not in printers.

use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

static LOGGER: Lazy<Mutex<Option<Box<dyn LogPrinter>>>> = Lazy::new(|| Mutex::new(None));

pub static LOGGER_LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Debug));

// A panic inside a printer must not take logging down for the rest of the session.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn set_logger(logger: Box<dyn LogPrinter>) {
    *lock(&LOGGER) = Some(logger);
}

pub fn set_log_level(level: LogLevel) {
    *lock(&LOGGER_LEVEL) = level;
}

pub fn set_logger_if_needed(logger: Box<dyn LogPrinter>) {
    let mut slot = lock(&LOGGER);
    if slot.is_none() {
        *slot = Some(logger);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

pub trait LogPrinter: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    if level < *lock(&LOGGER_LEVEL) {
        return;
    }

    if let Some(logger) = lock(&LOGGER).as_ref() {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        logger.log(level, &format!("[{}] {}", timestamp, message));
    }
}

pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        println!("[{}] {}", level.as_str(), message);
    }
}

/// Printer that keeps lines in memory (headless runs, assertions in tests).
///
/// Clones share the same buffer, so a test can keep one handle and install
/// the other with [`set_logger`].
#[derive(Clone, Default)]
pub struct MemoryLogger {
    lines: Arc<Mutex<Vec<(LogLevel, String)>>>,
}

impl MemoryLogger {
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        lock(&self.lines).clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        lock(&self.lines).iter().any(|(_, line)| line.contains(needle))
    }

    pub fn count(&self, needle: &str) -> usize {
        lock(&self.lines)
            .iter()
            .filter(|(_, line)| line.contains(needle))
            .count()
    }
}

impl LogPrinter for MemoryLogger {
    fn log(&self, level: LogLevel, message: &str) {
        lock(&self.lines).push((level, message.to_string()));
    }
}

pub fn init_logger() {
    set_logger_if_needed(Box::new(ConsoleLogger));
}

/// Latch for "reference missing" warnings that would otherwise fire every frame.
///
/// `warn` logs only on the first call after construction or [`LogOnce::rearm`].
#[derive(Debug, Default, Clone)]
pub struct LogOnce {
    fired: bool,
}

impl LogOnce {
    pub fn warn(&mut self, message: &str) -> bool {
        if self.fired {
            return false;
        }
        self.fired = true;
        log_warning(message);
        true
    }

    pub fn rearm(&mut self) {
        self.fired = false;
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

#[cfg(test)]
static CAPTURE_GUARD: Mutex<()> = Mutex::new(());

/// Routes the global logger into a fresh [`MemoryLogger`] for one test.
///
/// Holds a process-wide lock so tests that emit or assert on log lines do
/// not interleave; the logger is uninstalled on drop.
#[cfg(test)]
pub(crate) struct LogCapture {
    logger: MemoryLogger,
    _guard: MutexGuard<'static, ()>,
}

#[cfg(test)]
impl LogCapture {
    pub(crate) fn install() -> Self {
        let guard = lock(&CAPTURE_GUARD);
        let logger = MemoryLogger::default();
        set_log_level(LogLevel::Debug);
        set_logger(Box::new(logger.clone()));
        Self {
            logger,
            _guard: guard,
        }
    }

    pub(crate) fn count(&self, needle: &str) -> usize {
        self.logger.count(needle)
    }
}

#[cfg(test)]
impl Drop for LogCapture {
    fn drop(&mut self) {
        *lock(&LOGGER) = None;
    }
}
