//! Rolling Logger
//!
//! `log` backend for the front end. Keeps the most recent lines in a
//! circular buffer and echoes every line to the browser console (wasm32)
//! or stderr (native).

mod buffer;

use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::sync::OnceCell;
use thiserror::Error;

pub use buffer::RingBuffer;

/// Number of lines kept in memory when no capacity is configured
pub const DEFAULT_CAPACITY: usize = 500;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
}

/// Logger settings
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub app_name: String,
    pub capacity: usize,
    pub level: LevelFilter,
}

impl LoggerConfig {
    pub fn new(app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            capacity: DEFAULT_CAPACITY,
            level: if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info },
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }
}

struct RollingLogger {
    app_name: String,
    level: LevelFilter,
    buffer: Mutex<RingBuffer>,
}

static LOGGER: OnceCell<RollingLogger> = OnceCell::new();

impl RollingLogger {
    fn new(config: LoggerConfig) -> Self {
        Self {
            app_name: config.app_name,
            level: config.level,
            buffer: Mutex::new(RingBuffer::new(config.capacity)),
        }
    }

    fn lines(&self) -> Vec<String> {
        self.buffer.lock().map(|buffer| buffer.snapshot()).unwrap_or_default()
    }
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format_line(&Local::now(), record.level(), record.target(), record.args());
        echo(record.level(), &line);
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push(line);
        }
    }

    fn flush(&self) {}
}

/// Install the logger with default settings for `app_name`
pub fn init_logger(app_name: &str) -> Result<(), LoggerError> {
    init_with(LoggerConfig::new(app_name))
}

/// Install the logger as the global `log` backend
pub fn init_with(config: LoggerConfig) -> Result<(), LoggerError> {
    let logger = RollingLogger::new(config);
    let level = logger.level;
    LOGGER.set(logger).map_err(|_| LoggerError::AlreadyInitialized)?;
    let logger = LOGGER.get().ok_or(LoggerError::NotInitialized)?;
    log::set_logger(logger).map_err(|_| LoggerError::AlreadyInitialized)?;
    log::set_max_level(level);
    Ok(())
}

/// Lines currently held in the circular buffer, oldest first
pub fn recent() -> Vec<String> {
    LOGGER.get().map(RollingLogger::lines).unwrap_or_default()
}

/// Name the logger was installed under
pub fn app_name() -> Result<&'static str, LoggerError> {
    LOGGER
        .get()
        .map(|logger| logger.app_name.as_str())
        .ok_or(LoggerError::NotInitialized)
}

fn format_line(now: &DateTime<Local>, level: Level, target: &str, args: &fmt::Arguments) -> String {
    format!("[{}] {:<5} {}: {}", now.format("%H:%M:%S%.3f"), level, target, args)
}

#[cfg(target_arch = "wasm32")]
fn echo(level: Level, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        _ => web_sys::console::log_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn echo(_level: Level, line: &str) {
    eprintln!("{}", line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_line() {
        let now = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 15).unwrap();
        let line = format_line(&now, Level::Warn, "chassis_core", &format_args!("fetch failed"));
        assert_eq!(line, "[09:30:15.000] WARN  chassis_core: fetch failed");
    }

    #[test]
    fn test_accessors_before_init() {
        // The global logger is never installed in unit tests
        assert!(matches!(app_name(), Err(LoggerError::NotInitialized)));
        assert!(recent().is_empty());
    }

    fn emit(logger: &RollingLogger, level: Level, message: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .target("chassis_core::repository")
                .args(format_args!("{}", message))
                .build(),
        );
    }

    #[test]
    fn test_buffer_keeps_newest_lines_at_level() {
        let logger = RollingLogger::new(
            LoggerConfig::new("ChassisRecords")
                .with_capacity(2)
                .with_level(LevelFilter::Info),
        );
        emit(&logger, Level::Debug, "skipped");
        emit(&logger, Level::Info, "first");
        emit(&logger, Level::Warn, "second");
        emit(&logger, Level::Error, "third");

        let lines = logger.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("WARN  chassis_core::repository: second"));
        assert!(lines[1].ends_with("ERROR chassis_core::repository: third"));
        assert!(!lines.iter().any(|line| line.contains("skipped")));
    }

    #[test]
    fn test_config_builder() {
        let config = LoggerConfig::new("ChassisRecords")
            .with_capacity(10)
            .with_level(LevelFilter::Warn);
        assert_eq!(config.app_name, "ChassisRecords");
        assert_eq!(config.capacity, 10);
        assert_eq!(config.level, LevelFilter::Warn);
    }
}
