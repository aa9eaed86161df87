//! Application logging.
//!
//! Records from the `log` facade are routed through a `fern` dispatch into a
//! [`Logger`]: an in-memory buffer backing the logs dialog, plus an optional
//! log file when logging is enabled in the configuration.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Entries kept in memory; older ones are dropped first.
const MAX_BUFFERED_LOGS: usize = 1000;

type FileWriter = Arc<Mutex<BufWriter<File>>>;

/// Shared logger that can be used across the application
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<Vec<String>>>,
    enabled: bool,
    file_writer: Option<FileWriter>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            enabled: false,
            file_writer: None,
        }
    }

    /// In-memory logger, also writing to the log file when `enabled`.
    pub fn from_config(enabled: bool) -> Result<Self> {
        let mut logger = Self::new();
        if enabled {
            let path = Self::get_log_file_path()?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            logger.enabled = true;
            logger.file_writer = Some(Arc::new(Mutex::new(BufWriter::new(file))));
        }
        Ok(logger)
    }

    /// `<cache dir>/comptoir/comptoir.log`
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))
            .map(|dir| dir.join("comptoir").join("comptoir.log"))
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn has_file_writer(&self) -> bool {
        self.file_writer.is_some()
    }

    pub fn file_writer(&self) -> Option<FileWriter> {
        self.file_writer.clone()
    }

    /// Add a log entry
    pub fn log(&self, message: String) {
        let timestamp = Local::now().format("%H:%M:%S%.3f").to_string();
        let formatted_message = format!("[{}] {}", timestamp, message);

        if let Some(writer) = &self.file_writer {
            if let Ok(mut writer) = writer.lock() {
                let _ = writeln!(writer, "{}", formatted_message);
            }
        }

        if let Ok(mut logs) = self.logs.lock() {
            logs.push(formatted_message);
            if logs.len() > MAX_BUFFERED_LOGS {
                let excess = logs.len() - MAX_BUFFERED_LOGS;
                logs.drain(..excess);
            }
        }
    }

    /// Get all logs sorted by date (newest first)
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            let mut sorted_logs = logs.clone();
            sorted_logs.reverse();
            sorted_logs
        } else {
            Vec::new()
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }

    pub fn flush(&self) {
        if let Some(writer) = &self.file_writer {
            if let Ok(mut writer) = writer.lock() {
                let _ = writer.flush();
            }
        }
    }

    /// Install this logger as the global `log` backend at the configured
    /// level. Fails if a global logger is already set.
    pub fn init_global(&self, config: &LoggingConfig) -> Result<()> {
        let sink = self.clone();
        fern::Dispatch::new()
            .level(config.level_filter())
            .chain(fern::Output::call(move |record| {
                sink.log(format!("{} {}", record.level(), record.args()));
            }))
            .apply()
            .context("Failed to install global logger")?;

        log::info!("Logging initialised at level {}", config.level_filter());
        Ok(())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        // Last handle out flushes the file
        if self.file_writer.as_ref().is_some_and(|writer| Arc::strong_count(writer) == 1) {
            self.flush();
        }
    }
}
