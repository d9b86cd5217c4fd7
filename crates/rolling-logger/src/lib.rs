//! Rolling Logger
//!
//! A `log` backend that appends to `<app_name>.log` inside a log directory.
//! When the active file would grow past `max_bytes` it is rotated into
//! `<app_name>.1.log`, older files shift up by one, and anything beyond
//! `max_files` is dropped, so the directory holds a fixed ring of logs.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Default size cap of the active log file (1 MiB)
pub const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;
/// Default number of rotated files kept next to the active one
pub const DEFAULT_MAX_FILES: usize = 5;

static LOGGER: OnceLock<&'static RollingLogger> = OnceLock::new();

/// Errors raised while setting up or writing the log
#[derive(Debug)]
pub enum LoggerError {
    Io(io::Error),
    AlreadyInitialized,
    NotInitialized,
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerError::Io(e) => write!(f, "Log I/O error: {}", e),
            LoggerError::AlreadyInitialized => write!(f, "Logger already initialized"),
            LoggerError::NotInitialized => write!(f, "Logger not initialized"),
        }
    }
}

impl std::error::Error for LoggerError {}

impl From<io::Error> for LoggerError {
    fn from(e: io::Error) -> Self {
        LoggerError::Io(e)
    }
}

/// Logger settings
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub log_dir: PathBuf,
    pub app_name: String,
    pub max_bytes: u64,
    pub max_files: usize,
    pub level: LevelFilter,
}

impl LoggerConfig {
    pub fn new(log_dir: impl Into<PathBuf>, app_name: &str) -> Self {
        Self {
            log_dir: log_dir.into(),
            app_name: app_name.to_string(),
            max_bytes: DEFAULT_MAX_BYTES,
            max_files: DEFAULT_MAX_FILES,
            level: LevelFilter::Info,
        }
    }
}

/// The active log file plus its rotated predecessors
pub struct RollingFile {
    dir: PathBuf,
    app_name: String,
    max_bytes: u64,
    max_files: usize,
    file: File,
    written: u64,
}

impl RollingFile {
    pub fn open(dir: &Path, app_name: &str, max_bytes: u64, max_files: usize) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let active = dir.join(format!("{}.log", app_name));
        let file = OpenOptions::new().create(true).append(true).open(&active)?;
        let written = file.metadata()?.len();
        Ok(Self {
            dir: dir.to_path_buf(),
            app_name: app_name.to_string(),
            max_bytes,
            max_files,
            file,
            written,
        })
    }

    pub fn active_path(&self) -> PathBuf {
        self.dir.join(format!("{}.log", self.app_name))
    }

    pub fn rotated_path(&self, n: usize) -> PathBuf {
        self.dir.join(format!("{}.{}.log", self.app_name, n))
    }

    /// Append one line, rotating first if it would overflow the cap
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        let len = line.len() as u64 + 1;
        if self.written > 0 && self.written + len > self.max_bytes {
            self.rotate()?;
        }
        writeln!(self.file, "{}", line)?;
        self.file.flush()?;
        self.written += len;
        Ok(())
    }

    fn rotate(&mut self) -> io::Result<()> {
        if self.max_files > 0 {
            let oldest = self.rotated_path(self.max_files);
            if oldest.exists() {
                fs::remove_file(&oldest)?;
            }
            for n in (1..self.max_files).rev() {
                let from = self.rotated_path(n);
                if from.exists() {
                    fs::rename(&from, self.rotated_path(n + 1))?;
                }
            }
            fs::rename(self.active_path(), self.rotated_path(1))?;
        }

        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.active_path())?;
        self.written = 0;
        Ok(())
    }
}

/// `log::Log` implementation backed by a [`RollingFile`]
pub struct RollingLogger {
    file: Mutex<RollingFile>,
    level: LevelFilter,
}

impl RollingLogger {
    pub fn new(config: &LoggerConfig) -> io::Result<Self> {
        let file = RollingFile::open(
            &config.log_dir,
            &config.app_name,
            config.max_bytes,
            config.max_files,
        )?;
        Ok(Self {
            file: Mutex::new(file),
            level: config.level,
        })
    }

    /// Format and append a single entry
    pub fn write_entry(&self, level: Level, target: &str, message: &str) -> io::Result<()> {
        let line = format!(
            "[{}] {:<5} {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            level,
            target,
            message
        );
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        file.write_line(&line)
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
        let message = record.args().to_string();
        if record.level() <= Level::Warn {
            eprintln!("[{}] {}: {}", record.level(), record.target(), message);
        }
        if let Err(e) = self.write_entry(record.level(), record.target(), &message) {
            eprintln!("rolling-logger: failed to write log entry: {}", e);
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.file.flush();
        }
    }
}

/// Install the global logger writing into `log_dir`
pub fn init_logger(log_dir: impl Into<PathBuf>, app_name: &str) -> Result<(), LoggerError> {
    init_with(LoggerConfig::new(log_dir, app_name))
}

/// Install the global logger with explicit settings
pub fn init_with(config: LoggerConfig) -> Result<(), LoggerError> {
    if LOGGER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }
    let logger: &'static RollingLogger = Box::leak(Box::new(RollingLogger::new(&config)?));
    log::set_logger(logger).map_err(|_| LoggerError::AlreadyInitialized)?;
    log::set_max_level(config.level);
    let _ = LOGGER.set(logger);
    Ok(())
}

fn write_global(level: Level, message: &str) -> Result<(), LoggerError> {
    let logger = LOGGER.get().ok_or(LoggerError::NotInitialized)?;
    logger.write_entry(level, "app", message)?;
    Ok(())
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    write_global(Level::Info, message)
}

pub fn warn(message: &str) -> Result<(), LoggerError> {
    write_global(Level::Warn, message)
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    write_global(Level::Error, message)
}
