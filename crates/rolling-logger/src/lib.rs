//! Rolling Logger
//!
//! Installs a `tracing` subscriber that writes to stderr and to a
//! size-capped log file. When the file fills up it is shifted to
//! `<name>.log.1`, older files move up by one, and the oldest is dropped,
//! so the directory never holds more than `max_files` rotated logs.
//!
//! Records emitted through the `log` crate are bridged into the same subscriber.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Size and retention limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Rotate once the active file would exceed this many bytes
    pub max_bytes: u64,
    /// Rotated files kept besides the active one
    pub max_files: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_bytes: 1024 * 1024,
            max_files: 5,
        }
    }
}

/// Size-capped log file that rotates through a fixed set of backups
#[derive(Debug)]
pub struct RollingFile {
    dir: PathBuf,
    name: String,
    config: LoggerConfig,
    file: File,
    written: u64,
}

impl RollingFile {
    pub fn open(dir: &Path, name: &str, config: LoggerConfig) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.log", name));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            dir: dir.to_path_buf(),
            name: name.to_string(),
            config,
            file,
            written,
        })
    }

    /// Path of the active file (`index == 0`) or of a rotated backup
    pub fn path(&self, index: usize) -> PathBuf {
        if index == 0 {
            self.dir.join(format!("{}.log", self.name))
        } else {
            self.dir.join(format!("{}.log.{}", self.name, index))
        }
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.config.max_files == 0 {
            self.file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(self.path(0))?;
            self.written = 0;
            return Ok(());
        }

        let oldest = self.path(self.config.max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.config.max_files).rev() {
            let from = self.path(index);
            if from.exists() {
                fs::rename(&from, self.path(index + 1))?;
            }
        }
        fs::rename(self.path(0), self.path(1))?;

        self.file = OpenOptions::new().create(true).append(true).open(self.path(0))?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RollingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.config.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Initialize logging with default limits
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), String> {
    init_logger_with(log_dir, app_name, LoggerConfig::default())
}

/// Initialize logging. `RUST_LOG` selects levels (default `info`).
pub fn init_logger_with(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    config: LoggerConfig,
) -> Result<(), String> {
    let log_dir = log_dir.as_ref();
    let mut file = RollingFile::open(log_dir, app_name, config)
        .map_err(|e| format!("Failed to open log file in {}: {}", log_dir.display(), e))?;

    writeln!(
        file,
        "=== {} started {} ===",
        app_name,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f")
    )
    .map_err(|e| e.to_string())?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()
        .map_err(|e| format!("Failed to install logger: {}", e))?;

    INITIALIZED.store(true, Ordering::SeqCst);
    Ok(())
}

/// Log an info line; fails if the logger was never initialized
pub fn info(msg: &str) -> Result<(), String> {
    ensure_initialized()?;
    log::info!("{}", msg);
    Ok(())
}

/// Log an error line; fails if the logger was never initialized
pub fn error(msg: &str) -> Result<(), String> {
    ensure_initialized()?;
    log::error!("{}", msg);
    Ok(())
}

fn ensure_initialized() -> Result<(), String> {
    if INITIALIZED.load(Ordering::SeqCst) {
        Ok(())
    } else {
        Err("logger not initialized".to_string())
    }
}
