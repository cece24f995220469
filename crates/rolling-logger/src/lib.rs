//! Rolling Logger
//!
//! File logger with size-based rotation and a circular buffer of the most
//! recent lines. Installed as the global `tracing` subscriber; records sent
//! through the `log` facade are captured as well.

use std::collections::VecDeque;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;

/// Rotate once the active file would grow past this size
pub const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;
/// Rotated files kept next to the active one (`<app>.log.1` ..)
pub const DEFAULT_MAX_FILES: usize = 3;
/// Lines kept in memory for in-app display
pub const DEFAULT_BUFFER_LINES: usize = 500;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("log file error: {0}")]
    Io(#[from] io::Error),
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
}

#[derive(Debug, Clone)]
pub struct RollingOptions {
    pub max_bytes: u64,
    pub max_files: usize,
    pub buffer_lines: usize,
}

impl Default for RollingOptions {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_files: DEFAULT_MAX_FILES,
            buffer_lines: DEFAULT_BUFFER_LINES,
        }
    }
}

struct Inner {
    path: PathBuf,
    file: File,
    written: u64,
    opts: RollingOptions,
    recent: VecDeque<String>,
    partial: String,
}

impl Inner {
    fn write_bytes(&mut self, buf: &[u8]) -> io::Result<()> {
        if self.written > 0 && self.written + buf.len() as u64 > self.opts.max_bytes {
            self.roll()?;
        }
        self.file.write_all(buf)?;
        self.written += buf.len() as u64;
        self.remember(buf);
        Ok(())
    }

    fn roll(&mut self) -> io::Result<()> {
        self.file.flush()?;
        if self.opts.max_files > 0 {
            for idx in (1..self.opts.max_files).rev() {
                let from = self.rotated(idx);
                if from.exists() {
                    let to = self.rotated(idx + 1);
                    if to.exists() {
                        fs::remove_file(&to)?;
                    }
                    fs::rename(&from, &to)?;
                }
            }
            let first = self.rotated(1);
            if first.exists() {
                fs::remove_file(&first)?;
            }
            fs::rename(&self.path, &first)?;
        }
        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        self.written = 0;
        Ok(())
    }

    fn rotated(&self, idx: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{idx}"));
        PathBuf::from(name)
    }

    fn remember(&mut self, buf: &[u8]) {
        if self.opts.buffer_lines == 0 {
            return;
        }
        self.partial.push_str(&String::from_utf8_lossy(buf));
        while let Some(pos) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=pos).collect();
            if self.recent.len() == self.opts.buffer_lines {
                self.recent.pop_front();
            }
            self.recent.push_back(line.trim_end().to_string());
        }
    }
}

/// Size-rotated log file shared by every writer handle
#[derive(Clone)]
pub struct RollingWriter {
    inner: Arc<Mutex<Inner>>,
}

impl RollingWriter {
    /// Open (or append to) `<log_dir>/<app_name>.log`
    pub fn open(
        log_dir: impl AsRef<Path>,
        app_name: &str,
        opts: RollingOptions,
    ) -> Result<Self, LoggerError> {
        let dir = log_dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{app_name}.log"));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                path,
                file,
                written,
                opts,
                recent: VecDeque::new(),
                partial: String::new(),
            })),
        })
    }

    pub fn path(&self) -> PathBuf {
        self.lock().path.clone()
    }

    /// Most recent complete lines, oldest first
    pub fn recent_lines(&self) -> Vec<String> {
        self.lock().recent.iter().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Writer handle handed to the subscriber per event
pub struct RollingHandle {
    inner: Arc<Mutex<Inner>>,
}

impl Write for RollingHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        inner.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut inner = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        inner.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingHandle;

    fn make_writer(&'a self) -> Self::Writer {
        RollingHandle {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        use std::fmt::Write as _;
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

static LOGGER: OnceLock<RollingWriter> = OnceLock::new();

/// Install the global logger writing to `<log_dir>/<app_name>.log`
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), LoggerError> {
    init_logger_with(log_dir, app_name, RollingOptions::default())
}

pub fn init_logger_with(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    opts: RollingOptions,
) -> Result<(), LoggerError> {
    if LOGGER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }
    let writer = RollingWriter::open(log_dir, app_name, opts)?;
    tracing_subscriber::fmt()
        .with_writer(writer.clone())
        .with_timer(LocalTime)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;
    LOGGER
        .set(writer)
        .map_err(|_| LoggerError::AlreadyInitialized)?;
    tracing::info!(app = app_name, "logger initialized");
    Ok(())
}

pub fn info(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::info!("{msg}");
    Ok(())
}

pub fn warn(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::warn!("{msg}");
    Ok(())
}

pub fn error(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::error!("{msg}");
    Ok(())
}

/// Recent lines of the global logger (empty before `init_logger`)
pub fn recent_lines() -> Vec<String> {
    LOGGER.get().map(RollingWriter::recent_lines).unwrap_or_default()
}

fn ensure_initialized() -> Result<(), LoggerError> {
    LOGGER.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}
