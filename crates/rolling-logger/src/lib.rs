//! Rolling Logger
//!
//! Installs a global `tracing` subscriber whose output goes to:
//! - an in-memory circular buffer of the most recent lines ([`recent_lines`])
//! - a daily-rolling file `<app>.<YYYY-MM-DD>.log` when a directory is given
//!   (native targets only, via `tracing-appender`)
//! - the browser console on wasm
//!
//! `log` records are bridged into `tracing`, so library crates keep using the
//! `log` macros.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};

use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry};

/// Lines kept in memory
pub const DEFAULT_CAPACITY: usize = 500;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
    #[error("failed to open log file: {0}")]
    Appender(String),
    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
}

/// Fixed-size buffer of the most recent log lines
#[derive(Debug)]
pub struct RingBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, line: String) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

struct Sinks {
    ring: Mutex<RingBuffer>,
}

static SINKS: OnceLock<Arc<Sinks>> = OnceLock::new();

struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

#[derive(Clone)]
struct FanoutMakeWriter {
    sinks: Arc<Sinks>,
}

/// Buffers one formatted event and commits it to every sink on drop
struct FanoutWriter {
    sinks: Arc<Sinks>,
    buf: Vec<u8>,
}

impl<'a> MakeWriter<'a> for FanoutMakeWriter {
    type Writer = FanoutWriter;

    fn make_writer(&'a self) -> Self::Writer {
        FanoutWriter {
            sinks: self.sinks.clone(),
            buf: Vec::new(),
        }
    }
}

impl Write for FanoutWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for FanoutWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf).into_owned();

        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&line.trim_end().into());

        if let Ok(mut ring) = self.sinks.ring.lock() {
            ring.push(line.trim_end().to_string());
        }
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Daily-rolling `<app>.<YYYY-MM-DD>.log` under `dir`
#[cfg(not(target_arch = "wasm32"))]
fn file_layer(dir: PathBuf, app_name: &str) -> Result<BoxedLayer, LoggerError> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(app_name)
        .filename_suffix("log")
        .build(dir)
        .map_err(|e| LoggerError::Appender(e.to_string()))?;

    Ok(fmt::layer()
        .with_writer(appender)
        .with_timer(LocalTime)
        .with_ansi(false)
        .with_target(true)
        .boxed())
}

#[cfg(target_arch = "wasm32")]
fn file_layer(_dir: PathBuf, _app_name: &str) -> Result<BoxedLayer, LoggerError> {
    Err(LoggerError::Appender("no filesystem on wasm".to_string()))
}

/// Install the global logger.
///
/// `log_dir` enables the daily file on native targets; it is ignored on
/// wasm. May only be called once per process.
pub fn init_logger(log_dir: Option<PathBuf>, app_name: &str) -> Result<(), LoggerError> {
    init_with_capacity(log_dir, app_name, DEFAULT_CAPACITY)
}

pub fn init_with_capacity(
    log_dir: Option<PathBuf>,
    app_name: &str,
    capacity: usize,
) -> Result<(), LoggerError> {
    if SINKS.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let file = match log_dir {
        Some(dir) if cfg!(not(target_arch = "wasm32")) => Some(file_layer(dir, app_name)?),
        _ => None,
    };
    let sinks = Arc::new(Sinks {
        ring: Mutex::new(RingBuffer::new(capacity)),
    });
    SINKS
        .set(sinks.clone())
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    let fanout = fmt::layer()
        .with_writer(FanoutMakeWriter { sinks })
        .with_timer(LocalTime)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(file)
        .with(fanout)
        .with(LevelFilter::DEBUG)
        .try_init()
        .map_err(|e| LoggerError::Subscriber(e.to_string()))?;

    tracing::info!(app = app_name, "logger initialized");
    Ok(())
}

/// Most recent lines, oldest first. Empty before initialization.
pub fn recent_lines() -> Vec<String> {
    SINKS
        .get()
        .and_then(|sinks| sinks.ring.lock().ok().map(|ring| ring.lines()))
        .unwrap_or_default()
}

pub fn info(msg: &str) -> Result<(), LoggerError> {
    if SINKS.get().is_none() {
        return Err(LoggerError::NotInitialized);
    }
    tracing::info!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), LoggerError> {
    if SINKS.get().is_none() {
        return Err(LoggerError::NotInitialized);
    }
    tracing::error!("{}", msg);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let mut ring = RingBuffer::new(2);
        ring.push("one".to_string());
        ring.push("two".to_string());
        ring.push("three".to_string());

        assert_eq!(ring.lines(), vec!["two", "three"]);
        assert_eq!(ring.len(), 2);
    }

    // The global subscriber can be installed once per process, so the whole
    // lifecycle lives in one test.
    #[test]
    fn test_init_captures_log_records() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(info("too early"), Err(LoggerError::NotInitialized)));

        init_logger(Some(dir.path().to_path_buf()), "MenuAdmin").unwrap();
        log::info!("saved ordering for menu m1");
        error("something broke").unwrap();

        let lines = recent_lines();
        assert!(lines.iter().any(|l| l.contains("saved ordering for menu m1")));
        assert!(lines.iter().any(|l| l.contains("ERROR") && l.contains("something broke")));

        // one file for today, named <app>.<date>.log
        let files: Vec<PathBuf> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(files.len(), 1);
        let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("MenuAdmin.") && name.ends_with(".log"));

        let contents = std::fs::read_to_string(&files[0]).unwrap();
        assert!(contents.contains("logger initialized"));
        assert!(contents.contains("saved ordering for menu m1"));

        assert!(matches!(
            init_logger(None, "MenuAdmin"),
            Err(LoggerError::AlreadyInitialized)
        ));
    }
}
