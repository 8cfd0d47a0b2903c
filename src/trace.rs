//! Per-iteration search traces.
//!
//! Engines report one record per iteration (or generation) through a
//! [`TraceSink`]: the 1-based index, the best objective so far and the
//! weight of that best selection. Appending to the sink always happens on
//! the engine's driving thread, never from a worker.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};

/// Header line written by [`CsvTrace`].
pub const TRACE_HEADER: &str = "Iteration;ObjectiveValue;Weight";

/// Receives per-iteration progress records.
pub trait TraceSink {
    /// Records the state after iteration `iteration` (1-based).
    fn record(&mut self, iteration: usize, objective: i64, weight: u64);
}

/// A sink that drops every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn record(&mut self, _iteration: usize, _objective: i64, _weight: u64) {}
}

/// One trace row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    /// 1-based iteration index.
    pub iteration: usize,
    /// Best objective so far.
    pub objective: i64,
    /// Weight of the best selection so far.
    pub weight: u64,
}

/// Collects records in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryTrace {
    /// Records in arrival order.
    pub records: Vec<TraceRecord>,
}

impl TraceSink for MemoryTrace {
    fn record(&mut self, iteration: usize, objective: i64, weight: u64) {
        self.records.push(TraceRecord {
            iteration,
            objective,
            weight,
        });
    }
}

/// Semicolon-separated trace writer.
///
/// Write failures after construction are reported once with `log::warn!`
/// and the remaining records are dropped; the run itself is unaffected.
#[derive(Debug)]
pub struct CsvTrace<W: Write> {
    writer: W,
    failed: bool,
}

impl<W: Write> CsvTrace<W> {
    /// Wraps a writer and emits the header line.
    pub fn new(mut writer: W) -> std::io::Result<Self> {
        writeln!(writer, "{TRACE_HEADER}")?;
        Ok(Self {
            writer,
            failed: false,
        })
    }

    /// Flushes and returns the inner writer.
    pub fn into_inner(mut self) -> W {
        if let Err(err) = self.writer.flush() {
            log::warn!("failed to flush trace log: {err}");
        }
        self.writer
    }
}

impl CsvTrace<BufWriter<File>> {
    /// Creates (or truncates) a trace file, including missing parent
    /// directories.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let unavailable = |source| Error::LogSinkUnavailable {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(unavailable)?;
        }
        let file = File::create(path).map_err(unavailable)?;
        CsvTrace::new(BufWriter::new(file)).map_err(unavailable)
    }
}

impl<W: Write> TraceSink for CsvTrace<W> {
    fn record(&mut self, iteration: usize, objective: i64, weight: u64) {
        if self.failed {
            return;
        }
        if let Err(err) = writeln!(self.writer, "{iteration};{objective};{weight}") {
            log::warn!("trace log write failed, dropping further records: {err}");
            self.failed = true;
        }
    }
}

/// Opens a trace file, downgrading failure to a warning.
///
/// Returns `None` when the file cannot be created; the caller proceeds
/// without a persisted trace.
pub fn open_trace(path: impl AsRef<Path>) -> Option<CsvTrace<BufWriter<File>>> {
    match CsvTrace::create(path) {
        Ok(trace) => Some(trace),
        Err(err) => {
            log::warn!("{err}; continuing without a trace log");
            None
        }
    }
}
