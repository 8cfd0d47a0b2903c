//! Error types for instance loading and the driver boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building an [`Instance`](crate::Instance) or wiring
/// up a run.
///
/// The search engines themselves never fail: stagnation and iteration caps
/// always produce a (possibly empty) result.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading the instance file failed.
    #[error("failed to read instance file {path}")]
    Io {
        /// Requested instance path.
        path: PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The instance description ended before `field` was read.
    #[error("instance description is truncated: missing {field}")]
    Truncated {
        /// Name of the value that was expected next.
        field: String,
    },
    /// A token could not be read as a non-negative integer.
    #[error("invalid value `{token}` for {field}")]
    InvalidToken {
        /// Name of the value being read.
        field: String,
        /// Offending token.
        token: String,
    },
    /// Profit and weight vectors have different lengths.
    #[error("got {profits} profits but {weights} weights")]
    LengthMismatch {
        /// Number of profits supplied.
        profits: usize,
        /// Number of weights supplied.
        weights: usize,
    },
    /// A forfeit set references an item that does not exist.
    #[error("forfeit set {set} references item {item}, but the instance has {num_items} items")]
    ItemOutOfRange {
        /// Index of the offending forfeit set.
        set: usize,
        /// Item index found in the set.
        item: usize,
        /// Number of items in the instance.
        num_items: usize,
    },
    /// The trace log destination could not be created.
    #[error("cannot open trace log at {path}")]
    LogSinkUnavailable {
        /// Requested log path.
        path: PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// A batch input directory could not be listed.
    #[error("cannot read instance directory {path}")]
    ReadDir {
        /// Directory being listed.
        path: PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// A batch summary file could not be written.
    #[error("cannot write summary to {path}")]
    WriteSummary {
        /// Summary destination.
        path: PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The requested engine name is not recognised.
    #[error("unknown engine `{name}` (expected one of: grasp, tabu, genetic, vns)")]
    UnknownEngine {
        /// Name as supplied by the caller.
        name: String,
    },
}

impl Error {
    /// Returns `true` for the errors that stop an instance from being built.
    pub fn is_instance_error(&self) -> bool {
        matches!(
            self,
            Error::Io { .. }
                | Error::Truncated { .. }
                | Error::InvalidToken { .. }
                | Error::LengthMismatch { .. }
                | Error::ItemOutOfRange { .. }
        )
    }
}
