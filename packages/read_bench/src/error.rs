use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors that can occur while reading files or driving a strategy run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The file could not be opened or memory-mapped.
    #[error("failed to open '{}': {source}", path.display())]
    Open {
        /// The file that was being opened.
        path: PathBuf,

        /// The underlying I/O failure. A missing file surfaces here
        /// with `ErrorKind::NotFound`.
        #[source]
        source: std::io::Error,
    },

    /// A block of the mapped file was not valid UTF-8.
    ///
    /// Decoding stops at the first bad block; later blocks of the same file
    /// are never inspected.
    #[error("invalid UTF-8 in '{}' at block {block_index}: {source}", path.display())]
    Decode {
        /// The file being decoded.
        path: PathBuf,

        /// Zero-based index of the first block that failed to decode.
        block_index: usize,

        /// The decoding failure reported by the standard library.
        #[source]
        source: std::str::Utf8Error,
    },

    /// A pool worker stopped before delivering the result for its task.
    ///
    /// This only happens if the worker thread panicked mid-task.
    #[error("a pool worker stopped before finishing '{}'", path.display())]
    WorkerLost {
        /// The file whose read never completed.
        path: PathBuf,
    },

    /// A worker process finished with a non-success exit status.
    #[error("worker process reading '{}' exited with {status}", path.display())]
    WorkerExit {
        /// The file the worker process was assigned.
        path: PathBuf,

        /// The exit status the worker reported.
        status: ExitStatus,
    },

    /// A worker process could not be launched or awaited.
    #[error("worker process control failed: {source}")]
    Process {
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// A specialized `Result` type for this crate, returning [`Error`] as the
/// error value.
pub type Result<T> = std::result::Result<T, Error>;
