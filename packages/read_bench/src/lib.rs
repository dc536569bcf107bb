//! Benchmarks four strategies for reading a fixed set of text files from
//! disk, with the per-file work held constant: memory-map the file, read it
//! in fixed-size blocks (1 MiB by default), decode each block as UTF-8 and
//! discard the result.
//!
//! The strategies, run in this order by [`run`]:
//!
//! - **sequential** - one file after another on the calling thread.
//! - **cooperative** - one task per file on a single-threaded executor.
//!   The read path never suspends, so this mostly measures executor overhead.
//! - **thread pool** - files distributed across a fixed pool of worker
//!   threads ([`ThreadPool`]).
//! - **process pool** - files distributed across worker processes, each of
//!   which reads its one file through a nested thread pool.
//!
//! Each strategy prints one line: elapsed seconds (six decimal places) and
//! the strategy label. The binary entry point is in `main.rs`; all logic
//! lives here so the pieces can be tested directly.

mod config;
mod error;
mod pool;
mod reader;
mod report;
mod run;
pub mod strategy;

pub use config::BenchConfig;
pub use error::{Error, Result};
pub use pool::ThreadPool;
pub use reader::{DEFAULT_BLOCK_SIZE, ReadSummary, read_file};
pub use report::time_strategy;
pub use run::{run, run_worker};
