use std::num::NonZero;
use std::path::Path;

use crate::config::BenchConfig;
use crate::report::time_strategy;
use crate::{Result, strategy};

/// Runs all four strategies against the configured file set, in fixed order:
/// sequential, cooperative, thread pool, process pool. Prints one timing line
/// after each strategy completes.
///
/// `worker_exe` is the binary to re-execute for process-pool workers; the
/// benchmark binary passes its own path. Taking it as a parameter keeps this
/// function free of process-global lookups, which is what lets the
/// integration tests point it at the binary under test.
///
/// # Errors
///
/// The first strategy to fail ends the run; its timing line is not printed
/// and later strategies are not attempted.
pub fn run(config: &BenchConfig, worker_exe: &Path) -> Result<()> {
    let files = config.file_paths();

    time_strategy("sequential", || {
        strategy::run_sequential(&files, config.block_size)
    })?;

    time_strategy("cooperative, single thread", || {
        strategy::run_cooperative(&files, config.block_size)
    })?;

    time_strategy(
        &format!("thread pool with {} threads", config.thread_count),
        || strategy::run_threads(&files, config.thread_count, config.block_size),
    )?;

    time_strategy(
        &format!(
            "process pool with {} processes, {} threads each",
            config.process_count, config.thread_count
        ),
        || {
            strategy::run_processes(
                worker_exe,
                &files,
                config.process_count,
                config.thread_count,
                config.block_size,
            )
        },
    )?;

    Ok(())
}

/// What a process-pool worker executes: reads its single assigned file
/// through a nested thread pool of `thread_count` threads.
///
/// With one file and many threads, all but one pool thread go idle - the
/// nested pool is kept because its setup cost is part of the strategy
/// being measured.
///
/// # Errors
///
/// Fails if the file cannot be read; the worker's exit status carries the
/// failure back to the parent.
pub fn run_worker(
    path: &Path,
    thread_count: NonZero<usize>,
    block_size: NonZero<usize>,
) -> Result<()> {
    strategy::run_threads(&[path.to_path_buf()], thread_count, block_size).map(|_| ())
}
