//! Binary entry point for the `read_bench` benchmark.
//!
//! Runs the four read strategies in fixed order and prints one timing line
//! per strategy. The same binary doubles as the process-pool worker: the
//! process-pool strategy re-executes it with `--worker <file>`, in which
//! case it reads that one file and exits without printing timings.

use std::num::NonZero;
use std::path::PathBuf;
use std::process::ExitCode;

use argh::FromArgs;
use new_zealand::nz;
use read_bench::{BenchConfig, DEFAULT_BLOCK_SIZE};

/// Benchmark sequential, cooperative, thread-pool and process-pool
/// strategies for block-reading memory-mapped text files.
#[derive(FromArgs)]
struct Args {
    /// directory containing the input files, named 'file <N>.txt'
    #[argh(option, default = "PathBuf::from(\".\")")]
    dir: PathBuf,

    /// number of input files to read
    #[argh(option, default = "nz!(4)")]
    files: NonZero<usize>,

    /// block size in bytes for each read
    #[argh(option, default = "DEFAULT_BLOCK_SIZE")]
    block_size: NonZero<usize>,

    /// worker threads for the thread-pool strategy (and inside each
    /// process-pool worker)
    #[argh(option, default = "nz!(9)")]
    threads: NonZero<usize>,

    /// worker processes for the process-pool strategy
    #[argh(option, default = "nz!(4)")]
    processes: NonZero<usize>,

    /// run as a process-pool worker: read this one file and exit.
    /// The flag name is what `strategy::WORKER_OPTION` spells out.
    #[argh(option)]
    worker: Option<PathBuf>,
}

// Binary entry point - exercising process exit codes is left to the
// integration tests, which drive the built binary.
#[cfg_attr(test, mutants::skip)]
fn main() -> ExitCode {
    let args: Args = argh::from_env();

    let result = match args.worker {
        Some(path) => read_bench::run_worker(&path, args.threads, args.block_size),
        None => run_benchmark(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run_benchmark(args: &Args) -> read_bench::Result<()> {
    let config = BenchConfig {
        directory: args.dir.clone(),
        file_count: args.files,
        block_size: args.block_size,
        thread_count: args.threads,
        process_count: args.processes,
    };

    // Process-pool workers are this same binary in worker mode.
    let worker_exe =
        std::env::current_exe().map_err(|source| read_bench::Error::Process { source })?;

    read_bench::run(&config, &worker_exe)
}
