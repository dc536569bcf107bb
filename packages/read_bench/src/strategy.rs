//! The four execution strategies, each performing the same logical work:
//! read every input file in fixed-size blocks and discard the decoded text.
//!
//! The strategies differ only in how the per-file reads are scheduled:
//! in order on the calling thread, as cooperative tasks on one thread, across
//! a pool of worker threads, or across a pool of worker processes.

use std::num::NonZero;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};

use futures::executor::LocalPool;
use futures::future;

use crate::pool::ThreadPool;
use crate::reader::{self, ReadSummary};
use crate::{Error, Result};

/// Command-line option that switches the benchmark binary into worker mode.
/// The process-pool strategy launches children with this option; see `main.rs`.
pub const WORKER_OPTION: &str = "--worker";

/// Reads each file in list order on the calling thread, one read completing
/// before the next begins.
///
/// Returns one [`ReadSummary`] per file, in input order. Benchmarking
/// callers discard the summaries; they exist so that exactly-once reading
/// is observable.
///
/// # Errors
///
/// The first failing read aborts the run; later files are not touched.
pub fn run_sequential(files: &[PathBuf], block_size: NonZero<usize>) -> Result<Vec<ReadSummary>> {
    files
        .iter()
        .map(|path| reader::read_file(path, block_size))
        .collect()
}

/// Reads the files as one cooperative task each, all driven by a
/// single-threaded executor.
///
/// The read path never suspends, so in practice the tasks run back to back
/// on the one thread; the executor only interleaves at task boundaries.
///
/// Returns one [`ReadSummary`] per file, in input order.
///
/// # Errors
///
/// A single task's failure becomes the runner's failure. Tasks that were not
/// yet polled when the failure surfaced are never started.
pub fn run_cooperative(
    files: &[PathBuf],
    block_size: NonZero<usize>,
) -> Result<Vec<ReadSummary>> {
    let mut executor = LocalPool::new();

    let tasks = files
        .iter()
        .map(|path| read_file_task(path.clone(), block_size));

    executor.run_until(future::try_join_all(tasks))
}

async fn read_file_task(path: PathBuf, block_size: NonZero<usize>) -> Result<ReadSummary> {
    reader::read_file(&path, block_size)
}

/// Distributes the files across a fixed pool of `worker_count` threads and
/// waits for every read to finish.
///
/// Workers pull files from a shared queue, so assignment is load-balanced
/// rather than input-ordered. The returned summaries are nevertheless in
/// input order, one per file.
///
/// # Errors
///
/// One file's failure does not halt the other workers; every read runs to
/// completion (or failure) before the first error is returned.
pub fn run_threads(
    files: &[PathBuf],
    worker_count: NonZero<usize>,
    block_size: NonZero<usize>,
) -> Result<Vec<ReadSummary>> {
    let pool = ThreadPool::new(worker_count);

    let pending: Vec<(PathBuf, oneshot::Receiver<Result<ReadSummary>>)> = files
        .iter()
        .map(|path| {
            let result = pool.submit({
                let path = path.clone();
                move || reader::read_file(&path, block_size)
            });

            (path.clone(), result)
        })
        .collect();

    let mut summaries = Vec::with_capacity(pending.len());
    let mut first_error = None;

    for (path, result) in pending {
        let outcome = match result.recv() {
            Ok(outcome) => outcome,
            Err(oneshot::RecvError) => Err(Error::WorkerLost { path }),
        };

        match outcome {
            Ok(summary) => summaries.push(summary),
            Err(error) => {
                first_error.get_or_insert(error);
            }
        }
    }

    match first_error {
        None => Ok(summaries),
        Some(error) => Err(error),
    }
}

/// Distributes the files across a fixed pool of `process_count` worker
/// processes and waits for every one to finish.
///
/// Each worker is `worker_exe` re-executed in worker mode with a single
/// filename; the worker reads that one file through a thread pool of
/// `thread_count` threads. With one file per worker the nested pool adds no
/// parallelism, only pool setup overhead - that cost is part of what this
/// strategy measures.
///
/// # Errors
///
/// A worker exiting non-zero does not stop the remaining workers; all files
/// are processed before the first failure is reported. A spawn or wait
/// failure stops new launches, but every child already launched is still
/// waited on before the error is returned - no worker is left running (or
/// unreaped) behind a failed run.
pub fn run_processes(
    worker_exe: &Path,
    files: &[PathBuf],
    process_count: NonZero<usize>,
    thread_count: NonZero<usize>,
    block_size: NonZero<usize>,
) -> Result<()> {
    let mut pending = files.iter();
    let mut live: Vec<(PathBuf, Child)> = Vec::with_capacity(process_count.get());
    let mut first_error = None;
    let mut abandon_launches = false;

    loop {
        while !abandon_launches && live.len() < process_count.get() {
            let Some(path) = pending.next() else { break };

            match spawn_worker(worker_exe, path, thread_count, block_size) {
                Ok(child) => live.push((path.clone(), child)),
                Err(error) => {
                    first_error.get_or_insert(error);
                    abandon_launches = true;
                }
            }
        }

        if live.is_empty() {
            break;
        }

        // Reap in launch order. A later child may well finish first, but its
        // slot is only refilled once everything launched before it is done;
        // the pool still never exceeds `process_count` live workers.
        let (path, mut child) = live.remove(0);

        match child.wait() {
            Ok(status) => {
                if !status.success() {
                    first_error.get_or_insert(Error::WorkerExit { path, status });
                }
            }
            Err(source) => {
                first_error.get_or_insert(Error::Process { source });
                abandon_launches = true;
            }
        }
    }

    match first_error {
        None => Ok(()),
        Some(error) => Err(error),
    }
}

fn spawn_worker(
    worker_exe: &Path,
    path: &Path,
    thread_count: NonZero<usize>,
    block_size: NonZero<usize>,
) -> Result<Child> {
    Command::new(worker_exe)
        .arg(WORKER_OPTION)
        .arg(path)
        .arg("--threads")
        .arg(thread_count.to_string())
        .arg("--block-size")
        .arg(block_size.to_string())
        .spawn()
        .map_err(|source| Error::Process { source })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use new_zealand::nz;

    use crate::reader::DEFAULT_BLOCK_SIZE;

    use super::*;

    /// Creates `count` small ASCII input files and returns the directory
    /// (for lifetime) and their paths.
    fn fixture_files(count: usize) -> (tempfile::TempDir, Vec<PathBuf>) {
        let dir = tempfile::tempdir().unwrap();

        let paths = (0..count)
            .map(|n| {
                let path = dir.path().join(format!("input {n}.txt"));
                fs::write(&path, format!("contents of file {n}\n")).unwrap();
                path
            })
            .collect();

        (dir, paths)
    }

    /// Creates one ASCII file per requested size, so each input is
    /// distinguishable by its byte count alone.
    fn sized_fixture_files(sizes: &[usize]) -> (tempfile::TempDir, Vec<PathBuf>) {
        let dir = tempfile::tempdir().unwrap();

        let paths = sizes
            .iter()
            .enumerate()
            .map(|(n, size)| {
                let path = dir.path().join(format!("input {n}.txt"));
                fs::write(&path, "a".repeat(*size)).unwrap();
                path
            })
            .collect();

        (dir, paths)
    }

    #[test]
    fn sequential_reads_all_files() {
        let (_dir, files) = fixture_files(3);

        run_sequential(&files, DEFAULT_BLOCK_SIZE).unwrap();
    }

    #[test]
    fn sequential_fails_on_missing_file() {
        let (dir, mut files) = fixture_files(2);
        files.insert(1, dir.path().join("missing.txt"));

        let error = run_sequential(&files, DEFAULT_BLOCK_SIZE).unwrap_err();

        assert!(matches!(error, Error::Open { .. }));
    }

    #[test]
    fn cooperative_reads_all_files() {
        let (_dir, files) = fixture_files(4);

        run_cooperative(&files, DEFAULT_BLOCK_SIZE).unwrap();
    }

    #[test]
    fn cooperative_fails_on_missing_file() {
        let (dir, mut files) = fixture_files(2);
        files.push(dir.path().join("missing.txt"));

        let error = run_cooperative(&files, DEFAULT_BLOCK_SIZE).unwrap_err();

        assert!(matches!(error, Error::Open { .. }));
    }

    #[test]
    fn cooperative_with_no_files_is_a_no_op() {
        run_cooperative(&[], DEFAULT_BLOCK_SIZE).unwrap();
    }

    #[test]
    fn threads_read_all_files_with_more_workers_than_files() {
        let (_dir, files) = fixture_files(2);

        run_threads(&files, nz!(9), DEFAULT_BLOCK_SIZE).unwrap();
    }

    #[test]
    fn threads_read_all_files_with_fewer_workers_than_files() {
        let (_dir, files) = fixture_files(6);

        run_threads(&files, nz!(2), DEFAULT_BLOCK_SIZE).unwrap();
    }

    #[test]
    fn threads_report_missing_file_without_halting_others() {
        let (dir, mut files) = fixture_files(3);
        files.insert(0, dir.path().join("missing.txt"));

        let error = run_threads(&files, nz!(2), DEFAULT_BLOCK_SIZE).unwrap_err();

        assert!(matches!(error, Error::Open { .. }));
    }

    #[test]
    fn threads_report_decode_failure() {
        let (dir, mut files) = fixture_files(1);

        let garbled = dir.path().join("garbled.txt");
        fs::write(&garbled, [0xFF, 0xFE]).unwrap();
        files.push(garbled);

        let error = run_threads(&files, nz!(2), DEFAULT_BLOCK_SIZE).unwrap_err();

        assert!(matches!(error, Error::Decode { .. }));
    }

    #[test]
    fn processes_report_spawn_failure() {
        let (dir, files) = fixture_files(1);
        let bogus_exe = dir.path().join("no-such-binary");

        let error = run_processes(&bogus_exe, &files, nz!(2), nz!(2), DEFAULT_BLOCK_SIZE)
            .unwrap_err();

        assert!(matches!(error, Error::Process { .. }));
    }

    #[test]
    fn sequential_returns_one_summary_per_file_in_order() {
        let (_dir, files) = sized_fixture_files(&[10, 20, 30]);

        let summaries = run_sequential(&files, DEFAULT_BLOCK_SIZE).unwrap();

        // Distinct sizes prove each file was read exactly once, in order;
        // a duplicated or skipped read could not produce this sequence.
        let bytes: Vec<_> = summaries.iter().map(|summary| summary.bytes).collect();
        assert_eq!(bytes, vec![10, 20, 30]);
    }

    #[test]
    fn cooperative_returns_one_summary_per_file_in_order() {
        let (_dir, files) = sized_fixture_files(&[5, 15, 25, 35]);

        let summaries = run_cooperative(&files, DEFAULT_BLOCK_SIZE).unwrap();

        let bytes: Vec<_> = summaries.iter().map(|summary| summary.bytes).collect();
        assert_eq!(bytes, vec![5, 15, 25, 35]);
    }

    #[test]
    fn threads_return_one_summary_per_file_in_order() {
        let (_dir, files) = sized_fixture_files(&[10, 20, 30, 40, 50]);

        // Fewer workers than files, so the queue is actually contended.
        let summaries = run_threads(&files, nz!(2), DEFAULT_BLOCK_SIZE).unwrap();

        let bytes: Vec<_> = summaries.iter().map(|summary| summary.bytes).collect();
        assert_eq!(bytes, vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn processes_with_no_files_spawn_nothing() {
        // The worker path is never exercised when there is no work.
        let bogus_exe = PathBuf::from("/no/such/binary");

        run_processes(&bogus_exe, &[], nz!(4), nz!(9), DEFAULT_BLOCK_SIZE).unwrap();
    }
}
