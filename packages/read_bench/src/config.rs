use std::num::NonZero;
use std::path::PathBuf;

use new_zealand::nz;

use crate::reader::DEFAULT_BLOCK_SIZE;

/// Input files are named `file <N>.txt`, N starting at 1.
const FILE_NAME_PREFIX: &str = "file";

/// Everything one benchmark run needs to know, gathered in one place instead
/// of scattered constants.
///
/// The defaults match the workload this benchmark was built around: four
/// input files, 1 MiB blocks, nine pool threads, four worker processes.
#[derive(Clone, Debug)]
pub struct BenchConfig {
    /// Directory holding the input files.
    pub directory: PathBuf,

    /// How many `file <N>.txt` inputs to read, N in `1..=file_count`.
    pub file_count: NonZero<usize>,

    /// Size of each read block; the final block of a file may be shorter.
    pub block_size: NonZero<usize>,

    /// Worker threads in the thread-pool strategy, and in the nested pool
    /// each worker process creates.
    pub thread_count: NonZero<usize>,

    /// Worker processes in the process-pool strategy.
    pub process_count: NonZero<usize>,
}

impl BenchConfig {
    /// Creates a configuration with the default workload parameters,
    /// reading inputs from `directory`.
    #[must_use]
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            file_count: nz!(4),
            block_size: DEFAULT_BLOCK_SIZE,
            thread_count: nz!(9),
            process_count: nz!(4),
        }
    }

    /// The ordered list of input file paths for this run.
    #[must_use]
    pub fn file_paths(&self) -> Vec<PathBuf> {
        (1..=self.file_count.get())
            .map(|n| self.directory.join(format!("{FILE_NAME_PREFIX} {n}.txt")))
            .collect()
    }
}
