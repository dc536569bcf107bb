use std::fs::File;
use std::num::NonZero;
use std::path::Path;
use std::str;

use memmap2::Mmap;
use new_zealand::nz;

use crate::{Error, Result};

/// Block size used when the caller does not override it: 1 MiB.
pub const DEFAULT_BLOCK_SIZE: NonZero<usize> = nz!(1_048_576);

/// What a single file read accomplished.
///
/// The decoded text itself is deliberately dropped before this is returned -
/// the read exists to be timed, not to produce data. The summary is what
/// makes the operation observable to tests and assertions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReadSummary {
    /// Number of blocks the file was read in. All blocks except possibly
    /// the last are exactly the requested block size.
    pub blocks: usize,

    /// Total number of bytes read, equal to the file length.
    pub bytes: usize,
}

/// Reads one file in fixed-size blocks through a memory mapping, decoding
/// each block as UTF-8 and discarding the decoded text.
///
/// The mapping and the file handle are released on every exit path,
/// including a decode failure partway through.
///
/// # Errors
///
/// Returns [`Error::Open`] if the file cannot be opened or mapped (a missing
/// file surfaces as `ErrorKind::NotFound`) and [`Error::Decode`] if a block
/// is not valid UTF-8. Decoding stops at the first invalid block.
///
/// Note that a multi-byte UTF-8 sequence straddling a block boundary also
/// fails decoding, because each block is decoded in isolation. ASCII input
/// is immune; this matches the behavior being benchmarked.
pub fn read_file(path: &Path, block_size: NonZero<usize>) -> Result<ReadSummary> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;

    // SAFETY: The mapping is read-only and scoped to this function; we accept
    // the usual mmap caveat that concurrent truncation of the underlying file
    // by another process is undefined. The benchmark owns its input files.
    let mapping = unsafe { Mmap::map(&file) }.map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut decoded = Vec::new();

    for (block_index, block) in mapping.chunks(block_size.get()).enumerate() {
        let text = str::from_utf8(block).map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            block_index,
            source,
        })?;

        decoded.push(text.to_owned());
    }

    let summary = ReadSummary {
        blocks: decoded.len(),
        bytes: mapping.len(),
    };

    // This is the whole point: the work is done and the result is discarded.
    drop(decoded);

    Ok(summary)
}
