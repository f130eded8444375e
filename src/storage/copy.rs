//! Buffered file copy
//!
//! Streams a file to a new destination in fixed-size chunks, reporting
//! progress after every chunk written.

use log::debug;
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use crate::error::{StorageError, StorageResult};
use crate::storage::types::ProgressCallback;

/// Size of the reusable copy buffer
pub const BUFFER_SIZE: usize = 64 * 1024;

/// Copies `from` to `to`, returning the number of bytes written.
///
/// The total passed to `progress` is the source size taken when the copy
/// starts. The source is opened before the destination, so a source that
/// cannot be opened never leaves an empty destination behind.
pub fn copy_with_progress(
    from: &Path,
    to: &Path,
    mut progress: Option<ProgressCallback<'_>>,
) -> StorageResult<u64> {
    let copy_error = |source: std::io::Error| StorageError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    let mut src = File::open(from).map_err(|source| StorageError::OpenSource {
        path: from.to_path_buf(),
        source,
    })?;
    let src_metadata = src.metadata().map_err(copy_error)?;
    let total = src_metadata.len();

    // Creating the destination would truncate the source
    if is_same_file(&src_metadata, from, to) {
        return Err(StorageError::SameFile(to.to_path_buf()));
    }

    let mut dst = File::create(to).map_err(|source| StorageError::CreateDestination {
        path: to.to_path_buf(),
        source,
    })?;

    let mut buffer = vec![0u8; BUFFER_SIZE];
    let mut copied = 0u64;

    loop {
        let n = match src.read(&mut buffer) {
            Ok(0) => break, // EOF
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(copy_error(e)),
        };

        dst.write_all(&buffer[..n]).map_err(copy_error)?;
        copied += n as u64;

        if let Some(callback) = progress.as_deref_mut() {
            callback(copied, total);
        }
    }

    dst.flush().map_err(copy_error)?;

    debug!(
        "Copied {copied} bytes from {} to {}",
        from.display(),
        to.display()
    );

    Ok(copied)
}

#[cfg(unix)]
fn is_same_file(src: &fs::Metadata, _from: &Path, to: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    fs::metadata(to)
        .map(|dst| dst.dev() == src.dev() && dst.ino() == src.ino())
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_same_file(_src: &fs::Metadata, from: &Path, to: &Path) -> bool {
    match (from.canonicalize(), to.canonicalize()) {
        (Ok(from), Ok(to)) => from == to,
        _ => false,
    }
}
