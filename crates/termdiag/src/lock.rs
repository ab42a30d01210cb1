//! The advisory file-range lock a stream consumer holds for the duration of
//! one diagnostic's render+flush (spec.md §4.8/§5: `F_WRLCK` on POSIX,
//! `LockFileEx` on Windows).
//!
//! No direct teacher precedent — `solar-interface` never does file I/O of
//! its own — grounded on spec.md's requirement directly; `fs4` is the
//! idiomatic cross-platform crate for this (vs. hand-rolled `libc`/
//! `windows-sys` calls).

use std::fs::File;
use std::io;

use fs4::fs_std::FileExt;
use tracing::trace;

use crate::error::LockError;

/// An RAII guard holding an exclusive advisory lock on `file` for as long as
/// it is alive. Released on drop, including on unwind, so the lock is freed
/// on every exit path (spec.md §5 "released on all exit paths, including
/// failure").
pub struct FileLock<'a> {
    file: &'a File,
}

impl<'a> FileLock<'a> {
    /// Blocks until an exclusive lock on `file` is acquired.
    pub fn acquire(file: &'a File) -> Result<Self, LockError> {
        file.lock_exclusive().map_err(LockError::Io)?;
        Ok(Self { file })
    }

    /// Attempts to acquire the lock without blocking; `Ok(None)` if another
    /// holder already has it locked.
    pub fn try_acquire(file: &'a File) -> io::Result<Option<Self>> {
        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(Self { file })),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                trace!("diagnostic output file already locked by another writer");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

impl Drop for FileLock<'_> {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
