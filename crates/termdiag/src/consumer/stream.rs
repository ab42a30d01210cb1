//! The plain stream consumer: renders and writes each diagnostic as it
//! arrives, in arrival order (spec.md §5).
//!
//! Grounded on `examples/original_source/include/diagnostics/consumers/
//! stream.hpp`'s `BasicStreamDiagnosticConsumer` (one `consume()` call draws
//! and writes immediately, `flush()` flushes the underlying stream).

use std::fs::File;
use std::io::Write;

use crate::diagnostic::Diag;
use crate::emitter::Emitter;
use crate::lock::FileLock;

use super::Consumer;

/// Writes each diagnostic to `writer` as soon as it is consumed. If
/// constructed with [`StreamConsumer::with_lock_file`], an exclusive
/// advisory lock on that file is held for the duration of each
/// render-and-write (spec.md §4.8/§5), so concurrent processes sharing the
/// same backing file don't interleave mid-diagnostic. Locking only applies
/// to a real, caller-supplied `File` — there is no portable way to flock an
/// arbitrary TTY file descriptor, so a plain stderr/stdout consumer skips
/// locking entirely.
pub struct StreamConsumer<E, W> {
    emitter: E,
    writer: W,
    lock_file: Option<File>,
}

impl<E: Emitter, W: Write> StreamConsumer<E, W> {
    pub fn new(emitter: E, writer: W) -> Self {
        Self { emitter, writer, lock_file: None }
    }

    /// Like [`StreamConsumer::new`], but acquires an exclusive advisory lock
    /// on `lock_file` around every render-and-write.
    pub fn with_lock_file(emitter: E, writer: W, lock_file: File) -> Self {
        Self { emitter, writer, lock_file: Some(lock_file) }
    }
}

impl<E: Emitter, W: Write> Consumer for StreamConsumer<E, W> {
    fn consume(&mut self, diag: Diag) {
        let _guard = match &self.lock_file {
            Some(f) => FileLock::acquire(f).ok(),
            None => None,
        };
        let rendered = self.emitter.emit_diagnostic(&diag);
        let _ = writeln!(self.writer, "{rendered}");
        // `_guard` drops here, releasing the lock on every path including a
        // failed write (spec.md §5 "released on all exit paths").
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::SilentEmitter;
    use crate::level::Level;
    use crate::source::DiagnosticLocation;

    #[test]
    fn writes_each_diagnostic_in_arrival_order() {
        let buf: Vec<u8> = Vec::new();
        let mut consumer = StreamConsumer::new(SilentEmitter::new(), buf);
        consumer.consume(Diag::new(Level::Error, "first", DiagnosticLocation::empty()));
        consumer.consume(Diag::new(Level::Error, "second", DiagnosticLocation::empty()));
        consumer.flush();
    }
}
