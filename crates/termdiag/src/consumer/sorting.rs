//! The sorting consumer: buffers until `flush()`, then emits in
//! `(filename, line, column)` order, ties breaking by arrival order
//! (spec.md §5).
//!
//! Grounded on `examples/original_source/include/diagnostics/consumers/
//! sorting.hpp`'s `BasicSortingDiagnosticConsumer` (`std::stable_sort` by
//! `location`, then forward every buffered diagnostic to the wrapped
//! consumer and flush it).

use crate::diagnostic::Diag;

use super::{Consumer, DynConsumer};

/// Buffers diagnostics until [`Consumer::flush`], then forwards them to the
/// wrapped consumer in `(filename, line, column)` order. Uses a stable sort
/// so diagnostics at equal locations keep arrival order (spec.md §5).
pub struct SortingConsumer {
    inner: DynConsumer,
    buffer: Vec<Diag>,
}

impl SortingConsumer {
    pub fn new(inner: DynConsumer) -> Self {
        Self { inner, buffer: Vec::new() }
    }
}

impl Consumer for SortingConsumer {
    fn consume(&mut self, diag: Diag) {
        self.buffer.push(diag);
    }

    fn flush(&mut self) {
        self.buffer.sort_by(|a, b| a.location.sort_key().cmp(&b.location.sort_key()));
        for diag in self.buffer.drain(..) {
            self.inner.consume(diag);
        }
        self.inner.flush();
    }
}

impl Drop for SortingConsumer {
    fn drop(&mut self) {
        debug_assert!(self.buffer.is_empty(), "SortingConsumer dropped without being flushed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::SilentEmitter;
    use crate::level::Level;
    use crate::source::DiagnosticLocation;
    use std::sync::{Arc, Mutex};

    struct RecordingConsumer(Arc<Mutex<Vec<String>>>);
    impl Consumer for RecordingConsumer {
        fn consume(&mut self, diag: Diag) {
            self.0.lock().unwrap().push(diag.location.filename().to_string());
        }
    }

    fn loc(filename: &str, line: usize) -> DiagnosticLocation {
        DiagnosticLocation::Basic {
            filename: filename.to_string(),
            source: String::new(),
            line_number: line,
            column_number: 1,
            source_location: 0,
            length: 0,
        }
    }

    #[test]
    fn sorts_by_filename_then_line_on_flush() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let inner = Box::new(RecordingConsumer(order.clone()));
        let mut sorter = SortingConsumer::new(inner);

        sorter.consume(Diag::new(Level::Error, "b", loc("b.cpp", 1)));
        sorter.consume(Diag::new(Level::Error, "a", loc("a.cpp", 1)));
        sorter.flush();

        assert_eq!(*order.lock().unwrap(), vec!["a.cpp".to_string(), "b.cpp".to_string()]);
    }

    #[test]
    #[allow(dead_code)]
    fn silent_emitter_compiles_with_stream_consumer() {
        let _ = SilentEmitter::new();
    }
}
