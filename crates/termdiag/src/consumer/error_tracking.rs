//! The error-tracking consumer: wraps another consumer and remembers whether
//! any `Error`-or-worse diagnostic has passed through (spec.md §5).
//!
//! Grounded on `examples/original_source/include/diagnostics/consumers/
//! error_tracking.hpp`'s `BasicErrorTrackingDiagnosticConsumer`
//! (`m_seen_error` OR'd on every `consume()`).

use crate::diagnostic::Diag;

use super::Consumer;

/// Forwards every diagnostic to `inner` unchanged, but latches
/// [`ErrorTrackingConsumer::seen_error`] once an error-or-worse diagnostic
/// has been consumed.
pub struct ErrorTrackingConsumer<C> {
    inner: C,
    seen_error: bool,
}

impl<C: Consumer> ErrorTrackingConsumer<C> {
    pub fn new(inner: C) -> Self {
        Self { inner, seen_error: false }
    }

    pub fn seen_error(&self) -> bool {
        self.seen_error
    }

    pub fn reset(&mut self) {
        self.seen_error = false;
    }
}

impl<C: Consumer> Consumer for ErrorTrackingConsumer<C> {
    fn consume(&mut self, diag: Diag) {
        self.seen_error |= diag.level.is_error();
        self.inner.consume(diag);
    }

    fn flush(&mut self) {
        self.inner.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;
    use crate::source::DiagnosticLocation;

    struct NullConsumer;
    impl Consumer for NullConsumer {
        fn consume(&mut self, _diag: Diag) {}
    }

    #[test]
    fn latches_on_error_and_ignores_warnings() {
        let mut tracker = ErrorTrackingConsumer::new(NullConsumer);
        tracker.consume(Diag::new(Level::Warning, "w", DiagnosticLocation::empty()));
        assert!(!tracker.seen_error());
        tracker.consume(Diag::new(Level::Error, "e", DiagnosticLocation::empty()));
        assert!(tracker.seen_error());
    }

    #[test]
    fn reset_clears_the_latch() {
        let mut tracker = ErrorTrackingConsumer::new(NullConsumer);
        tracker.consume(Diag::new(Level::Error, "e", DiagnosticLocation::empty()));
        tracker.reset();
        assert!(!tracker.seen_error());
    }
}
