//! Crate-level integration tests, as opposed to the per-module unit tests
//! living in each module's own `#[cfg(test)] mod tests`.

mod scenarios;
