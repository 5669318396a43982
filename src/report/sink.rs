//! # Failure reporting hook
//!
//! `Report` is the extension point for observing handler failures. The
//! dispatcher calls it inline, on the emitting thread, once per failed
//! invocation.
//!
//! ## Contract
//! - The hook receives every failure in delivery order (see `Failure::seq`).
//! - It must return promptly and must not panic; slow sinks should enqueue
//!   the record and drain it elsewhere.

use crate::report::Failure;

/// Contract for failure sinks.
///
/// Called from `emit` after a handler invocation fails. Implementations
/// should avoid blocking the emitting thread.
pub trait Report: Send + Sync + 'static {
    /// Reports a single failed handler invocation.
    ///
    /// # Parameters
    /// - `failure`: Reference to the failure record (does not transfer ownership)
    fn report(&self, failure: &Failure);

    /// Human-readable name (for logs/metrics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
