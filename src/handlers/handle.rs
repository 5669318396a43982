//! # Core handler trait
//!
//! `Handle` is the extension point for plugging subscribers into the
//! dispatcher. Each registered handler is invoked synchronously, in
//! registration order, for every emission on its channel.
//!
//! ## Contract
//! - [`Handle::on_emit`] runs on the **emitting thread**; it must not block
//!   for long. Deferred work belongs on a separate executor (see the
//!   `offload` module).
//! - Returning `Err` marks this invocation as failed; the dispatcher reports
//!   the failure and continues with the remaining handlers in the snapshot.
//! - A handler may call back into the dispatcher (subscribe, unsubscribe,
//!   emit) — the registry lock is never held across `on_emit`.

use std::sync::Arc;

use crate::error::HandlerError;

/// Shared handle to a handler, as stored in the registry and in snapshots.
pub type HandlerRef<P> = Arc<dyn Handle<P>>;

/// # Synchronous payload handler.
///
/// A `Handle` has a stable [`name`](Handle::name) and a synchronous
/// [`on_emit`](Handle::on_emit) method that receives the emitted payload
/// by reference.
///
/// # Example
/// ```
/// use herald::{Handle, HandlerError};
///
/// struct Audit;
///
/// impl Handle<String> for Audit {
///     fn name(&self) -> &str { "audit" }
///
///     fn on_emit(&self, payload: &String) -> Result<(), HandlerError> {
///         if payload.is_empty() {
///             return Err(HandlerError::fail("empty audit record"));
///         }
///         // write audit record...
///         Ok(())
///     }
/// }
/// ```
pub trait Handle<P>: Send + Sync + 'static {
    /// Handles a single emitted payload.
    ///
    /// # Parameters
    /// - `payload`: Reference to the emitted payload (does not transfer ownership)
    fn on_emit(&self, payload: &P) -> Result<(), HandlerError>;

    /// Human-readable name (for failure reports and logs).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
