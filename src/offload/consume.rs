//! # Core consumer trait
//!
//! `Consume` is the extension point for processing payloads off the emitting
//! thread. Each consumer is driven by a dedicated worker loop fed by a
//! bounded queue that is owned by the [`OffloadPool`](crate::OffloadPool).
//!
//! ## Contract
//! - Implementations may be slow (I/O, batching, retries) — they do **not**
//!   block the emitter nor other consumers.
//! - Each consumer **declares** its preferred queue capacity via
//!   [`Consume::queue_capacity`]. If a queue overflows, payloads for that
//!   consumer are **dropped** (reported as `QueueOverflow`).

use async_trait::async_trait;

/// Contract for offloaded payload consumers.
///
/// Called from a consumer-dedicated worker task. Implementations should
/// avoid blocking the async runtime (prefer async I/O and cooperative waits).
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use herald::Consume;
///
/// struct Mailer;
///
/// #[async_trait]
/// impl Consume<String> for Mailer {
///     async fn consume(&self, address: &String) {
///         // send mail...
///         let _ = address;
///     }
///
///     fn name(&self) -> &'static str { "mailer" }
///     fn queue_capacity(&self) -> usize { 512 }
/// }
/// ```
#[async_trait]
pub trait Consume<P: Send + Sync>: Send + Sync + 'static {
    /// Processes a single payload for this consumer.
    ///
    /// # Parameters
    /// - `payload`: Reference to the payload (does not transfer ownership)
    async fn consume(&self, payload: &P);

    /// Human-readable name (for failure reports and logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred capacity of this consumer's queue.
    ///
    /// On overflow, payloads for this consumer are **dropped** (reported).
    fn queue_capacity(&self) -> usize {
        1024
    }
}
