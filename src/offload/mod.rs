//! # Offload: non-blocking fan-out to slow consumers.
//!
//! The dispatcher invokes handlers synchronously on the emitting thread. A
//! handler that needs to do slow work (I/O, batching, retries) should not do
//! it there — this module provides the explicit hand-off: [`OffloadPool`]
//! owns per-consumer bounded queues drained by dedicated worker tasks, and
//! [`OffloadPool::handler`] yields a synchronous forwarding handler that
//! enqueues and returns immediately.
//!
//! ## Architecture
//! ```text
//! emit(channel, &payload)
//!     │
//!     ▼ (synchronous forwarding handler, try_send, never blocks)
//!     ├──► [queue 1] ──► worker 1 ──► consumer1.consume()
//!     │    (bounded)         └──────► panic → Failure(ConsumerPanic)
//!     ├──► [queue 2] ──► worker 2 ──► consumer2.consume()
//!     │    (bounded)
//!     └──► [queue N] ──► worker N ──► consumerN.consume()
//!          (bounded)
//! ```
//!
//! ## Rules
//! - **Emission never waits**: the forwarding handler enqueues clones and
//!   returns before any consumer runs; `emit` returns to its caller before
//!   deferred work completes.
//! - **No cross-consumer ordering**: consumer A may process payload N while
//!   B processes N+5.
//! - **Per-consumer FIFO**: each consumer sees payloads in emission order.
//! - **Overflow**: payload dropped for that consumer only, a
//!   `QueueOverflow` failure is reported.
//! - **Isolation**: a slow or panicking consumer doesn't affect others.
//!
//! ## Panic handling
//! Worker tasks use `catch_unwind` to isolate panics:
//! - Panic is caught and reported as a `ConsumerPanic` failure
//! - Worker continues processing the next payload
//! - Other consumers unaffected
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state
//! inconsistent if a consumer uses `Arc<Mutex<T>>` and panics while holding
//! the lock.

mod consume;
mod pool;

pub use consume::Consume;
pub use pool::OffloadPool;
