//! # Handlers: the subscriber side of the dispatcher.
//!
//! This module defines the [`Handle`] trait (synchronous, fallible) and a
//! convenient function-backed implementation [`HandlerFn`].
//! The common handle type is [`HandlerRef`], an `Arc<dyn Handle<P>>` suitable
//! for sharing between the registry and snapshots.
//!
//! ## Contract
//! - Handlers are invoked synchronously on the emitting thread, in
//!   registration order, and must return promptly.
//! - A handler that needs to perform blocking or long-running work should
//!   hand it off (see the `offload` module) rather than stall the emission.
//! - Failures are returned as [`HandlerError`](crate::HandlerError), never
//!   panicked across the dispatch boundary; panics are still caught and
//!   reported, but a `Result` is the intended channel.

mod handle;
mod handler_fn;

pub use handle::{Handle, HandlerRef};
pub use handler_fn::HandlerFn;
