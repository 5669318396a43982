//! # Failure records produced during delivery.
//!
//! The [`FailureKind`] enum classifies every way delivery can go wrong:
//! - **Dispatch failures**: a handler returned an error or panicked while the
//!   dispatcher was driving an emission;
//! - **Offload failures**: a consumer panicked in its worker, or a bounded
//!   queue dropped a payload.
//!
//! The [`Failure`] struct carries additional metadata such as timestamps,
//! channel name, registration identity and a human-readable reason.
//!
//! ## Ordering guarantees
//! Each failure has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when records are
//! forwarded to an out-of-band sink.
//!
//! ## Example
//! ```rust
//! use herald::{Failure, FailureKind};
//!
//! let f = Failure::new(FailureKind::HandlerError)
//!     .with_channel("orders")
//!     .with_handler("audit")
//!     .with_reason("empty record");
//!
//! assert_eq!(f.kind, FailureKind::HandlerError);
//! assert_eq!(f.channel.as_deref(), Some("orders"));
//! assert_eq!(f.reason.as_deref(), Some("empty record"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::dispatch::RegistrationId;

/// Global sequence counter for failure ordering.
static FAILURE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of delivery failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Handler returned an error from `on_emit`.
    ///
    /// Sets:
    /// - `channel`: channel of the emission
    /// - `registration`: identity of the failing registration
    /// - `handler`: handler name
    /// - `reason`: the error message
    HandlerError,

    /// Handler panicked; the panic was caught at the dispatch call site.
    ///
    /// Sets:
    /// - `channel`: channel of the emission
    /// - `registration`: identity of the failing registration
    /// - `handler`: handler name
    /// - `reason`: panic info/message
    HandlerPanic,

    /// Offload consumer panicked during payload processing.
    ///
    /// Sets:
    /// - `handler`: consumer name
    /// - `reason`: panic info/message
    ConsumerPanic,

    /// Offload queue dropped a payload (queue full or worker closed).
    ///
    /// Sets:
    /// - `handler`: consumer name
    /// - `reason`: reason string (e.g., "full", "closed")
    QueueOverflow,
}

/// Delivery failure with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`FailureKind`]
#[derive(Debug, Clone)]
pub struct Failure {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Failure classification.
    pub kind: FailureKind,
    /// Channel the emission was delivered on, if applicable.
    pub channel: Option<Arc<str>>,
    /// Identity of the failing registration, if applicable.
    pub registration: Option<RegistrationId>,
    /// Name of the failing handler or consumer.
    pub handler: Option<Arc<str>>,
    /// Human-readable reason (error message, panic info, overflow details).
    pub reason: Option<Arc<str>>,
}

impl Failure {
    /// Creates a new failure of the given kind with current timestamp and next sequence number.
    pub fn new(kind: FailureKind) -> Self {
        Self {
            seq: FAILURE_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            channel: None,
            registration: None,
            handler: None,
            reason: None,
        }
    }

    /// Attaches the channel name.
    #[inline]
    pub fn with_channel(mut self, channel: impl Into<Arc<str>>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Attaches the registration identity.
    #[inline]
    pub fn with_registration(mut self, id: RegistrationId) -> Self {
        self.registration = Some(id);
        self
    }

    /// Attaches the handler or consumer name.
    #[inline]
    pub fn with_handler(mut self, handler: impl Into<Arc<str>>) -> Self {
        self.handler = Some(handler.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a handler error failure.
    #[inline]
    pub(crate) fn handler_error(
        channel: &str,
        id: RegistrationId,
        handler: &str,
        reason: String,
    ) -> Self {
        Failure::new(FailureKind::HandlerError)
            .with_channel(channel)
            .with_registration(id)
            .with_handler(handler)
            .with_reason(reason)
    }

    /// Creates a handler panic failure.
    #[inline]
    pub(crate) fn handler_panic(
        channel: &str,
        id: RegistrationId,
        handler: &str,
        info: String,
    ) -> Self {
        Failure::new(FailureKind::HandlerPanic)
            .with_channel(channel)
            .with_registration(id)
            .with_handler(handler)
            .with_reason(info)
    }

    /// Creates a consumer panic failure.
    #[inline]
    #[cfg_attr(not(feature = "offload"), allow(dead_code))]
    pub(crate) fn consumer_panic(consumer: &'static str, info: String) -> Self {
        Failure::new(FailureKind::ConsumerPanic)
            .with_handler(consumer)
            .with_reason(info)
    }

    /// Creates a queue overflow failure.
    #[inline]
    #[cfg_attr(not(feature = "offload"), allow(dead_code))]
    pub(crate) fn queue_overflow(consumer: &'static str, reason: &'static str) -> Self {
        Failure::new(FailureKind::QueueOverflow)
            .with_handler(consumer)
            .with_reason(format!("consumer={consumer} reason={reason}"))
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self.kind, FailureKind::HandlerError)
    }

    #[inline]
    pub fn is_panic(&self) -> bool {
        matches!(self.kind, FailureKind::HandlerPanic | FailureKind::ConsumerPanic)
    }

    #[inline]
    pub fn is_overflow(&self) -> bool {
        matches!(self.kind, FailureKind::QueueOverflow)
    }
}

/// Extracts a printable message from a caught panic payload.
pub(crate) fn panic_reason(any: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
