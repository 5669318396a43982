//! Error types used by the dispatcher and by handlers.
//!
//! This module defines two main error enums:
//!
//! - [`DispatchError`] — validation errors raised by the public dispatcher API.
//! - [`HandlerError`] — errors raised by individual handler invocations.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging/metrics.
//!
//! The split mirrors the propagation policy: a [`DispatchError`] is surfaced
//! synchronously to the immediate caller, while a [`HandlerError`] is captured
//! at the dispatch call site, converted into a [`Failure`](crate::Failure)
//! and handed to the configured [`Report`](crate::Report) hook — it never
//! escapes `emit` and never halts delivery to sibling handlers.

use thiserror::Error;

/// # Errors produced by the dispatcher's public API.
///
/// These represent invalid inputs to `subscribe` / `subscribe_once` / `emit`,
/// caught before any registry mutation or delivery happens.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Channel name failed validation (empty string).
    #[error("channel name must be a non-empty string")]
    InvalidChannel,
}

impl DispatchError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use herald::DispatchError;
    ///
    /// assert_eq!(DispatchError::InvalidChannel.as_label(), "invalid_channel");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            DispatchError::InvalidChannel => "invalid_channel",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            DispatchError::InvalidChannel => "channel name must be a non-empty string".to_string(),
        }
    }
}

/// # Errors produced by handler invocations.
///
/// A handler that cannot process a payload returns this from
/// [`Handle::on_emit`](crate::Handle::on_emit). The dispatcher captures it,
/// reports it, and continues with the remaining handlers in the snapshot.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Handler signalled a failure while processing the payload.
    #[error("handler failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },
}

impl HandlerError {
    /// Creates a [`HandlerError::Fail`] from any displayable error.
    ///
    /// # Example
    /// ```
    /// use herald::HandlerError;
    ///
    /// let err = HandlerError::fail("connection refused");
    /// assert_eq!(err.as_label(), "handler_failed");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        HandlerError::Fail { error: error.into() }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            HandlerError::Fail { .. } => "handler_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            HandlerError::Fail { error } => format!("error: {error}"),
        }
    }
}

impl From<String> for HandlerError {
    fn from(error: String) -> Self {
        HandlerError::Fail { error }
    }
}

impl From<&str> for HandlerError {
    fn from(error: &str) -> Self {
        HandlerError::Fail { error: error.to_string() }
    }
}
