//! # Failure reporting for handler invocations.
//!
//! This module provides the [`Report`] trait and the [`Failure`] record the
//! dispatcher hands to it whenever a handler invocation fails.
//!
//! ## Architecture
//! ```text
//! Failure flow:
//!   emit() ── invoke handler ──► Err(HandlerError) / panic
//!                                     │
//!                                     ▼
//!                            Failure { seq, at, channel, ... }
//!                                     │
//!                                     ▼
//!                            Report::report(&Failure)
//!                                     │
//!                          ┌──────────┼──────────┐
//!                          ▼          ▼          ▼
//!                     LogReporter  Metrics    Custom
//! ```
//!
//! ## Rules
//! - Reporting happens **inline** on the emitting thread, after the failed
//!   invocation and before the next handler in the snapshot.
//! - The hook must not panic; a hook that needs to do slow work should hand
//!   it off rather than stall the emission.
//! - Without a configured hook, failures are swallowed silently (delivery to
//!   sibling handlers is unaffected either way).
//!
//! ## Implementing custom reporters
//! ```
//! use herald::{Failure, Report};
//!
//! struct Metrics;
//!
//! impl Report for Metrics {
//!     fn report(&self, failure: &Failure) {
//!         // increment failure counter for failure.channel ...
//!         let _ = failure;
//!     }
//! }
//! ```

mod failure;
#[cfg(feature = "logging")]
mod log;
mod sink;

pub use failure::{Failure, FailureKind};
pub(crate) use failure::panic_reason;
#[cfg(feature = "logging")]
pub use log::LogReporter;
pub use sink::Report;
