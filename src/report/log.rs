//! # LogReporter — simple failure printer
//!
//! A minimal [`Report`] sink that prints incoming [`Failure`]s to stdout.
//! Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [handler-error] channel="orders" handler="audit" err="empty record"
//! [handler-panic] channel="orders" handler="billing" info="index out of bounds"
//! [consumer-panic] consumer=mailer info="smtp handle dropped"
//! [queue-overflow] consumer=mailer reason="consumer=mailer reason=full"
//! ```

use crate::report::{Failure, FailureKind, Report};

/// Failure printer sink.
#[derive(Default)]
pub struct LogReporter;

impl LogReporter {
    /// Construct a new [`LogReporter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Report for LogReporter {
    fn report(&self, f: &Failure) {
        match f.kind {
            FailureKind::HandlerError => {
                println!(
                    "[handler-error] channel={:?} handler={:?} err={:?}",
                    f.channel, f.handler, f.reason
                );
            }
            FailureKind::HandlerPanic => {
                println!(
                    "[handler-panic] channel={:?} handler={:?} info={:?}",
                    f.channel, f.handler, f.reason
                );
            }
            FailureKind::ConsumerPanic => {
                println!(
                    "[consumer-panic] consumer={} info={}",
                    f.handler.as_deref().unwrap_or("unknown"),
                    f.reason.as_deref().unwrap_or("unknown"),
                );
            }
            FailureKind::QueueOverflow => {
                println!(
                    "[queue-overflow] consumer={} reason={:?}",
                    f.handler.as_deref().unwrap_or("unknown"),
                    f.reason
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogReporter"
    }
}
