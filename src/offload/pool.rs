//! # Worker pool draining per-consumer queues.
//!
//! [`OffloadPool`] spawns one worker task per consumer and hands out
//! synchronous forwarding handlers via [`OffloadPool::handler`]. The
//! forwarding handler clones the payload once per emission, wraps it in an
//! `Arc` and `try_send`s it to every queue — it never blocks and never fails
//! the emission.
//!
//! ## Shutdown
//! - [`OffloadPool::shutdown`]: drop the queues, let workers drain what is
//!   already enqueued, then join them.
//! - [`OffloadPool::halt`]: cancel the pool token; workers stop before
//!   picking the next payload, abandoning whatever is still queued. The
//!   in-flight invocation (if any) completes first.
//!
//! Forwarding handlers hold weak queue references: a handler that outlives
//! the pool (still registered in a dispatcher) reports `QueueOverflow` with
//! reason "closed" instead of keeping the workers alive.

use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::handlers::{HandlerFn, HandlerRef};
use crate::offload::Consume;
use crate::report::{Failure, Report, panic_reason};

/// Per-consumer queue metadata.
struct ConsumerChannel<P> {
    name: &'static str,
    sender: mpsc::Sender<Arc<P>>,
}

/// Fan-out coordinator for multiple payload consumers.
///
/// Manages per-consumer queues and worker tasks, providing:
/// - **Concurrent delivery**: payloads forwarded to all consumers at once
/// - **Isolation**: each consumer has a dedicated queue and worker
/// - **Panic safety**: panics caught and reported, don't crash the runtime
/// - **Overflow handling**: dropped payloads reported as `QueueOverflow`
pub struct OffloadPool<P> {
    channels: Vec<ConsumerChannel<P>>,
    workers: Vec<JoinHandle<()>>,
    reporter: Option<Arc<dyn Report>>,
    halt: CancellationToken,
}

impl<P: Send + Sync + 'static> OffloadPool<P> {
    /// Creates a pool without a failure hook and spawns one worker per consumer.
    ///
    /// Consumer panics and queue overflows are still isolated, but their
    /// records are discarded.
    #[must_use]
    pub fn new(consumers: Vec<Arc<dyn Consume<P>>>) -> Self {
        Self::build(consumers, None)
    }

    /// Creates a pool that reports consumer failures to `reporter`.
    #[must_use]
    pub fn with_reporter(consumers: Vec<Arc<dyn Consume<P>>>, reporter: Arc<dyn Report>) -> Self {
        Self::build(consumers, Some(reporter))
    }

    /// Spawns one worker task per consumer.
    ///
    /// ### Per-consumer setup
    /// - Bounded mpsc queue (capacity from [`Consume::queue_capacity`], min 1)
    /// - Dedicated worker task (runs until queue closed or pool halted)
    /// - Panic isolation via `catch_unwind`
    fn build(consumers: Vec<Arc<dyn Consume<P>>>, reporter: Option<Arc<dyn Report>>) -> Self {
        let halt = CancellationToken::new();
        let mut channels = Vec::with_capacity(consumers.len());
        let mut workers = Vec::with_capacity(consumers.len());

        for consumer in consumers {
            let cap = consumer.queue_capacity().max(1);
            let name = consumer.name();
            let (tx, mut rx) = mpsc::channel::<Arc<P>>(cap);
            let c = Arc::clone(&consumer);
            let rep = reporter.clone();
            let token = halt.clone();

            let handle = tokio::spawn(async move {
                loop {
                    tokio::select! {
                        biased;
                        () = token.cancelled() => break,
                        maybe = rx.recv() => match maybe {
                            Some(payload) => {
                                let fut = c.consume(payload.as_ref());

                                if let Err(panic_err) =
                                    std::panic::AssertUnwindSafe(fut).catch_unwind().await
                                {
                                    if let Some(rep) = &rep {
                                        let info = panic_reason(&*panic_err);
                                        rep.report(&Failure::consumer_panic(c.name(), info));
                                    }
                                }
                            }
                            None => break,
                        },
                    }
                }
            });
            channels.push(ConsumerChannel { name, sender: tx });
            workers.push(handle);
        }
        Self {
            channels,
            workers,
            reporter,
            halt,
        }
    }

    /// Gracefully shuts down all workers.
    ///
    /// 1. Drops the queue senders (workers see the channel closed)
    /// 2. Workers drain whatever is already enqueued
    /// 3. Awaits all worker tasks to finish
    pub async fn shutdown(self) {
        drop(self.channels);

        for h in self.workers {
            let _ = h.await;
        }
    }

    /// Stops all workers without draining their queues.
    ///
    /// The in-flight invocation (if any) completes; queued payloads are
    /// abandoned.
    pub async fn halt(self) {
        self.halt.cancel();
        drop(self.channels);

        for h in self.workers {
            let _ = h.await;
        }
    }
}

impl<P: Clone + Send + Sync + 'static> OffloadPool<P> {
    /// Returns a synchronous forwarding handler for this pool.
    ///
    /// Subscribe it to any channel: on every emission it clones the payload
    /// once, wraps it in an `Arc` and `try_send`s it to every consumer queue.
    ///
    /// - Uses `try_send` (non-blocking); the emission is never failed
    /// - On queue full: payload dropped for that consumer, `QueueOverflow`
    ///   reported with reason "full"
    /// - On queue closed (pool shut down): `QueueOverflow` with reason "closed"
    #[must_use]
    pub fn handler(&self) -> HandlerRef<P> {
        let targets: Vec<(&'static str, mpsc::WeakSender<Arc<P>>)> = self
            .channels
            .iter()
            .map(|c| (c.name, c.sender.downgrade()))
            .collect();
        let reporter = self.reporter.clone();

        HandlerFn::arc("offload", move |payload: &P| {
            let shared = Arc::new(payload.clone());

            for (name, weak) in &targets {
                let dropped = match weak.upgrade() {
                    Some(sender) => match sender.try_send(Arc::clone(&shared)) {
                        Ok(()) => None,
                        Err(mpsc::error::TrySendError::Full(_)) => Some("full"),
                        Err(mpsc::error::TrySendError::Closed(_)) => Some("closed"),
                    },
                    None => Some("closed"),
                };
                if let Some(reason) = dropped {
                    if let Some(rep) = &reporter {
                        rep.report(&Failure::queue_overflow(*name, reason));
                    }
                }
            }
            Ok(())
        })
    }
}
