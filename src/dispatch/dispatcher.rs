//! # The dispatcher: per-channel ordered handler lists and synchronous delivery.
//!
//! [`Dispatcher`] owns the registry and drives emissions. It is created
//! explicitly by its owner and passed by reference (or `Arc`) to producers
//! and subscribers — there is no ambient global instance.
//!
//! ## Delivery contract
//! - Handlers run **synchronously on the emitting thread**, in registration
//!   order, against a snapshot taken at emission start.
//! - Once-registrations leave the registry at snapshot time, before their
//!   handler is invoked, so a handler re-subscribing itself cannot retrigger
//!   within the same emission.
//! - A failing handler (error or panic) is reported through the configured
//!   [`Report`] hook; delivery to the remaining snapshot continues.
//!
//! ## Example
//! ```
//! use herald::{Dispatcher, HandlerFn};
//!
//! let bus: Dispatcher<u32> = Dispatcher::new();
//!
//! let id = bus
//!     .subscribe("metrics", HandlerFn::arc("print", |n: &u32| {
//!         println!("observed {n}");
//!         Ok(())
//!     }))
//!     .unwrap();
//!
//! assert_eq!(bus.emit("metrics", &42).unwrap(), 1);
//!
//! bus.unsubscribe("metrics", id);
//! assert_eq!(bus.emit("metrics", &42).unwrap(), 0);
//! ```

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::dispatch::{Registration, RegistrationId};
use crate::error::DispatchError;
use crate::handlers::HandlerRef;
use crate::report::{Failure, Report};

/// Per-channel ordered registry with synchronous FIFO delivery.
///
/// The payload type is fixed per dispatcher: `Dispatcher<P>` delivers `&P`
/// to every handler. Heterogeneous channels use an enum envelope as `P`.
///
/// ### Properties
/// - **Ordered**: strictly registration order within a channel, no priorities.
/// - **Snapshot-stable**: mutation during an emission affects future emissions only.
/// - **Isolated**: one failing handler never aborts delivery to its siblings.
/// - **Re-entrant**: the registry lock is never held across handler code.
pub struct Dispatcher<P: 'static> {
    channels: Mutex<HashMap<String, Vec<Registration<P>>>>,
    reporter: Option<Arc<dyn Report>>,
    next_id: AtomicU64,
}

impl<P: 'static> Default for Dispatcher<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: 'static> Dispatcher<P> {
    /// Creates a dispatcher without a failure hook.
    ///
    /// Handler failures are still isolated, but their records are discarded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
            reporter: None,
            next_id: AtomicU64::new(0),
        }
    }

    /// Creates a dispatcher that forwards handler failures to `reporter`.
    #[must_use]
    pub fn with_reporter(reporter: Arc<dyn Report>) -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
            reporter: Some(reporter),
            next_id: AtomicU64::new(0),
        }
    }

    /// Appends a persistent registration to `channel`.
    ///
    /// Creates the channel entry if absent. There is no limit on the number
    /// of registrations per channel; the same handler instance may be
    /// registered any number of times, each time under a fresh identity.
    ///
    /// # Errors
    /// [`DispatchError::InvalidChannel`] if the channel name is empty.
    pub fn subscribe(
        &self,
        channel: impl Into<String>,
        handler: HandlerRef<P>,
    ) -> Result<RegistrationId, DispatchError> {
        self.register(channel.into(), handler, false)
    }

    /// Appends a one-shot registration to `channel`.
    ///
    /// The registration is removed from the registry at the start of its
    /// triggering emission, **before** the handler runs: it fires at most
    /// once, even if it panics, and a handler that re-subscribes to the same
    /// channel from within itself only fires again on a later emission.
    ///
    /// # Errors
    /// [`DispatchError::InvalidChannel`] if the channel name is empty.
    pub fn subscribe_once(
        &self,
        channel: impl Into<String>,
        handler: HandlerRef<P>,
    ) -> Result<RegistrationId, DispatchError> {
        self.register(channel.into(), handler, true)
    }

    /// Removes the registration `id` from `channel`, if present.
    ///
    /// Returns whether a registration was removed. Removal is idempotent:
    /// an unknown channel or identity is a successful no-op, never an error.
    pub fn unsubscribe(&self, channel: &str, id: RegistrationId) -> bool {
        let mut channels = self.lock_channels();
        let regs = match channels.get_mut(channel) {
            Some(regs) => regs,
            None => return false,
        };

        let before = regs.len();
        regs.retain(|r| r.id != id);
        let removed = regs.len() != before;

        if regs.is_empty() {
            channels.remove(channel);
        }
        removed
    }

    /// Delivers `payload` to every handler currently registered on `channel`.
    ///
    /// Takes a snapshot of the ordered list, strips once-registrations, then
    /// invokes each snapshot handler in FIFO order on the calling thread.
    /// Handlers added or removed during this emission affect future emissions
    /// only.
    ///
    /// Returns the number of handlers **attempted** — failed invocations are
    /// reported through the [`Report`] hook and still counted.
    ///
    /// # Errors
    /// [`DispatchError::InvalidChannel`] if the channel name is empty. A
    /// channel with no registrations yields `Ok(0)`.
    pub fn emit(&self, channel: &str, payload: &P) -> Result<usize, DispatchError> {
        if channel.is_empty() {
            return Err(DispatchError::InvalidChannel);
        }

        let snapshot: Vec<(RegistrationId, HandlerRef<P>)> = {
            let mut channels = self.lock_channels();
            let regs = match channels.get_mut(channel) {
                Some(regs) => regs,
                None => return Ok(0),
            };

            let snap = regs
                .iter()
                .map(|r| (r.id, Arc::clone(&r.handler)))
                .collect();

            // Once-registrations leave the registry before their handler runs.
            regs.retain(|r| !r.once);
            if regs.is_empty() {
                channels.remove(channel);
            }
            snap
        };

        for (id, handler) in &snapshot {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler.on_emit(payload)));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(err)) => self.report(Failure::handler_error(
                    channel,
                    *id,
                    handler.name(),
                    err.as_message(),
                )),
                Err(panic_err) => {
                    let info = crate::report::panic_reason(&*panic_err);
                    self.report(Failure::handler_panic(channel, *id, handler.name(), info));
                }
            }
        }
        Ok(snapshot.len())
    }

    /// Returns the number of registrations currently held for `channel`.
    pub fn handler_count(&self, channel: &str) -> usize {
        self.lock_channels().get(channel).map_or(0, Vec::len)
    }

    /// Returns `true` when no channel holds any registration.
    pub fn is_empty(&self) -> bool {
        self.lock_channels().is_empty()
    }

    fn register(
        &self,
        channel: String,
        handler: HandlerRef<P>,
        once: bool,
    ) -> Result<RegistrationId, DispatchError> {
        if channel.is_empty() {
            return Err(DispatchError::InvalidChannel);
        }

        let id = RegistrationId(self.next_id.fetch_add(1, AtomicOrdering::Relaxed));
        self.lock_channels()
            .entry(channel)
            .or_default()
            .push(Registration { id, once, handler });
        Ok(id)
    }

    fn report(&self, failure: Failure) {
        if let Some(reporter) = &self.reporter {
            reporter.report(&failure);
        }
    }

    fn lock_channels(&self) -> MutexGuard<'_, HashMap<String, Vec<Registration<P>>>> {
        // The lock is never held across handler code, so a poisoned mutex
        // still holds a consistent registry.
        match self.channels.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandlerError;
    use crate::handlers::HandlerFn;

    /// Test sink collecting every reported failure.
    #[derive(Default)]
    struct CollectReport(Mutex<Vec<Failure>>);

    impl CollectReport {
        fn take(&self) -> Vec<Failure> {
            std::mem::take(&mut self.0.lock().unwrap())
        }
    }

    impl Report for CollectReport {
        fn report(&self, failure: &Failure) {
            self.0.lock().unwrap().push(failure.clone());
        }
    }

    fn recorder() -> Arc<Mutex<Vec<String>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn record(log: &Arc<Mutex<Vec<String>>>, entry: impl Into<String>) {
        log.lock().unwrap().push(entry.into());
    }

    #[test]
    fn test_emit_without_subscribers_returns_zero() {
        let bus: Dispatcher<u32> = Dispatcher::new();
        assert_eq!(bus.emit("absent", &1).unwrap(), 0);

        // Drained channel behaves the same as an absent one.
        let id = bus
            .subscribe("x", HandlerFn::arc("h", |_: &u32| Ok(())))
            .unwrap();
        assert!(bus.unsubscribe("x", id));
        assert_eq!(bus.emit("x", &1).unwrap(), 0);
    }

    #[test]
    fn test_invalid_channel_rejected() {
        let bus: Dispatcher<u32> = Dispatcher::new();
        assert_eq!(
            bus.subscribe("", HandlerFn::arc("h", |_: &u32| Ok(())))
                .unwrap_err(),
            DispatchError::InvalidChannel
        );
        assert_eq!(
            bus.subscribe_once("", HandlerFn::arc("h", |_: &u32| Ok(())))
                .unwrap_err(),
            DispatchError::InvalidChannel
        );
        assert_eq!(bus.emit("", &1).unwrap_err(), DispatchError::InvalidChannel);
    }

    #[test]
    fn test_delivers_in_registration_order() {
        let bus: Dispatcher<u32> = Dispatcher::new();
        let log = recorder();

        let log_a = Arc::clone(&log);
        bus.subscribe(
            "x",
            HandlerFn::arc("a", move |n: &u32| {
                record(&log_a, format!("a({n})"));
                Ok(())
            }),
        )
        .unwrap();

        let log_b = Arc::clone(&log);
        bus.subscribe(
            "x",
            HandlerFn::arc("b", move |n: &u32| {
                record(&log_b, format!("b({n})"));
                Ok(())
            }),
        )
        .unwrap();

        assert_eq!(bus.emit("x", &42).unwrap(), 2);
        assert_eq!(*log.lock().unwrap(), vec!["a(42)", "b(42)"]);
    }

    #[test]
    fn test_same_instance_registered_twice_runs_twice() {
        let bus: Dispatcher<()> = Dispatcher::new();
        let log = recorder();

        let log_h = Arc::clone(&log);
        let handler = HandlerFn::arc("h", move |_: &()| {
            record(&log_h, "h");
            Ok(())
        });

        let first = bus.subscribe("x", handler.clone()).unwrap();
        let second = bus.subscribe("x", handler).unwrap();
        assert_ne!(first, second);

        assert_eq!(bus.emit("x", &()).unwrap(), 2);
        assert_eq!(log.lock().unwrap().len(), 2);

        // Removal targets one identity, the other registration survives.
        assert!(bus.unsubscribe("x", first));
        assert_eq!(bus.emit("x", &()).unwrap(), 1);
    }

    #[test]
    fn test_once_runs_at_most_once_and_registry_drains() {
        let bus: Dispatcher<()> = Dispatcher::new();
        let log = recorder();

        let log_c = Arc::clone(&log);
        bus.subscribe_once(
            "y",
            HandlerFn::arc("c", move |_: &()| {
                record(&log_c, "c");
                Ok(())
            }),
        )
        .unwrap();

        assert_eq!(bus.emit("y", &()).unwrap(), 1);
        assert_eq!(bus.handler_count("y"), 0);
        assert!(bus.is_empty());

        assert_eq!(bus.emit("y", &()).unwrap(), 0);
        assert_eq!(*log.lock().unwrap(), vec!["c"]);
    }

    #[test]
    fn test_once_removed_even_if_handler_panics() {
        let reporter = Arc::new(CollectReport::default());
        let bus: Dispatcher<()> = Dispatcher::with_reporter(reporter.clone());

        bus.subscribe_once("y", HandlerFn::arc("boom", |_: &()| panic!("boom")))
            .unwrap();

        assert_eq!(bus.emit("y", &()).unwrap(), 1);
        assert_eq!(bus.handler_count("y"), 0);
        assert_eq!(bus.emit("y", &()).unwrap(), 0);

        let failures = reporter.take();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].is_panic());
    }

    #[test]
    fn test_once_resubscribing_itself_fires_next_emission_only() {
        let bus: Arc<Dispatcher<()>> = Arc::new(Dispatcher::new());
        let log = recorder();

        fn hook(bus: &Arc<Dispatcher<()>>, log: &Arc<Mutex<Vec<String>>>) {
            let bus_inner = Arc::clone(bus);
            let log_inner = Arc::clone(log);
            bus.subscribe_once(
                "cycle",
                HandlerFn::arc("c", move |_: &()| {
                    record(&log_inner, "c");
                    hook(&bus_inner, &log_inner);
                    Ok(())
                }),
            )
            .unwrap();
        }

        hook(&bus, &log);

        // Its own removal precedes invocation, so re-subscribing from within
        // never retriggers in the same emission.
        assert_eq!(bus.emit("cycle", &()).unwrap(), 1);
        assert_eq!(log.lock().unwrap().len(), 1);

        assert_eq!(bus.emit("cycle", &()).unwrap(), 1);
        assert_eq!(log.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let bus: Dispatcher<()> = Dispatcher::new();

        let keep = bus
            .subscribe("z", HandlerFn::arc("keep", |_: &()| Ok(())))
            .unwrap();
        let gone = bus
            .subscribe("z", HandlerFn::arc("gone", |_: &()| Ok(())))
            .unwrap();

        assert!(bus.unsubscribe("z", gone));
        assert!(!bus.unsubscribe("z", gone));
        assert!(!bus.unsubscribe("never-registered", gone));

        // Sibling registrations are untouched.
        assert_eq!(bus.handler_count("z"), 1);
        assert!(bus.unsubscribe("z", keep));
    }

    #[test]
    fn test_unsubscribe_during_emit_same_snapshot() {
        let bus: Arc<Dispatcher<()>> = Arc::new(Dispatcher::new());
        let log = recorder();

        // B's id is only known after A is registered, so A reads it from a cell.
        let b_id: Arc<Mutex<Option<RegistrationId>>> = Arc::new(Mutex::new(None));

        let bus_a = Arc::clone(&bus);
        let log_a = Arc::clone(&log);
        let b_for_a = Arc::clone(&b_id);
        bus.subscribe(
            "z",
            HandlerFn::arc("a", move |_: &()| {
                record(&log_a, "a");
                if let Some(id) = *b_for_a.lock().unwrap() {
                    bus_a.unsubscribe("z", id);
                }
                Ok(())
            }),
        )
        .unwrap();

        let log_b = Arc::clone(&log);
        let b = bus
            .subscribe(
                "z",
                HandlerFn::arc("b", move |_: &()| {
                    record(&log_b, "b");
                    Ok(())
                }),
            )
            .unwrap();
        *b_id.lock().unwrap() = Some(b);

        // Same-snapshot guarantee: B still runs in the emission that removed it.
        assert_eq!(bus.emit("z", &()).unwrap(), 2);
        assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);

        // The removal is visible to the next emission.
        assert_eq!(bus.emit("z", &()).unwrap(), 1);
        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_subscribe_during_emit_affects_next_emission_only() {
        let bus: Arc<Dispatcher<()>> = Arc::new(Dispatcher::new());
        let log = recorder();

        let bus_a = Arc::clone(&bus);
        let log_a = Arc::clone(&log);
        let log_late = Arc::clone(&log);

        bus.subscribe(
            "grow",
            HandlerFn::arc("a", move |_: &()| {
                record(&log_a, "a");
                let log_late = Arc::clone(&log_late);
                bus_a
                    .subscribe(
                        "grow",
                        HandlerFn::arc("late", move |_: &()| {
                            record(&log_late, "late");
                            Ok(())
                        }),
                    )
                    .unwrap();
                Ok(())
            }),
        )
        .unwrap();

        assert_eq!(bus.emit("grow", &()).unwrap(), 1);
        assert_eq!(*log.lock().unwrap(), vec!["a"]);

        assert_eq!(bus.emit("grow", &()).unwrap(), 2);
        assert_eq!(*log.lock().unwrap(), vec!["a", "a", "late"]);
    }

    #[test]
    fn test_failing_handler_does_not_halt_delivery() {
        let reporter = Arc::new(CollectReport::default());
        let bus: Dispatcher<u32> = Dispatcher::with_reporter(reporter.clone());
        let log = recorder();

        bus.subscribe(
            "x",
            HandlerFn::arc("fails", |_: &u32| Err(HandlerError::fail("broken pipe"))),
        )
        .unwrap();

        let log_b = Arc::clone(&log);
        bus.subscribe(
            "x",
            HandlerFn::arc("b", move |_: &u32| {
                record(&log_b, "b");
                Ok(())
            }),
        )
        .unwrap();

        // Return value counts all attempted handlers, not just the successes.
        assert_eq!(bus.emit("x", &7).unwrap(), 2);
        assert_eq!(*log.lock().unwrap(), vec!["b"]);

        let failures = reporter.take();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].is_error());
        assert_eq!(failures[0].channel.as_deref(), Some("x"));
        assert_eq!(failures[0].handler.as_deref(), Some("fails"));
        assert!(failures[0].reason.as_deref().unwrap().contains("broken pipe"));
    }

    #[test]
    fn test_panicking_handler_is_isolated_and_reported() {
        let reporter = Arc::new(CollectReport::default());
        let bus: Dispatcher<()> = Dispatcher::with_reporter(reporter.clone());
        let log = recorder();

        bus.subscribe("x", HandlerFn::arc("boom", |_: &()| panic!("boom at delivery")))
            .unwrap();

        let log_b = Arc::clone(&log);
        bus.subscribe(
            "x",
            HandlerFn::arc("b", move |_: &()| {
                record(&log_b, "b");
                Ok(())
            }),
        )
        .unwrap();

        assert_eq!(bus.emit("x", &()).unwrap(), 2);
        assert_eq!(*log.lock().unwrap(), vec!["b"]);

        let failures = reporter.take();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].is_panic());
        assert!(failures[0].reason.as_deref().unwrap().contains("boom at delivery"));
    }

    #[test]
    fn test_failures_are_reported_in_delivery_order() {
        let reporter = Arc::new(CollectReport::default());
        let bus: Dispatcher<()> = Dispatcher::with_reporter(reporter.clone());

        bus.subscribe("x", HandlerFn::arc("first", |_: &()| Err("first".into())))
            .unwrap();
        bus.subscribe("x", HandlerFn::arc("second", |_: &()| Err("second".into())))
            .unwrap();

        assert_eq!(bus.emit("x", &()).unwrap(), 2);

        let failures = reporter.take();
        assert_eq!(failures.len(), 2);
        assert!(failures[0].seq < failures[1].seq);
        assert!(failures[0].reason.as_deref().unwrap().contains("first"));
        assert!(failures[1].reason.as_deref().unwrap().contains("second"));
    }

    #[test]
    fn test_concurrent_subscribe_and_emit() {
        let bus: Arc<Dispatcher<u64>> = Arc::new(Dispatcher::new());
        let hits = Arc::new(AtomicU64::new(0));

        let mut joins = Vec::new();
        for _ in 0..4 {
            let bus = Arc::clone(&bus);
            let hits = Arc::clone(&hits);
            joins.push(std::thread::spawn(move || {
                for _ in 0..25 {
                    let hits = Arc::clone(&hits);
                    bus.subscribe(
                        "shared",
                        HandlerFn::arc("count", move |_: &u64| {
                            hits.fetch_add(1, AtomicOrdering::Relaxed);
                            Ok(())
                        }),
                    )
                    .unwrap();
                }
            }));
        }
        for join in joins {
            join.join().unwrap();
        }

        assert_eq!(bus.handler_count("shared"), 100);
        assert_eq!(bus.emit("shared", &1).unwrap(), 100);
        assert_eq!(hits.load(AtomicOrdering::Relaxed), 100);
    }
}
