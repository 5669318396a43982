//! # Registration records and identity handles.
//!
//! Each call to `subscribe` / `subscribe_once` mints a fresh
//! [`RegistrationId`] and appends a [`Registration`] to the channel's list.
//! Removal matches on identity, never on handler value: the same handler
//! instance registered twice yields two independent registrations.

use crate::handlers::HandlerRef;

/// Opaque identity of one registration, returned by `subscribe` and
/// `subscribe_once` and consumed by `unsubscribe`.
///
/// Ids are unique within their dispatcher (drawn from a per-dispatcher
/// counter) and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationId(pub(crate) u64);

impl RegistrationId {
    /// Returns the raw numeric value (for logs/metrics).
    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// One entry in a channel's ordered handler list.
///
/// Lifecycle: `Active -> Removed` — removal happens either explicitly via
/// `unsubscribe`, or automatically at snapshot time when `once` is set.
/// Double removal is a no-op.
pub(crate) struct Registration<P: 'static> {
    pub(crate) id: RegistrationId,
    pub(crate) once: bool,
    pub(crate) handler: HandlerRef<P>,
}
