//! # Dispatch core: channel registry and synchronous delivery.
//!
//! This module contains the dispatcher itself. The only public API from this
//! module is [`Dispatcher`] plus the [`RegistrationId`] identity handle.
//!
//! ## Architecture
//! ```text
//! subscribe / subscribe_once / unsubscribe
//!         │
//!         ▼
//!   Registry: Mutex<HashMap<channel, Vec<Registration>>>
//!         │
//!         │  emit(channel, &payload)
//!         │    1. snapshot the ordered list (under the lock)
//!         │    2. strip once-registrations (still under the lock)
//!         │    3. release the lock
//!         ▼
//!   handler 1 ──► handler 2 ──► ... ──► handler N   (FIFO, caller's thread)
//!        │ Err / panic
//!        ▼
//!   Report::report(&Failure)
//! ```
//!
//! ## Rules
//! - The registry lock is never held across a handler invocation, so handlers
//!   may re-enter the dispatcher freely.
//! - Mutations performed by in-flight handlers affect future emissions only;
//!   the current emission runs against its snapshot.
//! - Emitting on a channel with no registrations is a no-op, never an error.
//!
//! Internal modules:
//! - [`dispatcher`]: registry ownership, snapshotting, delivery and reporting;
//! - [`registration`]: registration records and identity handles.

mod dispatcher;
mod registration;

pub use dispatcher::Dispatcher;
pub use registration::RegistrationId;

pub(crate) use registration::Registration;
