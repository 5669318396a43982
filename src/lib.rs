//! # herald
//!
//! **Herald** is a synchronous in-process publish/subscribe dispatcher for Rust.
//!
//! It provides a registry of named event channels with ordered handler lists,
//! one-shot subscriptions, identity-based removal and per-handler failure
//! isolation. The crate is designed as a building block for components that
//! need deterministic, same-thread event delivery.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Producer   │   │   Producer   │   │   Producer   │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ emit("ch", &p)   │                  │
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Dispatcher<P>                                                    │
//! │  - Registry (per-channel ordered handler lists)                   │
//! │  - Snapshot at emit start (stable against re-entrant mutation)    │
//! │  - Failure capture (Err / panic → Report hook)                    │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!   handler 1          handler 2          handler N      (FIFO, sync)
//!        │                                     │
//!        │ fast work inline                    │ slow work handed off
//!        ▼                                     ▼
//!      done                            OffloadPool (feature "offload")
//!                                        per-consumer bounded queues,
//!                                        one worker task per consumer
//! ```
//!
//! ### Delivery lifecycle
//! ```text
//! emit(channel, &payload)
//!   ├─► validate channel name (non-empty)
//!   ├─► lock registry, snapshot ordered list, strip once-registrations
//!   ├─► unlock (handlers may re-enter the dispatcher)
//!   ├─► for each snapshot entry, in registration order:
//!   │       invoke handler on the calling thread
//!   │       ├─ Ok(())      ─► continue
//!   │       ├─ Err(e)      ─► Report(Failure::HandlerError), continue
//!   │       └─ panic       ─► caught, Report(Failure::HandlerPanic), continue
//!   └─► return count of handlers attempted
//! ```
//!
//! ## Features
//! | Area              | Description                                                          | Key types / traits                  |
//! |-------------------|----------------------------------------------------------------------|-------------------------------------|
//! | **Dispatch**      | Ordered, snapshot-stable, synchronous delivery per channel.          | [`Dispatcher`], [`RegistrationId`]  |
//! | **Handlers**      | Define handlers as functions or trait impls, easy to compose.        | [`Handle`], [`HandlerFn`], [`HandlerRef`] |
//! | **Failures**      | Typed failure records and a pluggable reporting hook.                | [`Failure`], [`FailureKind`], [`Report`] |
//! | **Errors**        | Typed errors for the public API and handler results.                 | [`DispatchError`], [`HandlerError`] |
//! | **Offload**       | Non-blocking hand-off of slow work to dedicated worker tasks.        | [`Consume`], [`OffloadPool`]        |
//!
//! ## Optional features
//! - `offload` *(default)*: async fan-out layer for slow consumers.
//! - `logging`: exports a simple built-in [`LogReporter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use herald::{Dispatcher, HandlerFn};
//!
//! let bus: Dispatcher<String> = Dispatcher::new();
//!
//! // Persistent subscription.
//! bus.subscribe("greeting", HandlerFn::arc("print", |who: &String| {
//!     println!("hello, {who}!");
//!     Ok(())
//! }))?;
//!
//! // One-shot subscription: removed before its first invocation.
//! bus.subscribe_once("greeting", HandlerFn::arc("first-only", |_: &String| {
//!     println!("first greeting observed");
//!     Ok(())
//! }))?;
//!
//! assert_eq!(bus.emit("greeting", &"world".to_string())?, 2);
//! assert_eq!(bus.emit("greeting", &"again".to_string())?, 1);
//! # Ok::<(), herald::DispatchError>(())
//! ```
mod dispatch;
mod error;
mod handlers;
mod report;

// ---- Public re-exports ----

pub use dispatch::{Dispatcher, RegistrationId};
pub use error::{DispatchError, HandlerError};
pub use handlers::{Handle, HandlerFn, HandlerRef};
pub use report::{Failure, FailureKind, Report};

// Optional: expose the async offload layer.
// Enabled by default; disable with: `default-features = false`
#[cfg(feature = "offload")]
mod offload;
#[cfg(feature = "offload")]
pub use offload::{Consume, OffloadPool};

// Optional: expose a simple built-in failure printer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use report::LogReporter;
