//! # Function-backed handler (`HandlerFn`)
//!
//! [`HandlerFn`] wraps a closure `F: Fn(&P) -> Result<(), HandlerError>`,
//! invoking it once per delivery. The closure is `Fn`, not `FnMut`: a
//! handler owns no hidden mutable state between invocations; if shared
//! state is needed, capture an `Arc<...>` explicitly.
//!
//! ## Example
//! ```rust
//! use herald::{HandlerFn, HandlerRef, HandlerError};
//!
//! let h: HandlerRef<u32> = HandlerFn::arc("doubler", |n: &u32| {
//!     let _ = n * 2;
//!     Ok::<_, HandlerError>(())
//! });
//!
//! assert_eq!(h.name(), "doubler");
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use crate::error::HandlerError;
use crate::handlers::handle::Handle;

/// Function-backed handler implementation.
///
/// Wraps a closure that processes one payload per call.
#[derive(Debug)]
pub struct HandlerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> HandlerFn<F> {
    /// Creates a new function-backed handler.
    ///
    /// Prefer [`HandlerFn::arc`] when you immediately need a [`HandlerRef`](crate::HandlerRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self { name: name.into(), f }
    }

    /// Creates the handler and returns it as a shared handle (`Arc<Self>`).
    ///
    /// ## Example
    /// ```rust
    /// use herald::{HandlerFn, HandlerRef, HandlerError};
    ///
    /// let h: HandlerRef<()> = HandlerFn::arc("hello", |_p: &()| {
    ///     Ok::<_, HandlerError>(())
    /// });
    /// assert_eq!(h.name(), "hello");
    /// ```
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

impl<P, F> Handle<P> for HandlerFn<F>
where
    P: 'static,
    F: Fn(&P) -> Result<(), HandlerError> + Send + Sync + 'static, // Fn, not FnMut
{
    fn name(&self) -> &str {
        &self.name
    }

    fn on_emit(&self, payload: &P) -> Result<(), HandlerError> {
        (self.f)(payload)
    }
}
