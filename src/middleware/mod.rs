//! Middleware layer.
//!
//! Middleware intercepts requests and responses and is the right place for
//! cross-cutting concerns: structured tracing, metrics, request-id injection.
//!
//! A middleware takes the handler it guards and returns a new handler. The
//! built-in [`Trace`] logs every request. Any
//! `Fn(BoxedHandler) -> BoxedHandler` closure is a middleware too.
//!
//! ```rust,no_run
//! use roster::middleware::{self, Trace};
//! use roster::{Request, Router};
//!
//! async fn ping(_req: Request) -> &'static str { "pong" }
//!
//! let app = middleware::chain(Router::new().get("/ping", ping).into_handler(), &[&Trace]);
//! ```

mod trace;

pub use trace::Trace;

use crate::handler::BoxedHandler;

/// Wraps a handler with cross-cutting behaviour.
pub trait Middleware: Send + Sync + 'static {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler;
}

impl<F> Middleware for F
where
    F: Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static,
{
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        self(next)
    }
}

/// Applies `middlewares` around `handler`.
///
/// The first middleware is the outermost: it sees the request first and the
/// response last.
pub fn chain(handler: BoxedHandler, middlewares: &[&dyn Middleware]) -> BoxedHandler {
    middlewares.iter().rev().fold(handler, |next, m| m.wrap(next))
}
