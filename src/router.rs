//! Radix-tree request router.
//!
//! One tree per HTTP method, plus one tree holding every registered path so
//! a known path hit with the wrong method can be told apart from an unknown
//! path. Dispatch is a pure lookup; the router carries no request state.

use std::collections::HashMap;
use std::sync::Arc;

use http::{Method, StatusCode};
use matchit::Router as MatchitRouter;

use crate::handler::{BoxFuture, BoxedHandler, ErasedHandler, Handler};
use crate::request::Request;
use crate::response::Response;

/// The application router.
///
/// Build it once at startup, wrap it in middleware if needed, and pass it to
/// [`Server::serve`](crate::Server::serve). Each registration returns `self`
/// so calls chain naturally.
///
/// - matching path and method → the registered handler
/// - matching path, other method → `405 Method Not Allowed`, plain text
/// - no matching path → `404 Not Found`, plain text
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    paths: MatchitRouter<()>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), paths: MatchitRouter::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax — `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route pattern or is registered twice
    /// for the same method.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        // The same path under another method conflicts here, which is fine.
        let _ = self.paths.insert(path, ());
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::GET, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::POST, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::PUT, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::DELETE, path, handler)
    }

    /// Erases the router into a handler so middleware can wrap it.
    pub fn into_handler(self) -> BoxedHandler {
        Arc::new(self)
    }

    pub(crate) fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    fn is_known_path(&self, path: &str) -> bool {
        self.paths.at(path).is_ok()
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

impl ErasedHandler for Router {
    fn call(&self, req: Request) -> BoxFuture {
        if let Some((handler, params)) = self.lookup(req.method(), req.path()) {
            return handler.call(req.with_params(params));
        }

        let res = if self.is_known_path(req.path()) {
            Response::builder()
                .status(StatusCode::METHOD_NOT_ALLOWED)
                .text("method not allowed")
        } else {
            Response::builder()
                .status(StatusCode::NOT_FOUND)
                .text("404 page not found")
        };
        Box::pin(async move { res })
    }
}
