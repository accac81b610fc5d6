//! Route table and middleware stack of the roster service.

use std::future::Future;
use std::sync::Arc;

use crate::handler::{BoxedHandler, Handler};
use crate::health;
use crate::middleware::{self, Trace};
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::students::{self, StudentStore};

/// `GET /ping` plus the four `/students` methods, all sharing `store`.
pub fn router(store: Arc<StudentStore>) -> Router {
    Router::new()
        .get("/ping", health::ping)
        .post("/students", with_store(Arc::clone(&store), students::create))
        .get("/students", with_store(Arc::clone(&store), students::list))
        .put("/students", with_store(Arc::clone(&store), students::update))
        .delete("/students", with_store(store, students::delete))
}

/// The full application: the router wrapped in request tracing.
pub fn app(store: Arc<StudentStore>) -> BoxedHandler {
    middleware::chain(router(store).into_handler(), &[&Trace])
}

fn with_store<F, Fut>(store: Arc<StudentStore>, f: F) -> impl Handler
where
    F: Fn(Arc<StudentStore>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    move |req: Request| f(Arc::clone(&store), req)
}
