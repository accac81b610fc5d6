//! Per-request logging.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use super::Middleware;
use crate::handler::{BoxFuture, BoxedHandler, ErasedHandler};
use crate::request::Request;

/// Logs method, path, status and wall-clock duration once the inner handler
/// has produced its response.
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl Middleware for Trace {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        Arc::new(Traced { next })
    }
}

struct Traced {
    next: BoxedHandler,
}

impl ErasedHandler for Traced {
    fn call(&self, req: Request) -> BoxFuture {
        let start = Instant::now();
        let method = req.method().clone();
        let path = req.path().to_owned();
        let fut = self.next.call(req);

        Box::pin(async move {
            let res = fut.await;
            info!(
                %method,
                %path,
                status = res.status_code().as_u16(),
                elapsed = ?start.elapsed(),
                "request"
            );
            res
        })
    }
}
