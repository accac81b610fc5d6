//! Health-check handler.
//!
//! ```rust,no_run
//! use roster::{Router, health};
//!
//! let app = Router::new().get("/ping", health::ping);
//! ```
//!
//! Only `GET` is registered; the router answers every other method on
//! `/ping` with `405 Method Not Allowed`.

use http::StatusCode;
use serde::Serialize;

use crate::{Request, Response};

#[derive(Debug, Serialize)]
struct Pong {
    message: &'static str,
    status: &'static str,
}

/// Liveness check.
///
/// Always returns `200 OK` with `{"message":"pong","status":"success"}`. If
/// the process can respond to HTTP at all, it is alive.
pub async fn ping(_req: Request) -> Response {
    Response::serialize(StatusCode::OK, &Pong { message: "pong", status: "success" })
}
