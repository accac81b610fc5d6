//! # roster
//!
//! A small HTTP service keeping a roster of students in process memory,
//! plus the handful of framework pieces it runs on.
//!
//! ## Surface
//!
//! | Method | Path | Query | Body | Success |
//! |---|---|---|---|---|
//! | GET | `/ping` | – | – | 200 `{"message":"pong","status":"success"}` |
//! | POST | `/students` | – | `{name, age}` | 201 `{"data": student}` |
//! | GET | `/students` | `id?` | – | 200 `{"data": student \| [student]}` |
//! | PUT | `/students` | `id` | `{name, age}` | 200 `{"data": student}` |
//! | DELETE | `/students` | `id` | – | 200 `{"data": "student deleted N"}` |
//!
//! Any other method on a known path is `405`; unknown paths are `404`.
//! Records live only as long as the process.
//!
//! ## Pieces
//!
//! - [`Router`] — radix-tree dispatch by path, then method, via [`matchit`]
//! - [`middleware`] — handler wrapping; [`middleware::Trace`] logs every request
//! - [`students`] — model, lock-guarded [`StudentStore`](students::StudentStore), handlers
//! - [`Server`] — hyper on tokio, graceful shutdown with a bounded drain
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use roster::students::StudentStore;
//! use roster::{Config, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), roster::Error> {
//!     let config = Config::from_env()?;
//!     let app = roster::app(Arc::new(StudentStore::new()));
//!
//!     Server::bind(config.addr)
//!         .await?
//!         .shutdown_timeout(config.shutdown_timeout)
//!         .serve(app)
//!         .await
//! }
//! ```

mod app;
mod config;
mod envelope;
mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod health;
pub mod middleware;
pub mod students;

pub use app::{app, router};
pub use config::Config;
pub use envelope::Envelope;
pub use error::Error;
pub use handler::{BoxFuture, BoxedHandler, ErasedHandler, Handler};
pub use http::{Method, StatusCode};
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
