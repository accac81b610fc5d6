//! The student resource: model, storage and HTTP handlers.

mod error;
mod handlers;
mod model;
mod store;

pub use error::StudentError;
pub use handlers::{create, delete, list, update};
pub use model::{NewStudent, Student, StudentInput};
pub use store::StudentStore;
