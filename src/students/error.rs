use http::StatusCode;
use thiserror::Error;

use crate::envelope::Envelope;
use crate::response::Response;

/// Why a `/students` request was refused.
///
/// The display strings are the exact messages sent to clients.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum StudentError {
    #[error("invalid json")]
    InvalidJson,
    #[error("all fields are required")]
    MissingFields,
    #[error("id required")]
    IdRequired,
    #[error("invalid id")]
    InvalidId,
    #[error("student not found")]
    NotFound,
}

impl StudentError {
    pub fn status(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Plain-text rendering, used by the create endpoint.
    pub fn into_text(self) -> Response {
        Response::builder().status(self.status()).text(self.to_string())
    }

    /// `{"error": …}` rendering, used by every other endpoint.
    pub fn into_envelope(self) -> Response {
        Envelope::error(self.to_string()).respond(self.status())
    }
}
