//! Uniform `{data|error}` JSON wrapper for resource responses.

use http::StatusCode;
use serde::Serialize;

use crate::response::Response;

/// Either a payload or an error message, never both.
///
/// Serializes as `{"data": …}` or `{"error": "…"}`; the absent side is
/// omitted rather than written as `null`.
#[derive(Debug, Serialize)]
pub struct Envelope<T = ()> {
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self { data: Some(data), error: None }
    }

    /// Renders the envelope as a JSON response with the given status.
    pub fn respond(&self, code: StatusCode) -> Response {
        Response::serialize(code, self)
    }
}

impl Envelope {
    pub fn error(message: impl Into<String>) -> Self {
        Self { data: None, error: Some(message.into()) }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn body(res: &Response) -> Value {
        serde_json::from_slice(res.body()).unwrap()
    }

    #[test]
    fn data_only() {
        let res = Envelope::data(vec![1, 2]).respond(StatusCode::OK);
        assert_eq!(body(&res), json!({ "data": [1, 2] }));
    }

    #[test]
    fn empty_collection_is_still_data() {
        let res = Envelope::data(Vec::<u8>::new()).respond(StatusCode::OK);
        assert_eq!(body(&res), json!({ "data": [] }));
    }

    #[test]
    fn error_only() {
        let res = Envelope::error("student not found").respond(StatusCode::NOT_FOUND);
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(body(&res), json!({ "error": "student not found" }));
    }
}
