//! `/students` endpoints.
//!
//! Each handler takes the shared store by `Arc` so it can be registered as a
//! plain `Fn(Request)` closure; see [`crate::app::router`].

use std::sync::Arc;

use http::StatusCode;
use tracing::debug;

use super::error::StudentError;
use super::model::{Student, StudentInput};
use super::store::StudentStore;
use crate::envelope::Envelope;
use crate::request::Request;
use crate::response::Response;

/// `POST /students`. Refusals are plain text.
pub async fn create(store: Arc<StudentStore>, req: Request) -> Response {
    match StudentInput::from_body(req.body()).and_then(StudentInput::validate) {
        Ok(new) => {
            let student = store.create(new);
            debug!(id = student.id, "student created");
            Envelope::data(student).respond(StatusCode::CREATED)
        }
        Err(e) => e.into_text(),
    }
}

/// `GET /students` lists everything; `GET /students?id=N` fetches one record.
pub async fn list(store: Arc<StudentStore>, req: Request) -> Response {
    let Some(raw) = req.query("id") else {
        return Envelope::data(store.list()).respond(StatusCode::OK);
    };

    match parse_id(&raw).and_then(|id| store.get(id).ok_or(StudentError::NotFound)) {
        Ok(student) => Envelope::data(student).respond(StatusCode::OK),
        Err(e) => e.into_envelope(),
    }
}

/// `PUT /students?id=N`.
pub async fn update(store: Arc<StudentStore>, req: Request) -> Response {
    match try_update(&store, &req) {
        Ok(student) => {
            debug!(id = student.id, "student updated");
            Envelope::data(student).respond(StatusCode::OK)
        }
        Err(e) => e.into_envelope(),
    }
}

/// `DELETE /students?id=N`.
pub async fn delete(store: Arc<StudentStore>, req: Request) -> Response {
    let id = match require_id(&req) {
        Ok(id) => id,
        Err(e) => return e.into_envelope(),
    };

    if !store.delete(id) {
        return StudentError::NotFound.into_envelope();
    }
    debug!(id, "student deleted");
    Envelope::data(format!("student deleted {id}")).respond(StatusCode::OK)
}

// Checks run in a fixed order: id presence, id syntax, body syntax, body
// fields, then the lookup.
fn try_update(store: &StudentStore, req: &Request) -> Result<Student, StudentError> {
    let id = require_id(req)?;
    let new = StudentInput::from_body(req.body())?.validate()?;
    store.update(id, new).ok_or(StudentError::NotFound)
}

fn require_id(req: &Request) -> Result<i64, StudentError> {
    let raw = req.query("id").ok_or(StudentError::IdRequired)?;
    parse_id(&raw)
}

fn parse_id(raw: &str) -> Result<i64, StudentError> {
    raw.parse().map_err(|_| StudentError::InvalidId)
}

#[cfg(test)]
mod tests {
    use http::Method;
    use serde_json::{Value, json};

    use super::*;
    use crate::students::NewStudent;

    fn json_body(res: &Response) -> Value {
        serde_json::from_slice(res.body()).unwrap()
    }

    fn seeded(names: &[&str]) -> Arc<StudentStore> {
        let store = Arc::new(StudentStore::new());
        for (i, name) in names.iter().enumerate() {
            store.create(NewStudent { name: (*name).to_owned(), age: 20 + i as i64 });
        }
        store
    }

    #[tokio::test]
    async fn create_returns_201_with_record() {
        let store = seeded(&[]);
        let res = create(Arc::clone(&store), Request::new(Method::POST, "/students", r#"{"name":"Alice","age":20}"#)).await;

        assert_eq!(res.status_code(), StatusCode::CREATED);
        assert_eq!(res.header("content-type"), Some("application/json"));
        assert_eq!(json_body(&res), json!({ "data": { "id": 1, "name": "Alice", "age": 20 } }));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn create_refusals_are_plain_text() {
        let store = seeded(&[]);

        let res = create(Arc::clone(&store), Request::new(Method::POST, "/students", "{oops")).await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(res.body(), b"invalid json");

        let res = create(Arc::clone(&store), Request::new(Method::POST, "/students", r#"{"name":"","age":20}"#)).await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(res.body(), b"all fields are required");
        assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn list_without_id_returns_everything_in_order() {
        let res = list(seeded(&[]), Request::new(Method::GET, "/students", "")).await;
        assert_eq!(json_body(&res), json!({ "data": [] }));

        let res = list(seeded(&["Alice", "Bob"]), Request::new(Method::GET, "/students", "")).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(
            json_body(&res),
            json!({ "data": [
                { "id": 1, "name": "Alice", "age": 20 },
                { "id": 2, "name": "Bob", "age": 21 },
            ] })
        );
    }

    #[tokio::test]
    async fn list_with_id() {
        let store = seeded(&["Alice", "Bob"]);

        let res = list(Arc::clone(&store), Request::new(Method::GET, "/students?id=2", "")).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(json_body(&res), json!({ "data": { "id": 2, "name": "Bob", "age": 21 } }));

        let res = list(Arc::clone(&store), Request::new(Method::GET, "/students?id=abc", "")).await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(&res), json!({ "error": "invalid id" }));

        let res = list(store, Request::new(Method::GET, "/students?id=3", "")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(&res), json!({ "error": "student not found" }));
    }

    #[tokio::test]
    async fn update_checks_run_in_order() {
        let store = seeded(&["Alice"]);
        let cases = [
            ("/students", "{bad", StatusCode::BAD_REQUEST, "id required"),
            ("/students?id=x", "{bad", StatusCode::BAD_REQUEST, "invalid id"),
            ("/students?id=99", "{bad", StatusCode::BAD_REQUEST, "invalid json"),
            ("/students?id=99", r#"{"name":"Zed","age":0}"#, StatusCode::BAD_REQUEST, "all fields are required"),
            ("/students?id=99", r#"{"name":"Zed","age":9}"#, StatusCode::NOT_FOUND, "student not found"),
        ];

        for (target, body, status, message) in cases {
            let res = update(Arc::clone(&store), Request::new(Method::PUT, target, body)).await;
            assert_eq!(res.status_code(), status, "{target} {body}");
            assert_eq!(json_body(&res), json!({ "error": message }), "{target} {body}");
        }
        assert_eq!(store.get(1).unwrap().name, "Alice");
    }

    #[tokio::test]
    async fn update_replaces_name_and_age() {
        let store = seeded(&["Alice", "Bob"]);
        let res = update(
            Arc::clone(&store),
            Request::new(Method::PUT, "/students?id=1", r#"{"name":"Alicia","age":33}"#),
        )
        .await;

        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(json_body(&res), json!({ "data": { "id": 1, "name": "Alicia", "age": 33 } }));
        assert_eq!(store.list()[1].name, "Bob");
    }

    #[tokio::test]
    async fn delete_paths() {
        let store = seeded(&["Alice", "Bob"]);

        let res = delete(Arc::clone(&store), Request::new(Method::DELETE, "/students", "")).await;
        assert_eq!(json_body(&res), json!({ "error": "id required" }));

        let res = delete(Arc::clone(&store), Request::new(Method::DELETE, "/students?id=1.5", "")).await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(&res), json!({ "error": "invalid id" }));

        let res = delete(Arc::clone(&store), Request::new(Method::DELETE, "/students?id=999", "")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(&res), json!({ "error": "student not found" }));

        let res = delete(Arc::clone(&store), Request::new(Method::DELETE, "/students?id=1", "")).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(json_body(&res), json!({ "data": "student deleted 1" }));
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.get(1), None);
    }
}
