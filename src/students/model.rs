use std::fmt;

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use super::error::StudentError;

/// A student record as stored and as rendered on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

/// Validated fields for creating or replacing a student.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub age: i64,
}

/// Request body of `POST` and `PUT /students`, before validation.
///
/// Keys match case-insensitively (`"Name"` sets `name`) and a repeated key
/// overwrites the earlier value. Missing fields stay at their zero value, a
/// `null` leaves the field as it was, and unknown keys are ignored.
#[derive(Debug, Default)]
pub struct StudentInput {
    name: Option<String>,
    age: Option<i64>,
}

impl<'de> Deserialize<'de> for StudentInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(InputVisitor)
    }
}

struct InputVisitor;

impl<'de> Visitor<'de> for InputVisitor {
    type Value = StudentInput;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a student object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<StudentInput, A::Error> {
        let mut input = StudentInput::default();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("name") {
                if let Some(name) = map.next_value::<Option<String>>()? {
                    input.name = Some(name);
                }
            } else if key.eq_ignore_ascii_case("age") {
                if let Some(age) = map.next_value::<Option<i64>>()? {
                    input.age = Some(age);
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(input)
    }
}

impl StudentInput {
    /// Decodes the first JSON value of `body`. Anything after it is ignored.
    pub fn from_body(body: &[u8]) -> Result<Self, StudentError> {
        let mut values = serde_json::Deserializer::from_slice(body).into_iter::<Option<Self>>();
        match values.next() {
            Some(Ok(input)) => Ok(input.unwrap_or_default()),
            _ => Err(StudentError::InvalidJson),
        }
    }

    /// An age of zero counts as missing.
    pub fn validate(self) -> Result<NewStudent, StudentError> {
        let name = self.name.unwrap_or_default();
        let age = self.age.unwrap_or_default();
        if name.is_empty() || age == 0 {
            return Err(StudentError::MissingFields);
        }
        Ok(NewStudent { name, age })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<NewStudent, StudentError> {
        StudentInput::from_body(body.as_bytes()).and_then(StudentInput::validate)
    }

    #[test]
    fn accepts_complete_input() {
        let new = parse(r#"{"name":"Alice","age":20}"#).unwrap();
        assert_eq!(new, NewStudent { name: "Alice".into(), age: 20 });
    }

    #[test]
    fn ignores_unknown_fields_and_trailing_bytes() {
        let new = parse(r#"{"id":99,"name":"Bob","age":31,"extra":true} trailing"#).unwrap();
        assert_eq!(new.name, "Bob");
        assert_eq!(new.age, 31);
    }

    #[test]
    fn malformed_bodies_are_invalid_json() {
        for body in ["", "{", "not json", r#"{"name":"A","age":"20"}"#, r#"{"name":"A","age":20.5}"#, r#"{"name":7,"age":20}"#] {
            assert_eq!(parse(body), Err(StudentError::InvalidJson), "body: {body:?}");
        }
    }

    #[test]
    fn missing_or_zero_fields_are_rejected() {
        for body in ["null", "{}", r#"{"name":"","age":20}"#, r#"{"name":"A","age":0}"#, r#"{"name":null,"age":5}"#] {
            assert_eq!(parse(body), Err(StudentError::MissingFields), "body: {body:?}");
        }
    }

    #[test]
    fn keys_match_regardless_of_case() {
        let new = parse(r#"{"Name":"Alice","AGE":20}"#).unwrap();
        assert_eq!(new, NewStudent { name: "Alice".into(), age: 20 });
    }

    #[test]
    fn last_duplicate_key_wins() {
        let new = parse(r#"{"name":"Alice","age":1,"name":"Bob","Age":2}"#).unwrap();
        assert_eq!(new, NewStudent { name: "Bob".into(), age: 2 });
    }

    #[test]
    fn null_keeps_the_earlier_value() {
        let new = parse(r#"{"name":"Alice","age":20,"name":null}"#).unwrap();
        assert_eq!(new.name, "Alice");
    }

    #[test]
    fn non_object_bodies_are_invalid_json() {
        for body in ["[]", "20", r#""Alice""#, "true"] {
            assert_eq!(parse(body), Err(StudentError::InvalidJson), "body: {body:?}");
        }
    }

    #[test]
    fn negative_age_passes_validation() {
        assert_eq!(parse(r#"{"name":"A","age":-3}"#).unwrap().age, -3);
    }
}
