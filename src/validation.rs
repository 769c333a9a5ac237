use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

pub const REQUIRED_FIELDS_ARE_MISSING: &str = "REQUIRED_FIELDS_ARE_MISSING";

/// Required fields that were absent or blank, in the order they were required.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("required fields are missing: {}", .0.join(", "))]
pub struct MissingFields(pub Vec<String>);

impl MissingFields {
    /// Comma-space joined names, trailing separator included.
    pub fn error_fields(&self) -> String {
        self.0.iter().map(|f| format!("{f}, ")).collect()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MissingFieldsBody {
    error_fields: String,
    message: &'static str,
}

impl IntoResponse for MissingFields {
    fn into_response(self) -> Response {
        warn!(fields = %self.error_fields(), "request rejected");
        let body = MissingFieldsBody {
            error_fields: self.error_fields(),
            message: REQUIRED_FIELDS_ARE_MISSING,
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Number(_)) | Some(Value::Bool(true)) => false,
        // `false` has an empty text form
        Some(Value::Bool(false)) => true,
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Every required field must be present and non-empty after trimming.
pub fn verify_required_params(
    required: &[&str],
    body: &Map<String, Value>,
) -> Result<(), MissingFields> {
    let missing: Vec<String> = required
        .iter()
        .filter(|field| is_blank(body.get(**field)))
        .map(|field| field.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissingFields(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn passes_when_all_fields_present() {
        let body = obj(json!({ "email": "a@x.com", "password": "pw", "extra": "" }));
        assert!(verify_required_params(&["email", "password"], &body).is_ok());
    }

    #[test]
    fn lists_absent_and_blank_fields_in_required_order() {
        let body = obj(json!({ "first_name": "  ", "email": "a@x.com", "age": null }));
        let err = verify_required_params(
            &["first_name", "last_name", "email", "password", "age"],
            &body,
        )
        .unwrap_err();
        assert_eq!(err.0, vec!["first_name", "last_name", "password", "age"]);
        assert_eq!(err.error_fields(), "first_name, last_name, password, age, ");
    }

    #[test]
    fn numbers_and_true_count_as_present() {
        let body = obj(json!({ "age": 0, "flag": true }));
        assert!(verify_required_params(&["age", "flag"], &body).is_ok());
    }

    #[test]
    fn false_counts_as_blank() {
        let body = obj(json!({ "age": false, "email": "a@x.com" }));
        let err = verify_required_params(&["email", "age"], &body).unwrap_err();
        assert_eq!(err.0, vec!["age"]);
    }

    #[test]
    fn containers_count_as_blank() {
        let body = obj(json!({ "a": [], "b": {} }));
        let err = verify_required_params(&["a", "b"], &body).unwrap_err();
        assert_eq!(err.0, vec!["a", "b"]);
    }

    #[test]
    fn whitespace_variants_are_blank() {
        let body = obj(json!({ "a": "\t\n ", "b": " x " }));
        let err = verify_required_params(&["a", "b"], &body).unwrap_err();
        assert_eq!(err.0, vec!["a"]);
    }

    #[tokio::test]
    async fn renders_400_with_error_fields() {
        let resp = MissingFields(vec!["email".into()]).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let v: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(v["errorFields"], "email, ");
        assert_eq!(v["message"], REQUIRED_FIELDS_ARE_MISSING);
    }
}
