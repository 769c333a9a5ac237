use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const REGISTER_FIELDS: &[&str] = &["first_name", "last_name", "email", "password", "age"];
pub const LOGIN_FIELDS: &[&str] = &["email", "password"];
pub const EDIT_USER_FIELDS: &[&str] = &["email", "first_name", "last_name", "age"];
pub const EDIT_PASSWORD_FIELDS: &[&str] = &["old_password", "new_password"];

/// Text form of a scalar: `"36"`, `36` and `true` (as `"1"`) are all accepted.
fn scalar_text<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(de)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(true) => Ok("1".to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a scalar, got {other}"
        ))),
    }
}

/// Request body for registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(deserialize_with = "scalar_text")]
    pub first_name: String,
    #[serde(deserialize_with = "scalar_text")]
    pub last_name: String,
    #[serde(deserialize_with = "scalar_text")]
    pub email: String,
    #[serde(deserialize_with = "scalar_text")]
    pub password: String,
    #[serde(deserialize_with = "scalar_text")]
    pub age: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(deserialize_with = "scalar_text")]
    pub email: String,
    #[serde(deserialize_with = "scalar_text")]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct EditUserRequest {
    #[serde(deserialize_with = "scalar_text")]
    pub email: String,
    #[serde(deserialize_with = "scalar_text")]
    pub first_name: String,
    #[serde(deserialize_with = "scalar_text")]
    pub last_name: String,
    #[serde(deserialize_with = "scalar_text")]
    pub age: String,
}

#[derive(Debug, Deserialize)]
pub struct EditPasswordRequest {
    #[serde(deserialize_with = "scalar_text")]
    pub old_password: String,
    #[serde(deserialize_with = "scalar_text")]
    pub new_password: String,
}

/// `{"message": CODE}` body shared by every result code and error.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Returned after a password change; the previous key stops working.
#[derive(Debug, Serialize)]
pub struct PasswordChangedResponse {
    pub message: &'static str,
    pub api_key: String,
}
