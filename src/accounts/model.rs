use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// Public profile projection of a `users` row. The password hash is never selected into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: String,
    pub phone: Option<String>,
    pub birthdate: Option<String>,
    pub gender: Option<String>,
    pub profile_picture_uri: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub api_key: String,
}

/// Row to insert on registration. `password_hash` is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub age: String,
    pub api_key: String,
}

/// Mutable profile columns written by a profile edit.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub age: String,
}

/// What the insert statement reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    Inserted,
    EmailConflict,
    NotInserted,
}

/// What a profile update statement reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateResult {
    Affected(u64),
    EmailConflict,
}
