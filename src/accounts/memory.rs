use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;

use super::error::StoreResult;
use super::model::{InsertResult, NewUser, ProfileUpdate, UpdateResult, User};
use super::repo::UserRepository;

struct Row {
    user: User,
    password_hash: String,
}

/// `users` table kept in a Vec, with the same unique constraints as the migration.
#[derive(Default)]
pub struct MemoryUserRepository {
    rows: Mutex<Vec<Row>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn password_hash_of(&self, id: i64) -> Option<String> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.user.id == id)
            .map(|r| r.password_hash.clone())
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        Ok(self.rows.lock().unwrap().iter().any(|r| r.user.email == email))
    }

    // Mirrors `PgUserRepository::insert`: UNIQUE `users_email_key` → EmailConflict,
    // UNIQUE `users_api_key_key` → NotInserted.
    async fn insert(&self, user: &NewUser) -> StoreResult<InsertResult> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|r| r.user.email == user.email) {
            return Ok(InsertResult::EmailConflict);
        }
        if rows.iter().any(|r| r.user.api_key == user.api_key) {
            return Ok(InsertResult::NotInserted);
        }
        let id = rows.iter().map(|r| r.user.id).max().unwrap_or(0) + 1;
        rows.push(Row {
            user: User {
                id,
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                email: user.email.clone(),
                age: user.age.clone(),
                phone: None,
                birthdate: None,
                gender: None,
                profile_picture_uri: None,
                created_at: OffsetDateTime::now_utc(),
                api_key: user.api_key.clone(),
            },
            password_hash: user.password_hash.clone(),
        });
        Ok(InsertResult::Inserted)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|r| r.user.email == email).map(|r| r.user.clone()))
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|r| r.user.id == id).map(|r| r.user.clone()))
    }

    async fn password_hash_by_email(&self, email: &str) -> StoreResult<Option<String>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|r| r.user.email == email)
            .map(|r| r.password_hash.clone()))
    }

    async fn password_hash_by_id(&self, id: i64) -> StoreResult<Option<String>> {
        Ok(self.password_hash_of(id))
    }

    // Mirrors `PgUserRepository::update_profile`: the `users_email_key` violation, then the
    // `IS DISTINCT FROM` guard that leaves an identical row uncounted.
    async fn update_profile(&self, id: i64, update: &ProfileUpdate) -> StoreResult<UpdateResult> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|r| r.user.id != id && r.user.email == update.email)
        {
            return Ok(UpdateResult::EmailConflict);
        }
        let Some(row) = rows.iter_mut().find(|r| r.user.id == id) else {
            return Ok(UpdateResult::Affected(0));
        };
        let u = &mut row.user;
        if u.email == update.email
            && u.first_name == update.first_name
            && u.last_name == update.last_name
            && u.age == update.age
        {
            return Ok(UpdateResult::Affected(0));
        }
        u.email = update.email.clone();
        u.first_name = update.first_name.clone();
        u.last_name = update.last_name.clone();
        u.age = update.age.clone();
        Ok(UpdateResult::Affected(1))
    }

    async fn update_password(&self, id: i64, password_hash: &str, api_key: &str) -> StoreResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|r| r.user.id == id) {
            Some(row) => {
                row.password_hash = password_hash.to_string();
                row.user.api_key = api_key.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn api_key_by_id(&self, id: i64) -> StoreResult<Option<String>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|r| r.user.id == id)
            .map(|r| r.user.api_key.clone()))
    }

    async fn id_by_api_key(&self, api_key: &str) -> StoreResult<Option<i64>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|r| r.user.api_key == api_key)
            .map(|r| r.user.id))
    }

    async fn api_key_exists(&self, api_key: &str) -> StoreResult<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.user.api_key == api_key))
    }
}
