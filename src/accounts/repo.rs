use async_trait::async_trait;
use sqlx::PgPool;

use super::error::StoreResult;
use super::model::{InsertResult, NewUser, ProfileUpdate, UpdateResult, User};

const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Single-statement access to the `users` relation.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn email_exists(&self, email: &str) -> StoreResult<bool>;
    async fn insert(&self, user: &NewUser) -> StoreResult<InsertResult>;
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>>;
    async fn password_hash_by_email(&self, email: &str) -> StoreResult<Option<String>>;
    async fn password_hash_by_id(&self, id: i64) -> StoreResult<Option<String>>;
    /// Rows affected; a row whose columns already hold these values is not counted.
    async fn update_profile(&self, id: i64, update: &ProfileUpdate) -> StoreResult<UpdateResult>;
    async fn update_password(&self, id: i64, password_hash: &str, api_key: &str) -> StoreResult<u64>;
    async fn api_key_by_id(&self, id: i64) -> StoreResult<Option<String>>;
    async fn id_by_api_key(&self, api_key: &str) -> StoreResult<Option<i64>>;
    async fn api_key_exists(&self, api_key: &str) -> StoreResult<bool>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_email_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| db.is_unique_violation() && db.constraint() == Some(EMAIL_CONSTRAINT))
        .unwrap_or(false)
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)"#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn insert(&self, user: &NewUser) -> StoreResult<InsertResult> {
        let res = sqlx::query(
            r#"
            INSERT INTO users (first_name, last_name, email, password_hash, age, api_key, status)
            VALUES ($1, $2, $3, $4, $5, $6, 1)
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.age)
        .bind(&user.api_key)
        .execute(&self.pool)
        .await;

        match res {
            Ok(done) if done.rows_affected() > 0 => Ok(InsertResult::Inserted),
            Ok(_) => Ok(InsertResult::NotInserted),
            Err(e) if is_email_violation(&e) => Ok(InsertResult::EmailConflict),
            Err(e) if is_unique_violation(&e) => Ok(InsertResult::NotInserted),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, age, phone, birthdate, gender,
                   profile_picture_uri, created_at, api_key
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, first_name, last_name, email, age, phone, birthdate, gender,
                   profile_picture_uri, created_at, api_key
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn password_hash_by_email(&self, email: &str) -> StoreResult<Option<String>> {
        let hash = sqlx::query_scalar::<_, String>(
            r#"SELECT password_hash FROM users WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(hash)
    }

    async fn password_hash_by_id(&self, id: i64) -> StoreResult<Option<String>> {
        let hash = sqlx::query_scalar::<_, String>(
            r#"SELECT password_hash FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(hash)
    }

    async fn update_profile(&self, id: i64, update: &ProfileUpdate) -> StoreResult<UpdateResult> {
        // Postgres counts matched rows; the guard keeps a no-op edit at zero.
        let res = sqlx::query(
            r#"
            UPDATE users
               SET email = $1, first_name = $2, last_name = $3, age = $4
             WHERE id = $5
               AND (email, first_name, last_name, age) IS DISTINCT FROM ($1, $2, $3, $4)
            "#,
        )
        .bind(&update.email)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.age)
        .bind(id)
        .execute(&self.pool)
        .await;

        match res {
            Ok(done) => Ok(UpdateResult::Affected(done.rows_affected())),
            Err(e) if is_email_violation(&e) => Ok(UpdateResult::EmailConflict),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_password(&self, id: i64, password_hash: &str, api_key: &str) -> StoreResult<u64> {
        let done = sqlx::query(
            r#"UPDATE users SET password_hash = $1, api_key = $2 WHERE id = $3"#,
        )
        .bind(password_hash)
        .bind(api_key)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(done.rows_affected())
    }

    async fn api_key_by_id(&self, id: i64) -> StoreResult<Option<String>> {
        let key = sqlx::query_scalar::<_, String>(r#"SELECT api_key FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(key)
    }

    async fn id_by_api_key(&self, api_key: &str) -> StoreResult<Option<i64>> {
        let id = sqlx::query_scalar::<_, i64>(r#"SELECT id FROM users WHERE api_key = $1"#)
            .bind(api_key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    async fn api_key_exists(&self, api_key: &str) -> StoreResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM users WHERE api_key = $1)"#,
        )
        .bind(api_key)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
