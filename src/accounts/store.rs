use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::api_key::generate_api_key;
use super::error::StoreResult;
use super::model::{InsertResult, NewUser, ProfileUpdate, UpdateResult, User};
use super::outcome::{CreateUserOutcome, EditPasswordOutcome, EditUserOutcome};
use super::password::{hash_password, verify_password};
use super::repo::UserRepository;

/// Business rules over the `users` relation.
#[derive(Clone)]
pub struct AccountStore {
    repo: Arc<dyn UserRepository>,
}

impl AccountStore {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, password))]
    pub async fn create_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
        age: &str,
    ) -> StoreResult<CreateUserOutcome> {
        if self.is_user_exists(email).await? {
            warn!("email already registered");
            return Ok(CreateUserOutcome::EmailAlreadyTaken);
        }

        let new_user = NewUser {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
            age: age.to_string(),
            api_key: generate_api_key(),
        };

        let outcome = match self.repo.insert(&new_user).await? {
            InsertResult::Inserted => CreateUserOutcome::Created,
            // lost the race against a concurrent registration
            InsertResult::EmailConflict => CreateUserOutcome::EmailAlreadyTaken,
            InsertResult::NotInserted => CreateUserOutcome::FailedToCreate,
        };
        info!(outcome = outcome.code(), "create_user");
        Ok(outcome)
    }

    /// Unknown email and wrong password both yield `false`.
    #[instrument(skip(self, password))]
    pub async fn check_login(&self, email: &str, password: &str) -> StoreResult<bool> {
        match self.repo.password_hash_by_email(email).await? {
            Some(hash) => verify_password(password, &hash),
            None => Ok(false),
        }
    }

    #[instrument(skip(self))]
    pub async fn edit_user(
        &self,
        user_id: i64,
        email: &str,
        first_name: &str,
        last_name: &str,
        age: &str,
    ) -> StoreResult<EditUserOutcome> {
        let current = self.repo.find_by_id(user_id).await?;
        let own_email = current.as_ref().is_some_and(|u| u.email == email);

        if !own_email && self.is_user_exists(email).await? {
            return Ok(EditUserOutcome::EmailAlreadyTaken);
        }

        let update = ProfileUpdate {
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            age: age.to_string(),
        };
        let outcome = match self.repo.update_profile(user_id, &update).await? {
            UpdateResult::Affected(0) => EditUserOutcome::NoChange,
            UpdateResult::Affected(_) => EditUserOutcome::Updated,
            UpdateResult::EmailConflict => EditUserOutcome::EmailAlreadyTaken,
        };
        info!(user_id, outcome = outcome.code(), "edit_user");
        Ok(outcome)
    }

    #[instrument(skip(self, old_password, new_password))]
    pub async fn edit_user_password(
        &self,
        user_id: i64,
        old_password: &str,
        new_password: &str,
    ) -> StoreResult<EditPasswordOutcome> {
        let Some(current_hash) = self.repo.password_hash_by_id(user_id).await? else {
            return Ok(EditPasswordOutcome::UserDoesntExist);
        };

        if !verify_password(old_password, &current_hash)? {
            warn!(user_id, "old password rejected");
            return Ok(EditPasswordOutcome::IncorrectCredentials);
        }
        if verify_password(new_password, &current_hash)? {
            return Ok(EditPasswordOutcome::NoChange);
        }

        let new_hash = hash_password(new_password)?;
        let api_key = generate_api_key();
        let rows = self.repo.update_password(user_id, &new_hash, &api_key).await?;
        if rows == 0 {
            // row vanished between the lookup and the update
            return Ok(EditPasswordOutcome::UserDoesntExist);
        }
        info!(user_id, "password changed, api key rotated");
        Ok(EditPasswordOutcome::PasswordChanged)
    }

    pub async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.repo.find_by_email(email).await
    }

    pub async fn get_user_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        self.repo.find_by_id(id).await
    }

    pub async fn get_api_key_by_id(&self, user_id: i64) -> StoreResult<Option<String>> {
        self.repo.api_key_by_id(user_id).await
    }

    pub async fn get_user_id(&self, api_key: &str) -> StoreResult<Option<i64>> {
        self.repo.id_by_api_key(api_key).await
    }

    pub async fn is_valid_api_key(&self, api_key: &str) -> StoreResult<bool> {
        let valid = self.repo.api_key_exists(api_key).await?;
        debug!(valid, "api key checked");
        Ok(valid)
    }

    async fn is_user_exists(&self, email: &str) -> StoreResult<bool> {
        self.repo.email_exists(email).await
    }
}
