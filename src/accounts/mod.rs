//! Account store: every read and write of the `users` relation.

mod api_key;
pub mod error;
#[cfg(test)]
pub mod memory;
pub mod model;
pub mod outcome;
mod password;
pub mod repo;
mod store;

pub use error::StoreError;
pub use model::User;
pub use outcome::{CreateUserOutcome, EditPasswordOutcome, EditUserOutcome};
pub use repo::{PgUserRepository, UserRepository};
pub use store::AccountStore;
