//! Signup persistence.
//!
//! A store keeps at most one record per normalized email. `insert` checks and
//! writes in one atomic step, so concurrent signups for the same address
//! cannot both succeed.

mod in_memory;
mod postgres;

pub use in_memory::InMemoryStore;
pub use postgres::PostgresStore;

use async_trait::async_trait;

use crate::domain::{NewSignup, SignupEmail, SignupRecord};

#[derive(Debug)]
pub enum InsertOutcome {
    Inserted(SignupRecord),
    AlreadyExists,
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Failed to execute a query against the signup store")]
    Database(#[from] sqlx::Error),
    #[error("Found {count} signups for {email}; emails must be unique")]
    DuplicateRecords { email: String, count: usize },
}

#[async_trait]
pub trait SignupStore: Send + Sync {
    /// Exact-match lookup on an already normalized email.
    async fn lookup_by_email(&self, email: &SignupEmail)
        -> Result<Option<SignupRecord>, StoreError>;

    /// Inserts the signup unless its email is already present.
    async fn insert(&self, signup: &NewSignup) -> Result<InsertOutcome, StoreError>;
}
