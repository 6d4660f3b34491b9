use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::domain::{NewSignup, SignupEmail, SignupRecord};
use crate::store::{InsertOutcome, SignupStore, StoreError};

/// Signups in the `signups` table; uniqueness comes from the `signups_by_email` index.
#[derive(Clone)]
pub struct PostgresStore {
    pool: Pool<Postgres>,
}

impl PostgresStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SignupStore for PostgresStore {
    #[tracing::instrument(name = "Looking up a signup by email", skip(self))]
    async fn lookup_by_email(
        &self,
        email: &SignupEmail,
    ) -> Result<Option<SignupRecord>, StoreError> {
        // Fetch every match so a broken uniqueness invariant surfaces as an error.
        let records = sqlx::query_as::<_, SignupRecord>(
            r#"
                SELECT id, created_at, email, name
                FROM signups
                WHERE email = $1
            "#,
        )
        .bind(email.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            tracing::error!("Failed to execute query: {:?}", error);
            error
        })?;

        single_match(records, email)
    }

    #[tracing::instrument(
        name = "Saving new signup details in the database",
        skip(self, signup),
        fields(signup_email = %signup.email)
    )]
    async fn insert(&self, signup: &NewSignup) -> Result<InsertOutcome, StoreError> {
        let inserted = sqlx::query_as::<_, SignupRecord>(
            r#"
                INSERT INTO signups (id, email, name, created_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (email) DO NOTHING
                RETURNING id, created_at, email, name
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(signup.email.to_string())
        .bind(signup.name.as_ref().map(AsRef::<str>::as_ref))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            tracing::error!("Failed to execute query: {:?}", error);
            error
        })?;

        Ok(match inserted {
            Some(record) => InsertOutcome::Inserted(record),
            None => InsertOutcome::AlreadyExists,
        })
    }
}

/// At most one record may match an email; more means the unique index was bypassed.
fn single_match(
    mut records: Vec<SignupRecord>,
    email: &SignupEmail,
) -> Result<Option<SignupRecord>, StoreError> {
    match records.len() {
        0 | 1 => Ok(records.pop()),
        count => Err(StoreError::DuplicateRecords {
            email: email.to_string(),
            count,
        }),
    }
}
