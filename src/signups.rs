use anyhow::Context;
use uuid::Uuid;

use crate::domain::{NewSignup, SignupEmail, SignupName, SignupRecord};
use crate::store::{InsertOutcome, SignupStore, StoreError};

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const ALREADY_SIGNED_UP_MESSAGE: &str = "This email is already signed up";
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(thiserror::Error)]
pub enum SignupError {
    #[error("Please enter a valid email address")]
    InvalidEmail(#[source] anyhow::Error),
    #[error("This email is already signed up")]
    AlreadySignedUp,
    #[error("The signup store is not configured")]
    StoreUnavailable,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for SignupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl SignupError {
    /// The message shown to whoever submitted the form.
    pub fn public_message(&self) -> &'static str {
        match self {
            SignupError::InvalidEmail(_) => INVALID_EMAIL_MESSAGE,
            SignupError::AlreadySignedUp => ALREADY_SIGNED_UP_MESSAGE,
            SignupError::StoreUnavailable | SignupError::Unexpected(_) => GENERIC_FAILURE_MESSAGE,
        }
    }
}

impl TryFrom<(String, Option<String>)> for NewSignup {
    type Error = SignupError;

    fn try_from((email, name): (String, Option<String>)) -> Result<Self, Self::Error> {
        let email = SignupEmail::parse(email)
            .map_err(|e| SignupError::InvalidEmail(anyhow::anyhow!(e)))?;

        Ok(Self {
            email,
            name: SignupName::parse(name),
        })
    }
}

/// Validates the email, then inserts the signup unless the normalized email is taken.
#[tracing::instrument(name = "Creating a new signup", skip(store, name))]
pub async fn create_signup(
    store: &dyn SignupStore,
    email: String,
    name: Option<String>,
) -> Result<Uuid, SignupError> {
    let new_signup: NewSignup = (email, name).try_into()?;

    let outcome = store
        .insert(&new_signup)
        .await
        .context("Failed to insert a new signup")?;

    match outcome {
        InsertOutcome::Inserted(record) => {
            tracing::info!(signup_id = %record.id, "Signup created");
            Ok(record.id)
        }
        InsertOutcome::AlreadyExists => Err(SignupError::AlreadySignedUp),
    }
}

/// Exact-match lookup for internal callers. Not reachable over HTTP.
#[tracing::instrument(name = "Getting a signup by email", skip(store))]
pub async fn get_signup_by_email(
    store: &dyn SignupStore,
    email: &str,
) -> Result<Option<SignupRecord>, StoreError> {
    store.lookup_by_email(&SignupEmail::normalize(email)).await
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
