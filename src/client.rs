use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::routes::{SignupRequest, SignupResponse};

/// The structured answer of the signup mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationResult {
    Success { id: uuid::Uuid },
    Failure { error: String },
}

impl From<SignupResponse> for MutationResult {
    fn from(response: SignupResponse) -> Self {
        match response {
            SignupResponse::Created { id, .. } => Self::Success { id },
            SignupResponse::Failed { error, .. } => Self::Failure { error },
        }
    }
}

/// Anything that is not a structured mutation result.
#[derive(thiserror::Error, Debug)]
pub enum MutationError {
    #[error("Failed to reach the signup endpoint")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected response status {0}")]
    UnexpectedStatus(StatusCode),
}

#[async_trait]
pub trait SignupMutation: Send + Sync {
    async fn create_signup(
        &self,
        email: &str,
        name: Option<&str>,
    ) -> Result<MutationResult, MutationError>;
}

#[derive(Clone)]
pub struct SignupClient {
    http_client: Client,
    base_url: String,
}

impl SignupClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url,
        })
    }
}

#[async_trait]
impl SignupMutation for SignupClient {
    #[tracing::instrument(name = "Submitting a signup", skip(self, name))]
    async fn create_signup(
        &self,
        email: &str,
        name: Option<&str>,
    ) -> Result<MutationResult, MutationError> {
        let url = format!("{}/signups", self.base_url);
        let request = SignupRequest {
            email: email.to_string(),
            name: name.map(str::to_string),
        };

        let response = self.http_client.post(&url).json(&request).send().await?;

        match response.status() {
            StatusCode::OK | StatusCode::BAD_REQUEST | StatusCode::CONFLICT => {
                let body: SignupResponse = response.json().await?;
                Ok(body.into())
            }
            status => Err(MutationError::UnexpectedStatus(status)),
        }
    }
}
