use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{NewSignup, SignupEmail, SignupRecord};
use crate::store::{InsertOutcome, SignupStore, StoreError};

/// Signups keyed by normalized email.
#[derive(Default)]
pub struct InMemoryStore {
    signups: Mutex<HashMap<String, SignupRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.signups.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.signups.lock().await.is_empty()
    }
}

#[async_trait]
impl SignupStore for InMemoryStore {
    async fn lookup_by_email(
        &self,
        email: &SignupEmail,
    ) -> Result<Option<SignupRecord>, StoreError> {
        Ok(self.signups.lock().await.get(email.as_ref()).cloned())
    }

    async fn insert(&self, signup: &NewSignup) -> Result<InsertOutcome, StoreError> {
        let mut signups = self.signups.lock().await;
        if signups.contains_key(signup.email.as_ref()) {
            return Ok(InsertOutcome::AlreadyExists);
        }

        let record = SignupRecord {
            id: Uuid::new_v4(),
            creation_time: Utc::now(),
            email: signup.email.as_ref().to_string(),
            name: signup.name.as_ref().map(|n| n.as_ref().to_owned()),
        };
        signups.insert(record.email.clone(), record.clone());

        Ok(InsertOutcome::Inserted(record))
    }
}
