use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::signups::{create_signup, SignupError};
use crate::startup::AppState;

#[derive(Debug, Deserialize, Serialize)]
pub struct SignupRequest {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// `{"success": true, "id": ..}` or `{"success": false, "error": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SignupResponse {
    Created { success: True, id: Uuid },
    Failed { success: False, error: String },
}

impl SignupResponse {
    pub fn created(id: Uuid) -> Self {
        Self::Created { success: True, id }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            success: False,
            error: error.into(),
        }
    }
}

/// Serializes as the literal `true` and only deserializes from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct True;

/// Serializes as the literal `false` and only deserializes from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct False;

macro_rules! bool_literal {
    ($ty:ident, $value:literal) => {
        impl Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_bool($value)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                match bool::deserialize(deserializer)? {
                    $value => Ok($ty),
                    other => Err(serde::de::Error::custom(format!(
                        "expected `success` to be {}, got {}",
                        $value, other
                    ))),
                }
            }
        }
    };
}

bool_literal!(True, true);
bool_literal!(False, false);

#[tracing::instrument(
    name = "Adding a new signup",
    skip(state, request),
    fields(
        signup_email = %request.email,
        signup_name = ?request.name
    ),
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<SignupResponse>, SignupError> {
    let store = state.store.as_deref().ok_or(SignupError::StoreUnavailable)?;
    let id = create_signup(store, request.email, request.name).await?;

    Ok(Json(SignupResponse::created(id)))
}

impl IntoResponse for SignupError {
    fn into_response(self) -> Response {
        let status = match self {
            SignupError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
            SignupError::AlreadySignedUp => StatusCode::CONFLICT,
            SignupError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            SignupError::Unexpected(_) => {
                tracing::error!(error = ?self, "Signup failed unexpectedly");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(SignupResponse::failed(self.public_message()))).into_response()
    }
}
