//! The waitlist form as a state machine.
//!
//! `Idle --submit--> Loading --> Success | Error`. Editing the email clears
//! an error; `sign_up_another` leaves `Success`. Failures are never retried.

use crate::client::{MutationError, MutationResult, SignupMutation};
use crate::domain::is_valid_email;
use crate::signups::{GENERIC_FAILURE_MESSAGE, INVALID_EMAIL_MESSAGE};

pub const EMAIL_REQUIRED_MESSAGE: &str = "Email is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Default)]
pub struct SignupForm {
    email: String,
    name: String,
    state: FormState,
    error_message: Option<String>,
}

impl SignupForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Only shown while the form is in the error state.
    pub fn error_message(&self) -> Option<&str> {
        match self.state {
            FormState::Error => self.error_message.as_deref(),
            _ => None,
        }
    }

    /// Inputs are disabled while a request is in flight.
    pub fn is_submittable(&self) -> bool {
        !matches!(self.state, FormState::Loading | FormState::Success)
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        if self.state == FormState::Loading {
            return;
        }
        self.email = email.into();
        if self.state == FormState::Error {
            self.state = FormState::Idle;
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if self.state == FormState::Loading {
            return;
        }
        self.name = name.into();
    }

    /// Validates locally, then runs the mutation.
    #[tracing::instrument(name = "Submitting the signup form", skip(self, mutation), fields(email = %self.email))]
    pub async fn submit(&mut self, mutation: &dyn SignupMutation) -> FormState {
        if !self.is_submittable() {
            return self.state;
        }
        self.error_message = None;

        if self.email.trim().is_empty() {
            return self.fail(EMAIL_REQUIRED_MESSAGE);
        }
        if !is_valid_email(&self.email) {
            return self.fail(INVALID_EMAIL_MESSAGE);
        }

        self.state = FormState::Loading;
        let email = self.email.trim().to_owned();
        let name = Some(self.name.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_owned);

        let mut in_flight = InFlight {
            form: self,
            settled: false,
        };
        let outcome = mutation.create_signup(&email, name.as_deref()).await;
        in_flight.settled = true;

        in_flight.form.settle(outcome)
    }

    fn settle(&mut self, outcome: Result<MutationResult, MutationError>) -> FormState {
        match outcome {
            Ok(MutationResult::Success { id }) => {
                tracing::info!(signup_id = %id, "Signed up");
                self.email.clear();
                self.name.clear();
                self.state = FormState::Success;
                self.state
            }
            Ok(MutationResult::Failure { error }) => self.fail(error),
            Err(error) => {
                tracing::warn!(error = ?error, "Signup request failed");
                self.fail(GENERIC_FAILURE_MESSAGE)
            }
        }
    }

    /// "Sign up another email": back to a blank idle form.
    pub fn sign_up_another(&mut self) {
        if self.state == FormState::Success {
            *self = Self::default();
        }
    }

    fn fail(&mut self, message: impl Into<String>) -> FormState {
        self.error_message = Some(message.into());
        self.state = FormState::Error;
        self.state
    }
}

/// Moves a form left in `Loading` to `Error` when the submit future is dropped mid-call.
struct InFlight<'a> {
    form: &'a mut SignupForm,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("Signup request was cancelled");
            self.form.fail(GENERIC_FAILURE_MESSAGE);
        }
    }
}
