use crate::domain::signup_email::SignupEmail;
use crate::domain::signup_name::SignupName;

#[derive(Debug, Clone)]
pub struct NewSignup {
    pub email: SignupEmail,
    pub name: Option<SignupName>,
}
