mod new_signup;
mod signup_email;
mod signup_name;
mod signup_record;

pub use new_signup::NewSignup;
pub use signup_email::{is_valid_email, SignupEmail};
pub use signup_name::SignupName;
pub use signup_record::SignupRecord;
