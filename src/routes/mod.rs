mod health_check;
mod home;
mod signups;

pub use health_check::check_health;
pub use home::home;
pub use signups::{signup, SignupRequest, SignupResponse};
