mod helpers;
mod home;
mod signups;
