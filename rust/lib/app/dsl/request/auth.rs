//! Auth requests.

use agora_client::SignupForm;

/// Login with username + password.
#[derive(Debug, Clone)]
pub struct LoginReq {
    pub username: String,
    pub password: String,
}

impl LoginReq {
    pub const PATH: &'static str = "auth/login";
}

/// Create an account and sign in with it.
#[derive(Debug, Clone)]
pub struct SignupReq {
    pub form: SignupForm,
}

impl SignupReq {
    pub const PATH: &'static str = "auth/signup";
}

/// Logout: destroy the session.
#[derive(Debug, Clone)]
pub struct LogoutReq;

impl LogoutReq {
    pub const PATH: &'static str = "auth/logout";
}
