use serde::{Deserialize, Serialize};

use crate::models::Role;

/// Login request payload for `POST /auth/login`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "bearer")]
    pub token_type: String,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

fn bearer() -> String {
    "bearer".to_string()
}

/// The signed-in user as reported at login.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub username: String,
    pub roles: Vec<Role>,
}

/// Claims read from the access token payload. The signature is the
/// backend's business; this side only reads the subject and expiry.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TokenClaims {
    pub sub: Option<String>,
    pub exp: Option<i64>,
}
