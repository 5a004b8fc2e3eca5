pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use crate::models::Role;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export the surface handlers and tests actually use.
pub use extractors::AuthUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenProvider, TokenUserInfo, TOKEN_ISSUER};

/// Payload for registering a new account.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Payload for signing in.
#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Response after a successful signin: the token plus the identity it binds.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub email: String,
    pub role: Role,
}
