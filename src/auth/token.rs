use crate::error::AppError;
use crate::models::{Role, User};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Fixed issuer label stamped into every token.
pub const TOKEN_ISSUER: &str = "todo-api";

/// Tokens live for one day, then they are gone.
const TOKEN_TTL_HOURS: i64 = 24;

/// The claims encoded within a token: the registered set plus the two
/// custom claims (`email`, `role`) this service relies on.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Custom claim: the user's email address.
    pub email: String,
    /// Custom claim: the user's role as its textual name (e.g. "PREMIUM").
    pub role: String,
    /// Registered claim: who issued the token.
    pub iss: String,
    /// Registered claim: issued-at, seconds since epoch.
    pub iat: i64,
    /// Registered claim: expiry, seconds since epoch (`iat` + 24h).
    pub exp: i64,
    /// Registered claim: subject, the user's identifier.
    pub sub: String,
}

/// The verified identity recovered from a valid token. Produced only by
/// successful validation; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenUserInfo {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

/// Issues and validates HS512-signed identity tokens.
///
/// The signing secret is injected once at construction and held as derived
/// key material for the process lifetime. Rotating the secret means
/// restarting the process and invalidates every outstanding token; there is
/// no multi-key grace period.
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenProvider {
    /// Derives the symmetric signing keys from the configured secret.
    /// The secret's minimum length is enforced by `Config::from_env`.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Creates a signed token binding the user's id, email, and role.
    ///
    /// Expiry is fixed at issued-at + 24 hours. The output is the standard
    /// three-part compact form (`header.claims.signature`).
    pub fn create_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expiry = now + Duration::hours(TOKEN_TTL_HOURS);

        let claims = Claims {
            email: user.email.clone(),
            role: user.role.to_string(),
            iss: TOKEN_ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            sub: user.id.to_string(),
        };

        encode(&Header::new(Algorithm::HS512), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Verifies a presented token and decodes its claims.
    ///
    /// The signature is checked against the configured secret and expiry is
    /// enforced with zero leeway. Failures are distinguishable
    /// (`TokenMalformed`, `TokenSignatureInvalid`, `TokenExpired`) and never
    /// expose partial claims. A role claim outside the known set is rejected
    /// as malformed rather than defaulted.
    pub fn validate_and_get_token_user_info(&self, token: &str) -> Result<TokenUserInfo, AppError> {
        let mut validation = Validation::new(Algorithm::HS512);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        let claims = data.claims;
        log::debug!("decoded claims: {:?}", claims);

        let role = claims
            .role
            .parse::<Role>()
            .map_err(|e| AppError::TokenMalformed(e.to_string()))?;

        Ok(TokenUserInfo {
            user_id: claims.sub,
            email: claims.email,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    const TEST_SECRET: &str =
        "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    fn sample_user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            email: "premium@example.com".to_string(),
            password_hash: "irrelevant".to_string(),
            role,
            joined_at: Utc::now(),
        }
    }

    fn sign_claims(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS512),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_round_trip_preserves_identity() {
        let provider = TokenProvider::new(TEST_SECRET);
        let user = sample_user(Role::Premium);

        let token = provider.create_token(&user).unwrap();
        let info = provider.validate_and_get_token_user_info(&token).unwrap();

        assert_eq!(info.user_id, user.id.to_string());
        assert_eq!(info.email, user.email);
        assert_eq!(info.role, Role::Premium);
    }

    #[test]
    fn test_token_has_three_parts_and_fixed_issuer() {
        let provider = TokenProvider::new(TEST_SECRET);
        let token = provider.create_token(&sample_user(Role::User)).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let mut validation = Validation::new(Algorithm::HS512);
        validation.leeway = 0;
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(TEST_SECRET.as_bytes()),
            &validation,
        )
        .unwrap();
        assert_eq!(data.claims.iss, TOKEN_ISSUER);
        assert_eq!(data.claims.exp - data.claims.iat, TOKEN_TTL_HOURS * 3600);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let provider = TokenProvider::new(TEST_SECRET);
        let now = Utc::now();
        let claims = Claims {
            email: "late@example.com".to_string(),
            role: "USER".to_string(),
            iss: TOKEN_ISSUER.to_string(),
            iat: (now - Duration::hours(48)).timestamp(),
            exp: (now - Duration::hours(24)).timestamp(),
            sub: "user-1".to_string(),
        };
        let token = sign_claims(&claims, TEST_SECRET);

        match provider.validate_and_get_token_user_info(&token) {
            Err(AppError::TokenExpired) => {}
            other => panic!("expected TokenExpired, got {:?}", other),
        }
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let issuing = TokenProvider::new("another-512-bit-class-secret-another-512-bit-class-secret!!!!!!!");
        let verifying = TokenProvider::new(TEST_SECRET);

        let token = issuing.create_token(&sample_user(Role::User)).unwrap();
        match verifying.validate_and_get_token_user_info(&token) {
            Err(AppError::TokenSignatureInvalid) => {}
            other => panic!("expected TokenSignatureInvalid, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let provider = TokenProvider::new(TEST_SECRET);
        for garbage in ["", "not-a-token", "a.b", "a.b.c.d"] {
            match provider.validate_and_get_token_user_info(garbage) {
                Err(AppError::TokenMalformed(_)) => {}
                other => panic!("expected TokenMalformed for {:?}, got {:?}", garbage, other),
            }
        }
    }

    #[test]
    fn test_unknown_role_claim_is_rejected() {
        let provider = TokenProvider::new(TEST_SECRET);
        let now = Utc::now();
        let claims = Claims {
            email: "odd@example.com".to_string(),
            role: "SUPERUSER".to_string(),
            iss: TOKEN_ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
            sub: "user-2".to_string(),
        };
        let token = sign_claims(&claims, TEST_SECRET);

        match provider.validate_and_get_token_user_info(&token) {
            Err(AppError::TokenMalformed(msg)) => {
                assert!(msg.contains("SUPERUSER"));
            }
            other => panic!("expected TokenMalformed, got {:?}", other),
        }
    }
}
