pub mod rate_limit;

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims embedded in every session token. Tokens are the only session
/// mechanism: nothing is persisted server-side, so validity is purely
/// signature + expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Numeric user id (matches `users.id`).
    pub id: i32,

    /// Role asserted at login time. Everything issued today is "user".
    pub role: String,

    /// Issued-at (Unix timestamp, seconds).
    pub iat: i64,

    /// Expiry (Unix timestamp, seconds), issued-at plus the configured TTL.
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signing failed")]
    Sign(#[source] jsonwebtoken::errors::Error),

    /// Malformed token, bad signature, or past expiry. Collapsed to one
    /// variant so callers cannot leak which check failed.
    #[error("invalid or expired token")]
    Invalid,
}

/// Authenticated caller context injected into request extensions by the
/// auth middleware.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub role: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            role: claims.role,
        }
    }
}

/// Issues and verifies HS256 session tokens. The signing secret comes from
/// configuration and is mandatory; there is no fallback value.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &str, ttl_seconds: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds: ttl_seconds as i64,
        }
    }

    pub fn issue(&self, user_id: i32, role: &str) -> Result<String, TokenError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            id: user_id,
            role: role.to_string(),
            iat: now,
            exp: now + self.ttl_seconds,
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(TokenError::Sign)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("unit-test-secret", 3600)
    }

    #[test]
    fn issued_token_verifies_to_issuing_identity() {
        let tokens = service();
        let token = tokens.issue(42, "user").unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.id, 42);
        assert_eq!(claims.role, "user");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let tokens = service();
        let token = tokens.issue(42, "user").unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        let flipped = if parts[2].starts_with('A') { "B" } else { "A" };
        let forged_sig = format!("{flipped}{}", &parts[2][1..]);
        parts[2] = &forged_sig;
        let forged = parts.join(".");

        assert!(matches!(tokens.verify(&forged), Err(TokenError::Invalid)));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = TokenService::new("other-secret", 3600)
            .issue(42, "user")
            .unwrap();
        assert!(matches!(service().verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Issued far enough in the past to clear the default decode leeway.
        let token = {
            let tokens = service();
            let now = chrono::Utc::now().timestamp();
            let claims = Claims {
                id: 42,
                role: "user".to_string(),
                iat: now - 7200,
                exp: now - 3600,
            };
            jsonwebtoken::encode(&Header::default(), &claims, &tokens.encoding).unwrap()
        };

        assert!(matches!(service().verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            service().verify("not-a-token"),
            Err(TokenError::Invalid)
        ));
    }
}
