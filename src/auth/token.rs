//! Session token issuance and verification
//!
//! A session token is a signed claims set `{sub, username, csrf, iat, exp}`
//! with a fixed one-hour lifetime. The CSRF nonce is a fresh UUIDv4 per
//! login; it travels inside the signed token (cookie) and, separately, in
//! the `X-CSRF-Token` header, so a cross-site request that can force the
//! cookie along cannot also supply the matching header.
//!
//! Expiry is checked here against an explicit clock rather than inside the
//! JWT library, so tests can pin the verification time.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed session lifetime in seconds.
pub const TOKEN_LIFETIME_SECS: i64 = 3600;

/// Name of the cookie carrying the signed token.
pub const TOKEN_COOKIE: &str = "token";

/// Header carrying the CSRF nonce, on the login response and on every
/// protected request.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Signed session claims.
///
/// Decoding a token into this type is the structural validation: a token
/// that deserializes has every required field. `username` is informational
/// only and must never drive an authorization decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated principal id, stable per user
    pub sub: String,
    /// Denormalized display name
    pub username: String,
    /// Double-submit CSRF nonce, fresh per login
    pub csrf: String,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds), always `iat + TOKEN_LIFETIME_SECS`
    pub exp: i64,
}

/// Result of a successful login: the signed token for the cookie and the
/// raw nonce for the `X-CSRF-Token` response header.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub csrf: String,
}

/// Why a presented token was rejected.
///
/// All variants surface to the client as the same generic "invalid token"
/// response; the distinction exists for logging and tests only.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("token has no subject")]
    MissingSubject,
    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

/// Signs and verifies session tokens with a process-wide secret.
///
/// The secret is injected at construction time, never read from ambient
/// state, so tests can run with distinct secrets per case.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared against the caller-supplied clock in
        // `verify_at`, with zero leeway.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issue a new session token for an already-authenticated user.
    ///
    /// Runs only after password verification has succeeded; it has no
    /// failure modes of its own beyond the signing call.
    pub fn issue(&self, user_id: i64, username: &str) -> Result<IssuedToken, TokenError> {
        self.issue_at(user_id, username, Utc::now())
    }

    /// Issue a token as of an explicit instant.
    pub fn issue_at(
        &self,
        user_id: i64,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let csrf = Uuid::new_v4().to_string();
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            csrf: csrf.clone(),
            iat: now.timestamp(),
            exp: now.timestamp() + TOKEN_LIFETIME_SECS,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(IssuedToken { token, csrf })
    }

    /// Verify a token against the current wall clock.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as of an explicit instant.
    ///
    /// Signature and structure are checked by the typed decode; expiry is
    /// checked afterwards. A token is valid through `exp` inclusive and
    /// rejected from `exp + 1` on.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        if claims.sub.trim().is_empty() {
            return Err(TokenError::MissingSubject);
        }
        if now.timestamp() > claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
