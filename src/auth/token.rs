use crate::config::Config;
use crate::error::AppError;
use crate::models::User;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's id.
    pub sub: Uuid,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Issues and verifies HS256 bearer tokens with a fixed key and expiry window.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in: i64,
}

impl TokenService {
    /// Builds a token service signing with `secret`; tokens live for `expires_in` seconds.
    ///
    /// Returns `AppError::Signing` if the secret is empty.
    pub fn new(secret: &str, expires_in: i64) -> Result<Self, AppError> {
        if secret.is_empty() {
            return Err(AppError::Signing("signing key is not configured".into()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expires_in,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(&config.jwt_secret, config.jwt_expires_in)
    }

    pub fn expires_in(&self) -> i64 {
        self.expires_in
    }

    /// Issues a token for `user` using the configured expiry window.
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        self.issue_with_expiry(user, self.expires_in)
    }

    /// Issues a token for `user` that expires `expires_in` seconds from now.
    pub fn issue_with_expiry(&self, user: &User, expires_in: i64) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            iat: now,
            exp: now + expires_in,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Signing(format!("Failed to generate token: {}", e)))
    }

    /// Verifies signature and expiry of `token` and returns its claims.
    ///
    /// Returns `AppError::Unauthorized` if the token is malformed, its signature is
    /// invalid, or it has expired.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }
}
