//! JWT principal tokens using the RS256 algorithm.
//!
//! Tokens are issued by the external identity service. This service only
//! needs the public key to validate them; a signing key is optional and is
//! used by operator tooling and integration tests to mint tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("No signing key configured")]
    SigningDisabled,
}

/// Principal claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Role name (admin, base_commander, logistics_officer)
    pub role: String,
    /// Assigned base, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_id: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// JWT ID
    pub jti: String,
}

/// Configuration for JWT validation and, optionally, token generation.
#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: Option<EncodingKey>,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    /// Access token expiration in seconds (default: 3600)
    pub access_token_expiry_secs: i64,
    /// Leeway in seconds for clock skew tolerance (default: 30)
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("algorithm", &self.algorithm)
            .field("access_token_expiry_secs", &self.access_token_expiry_secs)
            .field("leeway_secs", &self.leeway_secs)
            .field("can_sign", &self.encoding_key.is_some())
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

/// Default leeway in seconds for clock skew tolerance
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Default access token lifetime in seconds
pub const DEFAULT_ACCESS_TOKEN_EXPIRY_SECS: i64 = 3600;

impl JwtConfig {
    /// Creates a validation-only config from an RSA public key in PEM format.
    pub fn from_public_key(public_key_pem: &str, leeway_secs: u64) -> Result<Self, JwtError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(format!("Invalid public key: {}", e)))?;

        Ok(Self {
            encoding_key: None,
            decoding_key,
            algorithm: Algorithm::RS256,
            access_token_expiry_secs: DEFAULT_ACCESS_TOKEN_EXPIRY_SECS,
            leeway_secs,
        })
    }

    /// Adds an RSA private key so the config can also issue tokens.
    pub fn with_signing_key(
        mut self,
        private_key_pem: &str,
        access_token_expiry_secs: i64,
    ) -> Result<Self, JwtError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(format!("Invalid private key: {}", e)))?;
        self.encoding_key = Some(encoding_key);
        self.access_token_expiry_secs = access_token_expiry_secs;
        Ok(self)
    }

    /// Creates a JwtConfig for testing with HS256 symmetric key.
    /// DO NOT use in production - only for tests.
    #[cfg(test)]
    pub fn new_for_testing(secret: &str) -> Self {
        Self {
            encoding_key: Some(EncodingKey::from_secret(secret.as_bytes())),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
            access_token_expiry_secs: 900,
            leeway_secs: 0,
        }
    }

    /// Returns true when a signing key is configured.
    pub fn can_sign(&self) -> bool {
        self.encoding_key.is_some()
    }

    /// Generates an access token for the given principal.
    ///
    /// Returns the encoded token and its `jti`.
    pub fn generate_access_token(
        &self,
        user_id: Uuid,
        role: &str,
        base_id: Option<Uuid>,
    ) -> Result<(String, String), JwtError> {
        let encoding_key = self.encoding_key.as_ref().ok_or(JwtError::SigningDisabled)?;

        let now = Utc::now();
        let jti = Uuid::new_v4().to_string();
        let exp = (now + Duration::seconds(self.access_token_expiry_secs)).timestamp();

        let claims = Claims {
            sub: user_id.to_string(),
            role: role.to_string(),
            base_id: base_id.map(|id| id.to_string()),
            exp,
            iat: now.timestamp(),
            jti: jti.clone(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))?;

        Ok((token, jti))
    }

    /// Validates a token and returns its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                _ => JwtError::DecodingError(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}

/// Extracts user ID from validated claims.
pub fn extract_user_id(claims: &Claims) -> Result<Uuid, JwtError> {
    Uuid::parse_str(&claims.sub).map_err(|_| JwtError::InvalidToken)
}

/// Extracts the assigned base from validated claims.
///
/// An absent claim is `Ok(None)`; a present but malformed one is an error.
pub fn extract_base_id(claims: &Claims) -> Result<Option<Uuid>, JwtError> {
    claims
        .base_id
        .as_deref()
        .map(|raw| Uuid::parse_str(raw).map_err(|_| JwtError::InvalidToken))
        .transpose()
}
