//! Bearer token authentication middleware.
//!
//! Validates the `Authorization: Bearer <jwt>` header once per request and
//! stores the resolved [`UserAuth`] in request extensions, where its
//! extractor in [`crate::extractors`] picks it up.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use domain::models::{Principal, Role};
use shared::jwt::{extract_base_id, extract_user_id, JwtConfig, JwtError};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// Authenticated caller resolved from a validated token.
#[derive(Debug, Clone)]
pub struct UserAuth {
    pub user_id: Uuid,
    /// Role claim exactly as issued; checked when a principal is built.
    pub role: String,
    pub base_id: Option<Uuid>,
    pub jti: String,
}

impl UserAuth {
    /// Validates a token and reads the principal claims from it.
    pub fn validate(jwt_config: &JwtConfig, token: &str) -> Result<Self, JwtError> {
        let claims = jwt_config.validate_token(token)?;
        Ok(Self {
            user_id: extract_user_id(&claims)?,
            base_id: extract_base_id(&claims)?,
            role: claims.role,
            jti: claims.jti,
        })
    }

    /// The principal passed to every recorder and query.
    ///
    /// A token carrying a role this service does not know is forbidden.
    pub fn principal(&self) -> Result<Principal, ApiError> {
        let role: Role = self.role.parse().map_err(|_| {
            ApiError::Forbidden("Access denied. Unknown role.".to_string())
        })?;
        Ok(Principal::new(self.user_id, role, self.base_id))
    }
}

/// Reads the bearer token from the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization header format".to_string()))
}

/// Authenticates the request from the header, without touching extensions.
pub fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<UserAuth, ApiError> {
    let token = bearer_token(headers)?;
    UserAuth::validate(&state.jwt, token).map_err(|e| {
        tracing::debug!(error = %e, "JWT validation failed");
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })
}

/// Middleware that rejects requests without a valid bearer token.
pub async fn require_user_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    match authenticate(&state, req.headers()) {
        Ok(auth) => {
            req.extensions_mut().insert(auth);
            next.run(req).await
        }
        Err(e) => e.into_response(),
    }
}
