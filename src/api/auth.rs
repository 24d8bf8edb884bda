//! Bearer-token authentication for the parse API.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;

use super::routes::AppState;
use crate::error::ApiError;

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Proof that the request carried an accepted bearer token.
///
/// Runs before the body is read, so an unauthenticated request is rejected
/// with 401 whatever its body looks like.
#[derive(Debug, Clone, Copy)]
pub struct Authenticated;

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(&parts.headers) {
            Some(token) if state.config.accepts_token(token) => Ok(Self),
            Some(_) => {
                debug!(path = %parts.uri.path(), "Rejected request with unknown bearer token");
                Err(ApiError::Unauthorized)
            }
            None => {
                debug!(path = %parts.uri.path(), "Rejected request without bearer token");
                Err(ApiError::Unauthorized)
            }
        }
    }
}
