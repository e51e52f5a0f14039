//! Bearer-token identity extractors.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use http::HeaderMap;
use http::request::Parts;
use uuid::Uuid;

use snapchef_core::error::AppError;
use snapchef_domain::user::UserRole;

use crate::token::{TokenInfo, validate_access_token};

/// HMAC secret used to validate access tokens.
///
/// Services expose it to the extractors through `FromRef<AppState>`.
#[derive(Clone)]
pub struct TokenSecret(Arc<str>);

impl TokenSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Arc::from(secret.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Caller identity taken from a valid `Authorization: Bearer <access token>`.
///
/// Returns 401 if the header is absent, not a bearer credential, or the token
/// fails validation. Role and ownership checks (403) happen in use cases.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
    pub role: UserRole,
}

impl Identity {
    pub fn is_moderator(&self) -> bool {
        self.role.is_moderator()
    }
}

impl From<TokenInfo> for Identity {
    fn from(info: TokenInfo) -> Self {
        Self {
            user_id: info.user_id,
            username: info.username,
            role: info.role,
        }
    }
}

/// `Ok(None)` when no `Authorization` header is present at all.
fn identity_from_headers(headers: &HeaderMap, secret: &str) -> Result<Option<Identity>, AppError> {
    if !headers.contains_key(http::header::AUTHORIZATION) {
        return Ok(None);
    }
    let bearer = headers
        .typed_get::<Authorization<Bearer>>()
        .ok_or(AppError::Unauthorized)?;
    let info = validate_access_token(bearer.token(), secret).map_err(|e| {
        tracing::debug!(error = %e, "rejected bearer token");
        AppError::Unauthorized
    })?;
    Ok(Some(info.into()))
}

impl<S> FromRequestParts<S> for Identity
where
    TokenSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    // Resolve synchronously and hand back a 'static future so the borrowed
    // `parts` and `state` are not captured across the await point.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = TokenSecret::from_ref(state);
        let result = identity_from_headers(&parts.headers, secret.as_str())
            .and_then(|identity| identity.ok_or(AppError::Unauthorized));
        async move { result }
    }
}

/// Like [`Identity`], but anonymous callers are allowed.
///
/// Yields `None` without an `Authorization` header; a header carrying a bad
/// token is still a 401 so clients notice expired sessions.
#[derive(Debug, Clone)]
pub struct MaybeIdentity(pub Option<Identity>);

impl<S> FromRequestParts<S> for MaybeIdentity
where
    TokenSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = TokenSecret::from_ref(state);
        let result = identity_from_headers(&parts.headers, secret.as_str()).map(MaybeIdentity);
        async move { result }
    }
}
