//! Bearer-token helpers for integration tests.
//!
//! Tokens are signed with the same claims layout the API issues, so handlers
//! and extractors under test run their real validation path.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use snapchef_auth_types::token::{JwtClaims, TokenType};
use snapchef_domain::user::UserRole;

/// Secret shared by tests that build an app state and mint tokens.
pub const TEST_JWT_SECRET: &str = "snapchef-test-jwt-secret";

/// Configurable identity for test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub username: String,
    pub role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: Uuid, username: &str, role: UserRole) -> Self {
        Self {
            user_id,
            username: username.to_owned(),
            role,
        }
    }

    pub fn user() -> Self {
        Self::new(Uuid::new_v4(), "home_cook", UserRole::User)
    }

    pub fn moderator() -> Self {
        Self::new(Uuid::new_v4(), "head_chef", UserRole::Moderator)
    }

    /// Sign a token of the given type valid for ten minutes.
    pub fn token(&self, typ: TokenType, secret: &str) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let claims = JwtClaims {
            sub: self.user_id.to_string(),
            username: self.username.clone(),
            role: self.role,
            typ,
            jti: Uuid::new_v4().simple().to_string(),
            iat: now,
            exp: now + 600,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    /// `Bearer <access token>` signed with [`TEST_JWT_SECRET`].
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token(TokenType::Access, TEST_JWT_SECRET))
    }

    /// Return headers as a logged-in client would send them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, HeaderValue::from_str(&self.bearer()).unwrap());
        map
    }
}
